//! Render configuration and the reusable CAPTCHA producer.
//!
//! A `RenderConfig` is validated once when built and never changes afterwards.
//! A `Producer` wraps one and hands out independent CAPTCHAs on demand; it
//! holds no per-call state and can be shared across threads.

use crate::config::{CaptchaError, Result};
use crate::content::{CharGenerator, ContentGenerator};
use crate::distort::{Interferer, LineInterferer};
use crate::render::Renderer;
use crate::style::{Colorizer, DefaultFontProvider, FontProvider, RandomColorizer};
use base64::{Engine, engine::general_purpose::STANDARD};
use image::{ImageFormat, Rgb, RgbImage};
use std::fmt;
use std::io::{Cursor, Seek, Write};
use std::sync::Arc;

pub const DEFAULT_WIDTH: u32 = 120;
pub const DEFAULT_HEIGHT: u32 = 40;
pub const DEFAULT_BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

pub const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Immutable bundle of geometry, background and rendering strategies.
#[derive(Clone)]
pub struct RenderConfig {
    width: u32,
    height: u32,
    generator: Arc<dyn ContentGenerator>,
    interferer: Option<Arc<dyn Interferer>>,
    font_provider: Arc<dyn FontProvider>,
    colorizer: Arc<dyn Colorizer>,
    background: Rgb<u8>,
}

impl RenderConfig {
    /// Starts a builder populated with the defaults: 120x40, four random
    /// alphanumerics, ten random lines, the bundled font at 32px, dark random
    /// ink and a white background.
    #[must_use]
    pub fn builder() -> RenderConfigBuilder {
        RenderConfigBuilder::default()
    }

    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn generator(&self) -> &dyn ContentGenerator {
        self.generator.as_ref()
    }

    #[must_use]
    pub fn interferer(&self) -> Option<&dyn Interferer> {
        self.interferer.as_deref()
    }

    #[must_use]
    pub fn font_provider(&self) -> &dyn FontProvider {
        self.font_provider.as_ref()
    }

    #[must_use]
    pub fn colorizer(&self) -> &dyn Colorizer {
        self.colorizer.as_ref()
    }

    #[must_use]
    pub const fn background(&self) -> Rgb<u8> {
        self.background
    }
}

impl fmt::Debug for RenderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderConfig")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("interferer", &self.interferer.is_some())
            .field("background", &self.background)
            .finish_non_exhaustive()
    }
}

/// Builder for `RenderConfig`. Validation happens once, in `build`.
#[must_use]
pub struct RenderConfigBuilder {
    width: u32,
    height: u32,
    generator: Arc<dyn ContentGenerator>,
    interferer: Option<Arc<dyn Interferer>>,
    font_provider: Arc<dyn FontProvider>,
    colorizer: Arc<dyn Colorizer>,
    background: Rgb<u8>,
}

impl Default for RenderConfigBuilder {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            generator: Arc::new(CharGenerator::default()),
            interferer: Some(Arc::new(LineInterferer::default()) as Arc<dyn Interferer>),
            font_provider: Arc::new(DefaultFontProvider::default()),
            colorizer: Arc::new(RandomColorizer::default()),
            background: DEFAULT_BACKGROUND,
        }
    }
}

impl RenderConfigBuilder {
    pub fn width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    pub fn height(mut self, height: u32) -> Self {
        self.height = height;
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn generator(mut self, generator: impl ContentGenerator + 'static) -> Self {
        self.generator = Arc::new(generator);
        self
    }

    pub fn interferer(mut self, interferer: impl Interferer + 'static) -> Self {
        let interferer: Arc<dyn Interferer> = Arc::new(interferer);
        self.interferer = Some(interferer);
        self
    }

    /// Replaces the interferer with a shared one, or removes it with `None`.
    pub fn shared_interferer(mut self, interferer: Option<Arc<dyn Interferer>>) -> Self {
        self.interferer = interferer;
        self
    }

    /// Renders without any distortion.
    pub fn no_interferer(mut self) -> Self {
        self.interferer = None;
        self
    }

    pub fn font_provider(mut self, font_provider: impl FontProvider + 'static) -> Self {
        self.font_provider = Arc::new(font_provider);
        self
    }

    pub fn colorizer(mut self, colorizer: impl Colorizer + 'static) -> Self {
        self.colorizer = Arc::new(colorizer);
        self
    }

    pub fn background(mut self, background: Rgb<u8>) -> Self {
        self.background = background;
        self
    }

    /// Validates and freezes the configuration.
    ///
    /// # Errors
    ///
    /// Returns `CaptchaError::Config` if the width or height is zero.
    pub fn build(self) -> Result<RenderConfig> {
        if self.width == 0 || self.height == 0 {
            return Err(CaptchaError::config(format!(
                "image dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(RenderConfig {
            width: self.width,
            height: self.height,
            generator: self.generator,
            interferer: self.interferer,
            font_provider: self.font_provider,
            colorizer: self.colorizer,
            background: self.background,
        })
    }
}

/// Reusable factory of CAPTCHAs for one configuration.
#[derive(Debug, Clone)]
pub struct Producer {
    config: Arc<RenderConfig>,
    renderer: Renderer,
}

impl Producer {
    #[must_use]
    pub fn new(config: RenderConfig) -> Self {
        Self::with_renderer(config, Renderer::default())
    }

    #[must_use]
    pub fn with_renderer(config: RenderConfig, renderer: Renderer) -> Self {
        Self {
            config: Arc::new(config),
            renderer,
        }
    }

    #[must_use]
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Renders a fresh CAPTCHA.
    ///
    /// # Errors
    ///
    /// Returns `CaptchaError::Generation` if rendering fails.
    pub fn next_captcha(&self) -> Result<RenderedCaptcha> {
        self.renderer.render(&self.config)
    }
}

impl From<RenderConfig> for Producer {
    fn from(config: RenderConfig) -> Self {
        Self::new(config)
    }
}

/// A finished CAPTCHA: the expected answer and the final image.
#[derive(Debug, Clone)]
pub struct RenderedCaptcha {
    answer: String,
    image: RgbImage,
}

impl RenderedCaptcha {
    pub(crate) const fn new(answer: String, image: RgbImage) -> Self {
        Self { answer, image }
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    #[must_use]
    pub const fn image(&self) -> &RgbImage {
        &self.image
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    #[must_use]
    pub fn into_parts(self) -> (String, RgbImage) {
        (self.answer, self.image)
    }

    /// Encodes the image as PNG into `writer`.
    ///
    /// # Errors
    ///
    /// Returns `CaptchaError::Generation` if encoding or writing fails.
    pub fn write_png<W: Write + Seek>(&self, writer: &mut W) -> Result<()> {
        self.image
            .write_to(writer, ImageFormat::Png)
            .map_err(|e| CaptchaError::generation("encode", e))
    }

    /// Returns the PNG-encoded image.
    ///
    /// # Errors
    ///
    /// Returns `CaptchaError::Generation` if encoding fails.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        let mut png = Vec::new();
        self.write_png(&mut Cursor::new(&mut png))?;
        Ok(png)
    }

    /// Returns the image as a `data:image/png;base64,` URI.
    ///
    /// # Errors
    ///
    /// Returns `CaptchaError::Generation` if encoding fails.
    pub fn to_base64(&self) -> Result<String> {
        Ok(format!(
            "{PNG_DATA_URI_PREFIX}{}",
            STANDARD.encode(self.to_png()?)
        ))
    }
}
