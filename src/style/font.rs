//! Font selection.
//!
//! Providers hand out a parsed face plus the base pixel size to set text in.
//! Any asset parsing happens once, when the provider is built.

use crate::config::{CaptchaError, Result};
use ab_glyph::FontArc;
use rand::{Rng, RngCore};
use std::fmt;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, warn};

const DEFAULT_FONT_BYTES: &[u8] = include_bytes!("../../assets/DejaVuSans-Bold.ttf");
const DEFAULT_FONT_SIZE: f32 = 32.0;
const FONT_EXTENSIONS: [&str; 2] = ["ttf", "otf"];

/// Name of the bundled face used by `DefaultFontProvider` and as the pool fallback.
pub const DEFAULT_FONT_NAME: &str = "DejaVu Sans Bold";

static DEFAULT_FONT: LazyLock<FontArc> = LazyLock::new(|| {
    FontArc::try_from_slice(DEFAULT_FONT_BYTES).expect("Failed to load embedded font")
});

/// Returns the bundled default face.
///
/// # Panics
///
/// Panics if the embedded font data is invalid.
#[must_use]
pub fn default_font() -> FontArc {
    DEFAULT_FONT.clone()
}

/// A parsed face and the pixel size to render it at.
#[derive(Clone)]
pub struct FontFace {
    font: FontArc,
    size: f32,
}

impl FontFace {
    #[must_use]
    pub const fn new(font: FontArc, size: f32) -> Self {
        Self { font, size }
    }

    #[must_use]
    pub const fn font(&self) -> &FontArc {
        &self.font
    }

    #[must_use]
    pub const fn size(&self) -> f32 {
        self.size
    }

    /// Same face with its size multiplied by `factor`.
    #[must_use]
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            font: self.font.clone(),
            size: self.size * factor,
        }
    }
}

impl fmt::Debug for FontFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontFace").field("size", &self.size).finish()
    }
}

/// Supplies the face for each render. Must never fail.
pub trait FontProvider: Send + Sync {
    fn font(&self, rng: &mut dyn RngCore) -> FontFace;
}

fn validate_size(size: f32) -> Result<f32> {
    if size.is_finite() && size > 0.0 {
        Ok(size)
    } else {
        Err(CaptchaError::config(format!(
            "font size must be a positive number, got {size}"
        )))
    }
}

/// Always returns the bundled face at a fixed size.
#[derive(Debug, Clone)]
pub struct DefaultFontProvider {
    face: FontFace,
}

impl Default for DefaultFontProvider {
    fn default() -> Self {
        Self {
            face: FontFace::new(default_font(), DEFAULT_FONT_SIZE),
        }
    }
}

impl DefaultFontProvider {
    /// # Errors
    ///
    /// Returns `CaptchaError::Config` if `size` is not a positive finite number.
    pub fn new(size: f32) -> Result<Self> {
        Ok(Self {
            face: FontFace::new(default_font(), validate_size(size)?),
        })
    }
}

impl FontProvider for DefaultFontProvider {
    fn font(&self, _rng: &mut dyn RngCore) -> FontFace {
        self.face.clone()
    }
}

/// Raw font file contents plus a name used in log messages.
#[derive(Debug, Clone)]
pub struct FontAsset {
    pub name: String,
    pub data: Vec<u8>,
}

impl FontAsset {
    #[must_use]
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    /// Reads every `.ttf` / `.otf` file in `dir`, sorted by file name.
    ///
    /// Files are not parsed here; unreadable fonts are dealt with by the provider.
    ///
    /// # Errors
    ///
    /// Returns `CaptchaError::Io` if the directory or one of its font files cannot be read.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Vec<Self>> {
        let mut paths: Vec<_> = std::fs::read_dir(dir.as_ref())?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.is_file()
                    && path
                        .extension()
                        .and_then(|ext| ext.to_str())
                        .is_some_and(|ext| {
                            FONT_EXTENSIONS
                                .iter()
                                .any(|known| ext.eq_ignore_ascii_case(known))
                        })
            })
            .collect();
        paths.sort();

        let mut assets = Vec::with_capacity(paths.len());
        for path in paths {
            let name = path
                .file_name()
                .map_or_else(String::new, |n| n.to_string_lossy().into_owned());
            assets.push(Self::new(name, std::fs::read(&path)?));
        }
        debug!(dir = %dir.as_ref().display(), count = assets.len(), "Font assets read");
        Ok(assets)
    }
}

/// Picks a face uniformly from a pool parsed up front.
///
/// Assets that fail to parse are logged and skipped. If none survive, the pool
/// holds the bundled default face so selection never fails.
#[derive(Clone)]
pub struct RandomFontProvider {
    fonts: Vec<FontArc>,
    size: f32,
    fallback: bool,
}

impl RandomFontProvider {
    /// # Errors
    ///
    /// Returns `CaptchaError::Config` if `size` is not a positive finite number.
    pub fn new(size: f32, assets: impl IntoIterator<Item = FontAsset>) -> Result<Self> {
        let size = validate_size(size)?;
        let mut provider = Self {
            fonts: Vec::new(),
            size,
            fallback: false,
        };
        provider.rebuild(assets);
        Ok(provider)
    }

    /// Default-sized pool.
    #[must_use]
    pub fn with_default_size(assets: impl IntoIterator<Item = FontAsset>) -> Self {
        let mut provider = Self {
            fonts: Vec::new(),
            size: DEFAULT_FONT_SIZE,
            fallback: false,
        };
        provider.rebuild(assets);
        provider
    }

    /// Discards the current pool and parses `assets` from scratch.
    pub fn rebuild(&mut self, assets: impl IntoIterator<Item = FontAsset>) {
        self.fonts.clear();
        for asset in assets {
            match FontArc::try_from_vec(asset.data) {
                Ok(font) => self.fonts.push(font),
                Err(e) => warn!(asset = %asset.name, error = %e, "Skipping unparseable font asset"),
            }
        }

        self.fallback = self.fonts.is_empty();
        if self.fallback {
            warn!(
                fallback = DEFAULT_FONT_NAME,
                "No usable font assets, falling back to default font"
            );
            self.fonts.push(default_font());
        }
    }

    /// Number of faces in the pool, counting the fallback.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    /// Always false: an empty pool is replaced by the default face.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// Whether the pool is the default face because no asset parsed.
    #[must_use]
    pub const fn uses_fallback(&self) -> bool {
        self.fallback
    }

    #[must_use]
    pub const fn size(&self) -> f32 {
        self.size
    }
}

impl FontProvider for RandomFontProvider {
    fn font(&self, rng: &mut dyn RngCore) -> FontFace {
        let font = match self.fonts.len() {
            0 => default_font(),
            1 => self.fonts[0].clone(),
            n => self.fonts[rng.random_range(0..n)].clone(),
        };
        FontFace::new(font, self.size)
    }
}
