//! Supersampling CAPTCHA renderer.
//!
//! Everything is drawn at `scale` times the requested size and then filtered
//! down with a bicubic kernel.

use crate::config::{CaptchaError, Result};
use crate::distort::stroke::f64_to_i32;
use crate::producer::{RenderConfig, RenderedCaptcha};
use crate::render::layout::{advance, centered_origin, colors_per_character, measure};
use ab_glyph::PxScale;
use image::RgbImage;
use image::imageops::{self, FilterType};
use imageproc::drawing::draw_text_mut;
use rand::RngCore;
use tracing::{debug, trace};

/// Oversampling factor used unless another is requested.
pub const DEFAULT_SCALE: u8 = 3;
const MAX_SCALE: u8 = 8;
/// Largest supersampled canvas, in pixels.
pub const MAX_CANVAS_PIXELS: u64 = 1 << 26;

/// Turns a render configuration into a finished image and its answer.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    scale: u8,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
        }
    }
}

impl Renderer {
    /// Creates a renderer with a custom oversampling factor.
    ///
    /// # Errors
    ///
    /// Returns `CaptchaError::Config` if `scale` is 0 or above 8.
    pub fn with_scale(scale: u8) -> Result<Self> {
        if scale == 0 || scale > MAX_SCALE {
            return Err(CaptchaError::config(format!(
                "supersampling scale must be within 1..={MAX_SCALE}, got {scale}"
            )));
        }
        Ok(Self { scale })
    }

    #[must_use]
    pub const fn scale(&self) -> u8 {
        self.scale
    }

    /// Renders one CAPTCHA using the calling thread's random source.
    ///
    /// # Errors
    ///
    /// Returns `CaptchaError::Generation` if any pipeline stage fails.
    pub fn render(&self, config: &RenderConfig) -> Result<RenderedCaptcha> {
        let mut rng = rand::rng();
        self.render_with(config, &mut rng)
    }

    /// Renders one CAPTCHA drawing all randomness from `rng`.
    ///
    /// # Errors
    ///
    /// Returns `CaptchaError::Generation` if the canvas cannot be sized or an
    /// interferer or colorizer fails. Nothing is returned for a failed render.
    pub fn render_with(
        &self,
        config: &RenderConfig,
        rng: &mut dyn RngCore,
    ) -> Result<RenderedCaptcha> {
        let content = config.generator().generate(rng);
        trace!(draw_text = %content.draw_text(), "Content generated");
        let scale = u32::from(self.scale);

        let (width, height) = (config.width(), config.height());
        let (real_width, real_height) = canvas_size(width, height, scale)
            .map_err(|msg| CaptchaError::generation("canvas", msg))?;

        let mut canvas = RgbImage::from_pixel(real_width, real_height, config.background());

        if let Some(interferer) = config.interferer() {
            interferer
                .draw(&mut canvas, rng)
                .map_err(|e| CaptchaError::generation("interferer", e))?;
        }

        let face = config
            .font_provider()
            .font(rng)
            .scaled(f32::from(self.scale));
        let px_scale = PxScale::from(face.size());
        let text = content.draw_text();
        let metrics = measure(&face, text);
        let (mut pen_x, pen_y) = centered_origin(real_width, real_height, &metrics);
        let top = f64_to_i32(f64::from(pen_y));

        let per_character = colors_per_character(&content);
        if per_character {
            let mut buf = [0u8; 4];
            for ch in text.chars() {
                let color = config
                    .colorizer()
                    .next_color(rng)
                    .map_err(|e| CaptchaError::generation("colorizer", e))?;
                let glyph = ch.encode_utf8(&mut buf);
                draw_text_mut(
                    &mut canvas,
                    color,
                    f64_to_i32(f64::from(pen_x)),
                    top,
                    px_scale,
                    face.font(),
                    glyph,
                );
                pen_x += advance(&face, ch);
            }
        } else {
            let color = config
                .colorizer()
                .next_color(rng)
                .map_err(|e| CaptchaError::generation("colorizer", e))?;
            draw_text_mut(
                &mut canvas,
                color,
                f64_to_i32(f64::from(pen_x)),
                top,
                px_scale,
                face.font(),
                text,
            );
        }

        let image = imageops::resize(&canvas, width, height, FilterType::CatmullRom);
        debug!(
            width,
            height,
            scale = self.scale,
            per_character,
            "Captcha rendered"
        );

        let (answer, _) = content.into_parts();
        Ok(RenderedCaptcha::new(answer, image))
    }
}

/// Supersampled canvas dimensions, rejecting sizes the pixel buffer cannot hold.
fn canvas_size(width: u32, height: u32, scale: u32) -> std::result::Result<(u32, u32), String> {
    let (Some(real_width), Some(real_height)) =
        (width.checked_mul(scale), height.checked_mul(scale))
    else {
        return Err(format!("{width}x{height} at {scale}x overflows the canvas size"));
    };
    let pixels = u64::from(real_width) * u64::from(real_height);
    let fits = pixels <= MAX_CANVAS_PIXELS
        && pixels
            .checked_mul(3)
            .and_then(|len| usize::try_from(len).ok())
            .is_some();
    if !fits {
        return Err(format!(
            "{real_width}x{real_height} canvas exceeds {MAX_CANVAS_PIXELS} pixels"
        ));
    }
    Ok((real_width, real_height))
}
