//! Configuration settings.
//!
//! Defines the `Settings` struct and environment variable loading logic.
//! Unparseable numbers fall back to their defaults; unknown names are errors.

use crate::config::{CaptchaError, Result};
use crate::content::{ArithmeticGenerator, CharGenerator};
use crate::distort::{
    BezierInterferer, CompositeInterferer, Interferer, LineInterferer, NoiseInterferer,
    WarpInterferer,
};
use crate::producer::{Producer, RenderConfig};
use crate::style::{DefaultFontProvider, FontAsset, RandomFontProvider};
use image::Rgb;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

/// Which content generator to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorKind {
    /// Random alphanumerics.
    Chars,
    /// `a op b = ?` expressions.
    Arithmetic,
}

impl FromStr for GeneratorKind {
    type Err = CaptchaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "chars" | "char" | "text" => Ok(Self::Chars),
            "arithmetic" | "math" => Ok(Self::Arithmetic),
            other => Err(CaptchaError::config(format!("unknown generator: {other}"))),
        }
    }
}

/// A distortion layer selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterfererKind {
    Line,
    Curve,
    Noise,
    Warp,
}

impl FromStr for InterfererKind {
    type Err = CaptchaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "line" | "lines" => Ok(Self::Line),
            "curve" | "bezier" => Ok(Self::Curve),
            "noise" => Ok(Self::Noise),
            "warp" | "wave" => Ok(Self::Warp),
            other => Err(CaptchaError::config(format!("unknown interferer: {other}"))),
        }
    }
}

impl InterfererKind {
    /// Builds the layer with its demo strength.
    #[must_use]
    pub fn build(self) -> Arc<dyn Interferer> {
        match self {
            Self::Line => Arc::new(LineInterferer::new(5)),
            Self::Curve => Arc::new(BezierInterferer::new(2)),
            Self::Noise => Arc::new(NoiseInterferer::default()),
            Self::Warp => Arc::new(WarpInterferer::default()),
        }
    }
}

fn parse_interferers(s: &str) -> Result<Vec<InterfererKind>> {
    s.split(',')
        .filter(|part| !part.trim().is_empty())
        .map(str::parse::<InterfererKind>)
        .collect()
}

fn parse_rgb(s: &str) -> Result<Rgb<u8>> {
    let channels: Vec<u8> = s
        .split(',')
        .map(|c| c.trim().parse::<u8>())
        .collect::<std::result::Result<_, _>>()
        .map_err(|e| CaptchaError::config(format!("invalid color '{s}': {e}")))?;
    match channels.as_slice() {
        [r, g, b] => Ok(Rgb([*r, *g, *b])),
        _ => Err(CaptchaError::config(format!(
            "color must have three channels, got '{s}'"
        ))),
    }
}

fn get_or<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn get_parsed_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Demo configuration.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Content generator.
    pub generator: GeneratorKind,
    /// Answer length for the alphanumeric generator.
    pub length: usize,
    /// Largest operand for the arithmetic generator.
    pub max_operand: u32,
    /// Distortion layers, stacked in order.
    pub interferers: Vec<InterfererKind>,
    /// Base font size before supersampling.
    pub font_size: f32,
    /// Directory of `.ttf`/`.otf` files to pick faces from at random.
    pub font_dir: Option<PathBuf>,
    /// Background fill.
    pub background: Rgb<u8>,
    /// Number of images to render.
    pub count: usize,
    /// Where rendered PNGs are written.
    pub output_dir: PathBuf,
    /// Logging format: "json" or "pretty".
    pub log_format: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: 160,
            height: 60,
            generator: GeneratorKind::Arithmetic,
            length: 4,
            max_operand: 10,
            interferers: vec![
                InterfererKind::Line,
                InterfererKind::Curve,
                InterfererKind::Noise,
            ],
            font_size: 36.0,
            font_dir: None,
            background: Rgb([240, 240, 240]),
            count: 3,
            output_dir: PathBuf::from("."),
            log_format: "json".to_string(),
        }
    }
}

impl Settings {
    /// Loads settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `CaptchaError::Config` for unknown generator or interferer
    /// names and malformed background colors.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads settings through an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// See [`Settings::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let generator = match lookup("CAPTCHA_GENERATOR").filter(|v| !v.trim().is_empty()) {
            Some(name) => name.parse()?,
            None => defaults.generator,
        };
        let interferers = match lookup("CAPTCHA_INTERFERERS") {
            Some(list) => parse_interferers(&list)?,
            None => defaults.interferers,
        };
        let background = match lookup("CAPTCHA_BACKGROUND").filter(|v| !v.trim().is_empty()) {
            Some(color) => parse_rgb(&color)?,
            None => defaults.background,
        };

        Ok(Self {
            width: get_parsed_or(&lookup, "CAPTCHA_WIDTH", defaults.width),
            height: get_parsed_or(&lookup, "CAPTCHA_HEIGHT", defaults.height),
            generator,
            length: get_parsed_or(&lookup, "CAPTCHA_LENGTH", defaults.length),
            max_operand: get_parsed_or(&lookup, "CAPTCHA_MAX_OPERAND", defaults.max_operand),
            interferers,
            font_size: get_parsed_or(&lookup, "CAPTCHA_FONT_SIZE", defaults.font_size),
            font_dir: lookup("CAPTCHA_FONT_DIR")
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
            background,
            count: get_parsed_or(&lookup, "CAPTCHA_COUNT", defaults.count),
            output_dir: PathBuf::from(get_or(&lookup, "CAPTCHA_OUTPUT_DIR", ".")),
            log_format: get_or(&lookup, "LOG_FORMAT", &defaults.log_format),
        })
    }

    /// Whether logs should be human-readable rather than JSON.
    #[must_use]
    pub fn pretty_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("pretty")
    }

    /// Builds a validated producer from these settings.
    ///
    /// # Errors
    ///
    /// Returns `CaptchaError::Config` for invalid dimensions, lengths,
    /// operands or font sizes, and `CaptchaError::Io` if the font directory
    /// cannot be read.
    pub fn producer(&self) -> Result<Producer> {
        let builder = RenderConfig::builder()
            .size(self.width, self.height)
            .background(self.background);

        let builder = match self.generator {
            GeneratorKind::Chars => builder.generator(CharGenerator::new(self.length)?),
            GeneratorKind::Arithmetic => {
                builder.generator(ArithmeticGenerator::new(self.max_operand)?)
            }
        };

        let mut layers: Vec<Arc<dyn Interferer>> =
            self.interferers.iter().map(|kind| kind.build()).collect();
        let builder = if layers.len() > 1 {
            builder.interferer(layers.into_iter().collect::<CompositeInterferer>())
        } else {
            builder.shared_interferer(layers.pop())
        };

        let builder = match &self.font_dir {
            Some(dir) => builder.font_provider(RandomFontProvider::new(
                self.font_size,
                FontAsset::load_dir(dir)?,
            )?),
            None => builder.font_provider(DefaultFontProvider::new(self.font_size)?),
        };

        Ok(Producer::new(builder.build()?))
    }
}
