//! Error types and result aliases.
//!
//! Defines the core `CaptchaError` enumeration and common `Result` type.

use thiserror::Error;

/// Error raised by a caller-supplied strategy (interferer, colorizer).
pub type StrategyError = Box<dyn std::error::Error + Send + Sync>;

/// CAPTCHA errors.
#[derive(Debug, Error)]
pub enum CaptchaError {
    /// Invalid construction parameters, reported before any image work.
    #[error("configuration error: {0}")]
    Config(String),

    /// A failure inside the render pipeline. No image is produced.
    #[error("failed to generate captcha image ({stage})")]
    Generation {
        stage: &'static str,
        #[source]
        source: StrategyError,
    },

    /// I/O failure in a font loader or output writer.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl CaptchaError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn generation(stage: &'static str, source: impl Into<StrategyError>) -> Self {
        Self::Generation {
            stage,
            source: source.into(),
        }
    }
}

/// Result type alias for `CaptchaError`.
pub type Result<T> = std::result::Result<T, CaptchaError>;
