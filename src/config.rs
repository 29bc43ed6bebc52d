//! Configuration management.
//!
//! Error types shared by the whole crate, plus environment-driven settings
//! for the demo binary. Settings are loaded once at startup.

mod error;
mod settings;

pub use error::{CaptchaError, Result, StrategyError};
pub use settings::{GeneratorKind, InterfererKind, Settings};
