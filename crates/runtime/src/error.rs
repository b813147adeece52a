//! Unified error type surfaced by automation steps.

use effect_core::{EffectError, ErrorSeverity, GameError};
use thiserror::Error;

pub use crate::args::ArgumentError;

pub type Result<T> = std::result::Result<T, AutomationError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AutomationError {
    #[error(transparent)]
    Effect(#[from] EffectError),

    #[error(transparent)]
    Argument(#[from] ArgumentError),
}

impl GameError for AutomationError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Effect(err) => err.severity(),
            Self::Argument(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Effect(err) => err.error_code(),
            Self::Argument(_) => "AUTOMATION_INVALID_ARGUMENT",
        }
    }
}
