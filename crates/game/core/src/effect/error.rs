//! Errors raised while resolving and attaching an effect.

use crate::env::AttachError;
use crate::error::{ErrorSeverity, GameError};

/// User input that cannot be turned into a valid effect.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvalidArgument {
    #[error(
        "Could not set effect parent: the variable `{variable}` is not an effect reference (got `{found}`)."
    )]
    ParentNotEffect {
        variable: String,
        found: &'static str,
    },

    #[error("Concentration spells cannot add concentration effects to the caster.")]
    SelfConcentration,
}

/// Errors surfaced by [`apply_effect`](super::apply_effect).
///
/// Evaluator failures never appear with their own type: duration failures
/// become [`DurationResolution`](EffectError::DurationResolution), everything
/// else becomes [`Automation`](EffectError::Automation).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EffectError {
    #[error(
        "Tried to add an effect without a target! Make sure all effects are inside of a target step."
    )]
    MissingTarget,

    #[error("{expression} is not an integer (in effect duration)")]
    DurationResolution { expression: String },

    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgument),

    #[error("{0}")]
    Automation(String),

    #[error(transparent)]
    Attach(#[from] AttachError),
}

impl EffectError {
    /// Returns true for errors caused by bad user-authored arguments.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

impl GameError for EffectError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::MissingTarget => ErrorSeverity::Fatal,
            Self::DurationResolution { .. } | Self::InvalidArgument(_) => {
                ErrorSeverity::Validation
            }
            Self::Automation(_) => ErrorSeverity::Validation,
            Self::Attach(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingTarget => "EFFECT_MISSING_TARGET",
            Self::DurationResolution { .. } => "EFFECT_DURATION_UNRESOLVED",
            Self::InvalidArgument(InvalidArgument::ParentNotEffect { .. }) => {
                "EFFECT_PARENT_NOT_EFFECT"
            }
            Self::InvalidArgument(InvalidArgument::SelfConcentration) => {
                "EFFECT_SELF_CONCENTRATION"
            }
            Self::Automation(_) => "EFFECT_AUTOMATION",
            Self::Attach(err) => err.error_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_error_names_the_expression() {
        let err = EffectError::DurationResolution {
            expression: "1d4".into(),
        };
        assert_eq!(err.to_string(), "1d4 is not an integer (in effect duration)");
        assert_eq!(err.severity(), ErrorSeverity::Validation);
    }

    #[test]
    fn parent_error_names_variable_and_type() {
        let err: EffectError = InvalidArgument::ParentNotEffect {
            variable: "bless".into(),
            found: "int",
        }
        .into();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("`bless`"));
        assert!(err.to_string().contains("`int`"));
        assert_eq!(err.error_code(), "EFFECT_PARENT_NOT_EFFECT");
    }
}
