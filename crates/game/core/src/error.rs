//! Common error infrastructure for effect-core.
//!
//! Domain-specific errors (e.g. [`EffectError`](crate::effect::EffectError),
//! [`AttachError`](crate::env::AttachError)) are defined next to the code
//! that raises them and classified through [`GameError`].

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Validation**: user-authored automation data is wrong; fix the data, do not retry
/// - **Internal**: the arena or the evaluator is in an unexpected state
/// - **Fatal**: the resolution call cannot proceed at all (no target context)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Invalid input, should not retry without changes.
    ///
    /// Examples: duration expression is not an integer, parent variable is not an effect
    Validation,

    /// Unexpected state inconsistency.
    ///
    /// Examples: combatant id not present in the arena
    Internal,

    /// Resolution cannot continue.
    ///
    /// Examples: effect step executed without any target context
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all effect-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on who has to fix the problem, not on impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
