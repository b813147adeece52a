//! Automation runtime for effect application steps.
//!
//! This crate wraps the effect-core attachment protocol in the context an
//! automation run provides: the caster, the current target, the caster's
//! concentration effect, the variable table shared between steps, caller
//! arguments, and a message queue for user-facing output.
//!
//! Modules are organized by responsibility:
//! - [`context`] holds per-run state ([`AutomationContext`])
//! - [`step`] runs one effect application ([`ApplyEffectStep`])
//! - [`evaluator`] is the reference integer/annotation evaluator
//! - [`args`] parses caller argument overrides
pub mod args;
pub mod config;
pub mod context;
pub mod error;
pub mod evaluator;
pub mod step;

pub use args::{ArgumentError, AutomationArgs};
pub use config::RuntimeConfig;
pub use context::AutomationContext;
pub use error::{AutomationError, Result};
pub use evaluator::ExprEvaluator;
pub use step::ApplyEffectStep;
