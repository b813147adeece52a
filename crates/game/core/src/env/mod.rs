//! Traits describing the collaborators the attachment protocol consumes.
//!
//! The [`Evaluator`] turns user-authored text into numbers and strings; the
//! [`AttachmentPort`] owns the effect collections of combatants. Both are
//! traits so the protocol can run against the reference arena, a test stub,
//! or a host application's own combat registry.
mod attachment;
mod evaluator;

pub use attachment::{AttachError, Attachment, AttachmentPort};
pub use evaluator::{EvaluationError, Evaluator};
