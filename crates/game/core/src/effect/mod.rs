//! Effect construction and attachment.
//!
//! Control flow for one request:
//! [`EffectSpec`] → [`EffectFactory`] → [`StackResolver`] → [`ParentResolver`]
//! → [`AttachmentPort::add_effect`](crate::env::AttachmentPort::add_effect).
//! [`apply_effect`] runs the whole sequence.
mod apply;
mod context;
mod error;
mod factory;
mod metavar;
mod parent;
mod spec;
mod stacking;

#[cfg(test)]
mod testing;

pub use apply::{AppliedEffect, apply_effect};
pub use context::{ResolutionContext, TargetContext};
pub use error::{EffectError, InvalidArgument};
pub use factory::EffectFactory;
pub use metavar::{EffectProxy, EffectRef, MetaVar, MetaVars};
pub use parent::{ParentCandidates, ParentResolver, ParentSource};
pub use spec::{AttackTemplate, ButtonTemplate, DurationExpr, EffectSpec, PassiveTemplate};
pub use stacking::StackResolver;
