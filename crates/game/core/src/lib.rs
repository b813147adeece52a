//! Deterministic status-effect logic shared across the automation runtime.
//!
//! `effect-core` defines how a requested effect becomes a concrete [`Effect`]
//! attached to a combatant: duration resolution, stacking, parent selection,
//! and attachment with concentration-conflict reporting. The protocol entry
//! point is [`effect::apply_effect`]; the combat arena in [`state`] is the
//! reference [`env::AttachmentPort`] implementation.
pub mod config;
pub mod effect;
pub mod env;
pub mod error;
pub mod state;

pub use config::EffectConfig;
pub use effect::{
    AppliedEffect, AttackTemplate, ButtonTemplate, DurationExpr, EffectError, EffectFactory,
    EffectProxy, EffectRef, EffectSpec, InvalidArgument, MetaVar, MetaVars, ParentCandidates,
    ParentResolver, ParentSource, PassiveTemplate, ResolutionContext, StackResolver,
    TargetContext, apply_effect,
};
pub use env::{AttachError, Attachment, AttachmentPort, EvaluationError, Evaluator};
pub use error::{ErrorSeverity, GameError};
pub use state::{
    AttackInteraction, ButtonInteraction, Combat, Combatant, CombatantId, Effect, EffectId,
    PassiveEffects,
};
