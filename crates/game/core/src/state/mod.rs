//! Authoritative combat state for status effects.
//!
//! Effects live in a single arena owned by [`Combat`] and are addressed by
//! [`EffectId`]. Parent/child relations are ids plus a child index kept by the
//! arena, so removal can cascade without any shared pointers.
mod combat;
mod common;
mod effect;

pub use combat::{Combat, Combatant};
pub use common::{CombatantId, EffectId};
pub use effect::{AttackInteraction, ButtonInteraction, Effect, PassiveEffects};
