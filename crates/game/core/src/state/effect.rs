//! Effect entity and its resolved payload.
//!
//! An [`Effect`] is a named, timed modifier attached to a combatant. Once
//! attached it lives in the [`Combat`](super::Combat) arena and is addressed
//! by [`EffectId`]; the parent edge is a plain id, never an owning pointer.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use super::{CombatantId, EffectId};
use crate::config::EffectConfig;

/// Passive modifiers granted while the effect is active.
///
/// Keys and values are opaque to the attachment protocol; the rules layer
/// interprets them (e.g. `"to_hit_bonus" => "2"`, `"resistances" => "fire"`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PassiveEffects {
    pub modifiers: BTreeMap<String, String>,
}

impl PassiveEffects {
    pub fn is_empty(&self) -> bool {
        self.modifiers.is_empty()
    }
}

/// Attack granted to the effect's owner while the effect is active.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackInteraction {
    pub attack: String,
    pub dc: Option<i64>,
    pub attack_bonus: Option<i64>,
    pub casting_mod: Option<i64>,
}

/// Button offered to the effect's owner while the effect is active.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ButtonInteraction {
    pub label: String,
    pub verb: Option<String>,
    pub style: Option<String>,
}

/// A status effect, either attached to a combatant or detached (template).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Effect {
    /// Arena id; `None` until the effect is attached.
    pub id: Option<EffectId>,
    pub name: String,
    /// Duration the effect was created with, in rounds (`-1` = indefinite).
    pub duration: i32,
    /// Rounds left before expiry (`-1` = until explicitly removed).
    pub remaining: i32,
    pub description: Option<String>,
    pub concentration: bool,
    /// Whether `remaining` ticks at the end (vs. start) of the owner's turn.
    pub end_on_turn_end: bool,
    /// Combatant carrying the effect; `None` for detached effects.
    pub owner: Option<CombatantId>,
    /// Weak back-reference; the parent does not own this effect.
    pub parent: Option<EffectId>,
    pub passive: PassiveEffects,
    pub attacks: Vec<AttackInteraction>,
    pub buttons: Vec<ButtonInteraction>,
}

impl Effect {
    /// Creates an unattached effect with the given duration.
    pub fn new(name: impl Into<String>, duration: i32) -> Self {
        Self {
            id: None,
            name: name.into(),
            duration,
            remaining: duration,
            description: None,
            concentration: false,
            end_on_turn_end: false,
            owner: None,
            parent: None,
            passive: PassiveEffects::default(),
            attacks: Vec::new(),
            buttons: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    #[must_use]
    pub fn with_concentration(mut self, concentration: bool) -> Self {
        self.concentration = concentration;
        self
    }

    #[must_use]
    pub fn with_end_on_turn_end(mut self, end_on_turn_end: bool) -> Self {
        self.end_on_turn_end = end_on_turn_end;
        self
    }

    #[must_use]
    pub fn with_payload(
        mut self,
        passive: PassiveEffects,
        attacks: Vec<AttackInteraction>,
        buttons: Vec<ButtonInteraction>,
    ) -> Self {
        self.passive = passive;
        self.attacks = attacks;
        self.buttons = buttons;
        self
    }

    /// Returns true if the effect lasts until explicitly removed.
    pub fn is_indefinite(&self) -> bool {
        self.remaining < 0
    }

    /// Returns true if the effect is not held by any combatant.
    pub fn is_detached(&self) -> bool {
        self.owner.is_none()
    }

    /// Drops the independent semantics of a stacked duplicate.
    ///
    /// After this call the effect has no description, no concentration and
    /// an indefinite duration.
    pub fn neutralize(&mut self) {
        self.description = None;
        self.duration = EffectConfig::INDEFINITE;
        self.remaining = EffectConfig::INDEFINITE;
        self.concentration = false;
    }

    /// Renders a one-line summary, e.g. `Bless [10 rounds] <C>`.
    pub fn render_summary(&self, include_description: bool) -> String {
        let mut out = self.name.clone();
        if self.remaining >= 0 {
            let unit = if self.remaining == 1 { "round" } else { "rounds" };
            let _ = write!(out, " [{} {}]", self.remaining, unit);
        }
        if self.concentration {
            out.push_str(" <C>");
        }
        if let Some(description) = self.description.as_ref().filter(|_| include_description) {
            let _ = write!(out, " - {}", description);
        }
        out
    }
}
