//! Caller-supplied description of an effect to create.

use std::collections::BTreeMap;
use std::fmt;

/// Duration of an effect as authored: a literal round count or an expression.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum DurationExpr {
    Rounds(i32),
    Expression(String),
}

impl fmt::Display for DurationExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rounds(rounds) => write!(f, "{}", rounds),
            Self::Expression(expr) => f.write_str(expr),
        }
    }
}

impl From<i32> for DurationExpr {
    fn from(rounds: i32) -> Self {
        Self::Rounds(rounds)
    }
}

impl From<&str> for DurationExpr {
    fn from(expr: &str) -> Self {
        Self::Expression(expr.to_string())
    }
}

/// Unresolved passive modifiers; every value is annotated on resolution.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PassiveTemplate {
    pub modifiers: BTreeMap<String, String>,
}

/// Unresolved attack granted by an effect.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackTemplate {
    pub attack: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub dc: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub attack_bonus: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub casting_mod: Option<String>,
}

/// Unresolved button granted by an effect.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ButtonTemplate {
    pub label: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub verb: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub style: Option<String>,
}

/// Immutable request to create an effect, as authored in automation data.
///
/// Field names in data files follow the automation format (`end`, `conc`,
/// `desc`, `effects`, `save_as`, `parent`).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectSpec {
    /// Display and lookup key; not unique across a combatant's effects.
    pub name: String,
    /// `None` means the effect lasts until removed.
    #[cfg_attr(feature = "serde", serde(default))]
    pub duration: Option<DurationExpr>,
    #[cfg_attr(feature = "serde", serde(default, rename = "effects"))]
    pub passive: Option<PassiveTemplate>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub attacks: Vec<AttackTemplate>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub buttons: Vec<ButtonTemplate>,
    #[cfg_attr(feature = "serde", serde(default, rename = "end"))]
    pub end_on_turn_end: bool,
    #[cfg_attr(feature = "serde", serde(default, rename = "conc"))]
    pub concentration: bool,
    #[cfg_attr(feature = "serde", serde(default, rename = "desc"))]
    pub description: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stacking: bool,
    /// Variable name under which a proxy to the created effect is stored.
    #[cfg_attr(feature = "serde", serde(default))]
    pub save_as: Option<String>,
    /// Variable name holding a proxy to use as explicit parent.
    #[cfg_attr(feature = "serde", serde(default))]
    pub parent: Option<String>,
}

impl EffectSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            duration: None,
            passive: None,
            attacks: Vec::new(),
            buttons: Vec::new(),
            end_on_turn_end: false,
            concentration: false,
            description: None,
            stacking: false,
            save_as: None,
            parent: None,
        }
    }

    #[must_use]
    pub fn with_duration(mut self, duration: impl Into<DurationExpr>) -> Self {
        self.duration = Some(duration.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_concentration(mut self, concentration: bool) -> Self {
        self.concentration = concentration;
        self
    }

    #[must_use]
    pub fn with_stacking(mut self, stacking: bool) -> Self {
        self.stacking = stacking;
        self
    }

    #[must_use]
    pub fn with_end_on_turn_end(mut self, end_on_turn_end: bool) -> Self {
        self.end_on_turn_end = end_on_turn_end;
        self
    }

    #[must_use]
    pub fn save_as(mut self, variable: impl Into<String>) -> Self {
        self.save_as = Some(variable.into());
        self
    }

    #[must_use]
    pub fn with_parent(mut self, variable: impl Into<String>) -> Self {
        self.parent = Some(variable.into());
        self
    }

    #[must_use]
    pub fn with_passive(mut self, passive: PassiveTemplate) -> Self {
        self.passive = Some(passive);
        self
    }

    #[must_use]
    pub fn with_attack(mut self, attack: AttackTemplate) -> Self {
        self.attacks.push(attack);
        self
    }

    #[must_use]
    pub fn with_button(mut self, button: ButtonTemplate) -> Self {
        self.buttons.push(button);
        self
    }

    /// Preview line shown before the automation runs.
    pub fn build_str(&self) -> String {
        format!("Effect: {}", self.name)
    }
}
