//! Automation variables and the effect proxy stored among them.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::env::AttachmentPort;
use crate::state::{Effect, EffectId};

/// How an [`EffectProxy`] reaches its effect.
#[derive(Clone, Debug)]
pub enum EffectRef {
    /// Live arena entry; renames, ticks and removal are observed through it.
    Attached(EffectId),
    /// Template effect built without a combatant; nothing can mutate it.
    Detached(Rc<Effect>),
}

/// Forward reference to a created effect.
///
/// Stored in the variable table under `save_as` so a later effect can name
/// it as parent.
#[derive(Clone, Debug)]
pub struct EffectProxy {
    handle: EffectRef,
}

impl EffectProxy {
    pub fn attached(id: EffectId) -> Self {
        Self {
            handle: EffectRef::Attached(id),
        }
    }

    pub fn detached(effect: Effect) -> Self {
        Self {
            handle: EffectRef::Detached(Rc::new(effect)),
        }
    }

    pub fn handle(&self) -> &EffectRef {
        &self.handle
    }

    /// Arena id of the wrapped effect, if it is attached.
    pub fn id(&self) -> Option<EffectId> {
        match &self.handle {
            EffectRef::Attached(id) => Some(*id),
            EffectRef::Detached(_) => None,
        }
    }

    /// Resolves the wrapped effect; `None` once an attached effect is removed.
    pub fn get<'a, P: AttachmentPort + ?Sized>(&'a self, port: &'a P) -> Option<&'a Effect> {
        match &self.handle {
            EffectRef::Attached(id) => port.effect(*id),
            EffectRef::Detached(effect) => Some(effect.as_ref()),
        }
    }

    /// One-line summary of the current state of the wrapped effect.
    pub fn render<P: AttachmentPort + ?Sized>(&self, port: &P) -> Option<String> {
        self.get(port).map(|effect| effect.render_summary(false))
    }
}

/// Identity comparison against the wrapped effect.
impl PartialEq<Effect> for EffectProxy {
    fn eq(&self, other: &Effect) -> bool {
        match &self.handle {
            EffectRef::Attached(id) => other.id == Some(*id),
            EffectRef::Detached(effect) => std::ptr::eq(effect.as_ref(), other),
        }
    }
}

impl PartialEq for EffectProxy {
    fn eq(&self, other: &Self) -> bool {
        match (&self.handle, &other.handle) {
            (EffectRef::Attached(a), EffectRef::Attached(b)) => a == b,
            (EffectRef::Detached(a), EffectRef::Detached(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// A value stored in the automation variable table.
#[derive(Clone, Debug, PartialEq, strum::IntoStaticStr)]
pub enum MetaVar {
    #[strum(serialize = "int")]
    Int(i64),
    #[strum(serialize = "float")]
    Float(f64),
    #[strum(serialize = "str")]
    Text(String),
    #[strum(serialize = "bool")]
    Bool(bool),
    #[strum(serialize = "EffectProxy")]
    Effect(EffectProxy),
}

impl MetaVar {
    /// Type name used in user-facing error messages.
    pub fn kind(&self) -> &'static str {
        self.into()
    }

    pub fn as_effect(&self) -> Option<&EffectProxy> {
        match self {
            Self::Effect(proxy) => Some(proxy),
            _ => None,
        }
    }
}

impl fmt::Display for MetaVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{}", v),
            Self::Text(v) => f.write_str(v),
            Self::Bool(v) => write!(f, "{}", v),
            Self::Effect(proxy) => match proxy.handle() {
                EffectRef::Attached(id) => write!(f, "{}", id),
                EffectRef::Detached(effect) => f.write_str(&effect.render_summary(false)),
            },
        }
    }
}

impl From<i64> for MetaVar {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for MetaVar {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for MetaVar {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<EffectProxy> for MetaVar {
    fn from(proxy: EffectProxy) -> Self {
        Self::Effect(proxy)
    }
}

/// Variable table shared by the steps of one automation run.
#[derive(Clone, Debug, Default)]
pub struct MetaVars {
    vars: HashMap<String, MetaVar>,
}

impl MetaVars {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&MetaVar> {
        self.vars.get(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<MetaVar>) {
        self.vars.insert(name.into(), value.into());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}
