//! Per-run automation state.

use effect_core::{CombatantId, EffectFactory, EffectId, MetaVars, TargetContext};

use crate::args::AutomationArgs;
use crate::config::RuntimeConfig;

/// State shared by the steps of one automation run.
///
/// Messages queued by steps are meant for the user (e.g. a chat embed);
/// structured diagnostics go through `tracing` instead.
#[derive(Debug)]
pub struct AutomationContext {
    pub caster: CombatantId,
    /// `None` outside of a target step.
    pub target: Option<TargetContext>,
    /// Concentration effect the caster is maintaining, if any.
    pub conc_effect: Option<EffectId>,
    pub metavars: MetaVars,
    pub args: AutomationArgs,
    pub(crate) factory: EffectFactory,
    pub(crate) duration_arg: String,
    queue: Vec<String>,
}

impl AutomationContext {
    pub fn new(caster: CombatantId, config: &RuntimeConfig) -> Self {
        Self {
            caster,
            target: None,
            conc_effect: None,
            metavars: MetaVars::new(),
            args: AutomationArgs::new(),
            factory: EffectFactory::new(config.effect.clone()),
            duration_arg: config.duration_arg.clone(),
            queue: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_target(mut self, target: TargetContext) -> Self {
        self.target = Some(target);
        self
    }

    #[must_use]
    pub fn with_args(mut self, args: AutomationArgs) -> Self {
        self.args = args;
        self
    }

    #[must_use]
    pub fn with_conc_effect(mut self, conc_effect: Option<EffectId>) -> Self {
        self.conc_effect = conc_effect;
        self
    }

    /// Queues a user-facing message.
    pub fn queue(&mut self, message: impl Into<String>) {
        self.queue.push(message.into());
    }

    pub fn messages(&self) -> &[String] {
        &self.queue
    }

    /// Takes all queued messages, leaving the queue empty.
    pub fn drain_messages(&mut self) -> Vec<String> {
        std::mem::take(&mut self.queue)
    }
}
