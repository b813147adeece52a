//! Scenario replay against an in-memory combat.

use anyhow::{Context, Result, anyhow};
use effect_content::{EffectCatalog, Scenario, ScenarioStep, ScenarioTarget};
use effect_core::{Combat, CombatantId, EffectConfig, GameError, MetaVars, TargetContext};
use effect_runtime::{ApplyEffectStep, AutomationArgs, AutomationContext, RuntimeConfig};
use tracing::{info, warn};

/// Replays scenario steps, sharing one variable table across them.
pub struct Replay<'a> {
    catalog: &'a EffectCatalog,
    config: RuntimeConfig,
    combat: Combat,
    metavars: MetaVars,
}

impl<'a> Replay<'a> {
    pub fn new(scenario: &Scenario, catalog: &'a EffectCatalog, config: EffectConfig) -> Self {
        let mut combat = Combat::new();
        for name in &scenario.combatants {
            combat.add_combatant(name.as_str());
        }
        Self {
            catalog,
            config: RuntimeConfig::with_effect_config(config),
            combat,
            metavars: MetaVars::new(),
        }
    }

    pub fn combat(&self) -> &Combat {
        &self.combat
    }

    /// Runs every step and returns the user-facing output lines.
    ///
    /// A failing step is reported as an `Error:` line and replay continues,
    /// the way a failed automation step does not abort later ones.
    pub fn run(&mut self, scenario: &Scenario) -> Result<Vec<String>> {
        let mut output = Vec::new();
        for (index, step) in scenario.steps.iter().enumerate() {
            output.extend(
                self.run_step(step)
                    .with_context(|| format!("step {} ({})", index, step.effect))?,
            );
        }
        Ok(output)
    }

    fn run_step(&mut self, step: &ScenarioStep) -> Result<Vec<String>> {
        let spec = self
            .catalog
            .get(&step.effect)
            .ok_or_else(|| anyhow!("unknown effect `{}`", step.effect))?;
        let caster = self.combatant(&step.caster)?;
        let target = match &step.target {
            Some(ScenarioTarget::Combatant(name)) => {
                Some(TargetContext::Combatant(self.combatant(name)?))
            }
            Some(ScenarioTarget::Detached) => Some(TargetContext::Detached),
            None => None,
        };
        let conc_effect = step
            .concentration
            .as_deref()
            .and_then(|var| self.metavars.get(var))
            .and_then(|value| value.as_effect())
            .and_then(|proxy| proxy.id());

        let mut ctx = AutomationContext::new(caster, &self.config)
            .with_args(step.args.iter().cloned().collect::<AutomationArgs>())
            .with_conc_effect(conc_effect);
        ctx.target = target;
        ctx.metavars = std::mem::take(&mut self.metavars);

        let step_runner = ApplyEffectStep::new(spec.clone());
        info!(target: "cli", step = %step_runner.build_str(), caster = %step.caster, "running step");
        let result = step_runner.run(&mut ctx, &mut self.combat);

        let mut output = ctx.drain_messages();
        self.metavars = ctx.metavars;
        if let Err(err) = result {
            warn!(target: "cli", code = err.error_code(), error = %err, "step failed");
            output.push(format!("Error: {}", err));
        }
        Ok(output)
    }

    fn combatant(&self, name: &str) -> Result<CombatantId> {
        self.combat
            .combatant_by_name(name)
            .map(|c| c.id)
            .ok_or_else(|| anyhow!("unknown combatant `{}`", name))
    }

    /// Final state of every combatant, one block per combatant.
    pub fn summary(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for combatant in self.combat.combatants() {
            lines.push(format!("{}:", combatant.name));
            for effect in self.combat.effects_of(combatant.id) {
                lines.push(format!("  {}", effect.render_summary(true)));
            }
        }
        lines
    }
}
