//! Automation step that creates and attaches one effect.

use effect_core::{
    AppliedEffect, AttachmentPort, EffectError, EffectProxy, EffectSpec, Evaluator, GameError,
    MetaVars, ResolutionContext, apply_effect,
};
use tracing::{debug, warn};

use crate::args::ArgumentError;
use crate::context::AutomationContext;
use crate::error::Result;
use crate::evaluator::ExprEvaluator;

/// Applies an [`EffectSpec`] to the current target of an automation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyEffectStep {
    pub spec: EffectSpec,
}

impl ApplyEffectStep {
    pub fn new(spec: EffectSpec) -> Self {
        Self { spec }
    }

    pub fn build_str(&self) -> String {
        self.spec.build_str()
    }

    /// Runs the step with the reference [`ExprEvaluator`] over the run's variables.
    pub fn run<P: AttachmentPort + ?Sized>(
        &self,
        ctx: &mut AutomationContext,
        port: &mut P,
    ) -> Result<AppliedEffect> {
        self.execute(ctx, port, None)
    }

    /// Runs the step with a caller-supplied evaluator.
    ///
    /// On success the effect summary (and any dropped concentration effects)
    /// is queued on `ctx`, and a proxy is stored under `save_as` if set.
    /// Failures are logged and leave the queue and variables untouched.
    pub fn run_with<P: AttachmentPort + ?Sized>(
        &self,
        ctx: &mut AutomationContext,
        port: &mut P,
        evaluator: &dyn Evaluator,
    ) -> Result<AppliedEffect> {
        self.execute(ctx, port, Some(evaluator))
    }

    fn execute<P: AttachmentPort + ?Sized>(
        &self,
        ctx: &mut AutomationContext,
        port: &mut P,
        evaluator: Option<&dyn Evaluator>,
    ) -> Result<AppliedEffect> {
        // Variables are moved out while the step runs so the evaluator can borrow them.
        let vars = std::mem::take(&mut ctx.metavars);
        let reference = ExprEvaluator::new(&vars);
        let evaluator: &dyn Evaluator = match evaluator {
            Some(evaluator) => evaluator,
            None => &reference,
        };
        let result = self.apply(ctx, &vars, port, evaluator);
        ctx.metavars = vars;

        let applied = match result {
            Ok(applied) => applied,
            Err(err) => {
                warn!(
                    target: "runtime::automation",
                    effect = %self.spec.name,
                    code = err.error_code(),
                    error = %err,
                    "effect step failed"
                );
                return Err(err);
            }
        };

        ctx.queue(format!("**Effect**: {}", applied.effect.render_summary(false)));
        if !applied.conc_conflict.is_empty() {
            let dropped: Vec<&str> = applied
                .conc_conflict
                .iter()
                .map(|effect| effect.name.as_str())
                .collect();
            ctx.queue(format!("**Concentration**: dropped {}", dropped.join(", ")));
        }

        if let Some(variable) = &self.spec.save_as {
            let proxy = match applied.id {
                Some(id) => EffectProxy::attached(id),
                None => EffectProxy::detached(applied.effect.clone()),
            };
            debug!(
                target: "runtime::automation",
                variable = %variable,
                effect = %applied.effect.name,
                attached = applied.is_attached(),
                "saved effect reference"
            );
            ctx.metavars.insert(variable.clone(), proxy);
        }

        Ok(applied)
    }

    /// Checks the target and the authored duration before caller arguments
    /// are read, then runs the attachment protocol.
    fn apply<P: AttachmentPort + ?Sized>(
        &self,
        ctx: &AutomationContext,
        vars: &MetaVars,
        port: &mut P,
        evaluator: &dyn Evaluator,
    ) -> Result<AppliedEffect> {
        let target = ctx.target.ok_or(EffectError::MissingTarget)?;
        ctx.factory.resolve_duration(self.spec.duration.as_ref(), evaluator)?;
        let duration_override = self.duration_override(ctx)?;

        let resolution = ResolutionContext {
            caster: ctx.caster,
            target: Some(target),
            concentration: ctx.conc_effect,
            vars,
            duration_override,
        };
        Ok(apply_effect(&self.spec, &resolution, &ctx.factory, evaluator, port)?)
    }

    fn duration_override(&self, ctx: &AutomationContext) -> Result<Option<i32>> {
        let Some(value) = ctx.args.last_int(&ctx.duration_arg)? else {
            return Ok(None);
        };
        let rounds = i32::try_from(value).map_err(|_| ArgumentError {
            arg: ctx.duration_arg.clone(),
            value: value.to_string(),
        })?;
        Ok(Some(rounds))
    }
}
