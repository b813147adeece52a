//! Test doubles shared by the effect module tests.

use std::collections::HashMap;

use crate::env::{EvaluationError, Evaluator};

/// Evaluator that knows integer literals and a fixed set of names.
#[derive(Default)]
pub struct StubEvaluator {
    pub names: HashMap<&'static str, i64>,
}

impl StubEvaluator {
    pub fn with(mut self, name: &'static str, value: i64) -> Self {
        self.names.insert(name, value);
        self
    }
}

impl Evaluator for StubEvaluator {
    fn eval_int(&self, expression: &str) -> Result<i64, EvaluationError> {
        let expression = expression.trim();
        if let Ok(value) = expression.parse() {
            return Ok(value);
        }
        self.names
            .get(expression)
            .copied()
            .ok_or_else(|| EvaluationError::UnknownName(expression.to_string()))
    }

    fn annotate(&self, text: &str) -> Result<String, EvaluationError> {
        if text.contains("{broken}") {
            return Err(EvaluationError::UnknownName("broken".into()));
        }
        let mut out = text.to_string();
        for (name, value) in &self.names {
            out = out.replace(&format!("{{{}}}", name), &value.to_string());
        }
        Ok(out)
    }
}
