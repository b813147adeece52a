//! Reference evaluator for automation text.
//!
//! Supports integer arithmetic (`+ - * /`, unary minus, parentheses) over
//! literals and automation variables, and `{expr}` annotation of free text.
//! Dice, functions and the rest of a rule language are out of scope.

use effect_core::{EvaluationError, Evaluator, MetaVar, MetaVars};

/// Evaluator backed by the automation variable table.
pub struct ExprEvaluator<'a> {
    vars: &'a MetaVars,
}

impl<'a> ExprEvaluator<'a> {
    pub fn new(vars: &'a MetaVars) -> Self {
        Self { vars }
    }

    fn lookup(&self, name: &str, expression: &str) -> Result<i64, EvaluationError> {
        match self.vars.get(name) {
            Some(MetaVar::Int(value)) => Ok(*value),
            Some(MetaVar::Bool(value)) => Ok(i64::from(*value)),
            Some(MetaVar::Text(text)) => text.trim().parse().map_err(|_| {
                EvaluationError::NotAnInteger {
                    expression: expression.to_string(),
                }
            }),
            Some(_) => Err(EvaluationError::NotAnInteger {
                expression: expression.to_string(),
            }),
            None => Err(EvaluationError::UnknownName(name.to_string())),
        }
    }
}

impl Evaluator for ExprEvaluator<'_> {
    fn eval_int(&self, expression: &str) -> Result<i64, EvaluationError> {
        let mut parser = Parser {
            evaluator: self,
            source: expression,
            chars: expression.char_indices().peekable(),
        };
        let value = parser.expr()?;
        parser.skip_whitespace();
        match parser.chars.peek() {
            None => Ok(value),
            Some(&(_, c)) => Err(parser.syntax(format!("unexpected `{}`", c))),
        }
    }

    fn annotate(&self, text: &str) -> Result<String, EvaluationError> {
        let mut out = String::with_capacity(text.len());
        let mut rest = text;
        while let Some(start) = rest.find('{') {
            out.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            let end = after.find('}').ok_or_else(|| EvaluationError::Syntax {
                expression: text.to_string(),
                reason: "unclosed `{`".to_string(),
            })?;
            let inner = after[..end].trim();
            match self.vars.get(inner) {
                Some(MetaVar::Text(value)) => out.push_str(value),
                Some(var @ (MetaVar::Effect(_) | MetaVar::Float(_))) => {
                    out.push_str(&var.to_string())
                }
                _ => out.push_str(&self.eval_int(inner)?.to_string()),
            }
            rest = &after[end + 1..];
        }
        out.push_str(rest);
        Ok(out)
    }
}

struct Parser<'s, 'e> {
    evaluator: &'e ExprEvaluator<'e>,
    source: &'s str,
    chars: std::iter::Peekable<std::str::CharIndices<'s>>,
}

impl Parser<'_, '_> {
    fn syntax(&self, reason: String) -> EvaluationError {
        EvaluationError::Syntax {
            expression: self.source.to_string(),
            reason,
        }
    }

    fn skip_whitespace(&mut self) {
        while self.chars.next_if(|(_, c)| c.is_whitespace()).is_some() {}
    }

    fn eat(&mut self, expected: char) -> bool {
        self.skip_whitespace();
        self.chars.next_if(|&(_, c)| c == expected).is_some()
    }

    fn expr(&mut self) -> Result<i64, EvaluationError> {
        let mut value = self.term()?;
        loop {
            if self.eat('+') {
                value = value.saturating_add(self.term()?);
            } else if self.eat('-') {
                value = value.saturating_sub(self.term()?);
            } else {
                return Ok(value);
            }
        }
    }

    fn term(&mut self) -> Result<i64, EvaluationError> {
        let mut value = self.factor()?;
        loop {
            if self.eat('*') {
                value = value.saturating_mul(self.factor()?);
            } else if self.eat('/') {
                let divisor = self.factor()?;
                if divisor == 0 {
                    return Err(EvaluationError::DivisionByZero(self.source.to_string()));
                }
                // Rounds down, like dice-expression floor division.
                value = value.div_euclid(divisor);
            } else {
                return Ok(value);
            }
        }
    }

    fn factor(&mut self) -> Result<i64, EvaluationError> {
        if self.eat('-') {
            return Ok(self.factor()?.saturating_neg());
        }
        if self.eat('(') {
            let value = self.expr()?;
            if !self.eat(')') {
                return Err(self.syntax("expected `)`".to_string()));
            }
            return Ok(value);
        }

        self.skip_whitespace();
        let Some(&(start, first)) = self.chars.peek() else {
            return Err(self.syntax("unexpected end of expression".to_string()));
        };

        if first.is_ascii_digit() {
            let end = self.take_while(|c| c.is_ascii_digit());
            let literal = &self.source[start..end];
            if self.chars.peek().is_some_and(|&(_, c)| c.is_alphabetic()) {
                return Err(EvaluationError::NotAnInteger {
                    expression: self.source.to_string(),
                });
            }
            return literal
                .parse()
                .map_err(|_| self.syntax(format!("integer `{}` out of range", literal)));
        }

        if first.is_alphabetic() || first == '_' {
            let end = self.take_while(|c| c.is_alphanumeric() || c == '_');
            let name = &self.source[start..end];
            return self.evaluator.lookup(name, self.source);
        }

        Err(self.syntax(format!("unexpected `{}`", first)))
    }

    /// Consumes characters matching `pred`; returns the end byte offset.
    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> usize {
        let mut end = self.source.len();
        while let Some(&(index, c)) = self.chars.peek() {
            if !pred(c) {
                end = index;
                break;
            }
            self.chars.next();
        }
        end
    }
}
