//! Caller-supplied arguments of an automation run.

use thiserror::Error;

/// An argument value that could not be converted to the requested type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{value} cannot be cast to int (in argument {arg})")]
pub struct ArgumentError {
    pub arg: String,
    pub value: String,
}

/// Ordered `(name, value)` pairs, later occurrences winning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutomationArgs {
    values: Vec<(String, String)>,
}

impl AutomationArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, arg: impl Into<String>, value: impl Into<String>) {
        self.values.push((arg.into(), value.into()));
    }

    #[must_use]
    pub fn with(mut self, arg: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(arg, value);
        self
    }

    /// Last value given for `arg`.
    pub fn last(&self, arg: &str) -> Option<&str> {
        self.values
            .iter()
            .rev()
            .find(|(name, _)| name == arg)
            .map(|(_, value)| value.as_str())
    }

    /// Last value given for `arg`, parsed as an integer.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError`] if the value is present but not an integer.
    pub fn last_int(&self, arg: &str) -> Result<Option<i64>, ArgumentError> {
        self.last(arg)
            .map(|value| {
                value.trim().parse().map_err(|_| ArgumentError {
                    arg: arg.to_string(),
                    value: value.to_string(),
                })
            })
            .transpose()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AutomationArgs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}
