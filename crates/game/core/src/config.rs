/// Effect engine constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EffectConfig {
    /// Maximum number of characters kept from a resolved description.
    pub description_limit: usize,
    /// Appended to a description that was cut at `description_limit`.
    pub truncation_marker: String,
    /// Counter used for the first stacked duplicate (`"<name> x2"`).
    pub first_stack_index: u32,
}

impl EffectConfig {
    /// Remaining-duration sentinel for effects that last until removed.
    pub const INDEFINITE: i32 = -1;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_DESCRIPTION_LIMIT: usize = 500;
    pub const DEFAULT_TRUNCATION_MARKER: &'static str = "...";
    pub const DEFAULT_FIRST_STACK_INDEX: u32 = 2;

    pub fn new() -> Self {
        Self {
            description_limit: Self::DEFAULT_DESCRIPTION_LIMIT,
            truncation_marker: Self::DEFAULT_TRUNCATION_MARKER.to_string(),
            first_stack_index: Self::DEFAULT_FIRST_STACK_INDEX,
        }
    }

    pub fn with_description_limit(mut self, description_limit: usize) -> Self {
        self.description_limit = description_limit;
        self
    }

    /// Cuts `text` to the configured limit, counted in characters.
    ///
    /// Returns the text unchanged when it fits.
    pub fn truncate_description(&self, text: String) -> String {
        match text.char_indices().nth(self.description_limit) {
            Some((cut, _)) => format!("{}{}", &text[..cut], self.truncation_marker),
            None => text,
        }
    }
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self::new()
    }
}
