use crate::Occurrence;

/// A named piece of source text, the input of a single preprocessing pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceUnit {
    name: String,
    text: String,
}

impl SourceUnit {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the source text covered by `occurrence`.
    pub fn slice(&self, occurrence: Occurrence) -> Option<&str> {
        self.text.get(occurrence.offset..occurrence.offset_after)
    }
}
