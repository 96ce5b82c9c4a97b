use crate::{Diagnostic, Severity, Show, show::write_location};
use colored::Colorize;
use source_files::{Occurrence, SourceUnit};

/// Informational message, such as the text of `#pragma message`.
#[derive(Clone, Debug)]
pub struct NoteDiagnostic {
    message: String,
    occurrence: Occurrence,
}

impl NoteDiagnostic {
    pub fn new(message: impl ToString, occurrence: Occurrence) -> Self {
        Self {
            message: message.to_string(),
            occurrence,
        }
    }
}

impl Show for NoteDiagnostic {
    fn show(&self, w: &mut dyn std::fmt::Write, source: &SourceUnit) -> std::fmt::Result {
        write_location(w, source, Some(self.occurrence))?;
        write!(w, "{} {}", "note:".cyan().bold(), self.message)
    }
}

impl Diagnostic for NoteDiagnostic {
    fn severity(&self) -> Severity {
        Severity::Note
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn occurrence(&self) -> Option<Occurrence> {
        Some(self.occurrence)
    }
}
