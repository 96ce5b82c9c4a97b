use crate::{Diagnostic, Severity, Show, show::write_location};
use colored::Colorize;
use source_files::{Occurrence, SourceUnit};

#[derive(Clone, Debug)]
pub struct WarningDiagnostic {
    message: String,
    occurrence: Option<Occurrence>,
}

impl WarningDiagnostic {
    pub fn new(message: impl ToString, occurrence: Occurrence) -> Self {
        Self {
            message: message.to_string(),
            occurrence: Some(occurrence),
        }
    }

    pub fn plain(message: impl ToString) -> Self {
        Self {
            message: message.to_string(),
            occurrence: None,
        }
    }
}

impl Show for WarningDiagnostic {
    fn show(&self, w: &mut dyn std::fmt::Write, source: &SourceUnit) -> std::fmt::Result {
        write_location(w, source, self.occurrence)?;
        write!(w, "{} {}", "warning:".yellow().bold(), self.message)
    }
}

impl Diagnostic for WarningDiagnostic {
    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn occurrence(&self) -> Option<Occurrence> {
        self.occurrence
    }
}
