mod error;
mod note;
mod show;
mod warning;

use core::fmt::Debug;
pub use error::ErrorDiagnostic;
pub use note::NoteDiagnostic;
pub use show::{Show, write_location};
use source_files::{Occurrence, SourceUnit};
use std::cell::RefCell;
pub use warning::WarningDiagnostic;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Note,
    Warning,
    Error,
}

pub trait Diagnostic: Show {
    fn severity(&self) -> Severity;
    fn message(&self) -> &str;
    fn occurrence(&self) -> Option<Occurrence>;
}

#[derive(Clone, Debug)]
pub struct DiagnosticFlags {
    pub print_without_collecting: bool,
    pub warnings_as_errors: bool,
}

impl Default for DiagnosticFlags {
    fn default() -> Self {
        Self {
            print_without_collecting: true,
            warnings_as_errors: false,
        }
    }
}

impl DiagnosticFlags {
    /// Keeps every diagnostic in memory instead of printing it.
    pub fn collecting() -> Self {
        Self {
            print_without_collecting: false,
            ..Default::default()
        }
    }
}

/// Sink for the non-fatal messages of one preprocessing pass.
pub struct Diagnostics<'a> {
    source: &'a SourceUnit,
    diagnostics: RefCell<Vec<Box<dyn Diagnostic>>>,
    flags: DiagnosticFlags,
}

impl<'a> Debug for Diagnostics<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Diagnostics")
            .field("source", &self.source.name())
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

impl<'a> Diagnostics<'a> {
    pub fn new(source: &'a SourceUnit, flags: DiagnosticFlags) -> Self {
        Self {
            source,
            diagnostics: RefCell::new(Vec::new()),
            flags,
        }
    }

    pub fn push(&self, diagnostic: impl Diagnostic + 'static) {
        if self.flags.print_without_collecting {
            self.print(&diagnostic);
        } else {
            self.diagnostics.borrow_mut().push(Box::new(diagnostic));
        }
    }

    pub fn len(&self) -> usize {
        self.diagnostics.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .borrow()
            .iter()
            .filter(|diagnostic| diagnostic.severity() == severity)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.count(Severity::Error) > 0
            || (self.flags.warnings_as_errors && self.count(Severity::Warning) > 0)
    }

    /// Collected messages paired with their severity, in the order pushed.
    pub fn messages(&self) -> Vec<(Severity, String)> {
        self.diagnostics
            .borrow()
            .iter()
            .map(|diagnostic| (diagnostic.severity(), diagnostic.message().to_string()))
            .collect()
    }

    pub fn print(&self, diagnostic: &dyn Diagnostic) {
        diagnostic.eprintln(self.source);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_when_not_printing() {
        let unit = SourceUnit::new("shader.hlsl", "#pragma bogus\n");
        let diagnostics = Diagnostics::new(&unit, DiagnosticFlags::collecting());

        diagnostics.push(WarningDiagnostic::new(
            "unknown pragma `bogus`",
            Occurrence::start(),
        ));
        diagnostics.push(NoteDiagnostic::new("hello", Occurrence::start()));

        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics.count(Severity::Warning), 1);
        assert!(!diagnostics.has_errors());
        assert_eq!(
            diagnostics.messages()[0],
            (Severity::Warning, "unknown pragma `bogus`".to_string())
        );
    }

    #[test]
    fn warnings_can_count_as_errors() {
        let unit = SourceUnit::new("shader.hlsl", "");
        let diagnostics = Diagnostics::new(
            &unit,
            DiagnosticFlags {
                print_without_collecting: false,
                warnings_as_errors: true,
            },
        );

        diagnostics.push(WarningDiagnostic::plain("careful"));
        assert!(diagnostics.has_errors());
    }

    #[test]
    fn shows_location_prefix() {
        colored::control::set_override(false);

        let unit = SourceUnit::new("shader.hlsl", "");
        let mut message = String::new();

        ErrorDiagnostic::new(
            "bad",
            Occurrence {
                line: 3,
                column: 7,
                ..Occurrence::start()
            },
        )
        .show(&mut message, &unit)
        .unwrap();

        assert_eq!(message, "shader.hlsl:3:7: error: bad");
    }
}
