use source_files::{Occurrence, SourceUnit};

pub trait Show {
    fn show(&self, w: &mut dyn std::fmt::Write, source: &SourceUnit) -> std::fmt::Result;

    fn eprintln(&self, source: &SourceUnit) {
        let mut message = String::new();

        if self.show(&mut message, source).is_ok() {
            eprintln!("{}", message);
        }
    }
}

/// Writes the `name:line:column: ` prefix shared by positioned messages.
pub fn write_location(
    w: &mut dyn std::fmt::Write,
    source: &SourceUnit,
    occurrence: Option<Occurrence>,
) -> std::fmt::Result {
    match occurrence {
        Some(occurrence) => write!(
            w,
            "{}:{}:{}: ",
            source.name(),
            occurrence.line,
            occurrence.column
        ),
        None => write!(w, "{}: ", source.name()),
    }
}
