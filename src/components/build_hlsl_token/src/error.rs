use diagnostics::{Show, write_location};
use source_files::{Occurrence, SourceUnit};
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub occurrence: Occurrence,
}

impl LexError {
    pub fn new(kind: LexErrorKind, occurrence: Occurrence) -> Self {
        Self { kind, occurrence }
    }
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.occurrence, self.kind)
    }
}

impl std::error::Error for LexError {}

impl Show for LexError {
    fn show(&self, w: &mut dyn std::fmt::Write, source: &SourceUnit) -> std::fmt::Result {
        write_location(w, source, Some(self.occurrence))?;
        write!(w, "error: {}", self.kind)
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LexErrorKind {
    #[error("Unterminated block comment")]
    UnterminatedBlockComment,
    #[error("Unterminated string literal")]
    UnterminatedStringLiteral,
    #[error("Unterminated raw string literal")]
    UnterminatedRawString,
    #[error("Malformed raw string delimiter")]
    BadRawStringDelimiter,
    #[error("Unterminated character literal")]
    UnterminatedCharLiteral,
    #[error("Empty character literal")]
    EmptyCharLiteral,
    #[error("Unterminated include path")]
    UnterminatedIncludePath,
    #[error("Bad escaped codepoint")]
    BadEscapedCodepoint,
    #[error("Malformed number `{0}`")]
    MalformedNumber(String),
    #[error("Number `{0}` is too large")]
    NumberOutOfRange(String),
    #[error("Expected directive name after `#`")]
    MissingDirective,
    #[error("Unknown preprocessor directive `#{0}`")]
    UnknownDirective(String),
}

impl LexErrorKind {
    pub fn at(self, occurrence: Occurrence) -> LexError {
        LexError::new(self, occurrence)
    }
}
