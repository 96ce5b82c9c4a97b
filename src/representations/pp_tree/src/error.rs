use crate::ConditionalOrigin;
use diagnostics::{Show, write_location};
use source_files::{Occurrence, SourceUnit};
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub occurrence: Occurrence,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, occurrence: Occurrence) -> Self {
        Self { kind, occurrence }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.occurrence, self.kind)
    }
}

impl std::error::Error for ParseError {}

impl Show for ParseError {
    fn show(&self, w: &mut dyn std::fmt::Write, source: &SourceUnit) -> std::fmt::Result {
        write_location(w, source, Some(self.occurrence))?;
        write!(w, "error: {}", self.kind)
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("Expected start of token stream")]
    ExpectedStreamBegin,
    #[error("Expected end of token stream")]
    ExpectedStreamEnd,
    #[error("Expected {expected}, got {found}")]
    Expected { expected: String, found: String },
    #[error("Malformed comment")]
    MalformedComment,
    #[error("Expected macro name")]
    ExpectedMacroName,
    #[error("Expected macro parameter name")]
    ExpectedParameter,
    #[error("Duplicate macro parameter `{0}`")]
    DuplicateParameter(String),
    #[error("`...` must be the last macro parameter")]
    VariadicParameterMustBeLast,
    #[error("Macro `{0}` redefined")]
    MacroRedefinition(String),
    #[error("Symbol table held {count} definitions of `{name}`")]
    CorruptedSymbolTable { name: String, count: usize },
    #[error("`{0}` without matching `#if`")]
    UnmatchedConditional(&'static str),
    #[error("Expected `#endif`")]
    ExpectedEndif,
    #[error("`{0}` after `#else`")]
    ConditionalAfterElse(ConditionalOrigin),
    #[error("`{0}` cannot appear here in a conditional")]
    InvalidConditionalOrigin(ConditionalOrigin),
    #[error("Expected expression")]
    ExpectedExpression,
    #[error("Expected end of expression")]
    ExpectedEndOfExpression,
    #[error("Expression nested deeper than {0} levels")]
    ExpressionTooDeep(usize),
    #[error("Expected include path")]
    ExpectedIncludePath,
    #[error("Expected line number")]
    ExpectedLineNumber,
    #[error("Expected `row_major` or `column_major`")]
    ExpectedMatrixPacking,
    #[error("Unexpected directive `#{0}`")]
    UnexpectedDirective(String),
    #[error("Division by zero in preprocessor expression")]
    DivisionByZero,
    #[error("Cannot evaluate {0} in preprocessor expression")]
    CannotEvaluate(String),
    #[error("Function-like macro `{0}` cannot be called in a preprocessor expression")]
    UnsupportedMacroCall(String),
    #[error("Unexpected {0}")]
    StrayToken(String),
    #[error("Preprocessor directive must start a line")]
    DirectiveNotAtLineStart,
}

impl ParseErrorKind {
    pub fn at(self, occurrence: Occurrence) -> ParseError {
        ParseError::new(self, occurrence)
    }
}
