mod directive;
mod keyword;
mod kind;
mod precedence;
mod value;

pub use directive::{DIRECTIVES, PRAGMAS, directive_kind, pragma_kind};
pub use keyword::Keyword;
pub use kind::TokenKind;
pub use precedence::{Associativity, PRECEDENCE_TABLE, Precedence, UNARY_PRECEDENCE};
use source_files::Occurrence;
use std::fmt::Display;
pub use value::{InclusionStyle, TokenValue};

/// A lexeme of the source together with its classification.
///
/// Tokens borrow their text from the source unit and are never modified
/// once the lexer emits them.
#[derive(Clone, Debug, PartialEq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub occurrence: Occurrence,
    pub lexeme: &'a str,
    pub value: Option<TokenValue>,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, occurrence: Occurrence, lexeme: &'a str) -> Self {
        Self {
            kind,
            occurrence,
            lexeme,
            value: None,
        }
    }

    pub fn with_value(self, value: TokenValue) -> Self {
        Self {
            value: Some(value),
            ..self
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// Identifiers and keywords can both name a macro.
    pub fn name(&self) -> Option<&'a str> {
        match self.kind {
            TokenKind::Identifier | TokenKind::Keyword(_) => Some(self.lexeme),
            _ => None,
        }
    }

    pub fn integer(&self) -> Option<i64> {
        match self.value {
            Some(TokenValue::Integer(value) | TokenValue::Character(value)) => Some(value),
            _ => None,
        }
    }

    pub fn string(&self) -> Option<&str> {
        match &self.value {
            Some(TokenValue::String(value)) => Some(value),
            _ => None,
        }
    }

    pub fn inclusion_style(&self) -> Option<InclusionStyle> {
        match self.value {
            Some(TokenValue::InclusionStyle(style)) => Some(style),
            _ => None,
        }
    }
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.lexeme.is_empty() {
            self.kind.fmt(f)
        } else {
            write!(f, "`{}`", self.lexeme.escape_debug())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_tables_agree() {
        assert_eq!(Keyword::from_name("row_major"), Some(Keyword::RowMajor));
        assert_eq!(Keyword::RowMajor.name(), "row_major");
        assert_eq!(Keyword::from_name("Texture2D"), Some(Keyword::Texture2D));
        assert_eq!(Keyword::from_name("float4"), None);
        assert_eq!(directive_kind("ifndef"), Some(TokenKind::PreprocessorIfndef));
        assert_eq!(
            directive_kind("row_major"),
            Some(TokenKind::Keyword(Keyword::RowMajor))
        );
        assert_eq!(directive_kind("import"), None);
        assert_eq!(pragma_kind("pack_matrix"), TokenKind::PragmaPackMatrix);
        assert_eq!(pragma_kind("optimize"), TokenKind::PragmaCustom);
    }

    #[test]
    fn precedence_follows_c_ordering() {
        let level = |kind: TokenKind| kind.precedence().map(|precedence| precedence.level);

        assert!(level(TokenKind::Star) > level(TokenKind::Plus));
        assert!(level(TokenKind::Plus) > level(TokenKind::LeftShift));
        assert!(level(TokenKind::LessThan) > level(TokenKind::EqualTo));
        assert!(level(TokenKind::Ampersand) > level(TokenKind::Caret));
        assert!(level(TokenKind::Caret) > level(TokenKind::Pipe));
        assert!(level(TokenKind::LogicalAnd) > level(TokenKind::LogicalOr));
        assert!(level(TokenKind::LogicalOr) > level(TokenKind::Question));
        assert!(level(TokenKind::TokenPasting) > level(TokenKind::Bang));
        assert_eq!(level(TokenKind::Comma), None);

        assert_eq!(
            TokenKind::Question.precedence().map(|p| p.associativity),
            Some(Associativity::Right)
        );
    }

    #[test]
    fn token_display_prefers_lexeme() {
        let token = Token::new(TokenKind::Identifier, Occurrence::start(), "meow");
        assert_eq!(token.to_string(), "`meow`");

        let marker = Token::new(TokenKind::StreamEnd, Occurrence::start(), "");
        assert_eq!(marker.to_string(), "end of stream");
    }
}
