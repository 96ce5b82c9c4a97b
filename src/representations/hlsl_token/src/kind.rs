use crate::{Keyword, Token};
use derive_more::IsVariant;
use source_files::Occurrence;
use std::fmt::Display;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, IsVariant)]
pub enum TokenKind {
    // Bracketing of every lexed sequence
    StreamBegin,
    StreamEnd,

    #[is_variant(ignore)]
    Whitespace,
    Newline,
    EscapedNewline,
    Backslash,

    LineCommentBegin,
    LineCommentEnd,
    BlockCommentBegin,
    BlockCommentEnd,
    CommentText,

    Identifier,
    Keyword(Keyword),

    IntegerLiteral,
    IntegerHexLiteral,
    IntegerOctalLiteral,
    IntegerBinaryLiteral,
    FloatLiteral,
    BooleanLiteral,
    StringLiteralBegin,
    StringLiteral,
    StringLiteralEnd,
    CharLiteralBegin,
    CharLiteral,
    CharLiteralEnd,

    // Structure of directive lines
    PreprocessorHash,
    PreprocessorStatementBegin,
    PreprocessorStatementEnd,
    PreprocessorBlockBegin,
    PreprocessorBlockEnd,

    PreprocessorDefine,
    PreprocessorUndef,
    PreprocessorIf,
    PreprocessorElif,
    PreprocessorIfdef,
    PreprocessorIfndef,
    PreprocessorElifdef,
    PreprocessorElifndef,
    PreprocessorElse,
    PreprocessorEndif,
    PreprocessorInclude,
    PreprocessorLine,
    PreprocessorPragma,
    PreprocessorError,
    PreprocessorWarning,

    PragmaOnce,
    PragmaDef,
    PragmaPackMatrix,
    PragmaWarning,
    PragmaMessage,
    PragmaCustom,

    // Free text of `#error` and `#warning`
    DirectiveText,

    Hash,
    TokenPasting,
    Charizing,

    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
    OpenBrace,
    CloseBrace,
    Semicolon,
    Colon,
    Comma,
    Dot,
    Ellipsis,
    Question,

    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Increment,
    Decrement,

    Assign,
    AddAssign,
    SubtractAssign,
    MultiplyAssign,
    DivideAssign,
    ModulusAssign,
    LeftShiftAssign,
    RightShiftAssign,
    AndAssign,
    OrAssign,
    XorAssign,

    EqualTo,
    NotEqualTo,
    LessThan,
    LessThanOrEqualTo,
    GreaterThan,
    GreaterThanOrEqualTo,
    LeftShift,
    RightShift,
    Ampersand,
    Pipe,
    Caret,
    Tilde,
    Bang,
    LogicalAnd,
    LogicalOr,

    Unknown,
}

impl TokenKind {
    pub fn at<'a>(self, occurrence: Occurrence, lexeme: &'a str) -> Token<'a> {
        Token::new(self, occurrence, lexeme)
    }

    /// Tokens that carry no meaning of their own and are skipped between
    /// significant tokens.
    pub fn is_trivia(&self) -> bool {
        matches!(
            self,
            Self::Whitespace
                | Self::Newline
                | Self::EscapedNewline
                | Self::Backslash
                | Self::LineCommentBegin
                | Self::LineCommentEnd
                | Self::BlockCommentBegin
                | Self::BlockCommentEnd
                | Self::CommentText
        )
    }

    /// Inline whitespace only, line structure is kept.
    pub fn is_whitespace(&self) -> bool {
        matches!(self, Self::Whitespace)
    }

    /// Directive keywords that may follow a `PreprocessorHash`.
    pub fn is_directive(&self) -> bool {
        matches!(
            self,
            Self::PreprocessorDefine
                | Self::PreprocessorUndef
                | Self::PreprocessorIf
                | Self::PreprocessorElif
                | Self::PreprocessorIfdef
                | Self::PreprocessorIfndef
                | Self::PreprocessorElifdef
                | Self::PreprocessorElifndef
                | Self::PreprocessorElse
                | Self::PreprocessorEndif
                | Self::PreprocessorInclude
                | Self::PreprocessorLine
                | Self::PreprocessorPragma
                | Self::PreprocessorError
                | Self::PreprocessorWarning
        )
    }

    pub fn is_pragma(&self) -> bool {
        matches!(
            self,
            Self::PragmaOnce
                | Self::PragmaDef
                | Self::PragmaPackMatrix
                | Self::PragmaWarning
                | Self::PragmaMessage
                | Self::PragmaCustom
        )
    }

    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            Self::IntegerLiteral
                | Self::IntegerHexLiteral
                | Self::IntegerOctalLiteral
                | Self::IntegerBinaryLiteral
        )
    }

    /// Whether a value can end with this token, which makes a following `-`
    /// a binary operator rather than the sign of a literal.
    pub fn ends_value(&self) -> bool {
        self.is_integer()
            || matches!(
                self,
                Self::Identifier
                    | Self::Keyword(_)
                    | Self::FloatLiteral
                    | Self::BooleanLiteral
                    | Self::StringLiteralEnd
                    | Self::CharLiteralEnd
                    | Self::CloseParen
                    | Self::CloseBracket
                    | Self::CloseBrace
                    | Self::Increment
                    | Self::Decrement
            )
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let description = match self {
            Self::StreamBegin => "start of stream",
            Self::StreamEnd => "end of stream",
            Self::Whitespace => "whitespace",
            Self::Newline => "newline",
            Self::EscapedNewline => "escaped newline",
            Self::Backslash => "`\\`",
            Self::LineCommentBegin => "`//`",
            Self::LineCommentEnd => "end of line comment",
            Self::BlockCommentBegin => "`/*`",
            Self::BlockCommentEnd => "`*/`",
            Self::CommentText => "comment text",
            Self::Identifier => "identifier",
            Self::Keyword(keyword) => return write!(f, "keyword `{}`", keyword.name()),
            Self::IntegerLiteral
            | Self::IntegerHexLiteral
            | Self::IntegerOctalLiteral
            | Self::IntegerBinaryLiteral => "integer literal",
            Self::FloatLiteral => "floating point literal",
            Self::BooleanLiteral => "boolean literal",
            Self::StringLiteralBegin => "start of string literal",
            Self::StringLiteral => "string literal",
            Self::StringLiteralEnd => "end of string literal",
            Self::CharLiteralBegin => "start of character literal",
            Self::CharLiteral => "character literal",
            Self::CharLiteralEnd => "end of character literal",
            Self::PreprocessorHash => "`#`",
            Self::PreprocessorStatementBegin => "start of directive",
            Self::PreprocessorStatementEnd => "end of directive",
            Self::PreprocessorBlockBegin => "start of conditional block",
            Self::PreprocessorBlockEnd => "end of conditional block",
            Self::PreprocessorDefine => "`define`",
            Self::PreprocessorUndef => "`undef`",
            Self::PreprocessorIf => "`if`",
            Self::PreprocessorElif => "`elif`",
            Self::PreprocessorIfdef => "`ifdef`",
            Self::PreprocessorIfndef => "`ifndef`",
            Self::PreprocessorElifdef => "`elifdef`",
            Self::PreprocessorElifndef => "`elifndef`",
            Self::PreprocessorElse => "`else`",
            Self::PreprocessorEndif => "`endif`",
            Self::PreprocessorInclude => "`include`",
            Self::PreprocessorLine => "`line`",
            Self::PreprocessorPragma => "`pragma`",
            Self::PreprocessorError => "`error`",
            Self::PreprocessorWarning => "`warning`",
            Self::PragmaOnce => "`once`",
            Self::PragmaDef => "`def`",
            Self::PragmaPackMatrix => "`pack_matrix`",
            Self::PragmaWarning => "`warning`",
            Self::PragmaMessage => "`message`",
            Self::PragmaCustom => "pragma name",
            Self::DirectiveText => "directive text",
            Self::Hash => "`#`",
            Self::TokenPasting => "`##`",
            Self::Charizing => "`#@`",
            Self::OpenParen => "`(`",
            Self::CloseParen => "`)`",
            Self::OpenBracket => "`[`",
            Self::CloseBracket => "`]`",
            Self::OpenBrace => "`{`",
            Self::CloseBrace => "`}`",
            Self::Semicolon => "`;`",
            Self::Colon => "`:`",
            Self::Comma => "`,`",
            Self::Dot => "`.`",
            Self::Ellipsis => "`...`",
            Self::Question => "`?`",
            Self::Plus => "`+`",
            Self::Minus => "`-`",
            Self::Star => "`*`",
            Self::Slash => "`/`",
            Self::Percent => "`%`",
            Self::Increment => "`++`",
            Self::Decrement => "`--`",
            Self::Assign => "`=`",
            Self::AddAssign => "`+=`",
            Self::SubtractAssign => "`-=`",
            Self::MultiplyAssign => "`*=`",
            Self::DivideAssign => "`/=`",
            Self::ModulusAssign => "`%=`",
            Self::LeftShiftAssign => "`<<=`",
            Self::RightShiftAssign => "`>>=`",
            Self::AndAssign => "`&=`",
            Self::OrAssign => "`|=`",
            Self::XorAssign => "`^=`",
            Self::EqualTo => "`==`",
            Self::NotEqualTo => "`!=`",
            Self::LessThan => "`<`",
            Self::LessThanOrEqualTo => "`<=`",
            Self::GreaterThan => "`>`",
            Self::GreaterThanOrEqualTo => "`>=`",
            Self::LeftShift => "`<<`",
            Self::RightShift => "`>>`",
            Self::Ampersand => "`&`",
            Self::Pipe => "`|`",
            Self::Caret => "`^`",
            Self::Tilde => "`~`",
            Self::Bang => "`!`",
            Self::LogicalAnd => "`&&`",
            Self::LogicalOr => "`||`",
            Self::Unknown => "unknown character",
        };

        f.write_str(description)
    }
}
