use crate::{BinaryRef, FunctionCallRef, ParseError, Sequence, Symbol, TernaryRef, UnaryRef};
use derive_more::{Display, IsVariant};
use hlsl_token::TokenKind;

#[derive(Clone, Debug, PartialEq)]
pub struct Literal<'a, T> {
    pub value: T,
    pub sequence: Sequence<'a>,
}

/// `defined NAME` or `defined(NAME)`
#[derive(Clone, Debug, PartialEq)]
pub struct Defined<'a> {
    pub symbol: Symbol<'a>,
    pub sequence: Sequence<'a>,
}

#[derive(Clone, Debug, PartialEq, IsVariant)]
pub enum Expression<'a> {
    Symbol(Symbol<'a>),
    Integer(Literal<'a, i64>),
    Float(Literal<'a, f64>),
    String(Literal<'a, String>),
    Char(Literal<'a, i64>),
    Boolean(Literal<'a, bool>),
    Defined(Defined<'a>),
    Unary(UnaryRef<'a>),
    Binary(BinaryRef<'a>),
    Ternary(TernaryRef<'a>),
    FunctionCall(FunctionCallRef<'a>),
    ParserError(ParseError),
}

#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    #[display("!")]
    Not,
    #[display("-")]
    Negate,
    #[display("+")]
    Plus,
    #[display("~")]
    Complement,
    #[display("#")]
    Stringize,
    #[display("#@")]
    Charize,
}

impl UnaryOperator {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        Some(match kind {
            TokenKind::Bang => Self::Not,
            TokenKind::Minus => Self::Negate,
            TokenKind::Plus => Self::Plus,
            TokenKind::Tilde => Self::Complement,
            TokenKind::Hash => Self::Stringize,
            TokenKind::Charizing => Self::Charize,
            _ => return None,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Unary<'a> {
    pub operator: UnaryOperator,
    pub operand: Expression<'a>,
    pub sequence: Sequence<'a>,
}

#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    #[display("*")]
    Multiply,
    #[display("/")]
    Divide,
    #[display("%")]
    Modulus,
    #[display("+")]
    Add,
    #[display("-")]
    Subtract,
    #[display("<<")]
    LeftShift,
    #[display(">>")]
    RightShift,
    #[display("<")]
    Less,
    #[display("<=")]
    LessEqual,
    #[display(">")]
    Greater,
    #[display(">=")]
    GreaterEqual,
    #[display("==")]
    Equal,
    #[display("!=")]
    NotEqual,
    #[display("&")]
    BitAnd,
    #[display("^")]
    BitXor,
    #[display("|")]
    BitOr,
    #[display("&&")]
    LogicalAnd,
    #[display("||")]
    LogicalOr,
    #[display("##")]
    TokenPaste,
}

impl BinaryOperator {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        Some(match kind {
            TokenKind::Star => Self::Multiply,
            TokenKind::Slash => Self::Divide,
            TokenKind::Percent => Self::Modulus,
            TokenKind::Plus => Self::Add,
            TokenKind::Minus => Self::Subtract,
            TokenKind::LeftShift => Self::LeftShift,
            TokenKind::RightShift => Self::RightShift,
            TokenKind::LessThan => Self::Less,
            TokenKind::LessThanOrEqualTo => Self::LessEqual,
            TokenKind::GreaterThan => Self::Greater,
            TokenKind::GreaterThanOrEqualTo => Self::GreaterEqual,
            TokenKind::EqualTo => Self::Equal,
            TokenKind::NotEqualTo => Self::NotEqual,
            TokenKind::Ampersand => Self::BitAnd,
            TokenKind::Caret => Self::BitXor,
            TokenKind::Pipe => Self::BitOr,
            TokenKind::LogicalAnd => Self::LogicalAnd,
            TokenKind::LogicalOr => Self::LogicalOr,
            TokenKind::TokenPasting => Self::TokenPaste,
            _ => return None,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Binary<'a> {
    pub operator: BinaryOperator,
    pub left: Expression<'a>,
    pub right: Expression<'a>,

    // The operator token
    pub sequence: Sequence<'a>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Ternary<'a> {
    pub condition: Expression<'a>,
    pub when_true: Expression<'a>,
    pub when_false: Expression<'a>,
    pub sequence: Sequence<'a>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FunctionCall<'a> {
    pub name: Symbol<'a>,
    pub arguments: Vec<Expression<'a>>,
    pub sequence: Sequence<'a>,
}
