use crate::TokenKind;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Associativity {
    Left,
    Right,
}

/// Binding strength of an operator inside `#if` expressions.
/// Higher levels bind tighter.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Precedence {
    pub level: u8,
    pub associativity: Associativity,
}

impl Precedence {
    const fn left(level: u8) -> Self {
        Self {
            level,
            associativity: Associativity::Left,
        }
    }

    const fn right(level: u8) -> Self {
        Self {
            level,
            associativity: Associativity::Right,
        }
    }

    pub fn is_right_associative(&self) -> bool {
        self.associativity == Associativity::Right
    }
}

/// Binding of prefix operators, including `-` and `+` in prefix position.
pub const UNARY_PRECEDENCE: Precedence = Precedence::right(13);

pub const PRECEDENCE_TABLE: &[(TokenKind, Precedence)] = &[
    (TokenKind::TokenPasting, Precedence::left(14)),
    (TokenKind::Bang, UNARY_PRECEDENCE),
    (TokenKind::Tilde, UNARY_PRECEDENCE),
    (TokenKind::Hash, UNARY_PRECEDENCE),
    (TokenKind::Charizing, UNARY_PRECEDENCE),
    (TokenKind::Star, Precedence::left(12)),
    (TokenKind::Slash, Precedence::left(12)),
    (TokenKind::Percent, Precedence::left(12)),
    (TokenKind::Plus, Precedence::left(11)),
    (TokenKind::Minus, Precedence::left(11)),
    (TokenKind::LeftShift, Precedence::left(10)),
    (TokenKind::RightShift, Precedence::left(10)),
    (TokenKind::LessThan, Precedence::left(9)),
    (TokenKind::LessThanOrEqualTo, Precedence::left(9)),
    (TokenKind::GreaterThan, Precedence::left(9)),
    (TokenKind::GreaterThanOrEqualTo, Precedence::left(9)),
    (TokenKind::EqualTo, Precedence::left(8)),
    (TokenKind::NotEqualTo, Precedence::left(8)),
    (TokenKind::Ampersand, Precedence::left(7)),
    (TokenKind::Caret, Precedence::left(6)),
    (TokenKind::Pipe, Precedence::left(5)),
    (TokenKind::LogicalAnd, Precedence::left(4)),
    (TokenKind::LogicalOr, Precedence::left(3)),
    (TokenKind::Question, Precedence::right(2)),
];

impl TokenKind {
    pub fn precedence(&self) -> Option<Precedence> {
        PRECEDENCE_TABLE
            .iter()
            .find(|(kind, _)| kind == self)
            .map(|(_, precedence)| *precedence)
    }
}
