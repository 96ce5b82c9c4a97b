use derive_more::{Display, IsVariant};

/// Delimiters around the path of an `#include`.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash)]
pub enum InclusionStyle {
    #[display("\"...\"")]
    Quote,
    #[display("<...>")]
    AngleBracket,
}

/// Typed value decoded from a literal token.
#[derive(Clone, Debug, PartialEq, IsVariant)]
pub enum TokenValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Character(i64),
    InclusionStyle(InclusionStyle),
}
