use hlsl_token::Token;
use itertools::Itertools;
use source_files::Occurrence;

/// A contiguous run of tokens that a tree node was read from.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Sequence<'a> {
    pub tokens: &'a [Token<'a>],
}

impl<'a> Sequence<'a> {
    pub fn new(tokens: &'a [Token<'a>]) -> Self {
        Self { tokens }
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn first(&self) -> Option<&'a Token<'a>> {
        self.tokens.first()
    }

    /// Span from the first token through the last.
    pub fn occurrence(&self) -> Option<Occurrence> {
        let first = self.tokens.first()?;
        let last = self.tokens.last()?;
        Some(first.occurrence.through(last.occurrence))
    }

    /// The source text this sequence covers, trivia included.
    pub fn text(&self) -> String {
        self.tokens.iter().map(|token| token.lexeme).join("")
    }

    /// Tokens that are neither trivia nor zero-width structure.
    pub fn significant(&self) -> impl Iterator<Item = &'a Token<'a>> + use<'a> {
        self.tokens
            .iter()
            .filter(|token| !token.kind.is_trivia() && !token.lexeme.is_empty())
    }

    /// Compares the significant tokens of two sequences by kind and spelling.
    pub fn same_spelling(&self, other: &Sequence) -> bool {
        self.significant()
            .map(|token| (token.kind, token.lexeme))
            .eq(other.significant().map(|token| (token.kind, token.lexeme)))
    }
}
