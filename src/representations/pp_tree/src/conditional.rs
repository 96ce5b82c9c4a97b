use crate::{BlockRef, Expression, ParseErrorKind, Sequence};
use derive_more::{Display, IsVariant};

/// Which directive introduced a branch of a conditional.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash, IsVariant)]
pub enum ConditionalOrigin {
    #[display("#if")]
    If,
    #[display("#ifdef")]
    IfDef,
    #[display("#ifndef")]
    IfNDef,
    #[display("#elif")]
    ElseIf,
    #[display("#elifdef")]
    ElseIfDef,
    #[display("#elifndef")]
    ElseIfNDef,
    #[display("#else")]
    Else,
}

impl ConditionalOrigin {
    /// Origins that may only open a conditional.
    pub fn opens(&self) -> bool {
        matches!(self, Self::If | Self::IfDef | Self::IfNDef)
    }

    /// Origins that test whether a name is defined.
    pub fn tests_definition(&self) -> bool {
        matches!(
            self,
            Self::IfDef | Self::IfNDef | Self::ElseIfDef | Self::ElseIfNDef
        )
    }

    pub fn is_negated(&self) -> bool {
        matches!(self, Self::IfNDef | Self::ElseIfNDef)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Conditional<'a> {
    pub sequence: Sequence<'a>,
    pub origin: ConditionalOrigin,

    // Absent only for `#else`
    pub expression: Option<Expression<'a>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ConditionalBlock<'a> {
    pub condition: Conditional<'a>,
    pub branch: BlockRef<'a>,
}

/// An `#if`/`#ifdef`/`#ifndef` chain through its matching `#endif`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IfElseifElse<'a> {
    pub sequence: Sequence<'a>,
    pub branches: Vec<ConditionalBlock<'a>>,

    /// Branch that was taken, when conditions were evaluated and one held.
    pub active: Option<usize>,
}

impl<'a> IfElseifElse<'a> {
    /// Appends a branch, keeping the chain well formed: it opens with an
    /// `if`-class origin, never reopens, and nothing follows `#else`.
    pub fn push(&mut self, block: ConditionalBlock<'a>) -> Result<(), ParseErrorKind> {
        let origin = block.condition.origin;

        match self.branches.last() {
            None if !origin.opens() => return Err(ParseErrorKind::InvalidConditionalOrigin(origin)),
            Some(_) if origin.opens() => {
                return Err(ParseErrorKind::InvalidConditionalOrigin(origin));
            }
            Some(_) if self.has_else() => {
                return Err(ParseErrorKind::ConditionalAfterElse(origin));
            }
            _ => (),
        }

        self.branches.push(block);
        Ok(())
    }

    pub fn has_else(&self) -> bool {
        self.branches
            .last()
            .is_some_and(|block| block.condition.origin.is_else())
    }

    pub fn active_branch(&self) -> Option<&ConditionalBlock<'a>> {
        self.branches.get(self.active?)
    }
}
