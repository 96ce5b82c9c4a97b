use derive_more::Display;

/// Position of a lexeme inside a [`SourceUnit`](crate::SourceUnit).
///
/// `offset` and `offset_after` are byte offsets. `line` counts every physical
/// line terminator, while `processed_line` skips the ones spliced away by a
/// trailing backslash. Lines and columns start at 1.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[display("{line}:{column}")]
pub struct Occurrence {
    pub offset: usize,
    pub offset_after: usize,
    pub processed_line: usize,
    pub line: usize,
    pub column: usize,
}

impl Occurrence {
    pub const fn start() -> Self {
        Self {
            offset: 0,
            offset_after: 0,
            processed_line: 1,
            line: 1,
            column: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.offset_after - self.offset
    }

    pub fn is_empty(&self) -> bool {
        self.offset == self.offset_after
    }

    /// Same position, extended to end at `offset_after`.
    pub fn to(self, offset_after: usize) -> Self {
        Self {
            offset_after: offset_after.max(self.offset),
            ..self
        }
    }

    /// Spans from the start of `self` to the end of `last`.
    pub fn through(self, last: Occurrence) -> Self {
        self.to(last.offset_after)
    }

    /// Zero-width occurrence at the end of `self`.
    pub fn end(self) -> Self {
        Self {
            offset: self.offset_after,
            ..self
        }
    }
}

impl Default for Occurrence {
    fn default() -> Self {
        Self::start()
    }
}
