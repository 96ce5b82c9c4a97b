use core::fmt::Debug;

/// Integer-like key of an [`Arena`](crate::Arena).
///
/// Distinct key types keep handles from different arenas apart at compile
/// time even when they share the same underlying integer.
pub trait Id: Copy + Ord + Debug {
    /// Number of values an arena keyed by this type can hold.
    const MAX: usize;

    /// Converts a position below `Self::MAX` into a key.
    fn from_usize(idx: usize) -> Self;

    fn into_usize(self) -> usize;
}
