use crate::{Id, Idx, iter::Iter};
use alloc::vec::Vec;
use core::{
    fmt,
    marker::PhantomData,
    ops::{Index, IndexMut},
};

/// An append-only store addressed by strongly-typed handles.
///
/// Values are never removed or moved, so an [`Idx<K, V>`] handed out by
/// [`Arena::alloc`] stays valid for the lifetime of the arena, no matter how
/// many values are allocated after it.
pub struct Arena<K: Id, V> {
    data: Vec<V>,
    phantom: PhantomData<K>,
}

impl<K: Id, V> Arena<K, V> {
    /// Creates a new empty arena.
    ///
    /// ```
    /// # use arena::Arena;
    /// let arena: Arena<u32, i32> = Arena::new();
    /// assert!(arena.is_empty());
    /// ```
    #[inline]
    pub const fn new() -> Self {
        Self {
            data: Vec::new(),
            phantom: PhantomData,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Allocates a value and returns its handle.
    ///
    /// # Panics
    ///
    /// Panics if the arena already holds `K::MAX` values.
    /// Use [`Arena::try_alloc`] to handle that case.
    ///
    /// ```
    /// use arena::{Arena, Idx};
    ///
    /// let mut arena: Arena<u32, &str> = Arena::new();
    /// let idx: Idx<u32, &str> = arena.alloc("hello");
    /// assert_eq!(arena[idx], "hello");
    /// ```
    #[inline]
    pub fn alloc(&mut self, value: V) -> Idx<K, V> {
        self.try_alloc(value).expect("arena is full")
    }

    /// Fallible version of [`Arena::alloc`].
    #[inline]
    pub fn try_alloc(&mut self, value: V) -> Option<Idx<K, V>> {
        if self.data.len() >= K::MAX {
            return None;
        }

        let raw = K::from_usize(self.data.len());
        self.data.push(value);
        Some(Idx::from_raw(raw))
    }

    /// Iterates over handles and values in allocation order.
    #[inline]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            iter: self.data.iter().enumerate(),
            phantom: PhantomData,
        }
    }

    #[inline]
    pub fn keys(&self) -> impl Iterator<Item = Idx<K, V>> {
        (0..self.data.len()).map(|index| Idx::from_raw(K::from_usize(index)))
    }
}

impl<K: Id, V> Default for Arena<K, V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Id, V> Index<Idx<K, V>> for Arena<K, V> {
    type Output = V;

    #[inline]
    fn index(&self, idx: Idx<K, V>) -> &Self::Output {
        &self.data[idx.into_raw().into_usize()]
    }
}

impl<K: Id, V> IndexMut<Idx<K, V>> for Arena<K, V> {
    #[inline]
    fn index_mut(&mut self, idx: Idx<K, V>) -> &mut Self::Output {
        &mut self.data[idx.into_raw().into_usize()]
    }
}

impl<K: Id, V: Clone> Clone for Arena<K, V> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            phantom: PhantomData,
        }
    }
}

impl<K: Id, V: fmt::Debug> fmt::Debug for Arena<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("len", &self.len())
            .field("data", &self.data)
            .finish()
    }
}

impl<K: Id, V: PartialEq> PartialEq for Arena<K, V> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl<'a, K: Id, V> IntoIterator for &'a Arena<K, V> {
    type Item = (Idx<K, V>, &'a V);
    type IntoIter = Iter<'a, K, V>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
