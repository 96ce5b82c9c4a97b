use crate::Id;
use core::{
    fmt,
    hash::{Hash, Hasher},
    marker::PhantomData,
};

/// Handle to a value of type `V` stored in an [`Arena`](crate::Arena) keyed by `K`.
///
/// Handles are plain integers, so they are `Copy` regardless of `V` and
/// remain valid while the arena grows.
pub struct Idx<K: Id, V> {
    raw: K,
    phantom: PhantomData<fn() -> V>,
}

impl<K: Id, V> Idx<K, V> {
    #[inline]
    pub const fn from_raw(raw: K) -> Self {
        Self {
            raw,
            phantom: PhantomData,
        }
    }

    #[inline]
    pub const fn into_raw(self) -> K {
        self.raw
    }
}

impl<K: Id, V> Clone for Idx<K, V> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<K: Id, V> Copy for Idx<K, V> {}

impl<K: Id, V> PartialEq for Idx<K, V> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<K: Id, V> Eq for Idx<K, V> {}

impl<K: Id, V> PartialOrd for Idx<K, V> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Id, V> Ord for Idx<K, V> {
    #[inline]
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.raw.cmp(&other.raw)
    }
}

impl<K: Id + Hash, V> Hash for Idx<K, V> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state)
    }
}

impl<K: Id, V> fmt::Debug for Idx<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Last path segment only, generics included
        let full = core::any::type_name::<V>();
        let generics = full.find('<').unwrap_or(full.len());
        let name = &full[full[..generics].rfind(':').map_or(0, |colon| colon + 1)..];
        write!(f, "{}#{}", name, self.raw.into_usize())
    }
}
