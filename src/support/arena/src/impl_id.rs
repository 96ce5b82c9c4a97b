use crate::Id;

macro_rules! impl_id_for_nums {
    ($($ty:ty),*) => {$(
        impl Id for $ty {
            const MAX: usize = <$ty>::MAX as usize;

            #[inline]
            fn from_usize(idx: usize) -> Self {
                assert!(idx <= <Self as Id>::MAX);
                idx as $ty
            }

            #[inline]
            fn into_usize(self) -> usize {
                self as usize
            }
        }
    )*};
}

impl_id_for_nums!(u8, u16, u32, u64, usize);
