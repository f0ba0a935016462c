//! Types that can back a [`Reg`](crate::reg::Reg).

use core::fmt::Debug;
use core::hash::Hash;
use core::ops::{BitAnd, BitOr, Not, Shl, Shr};

/// Unsigned integer types that can back a [`Reg`](crate::reg::Reg).
///
/// This trait is implemented on all primitive unsigned integer types *except* the
/// pointer-sized type `usize`. Signed types are not supported: field masks and
/// shifts only have well-defined semantics on unsigned values.
///
/// ⚠️ This trait is sealed and cannot be implemented for types outside of this crate.
pub trait Integer:
    Debug
    + Default
    + Copy
    + Eq
    + Ord
    + Hash
    + Sized
    + Send
    + Sync
    + 'static
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + Not<Output = Self>
    + Shl<u32, Output = Self>
    + Shr<u32, Output = Self>
    + private::Sealed
{
    /// The value with no bits set.
    const ZERO: Self;

    /// The value with all bits set.
    const MAX: Self;

    /// The size of this type in bits.
    const BITS: u32;

    /// Returns the bit pattern with ones at `width` bits starting at `offset`.
    fn field_mask(width: u32, offset: u32) -> Self;
}

macro_rules! integer_impl_for {
    ($($ty:ty),*) => {$(
        impl Integer for $ty {
            const ZERO: Self = 0;
            const MAX: Self = <$ty>::MAX;
            const BITS: u32 = <$ty>::BITS;

            #[inline]
            fn field_mask(width: u32, offset: u32) -> Self {
                let low = if width >= <$ty>::BITS {
                    <$ty>::MAX
                } else {
                    (1 << width) - 1
                };
                low << offset
            }
        }
    )*};
}
integer_impl_for!(u8, u16, u32, u64, u128);

mod private {
    pub trait Sealed {}
    impl Sealed for u8 {}
    impl Sealed for u16 {}
    impl Sealed for u32 {}
    impl Sealed for u64 {}
    impl Sealed for u128 {}
}
