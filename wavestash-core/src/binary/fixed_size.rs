use uuid::Uuid;

/// Types that always occupy the same number of bytes on disk.
///
/// `#[derive(FixedSize)]` sums the sizes of a struct's fields, so a record's size is known
/// before any of it has been read.
pub trait FixedSize {
    const SIZE: usize;
}

macro_rules! fixed_size_primitive {
    ($T:ty) => {
        impl FixedSize for $T {
            const SIZE: usize = std::mem::size_of::<$T>();
        }
    };
}

fixed_size_primitive!(u8);
fixed_size_primitive!(u16);
fixed_size_primitive!(u32);
fixed_size_primitive!(u64);

impl<const N: usize> FixedSize for [u8; N] {
    const SIZE: usize = N;
}

impl FixedSize for Uuid {
    const SIZE: usize = 16;
}
