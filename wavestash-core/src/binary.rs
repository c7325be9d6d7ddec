mod deserializer;
mod error;
mod fixed_size;

pub use deserializer::*;
pub use error::*;
pub use fixed_size::*;

use std::io::Read;

use uuid::Uuid;

pub trait Deserialize: Sized {
    fn deserialize(deserializer: &mut Deserializer<impl Read>) -> Result<Self, Error>;
}

macro_rules! deserialize_primitive_le {
    ($T:ty) => {
        impl Deserialize for $T {
            fn deserialize(deserializer: &mut Deserializer<impl Read>) -> Result<Self, Error> {
                let mut buf = [0; std::mem::size_of::<$T>()];
                deserializer.read_bytes(&mut buf)?;
                Ok(<$T>::from_le_bytes(buf))
            }
        }
    };
}

deserialize_primitive_le!(u8);
deserialize_primitive_le!(u16);
deserialize_primitive_le!(u32);
deserialize_primitive_le!(u64);

impl<const N: usize> Deserialize for [u8; N] {
    fn deserialize(deserializer: &mut Deserializer<impl Read>) -> Result<Self, Error> {
        let mut buf = [0; N];
        deserializer.read_bytes(&mut buf)?;
        Ok(buf)
    }
}

/// GUIDs in RIFF files are stored with Microsoft's mixed-endian layout.
impl Deserialize for Uuid {
    fn deserialize(deserializer: &mut Deserializer<impl Read>) -> Result<Self, Error> {
        let mut buf = [0; 16];
        deserializer.read_bytes(&mut buf)?;
        Ok(Uuid::from_bytes_le(buf))
    }
}

impl<R> Deserializer<R> {
    pub fn deserialize<T>(&mut self) -> Result<T, Error>
    where
        R: Read,
        T: Deserialize,
    {
        T::deserialize(self)
    }
}

pub fn deserialize<T>(buffer: &[u8]) -> Result<T, Error>
where
    T: Deserialize,
{
    T::deserialize(&mut Deserializer::from_buffer(buffer))
}
