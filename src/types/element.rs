//! Primitive element trait for typed storage

use super::DType;
use byteorder::{ByteOrder, LittleEndian};
use std::fmt::Debug;

/// Types that can be stored as elements of a dataset or [`crate::DataArray`]
pub trait Element: Copy + Default + PartialEq + Debug + Send + Sync + 'static {
    const DTYPE: DType;

    /// Append the little-endian encoding of `self`
    fn write_le(self, out: &mut Vec<u8>);

    /// Decode from exactly `DTYPE.element_size()` little-endian bytes
    fn read_le(bytes: &[u8]) -> Self;
}

/// Encode a slice of elements as little-endian bytes
pub fn encode_slice<T: Element>(values: &[T]) -> Vec<u8> {
    let mut out = Vec::with_capacity(values.len() * T::DTYPE.element_size());
    for v in values {
        v.write_le(&mut out);
    }
    out
}

/// Decode little-endian bytes into elements. `bytes.len()` must be a multiple of the element size.
pub fn decode_slice<T: Element>(bytes: &[u8]) -> Vec<T> {
    bytes
        .chunks_exact(T::DTYPE.element_size())
        .map(T::read_le)
        .collect()
}

impl Element for u8 {
    const DTYPE: DType = DType::U8;
    fn write_le(self, out: &mut Vec<u8>) {
        out.push(self);
    }
    fn read_le(bytes: &[u8]) -> Self {
        bytes[0]
    }
}

impl Element for i8 {
    const DTYPE: DType = DType::I8;
    fn write_le(self, out: &mut Vec<u8>) {
        out.push(self as u8);
    }
    fn read_le(bytes: &[u8]) -> Self {
        bytes[0] as i8
    }
}

impl Element for bool {
    const DTYPE: DType = DType::Bool;
    fn write_le(self, out: &mut Vec<u8>) {
        out.push(u8::from(self));
    }
    fn read_le(bytes: &[u8]) -> Self {
        bytes[0] != 0
    }
}

macro_rules! impl_element {
    ($t:ty, $dtype:expr, $read:ident, $write:ident) => {
        impl Element for $t {
            const DTYPE: DType = $dtype;
            fn write_le(self, out: &mut Vec<u8>) {
                let mut buf = [0u8; std::mem::size_of::<$t>()];
                LittleEndian::$write(&mut buf, self);
                out.extend_from_slice(&buf);
            }
            fn read_le(bytes: &[u8]) -> Self {
                LittleEndian::$read(bytes)
            }
        }
    };
}

impl_element!(u16, DType::U16, read_u16, write_u16);
impl_element!(i16, DType::I16, read_i16, write_i16);
impl_element!(u32, DType::U32, read_u32, write_u32);
impl_element!(i32, DType::I32, read_i32, write_i32);
impl_element!(u64, DType::U64, read_u64, write_u64);
impl_element!(i64, DType::I64, read_i64, write_i64);
impl_element!(f32, DType::F32, read_f32, write_f32);
impl_element!(f64, DType::F64, read_f64, write_f64);
