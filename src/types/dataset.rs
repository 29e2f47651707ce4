//! Numeric and string datasets stored in the container

use super::element::{Element, decode_slice, encode_slice};
use super::{Attributes, DType};
use crate::error::{Result, StoreError};

/// Typed N-dimensional dataset with raw little-endian payload
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub dtype: DType,
    pub shape: Vec<u64>,
    pub data: Vec<u8>,
    pub attributes: Attributes,
}

impl Dataset {
    pub fn new(dtype: DType, shape: Vec<u64>, data: Vec<u8>) -> Self {
        Self {
            dtype,
            shape,
            data,
            attributes: Attributes::default(),
        }
    }

    /// Build from typed values, checking that `shape` covers them exactly
    pub fn from_values<T: Element>(shape: Vec<u64>, values: &[T]) -> Result<Self> {
        let expected: u64 = shape.iter().product();
        if expected != values.len() as u64 {
            return Err(StoreError::ShapeMismatch {
                name: String::new(),
                expected: expected as usize,
                actual: values.len(),
            });
        }
        Ok(Self::new(T::DTYPE, shape, encode_slice(values)))
    }

    /// Total number of elements
    pub fn num_elements(&self) -> u64 {
        self.shape.iter().product()
    }

    /// Expected data size in bytes
    pub fn expected_size(&self) -> u64 {
        self.num_elements() * self.dtype.element_size() as u64
    }

    /// Decode the payload as `T`, failing when the stored dtype differs
    pub fn values<T: Element>(&self) -> Result<Vec<T>> {
        if T::DTYPE != self.dtype {
            return Err(StoreError::TypeMismatch {
                name: String::new(),
                expected: T::DTYPE,
                actual: self.dtype,
            });
        }
        if self.data.len() as u64 != self.expected_size() {
            return Err(StoreError::DataSizeMismatch {
                expected: self.expected_size(),
                actual: self.data.len() as u64,
            });
        }
        Ok(decode_slice(&self.data))
    }
}

/// Dataset of variable-length UTF-8 strings
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StringDataset {
    pub values: Vec<String>,
    pub attributes: Attributes,
}

impl StringDataset {
    pub fn new(values: Vec<String>) -> Self {
        Self {
            values,
            attributes: Attributes::default(),
        }
    }
}
