//! ndarray integration for typed arrays
//!
//! Converts between [`DataArray`] and ndarray's dynamic-dimension arrays.
//! The first axis is the tuple axis; every further axis is folded into the
//! component count.
//!
//! Enable with the `ndarray` feature flag.

use crate::data::DataArray;
use crate::error::StoreError;
use crate::types::{DType, Dataset, Element};
use ndarray::{ArrayD, ArrayViewD, IxDyn};
use thiserror::Error;

/// Error type for ndarray conversions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NdarrayError {
    #[error("DType mismatch: expected {expected:?}, got {actual:?}")]
    DTypeMismatch { expected: DType, actual: DType },
    #[error("Shape {shape:?} doesn't match data length {data_len}")]
    ShapeMismatch { shape: Vec<usize>, data_len: usize },
    #[error("Array is not contiguous; call .as_standard_layout().into_owned() first")]
    NotContiguous,
}

impl<T: Element> DataArray<T> {
    /// Build from an ndarray, taking the first axis as tuples.
    ///
    /// A zero-dimensional array becomes a single one-component tuple.
    pub fn from_ndarray(name: impl Into<String>, arr: ArrayD<T>) -> Result<Self, NdarrayError> {
        if !arr.is_standard_layout() {
            return Err(NdarrayError::NotContiguous);
        }
        let shape = arr.shape().to_vec();
        let components = shape.iter().skip(1).product::<usize>();

        let (vec, offset) = arr.into_raw_vec_and_offset();
        // offset > 0 means the data doesn't start at the allocation start
        if offset.is_some_and(|o| o != 0) {
            return Err(NdarrayError::NotContiguous);
        }
        let data_len = vec.len();
        DataArray::from_vec(name, components, vec)
            .map_err(|_| NdarrayError::ShapeMismatch { shape, data_len })
    }

    /// Copy into a `[tuples, components]` ndarray
    pub fn to_ndarray(&self) -> Result<ArrayD<T>, NdarrayError> {
        let shape = vec![self.num_tuples(), self.num_components()];
        ArrayD::from_shape_vec(IxDyn(&shape), self.as_slice().to_vec()).map_err(|_| {
            NdarrayError::ShapeMismatch {
                shape,
                data_len: self.len(),
            }
        })
    }

    /// Borrow as a `[tuples, components]` view without copying
    pub fn as_ndarray(&self) -> Result<ArrayViewD<'_, T>, NdarrayError> {
        let shape = vec![self.num_tuples(), self.num_components()];
        ArrayViewD::from_shape(IxDyn(&shape), self.as_slice()).map_err(|_| {
            NdarrayError::ShapeMismatch {
                shape,
                data_len: self.len(),
            }
        })
    }
}

impl Dataset {
    /// Decode into an ndarray with the dataset's full shape
    pub fn to_ndarray<T: Element>(&self) -> Result<ArrayD<T>, NdarrayError> {
        let shape: Vec<usize> = self.shape.iter().map(|&d| d as usize).collect();
        let values = self.values::<T>().map_err(|e| match e {
            StoreError::TypeMismatch {
                expected, actual, ..
            } => NdarrayError::DTypeMismatch { expected, actual },
            _ => NdarrayError::ShapeMismatch {
                shape: shape.clone(),
                data_len: self.data.len(),
            },
        })?;
        let data_len = values.len();
        ArrayD::from_shape_vec(IxDyn(&shape), values)
            .map_err(|_| NdarrayError::ShapeMismatch { shape, data_len })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn roundtrip_2d_f32() {
        let arr = array![[1.0f32, 2.0, 3.0], [4.0, 5.0, 6.0]].into_dyn();
        let expected = arr.clone();
        let data = DataArray::from_ndarray("EulerAngles", arr).unwrap();

        assert_eq!(data.dtype(), DType::F32);
        assert_eq!(data.num_tuples(), 2);
        assert_eq!(data.num_components(), 3);
        assert_eq!(data.to_ndarray().unwrap(), expected);
    }

    #[test]
    fn trailing_axes_fold_into_components() {
        let arr = ArrayD::<u8>::zeros(IxDyn(&[5, 2, 4]));
        let data = DataArray::from_ndarray("Masks", arr).unwrap();
        assert_eq!(data.num_tuples(), 5);
        assert_eq!(data.num_components(), 8);
        assert_eq!(data.as_ndarray().unwrap().shape(), &[5, 8]);
    }

    #[test]
    fn column_vector() {
        let data = DataArray::from_ndarray("Ids", array![7i32, 8, 9].into_dyn()).unwrap();
        assert_eq!(data.num_components(), 1);
        assert_eq!(data.as_slice(), &[7, 8, 9]);
    }

    #[test]
    fn rejects_transposed_view() {
        let arr = array![[1i64, 2], [3, 4]].into_dyn();
        let transposed = arr.t().to_owned();
        // to_owned of a transposed view keeps the fortran layout
        if !transposed.is_standard_layout() {
            assert_eq!(
                DataArray::from_ndarray("t", transposed),
                Err(NdarrayError::NotContiguous)
            );
        }
    }

    #[test]
    fn dataset_dtype_mismatch() {
        let dataset = Dataset::from_values(vec![3], &[1.0f32, 2.0, 3.0]).unwrap();
        assert!(matches!(
            dataset.to_ndarray::<f64>(),
            Err(NdarrayError::DTypeMismatch { expected: DType::F64, actual: DType::F32 })
        ));
        assert_eq!(dataset.to_ndarray::<f32>().unwrap().shape(), &[3]);
    }
}
