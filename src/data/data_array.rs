//! Fixed-width typed arrays

use crate::error::{Result, StoreError};
use crate::types::{DType, Dataset, Element};

/// Named array of `tuples × components` elements of one primitive type.
///
/// The buffer length is always a whole number of tuples.
#[derive(Debug, Clone, PartialEq)]
pub struct DataArray<T: Element> {
    name: String,
    num_components: usize,
    data: Vec<T>,
}

impl<T: Element> DataArray<T> {
    /// Zero-filled array
    ///
    /// # Panics
    ///
    /// Panics if `num_components` is zero.
    pub fn new(name: impl Into<String>, num_tuples: usize, num_components: usize) -> Self {
        assert!(num_components > 0, "an array needs at least one component");
        Self {
            name: name.into(),
            num_components,
            data: vec![T::default(); num_tuples * num_components],
        }
    }

    /// Single-component array over `values`
    pub fn from_column(name: impl Into<String>, values: Vec<T>) -> Self {
        Self {
            name: name.into(),
            num_components: 1,
            data: values,
        }
    }

    /// Wrap an existing buffer
    pub fn from_vec(name: impl Into<String>, num_components: usize, data: Vec<T>) -> Result<Self> {
        let name = name.into();
        if num_components == 0 || data.len() % num_components != 0 {
            let expected = match num_components {
                0 => 0,
                c => data.len().div_ceil(c) * c,
            };
            return Err(StoreError::ShapeMismatch {
                name,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            name,
            num_components,
            data,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn dtype(&self) -> DType {
        T::DTYPE
    }

    pub fn num_tuples(&self) -> usize {
        self.data.len() / self.num_components
    }

    pub fn num_components(&self) -> usize {
        self.num_components
    }

    /// Total number of elements
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Components of tuple `i`
    ///
    /// # Panics
    ///
    /// Panics if `i >= num_tuples()`.
    pub fn tuple(&self, i: usize) -> &[T] {
        let c = self.num_components;
        &self.data[i * c..(i + 1) * c]
    }

    pub fn try_tuple(&self, i: usize) -> Option<&[T]> {
        (i < self.num_tuples()).then(|| self.tuple(i))
    }

    pub fn tuple_mut(&mut self, i: usize) -> &mut [T] {
        let c = self.num_components;
        &mut self.data[i * c..(i + 1) * c]
    }

    /// Element at flat index `i`
    pub fn get(&self, i: usize) -> Option<T> {
        self.data.get(i).copied()
    }

    /// # Panics
    ///
    /// Panics if `i >= len()`.
    pub fn set_value(&mut self, i: usize, value: T) {
        self.data[i] = value;
    }

    /// Reallocate to `num_tuples`, keeping leading tuples and zero-filling new ones
    pub fn resize(&mut self, num_tuples: usize) {
        self.data
            .resize(num_tuples * self.num_components, T::default());
    }

    /// Container dataset with shape `[tuples, components]`
    pub fn to_dataset(&self) -> Dataset {
        Dataset::new(
            T::DTYPE,
            vec![self.num_tuples() as u64, self.num_components as u64],
            crate::types::encode_slice(&self.data),
        )
    }

    /// Rebuild from a dataset, taking the component count from its trailing dimension
    /// unless `num_components` is given
    pub fn from_dataset(
        name: impl Into<String>,
        dataset: &Dataset,
        num_components: Option<usize>,
    ) -> Result<Self> {
        let name = name.into();
        let data = dataset.values::<T>().map_err(|e| match e {
            StoreError::TypeMismatch {
                expected, actual, ..
            } => StoreError::TypeMismatch {
                name: name.clone(),
                expected,
                actual,
            },
            other => other,
        })?;
        let components = match (num_components, dataset.shape.as_slice()) {
            (Some(c), _) => c,
            (None, [_, .., last]) => *last as usize,
            (None, _) => 1,
        };
        // a zero-tuple array may still carry its component count
        if data.is_empty() && components > 0 {
            return Ok(Self::new(name, 0, components));
        }
        Self::from_vec(name, components, data)
    }
}

impl<T: Element> std::ops::Index<usize> for DataArray<T> {
    type Output = T;

    fn index(&self, i: usize) -> &T {
        &self.data[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_zero_filled() {
        let a = DataArray::<f32>::new("Angles", 4, 3);
        assert_eq!(a.num_tuples(), 4);
        assert_eq!(a.len(), 12);
        assert!(a.as_slice().iter().all(|&v| v == 0.0));
        assert_eq!(a.dtype(), DType::F32);
    }

    #[test]
    fn from_vec_requires_whole_tuples() {
        assert!(DataArray::from_vec("a", 3, vec![1i32; 6]).is_ok());
        assert!(matches!(
            DataArray::from_vec("a", 3, vec![1i32; 7]),
            Err(StoreError::ShapeMismatch { expected: 9, actual: 7, .. })
        ));
        assert!(DataArray::from_vec("a", 0, Vec::<i32>::new()).is_err());
    }

    #[test]
    fn resize_keeps_prefix() {
        let mut a = DataArray::from_vec("Phases", 2, vec![1u8, 2, 3, 4]).unwrap();
        a.resize(3);
        assert_eq!(a.as_slice(), &[1, 2, 3, 4, 0, 0]);
        a.resize(1);
        assert_eq!(a.as_slice(), &[1, 2]);
        assert_eq!(a.tuple(0), &[1, 2]);
        assert!(a.try_tuple(1).is_none());
    }

    #[test]
    fn dataset_conversion() {
        let a = DataArray::from_vec("Euler", 3, vec![0.5f64; 6]).unwrap();
        let ds = a.to_dataset();
        assert_eq!(ds.shape, vec![2, 3]);
        let b = DataArray::<f64>::from_dataset("Euler", &ds, None).unwrap();
        assert_eq!(a, b);

        let err = DataArray::<f32>::from_dataset("Euler", &ds, None).unwrap_err();
        assert!(matches!(err, StoreError::TypeMismatch { name, .. } if name == "Euler"));
    }

    #[test]
    fn empty_dataset_keeps_components() {
        let a = DataArray::<i64>::new("Empty", 0, 4);
        let b = DataArray::<i64>::from_dataset("Empty", &a.to_dataset(), None).unwrap();
        assert_eq!(b.num_components(), 4);
        assert_eq!(b.num_tuples(), 0);
    }
}
