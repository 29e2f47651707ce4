//! Named collections of arrays sharing one tuple count

use super::AttributeArray;
use super::attribute_array::ArrayElement;
use super::DataArray;
use crate::error::{Result, StoreError};
use crate::persist::{self, ReadOptions};
use crate::types::Group;
use indexmap::IndexMap;
use std::collections::HashSet;

/// What the tuples of a matrix describe
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AttributeMatrixType {
    Vertex,
    Edge,
    Face,
    Cell,
    Feature,
    Ensemble,
    #[default]
    Generic,
}

impl AttributeMatrixType {
    pub const ALL: [AttributeMatrixType; 7] = [
        AttributeMatrixType::Vertex,
        AttributeMatrixType::Edge,
        AttributeMatrixType::Face,
        AttributeMatrixType::Cell,
        AttributeMatrixType::Feature,
        AttributeMatrixType::Ensemble,
        AttributeMatrixType::Generic,
    ];

    /// Value stored in the `AttributeMatrixType` attribute
    pub fn code(self) -> i64 {
        match self {
            AttributeMatrixType::Vertex => 0,
            AttributeMatrixType::Edge => 1,
            AttributeMatrixType::Face => 2,
            AttributeMatrixType::Cell => 3,
            AttributeMatrixType::Feature => 7,
            AttributeMatrixType::Ensemble => 11,
            AttributeMatrixType::Generic => 13,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }

    /// Conventional group name for a matrix of this type
    pub fn default_name(self) -> &'static str {
        match self {
            AttributeMatrixType::Vertex => "VERTEX_DATA",
            AttributeMatrixType::Edge => "EDGE_DATA",
            AttributeMatrixType::Face => "FACE_DATA",
            AttributeMatrixType::Cell => "CELL_DATA",
            AttributeMatrixType::Feature => "FIELD_DATA",
            AttributeMatrixType::Ensemble => "ENSEMBLE_DATA",
            AttributeMatrixType::Generic => "GENERIC_DATA",
        }
    }
}

/// Ordered name → array map whose members share a tuple count.
///
/// Arrays are moved in and owned by exactly one matrix. Inserting is lenient:
/// the most recently inserted array sets the matrix tuple count, and the
/// next [`resize`](Self::resize) brings every member back in line. Use
/// [`try_add_array`](Self::try_add_array) or [`validate`](Self::validate) for
/// the checked path.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AttributeMatrix {
    name: String,
    matrix_type: AttributeMatrixType,
    tuple_count: usize,
    arrays: IndexMap<String, AttributeArray>,
}

impl AttributeMatrix {
    pub fn new(name: impl Into<String>, matrix_type: AttributeMatrixType, tuple_count: usize) -> Self {
        Self {
            name: name.into(),
            matrix_type,
            tuple_count,
            arrays: IndexMap::new(),
        }
    }

    /// Matrix named after its type's conventional group name
    pub fn with_default_name(matrix_type: AttributeMatrixType, tuple_count: usize) -> Self {
        Self::new(matrix_type.default_name(), matrix_type, tuple_count)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn matrix_type(&self) -> AttributeMatrixType {
        self.matrix_type
    }

    pub fn tuple_count(&self) -> usize {
        self.tuple_count
    }

    pub fn len(&self) -> usize {
        self.arrays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arrays.is_empty()
    }

    /// Insert or replace `array` under `name`.
    ///
    /// The array is renamed to `name` if needed and its tuple count becomes
    /// the matrix tuple count.
    pub fn add_array(&mut self, name: &str, array: impl Into<AttributeArray>) {
        let mut array = array.into();
        if array.name() != name {
            log::debug!(
                "renaming array '{}' to '{name}' on insert into '{}'",
                array.name(),
                self.name
            );
            array.set_name(name);
        }
        if !self.arrays.is_empty() && array.num_tuples() != self.tuple_count {
            log::debug!(
                "array '{name}' has {} tuples, matrix '{}' had {}",
                array.num_tuples(),
                self.name,
                self.tuple_count
            );
        }
        self.tuple_count = array.num_tuples();
        self.arrays.insert(name.to_string(), array);
    }

    /// Like [`add_array`](Self::add_array), but refuses an array whose tuple
    /// count differs from the members already present
    pub fn try_add_array(&mut self, name: &str, array: impl Into<AttributeArray>) -> Result<()> {
        let array = array.into();
        let others = self.arrays.keys().any(|k| k != name);
        if others && array.num_tuples() != self.tuple_count {
            return Err(StoreError::TupleCountMismatch {
                name: name.to_string(),
                expected: self.tuple_count,
                actual: array.num_tuples(),
            });
        }
        self.add_array(name, array);
        Ok(())
    }

    pub fn get_array(&self, name: &str) -> Option<&AttributeArray> {
        self.arrays.get(name)
    }

    pub fn get_array_mut(&mut self, name: &str) -> Option<&mut AttributeArray> {
        self.arrays.get_mut(name)
    }

    pub fn get_typed<T: ArrayElement>(&self, name: &str) -> Option<&DataArray<T>> {
        self.get_array(name)?.as_typed()
    }

    pub fn get_typed_mut<T: ArrayElement>(&mut self, name: &str) -> Option<&mut DataArray<T>> {
        self.get_array_mut(name)?.as_typed_mut()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.arrays.contains_key(name)
    }

    /// Detach and return an array. The matrix tuple count is left as it was.
    pub fn remove_array(&mut self, name: &str) -> Option<AttributeArray> {
        self.arrays.shift_remove(name)
    }

    /// Move `old` to `new`; false when `old` is absent
    pub fn rename_array(&mut self, old: &str, new: &str) -> bool {
        match self.remove_array(old) {
            Some(array) => {
                self.add_array(new, array);
                true
            }
            None => false,
        }
    }

    /// Resize every member and adopt `num_tuples` as the matrix tuple count
    pub fn resize(&mut self, num_tuples: usize) {
        for array in self.arrays.values_mut() {
            array.resize(num_tuples);
        }
        self.tuple_count = num_tuples;
    }

    /// Array names in insertion order
    pub fn list_names(&self) -> Vec<String> {
        self.arrays.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeArray)> {
        self.arrays.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Check that every member has the matrix tuple count
    pub fn validate(&self) -> Result<()> {
        match self
            .arrays
            .iter()
            .find(|(_, a)| a.num_tuples() != self.tuple_count)
        {
            Some((name, array)) => Err(StoreError::TupleCountMismatch {
                name: name.clone(),
                expected: self.tuple_count,
                actual: array.num_tuples(),
            }),
            None => Ok(()),
        }
    }

    /// Persist every member array into `group`
    pub fn write_all_to(&self, group: &mut Group) -> Result<()> {
        persist::write_matrix_arrays(self, group)
    }

    /// Load the arrays stored in `group`.
    ///
    /// `names_to_read` restricts a full read to the listed arrays; a
    /// preflight read creates zero-tuple templates for every array instead
    /// of decoding payloads.
    pub fn read_all_from(
        &mut self,
        group: &Group,
        names_to_read: Option<&HashSet<String>>,
        preflight: bool,
    ) -> Result<()> {
        let options = ReadOptions {
            names_to_read: names_to_read.cloned(),
            preflight,
            ..ReadOptions::default()
        };
        self.read_with_options(group, &options)
    }

    pub fn read_with_options(&mut self, group: &Group, options: &ReadOptions) -> Result<()> {
        persist::read_matrix_arrays(self, group, options)
    }

    pub(crate) fn set_tuple_count(&mut self, tuple_count: usize) {
        self.tuple_count = tuple_count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::StringDataArray;

    fn cell_matrix() -> AttributeMatrix {
        let mut m = AttributeMatrix::with_default_name(AttributeMatrixType::Cell, 10);
        m.add_array("Phases", DataArray::<i32>::new("Phases", 10, 1));
        m.add_array("Euler", DataArray::<f32>::new("Euler", 10, 3));
        m
    }

    #[test]
    fn resize_propagates_to_every_array() {
        let mut m = cell_matrix();
        m.add_array("Names", StringDataArray::new("Names", 10));
        m.resize(25);
        assert_eq!(m.tuple_count(), 25);
        for (_, array) in m.iter() {
            assert_eq!(array.num_tuples(), 25);
        }
        assert_eq!(m.get_typed::<f32>("Euler").unwrap().len(), 75);
        assert!(m.validate().is_ok());
    }

    #[test]
    fn insert_under_existing_name_replaces() {
        let mut m = cell_matrix();
        m.add_array("Phases", DataArray::<i32>::new("Phases", 4, 1));
        assert_eq!(m.list_names(), vec!["Phases", "Euler"]);
        assert_eq!(m.get_array("Phases").unwrap().num_tuples(), 4);
        assert_eq!(m.tuple_count(), 4);
        assert!(matches!(
            m.validate(),
            Err(StoreError::TupleCountMismatch { ref name, expected: 4, actual: 10 }) if name == "Euler"
        ));
    }

    #[test]
    fn add_renames_to_key() {
        let mut m = AttributeMatrix::default();
        m.add_array("Key", DataArray::<u8>::new("Other", 2, 1));
        assert_eq!(m.get_array("Key").unwrap().name(), "Key");
    }

    #[test]
    fn try_add_checks_tuple_count() {
        let mut m = cell_matrix();
        assert!(matches!(
            m.try_add_array("Bad", DataArray::<f64>::new("Bad", 3, 1)),
            Err(StoreError::TupleCountMismatch { expected: 10, actual: 3, .. })
        ));
        assert!(!m.contains("Bad"));
        assert!(m.try_add_array("Good", DataArray::<f64>::new("Good", 10, 1)).is_ok());

        // replacing the only member is allowed to change the count
        let mut single = AttributeMatrix::default();
        single.add_array("A", DataArray::<u8>::new("A", 3, 1));
        assert!(single.try_add_array("A", DataArray::<u8>::new("A", 5, 1)).is_ok());
        assert_eq!(single.tuple_count(), 5);
    }

    #[test]
    fn remove_keeps_tuple_count() {
        let mut m = cell_matrix();
        let removed = m.remove_array("Phases").unwrap();
        assert_eq!(removed.name(), "Phases");
        assert_eq!(m.tuple_count(), 10);
        assert!(m.remove_array("Phases").is_none());
    }

    #[test]
    fn rename() {
        let mut m = cell_matrix();
        assert!(!m.rename_array("Missing", "X"));
        assert!(m.rename_array("Phases", "PhaseIds"));
        assert_eq!(m.list_names(), vec!["Euler", "PhaseIds"]);
        assert_eq!(m.get_array("PhaseIds").unwrap().name(), "PhaseIds");
        assert!(m.get_typed::<i32>("PhaseIds").is_some());
    }

    #[test]
    fn matrix_type_codes() {
        for t in AttributeMatrixType::ALL {
            assert_eq!(AttributeMatrixType::from_code(t.code()), Some(t));
        }
        assert_eq!(AttributeMatrixType::Feature.default_name(), "FIELD_DATA");
    }
}
