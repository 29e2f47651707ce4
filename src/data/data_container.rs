//! Data containers: named groups of attribute matrices with optional geometry

use super::{AttributeMatrix, SurfaceMesh};
use indexmap::IndexMap;

/// Regular grid geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageGeometry {
    /// Cells along x, y, z
    pub dimensions: [usize; 3],
    pub origin: [f32; 3],
    pub spacing: [f32; 3],
}

impl Default for ImageGeometry {
    fn default() -> Self {
        Self {
            dimensions: [0; 3],
            origin: [0.0; 3],
            spacing: [1.0; 3],
        }
    }
}

impl ImageGeometry {
    pub fn num_cells(&self) -> usize {
        self.dimensions.iter().product()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataContainer {
    name: String,
    matrices: IndexMap<String, AttributeMatrix>,
    pub geometry: Option<ImageGeometry>,
    pub mesh: Option<SurfaceMesh>,
}

impl DataContainer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Insert or replace a matrix, keyed by its name
    pub fn add_matrix(&mut self, matrix: AttributeMatrix) {
        self.matrices.insert(matrix.name().to_string(), matrix);
    }

    pub fn matrix(&self, name: &str) -> Option<&AttributeMatrix> {
        self.matrices.get(name)
    }

    pub fn matrix_mut(&mut self, name: &str) -> Option<&mut AttributeMatrix> {
        self.matrices.get_mut(name)
    }

    pub fn remove_matrix(&mut self, name: &str) -> Option<AttributeMatrix> {
        self.matrices.shift_remove(name)
    }

    pub fn matrix_names(&self) -> Vec<String> {
        self.matrices.keys().cloned().collect()
    }

    pub fn matrices(&self) -> impl Iterator<Item = &AttributeMatrix> {
        self.matrices.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::AttributeMatrixType;

    #[test]
    fn matrices_keyed_by_name() {
        let mut dc = DataContainer::new("VolumeDataContainer");
        dc.add_matrix(AttributeMatrix::with_default_name(AttributeMatrixType::Cell, 8));
        dc.add_matrix(AttributeMatrix::with_default_name(AttributeMatrixType::Ensemble, 2));
        assert_eq!(dc.matrix_names(), vec!["CELL_DATA", "ENSEMBLE_DATA"]);
        assert_eq!(dc.matrix("CELL_DATA").unwrap().tuple_count(), 8);

        dc.add_matrix(AttributeMatrix::with_default_name(AttributeMatrixType::Cell, 27));
        assert_eq!(dc.matrix("CELL_DATA").unwrap().tuple_count(), 27);
        assert!(dc.remove_matrix("ENSEMBLE_DATA").is_some());
        assert_eq!(dc.matrices().count(), 1);
    }

    #[test]
    fn geometry_cells() {
        let geom = ImageGeometry {
            dimensions: [4, 3, 2],
            ..ImageGeometry::default()
        };
        assert_eq!(geom.num_cells(), 24);
    }
}
