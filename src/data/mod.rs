//! In-memory data model: typed arrays, CSR lists, attribute matrices and containers

pub mod attribute_array;
pub mod attribute_matrix;
pub mod data_array;
pub mod data_container;
pub mod dynamic_list;
pub mod mesh;
pub mod neighbor_list;
pub mod string_array;

pub use attribute_array::{ArrayElement, AttributeArray};
pub use attribute_matrix::{AttributeMatrix, AttributeMatrixType};
pub use data_array::DataArray;
pub use data_container::{DataContainer, ImageGeometry};
pub use dynamic_list::DynamicListArray;
pub use mesh::SurfaceMesh;
pub use neighbor_list::NeighborList;
pub use string_array::StringDataArray;
