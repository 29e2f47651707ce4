//! tuplevault - Hierarchical store for typed tuple arrays
//!
//! Keeps groups of equally long arrays ("attribute matrices") in a single
//! portable container file. Each array is a sequence of tuples of a fixed
//! number of components; besides plain numeric arrays the store knows
//! string arrays, per-tuple neighbor lists and per-phase statistics records.
//!
//! # Features
//!
//! - Typed arrays with tuple/component shape and resize semantics
//! - Attribute matrices that keep their members at one tuple count
//! - Compact link-buffer codec for variable-length integer lists
//! - Phase statistics with parametric distributions and weight tables
//! - Container files made of nested groups, datasets and attributes,
//!   little-endian and portable across architectures
//! - Selective and structure-only (preflight) reads
//!
//! # Example
//!
//! ```rust
//! use tuplevault::{AttributeMatrix, AttributeMatrixType, DataArray, Group};
//! use std::collections::HashSet;
//!
//! let mut cells = AttributeMatrix::with_default_name(AttributeMatrixType::Cell, 4);
//! cells.add_array("Phases", DataArray::<i32>::new("Phases", 4, 1));
//! cells.add_array("Confidence", DataArray::<f32>::new("Confidence", 4, 1));
//!
//! let mut group = Group::new();
//! cells.write_all_to(&mut group).unwrap();
//!
//! let wanted = HashSet::from(["Phases".to_string()]);
//! let mut back = AttributeMatrix::with_default_name(AttributeMatrixType::Cell, 0);
//! back.read_all_from(&group, Some(&wanted), false).unwrap();
//! assert_eq!(back.list_names(), vec!["Phases"]);
//! assert_eq!(back.tuple_count(), 4);
//! ```

pub mod config;
pub mod container;
pub mod data;
pub mod error;
pub mod parser;
pub mod persist;
pub mod stats;
pub mod types;
pub mod writer;
pub mod xdmf;

#[cfg(feature = "ndarray")]
pub mod ndarray_ext;

// Re-export common types at crate root
pub use config::{StoreConfig, TupleCountPolicy, UnknownObjectPolicy};
pub use container::ContainerFile;
pub use data::{
    ArrayElement, AttributeArray, AttributeMatrix, AttributeMatrixType, DataArray, DataContainer,
    DynamicListArray, ImageGeometry, NeighborList, StringDataArray, SurfaceMesh,
};
pub use error::{Result, StoreError};
pub use parser::parse;
pub use persist::{ObjectKind, ReadOptions};
pub use stats::{
    DistributionRecord, DistributionSlot, DistributionType, PhaseStats, PhaseType, StatsDataArray,
    WeightKind, WeightTable,
};
pub use types::{Attribute, DType, Dataset, Element, Group, Node, StringDataset};

#[cfg(feature = "ndarray")]
pub use ndarray_ext::NdarrayError;
