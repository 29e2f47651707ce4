//! Error types for tuplevault

use crate::types::DType;
use thiserror::Error;

/// Every failure the store can report.
///
/// Reads and writes are fail-fast: the first error aborts the operation in
/// progress and is returned to the caller unchanged.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // -- container codec --
    #[error("Invalid magic bytes, not a tuplevault container")]
    InvalidMagic,
    #[error("Unsupported container version: {0}")]
    UnsupportedVersion(u32),
    #[error("Invalid node tag: 0x{0:02X}")]
    InvalidNodeTag(u8),
    #[error("Invalid dtype tag: 0x{0:02X}")]
    InvalidDType(u8),
    #[error("Invalid attribute tag: 0x{0:02X}")]
    InvalidAttributeTag(u8),
    #[error("Invalid UTF-8 in string at offset {offset}")]
    InvalidUtf8 { offset: u64 },
    #[error("Unexpected end of input at offset {offset}")]
    UnexpectedEof { offset: u64 },
    #[error("Data size mismatch: expected {expected} bytes, got {actual}")]
    DataSizeMismatch { expected: u64, actual: u64 },
    #[error("{0} trailing bytes after root node")]
    TrailingBytes(u64),

    // -- structure --
    #[error("Object not found: {path}")]
    MissingObject { path: String },
    #[error("'{name}' is not a group")]
    NotAGroup { name: String },
    #[error("'{name}' is not a numeric dataset")]
    NotADataset { name: String },
    #[error("'{name}' is not a string dataset")]
    NotAStringDataset { name: String },
    #[error("Attribute '{attribute}' not found on '{object}'")]
    MissingAttribute { object: String, attribute: String },
    #[error("Attribute '{attribute}' on '{object}' has the wrong type, expected {expected}")]
    AttributeType {
        object: String,
        attribute: String,
        expected: &'static str,
    },
    #[error("Invalid key {0:?}: keys must be non-empty and must not contain '/'")]
    InvalidKey(String),
    #[error("Container was opened read-only")]
    ReadOnly,

    // -- shape --
    #[error("Type mismatch for '{name}': expected {expected:?}, found {actual:?}")]
    TypeMismatch {
        name: String,
        expected: DType,
        actual: DType,
    },
    #[error("Shape mismatch for '{name}': expected {expected} elements, found {actual}")]
    ShapeMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },
    #[error("Tuple count mismatch for '{name}': matrix has {expected} tuples, array has {actual}")]
    TupleCountMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },
    #[error("Distribution '{group}': column '{column}' has {actual} values, expected {expected}")]
    DistributionShape {
        group: String,
        column: String,
        expected: usize,
        actual: usize,
    },
    #[error("Weight table '{table}': column '{column}' has {actual} tuples, expected {expected}")]
    WeightTableShape {
        table: String,
        column: String,
        expected: usize,
        actual: usize,
    },

    // -- dispatch --
    #[error("Unrecognized object type {tag:?} for '{name}'")]
    UnknownObjectType { name: String, tag: String },

    // -- statistics --
    #[error("Distribution '{group}': column '{column}' has no data")]
    EmptyDistributionColumn { group: String, column: String },
    #[error("Invalid bin step size {0}, must be finite and greater than zero")]
    InvalidBinStep(f32),
    #[error("Bin step {step} over [{min}, {max}] yields more than {limit} bins")]
    TooManyBins {
        step: f32,
        min: f32,
        max: f32,
        limit: usize,
    },
    #[error("Phase {index} of '{name}' is outside its {tuples} tuples")]
    PhaseIndexOutOfRange {
        name: String,
        index: usize,
        tuples: usize,
    },

    // -- CSR link buffers --
    #[error("Link buffer truncated in tuple {tuple} at byte {offset}")]
    TruncatedLinks { tuple: usize, offset: usize },
    #[error("Link buffer has {0} unconsumed bytes after the last tuple")]
    TrailingLinkBytes(usize),
    #[error("List for tuple {tuple} has {len} elements, more than a link count can hold")]
    ListTooLong { tuple: usize, len: usize },
    #[error("Neighbor list '{list}': '{companion}' must be an int32 array holding its {tuples} per-tuple counts")]
    NeighborCountConflict {
        list: String,
        companion: String,
        tuples: usize,
    },

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, StoreError>;

impl StoreError {
    /// Shorthand for a missing object at `path`
    pub fn missing(path: impl Into<String>) -> Self {
        StoreError::MissingObject { path: path.into() }
    }
}
