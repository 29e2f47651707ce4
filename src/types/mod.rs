//! Core types of the container tree

mod dataset;
mod dtype;
mod element;
mod group;
mod header;
mod node;

pub use dataset::{Dataset, StringDataset};
pub use dtype::DType;
pub use element::{Element, decode_slice, encode_slice};
pub use group::{Group, validate_key};
pub use header::{FILE_VERSION, FILE_VERSION_NAME, HEADER_SIZE, MAGIC, VERSION};
pub use node::{Attribute, AttributeTag, Attributes, Node, NodeTag};
