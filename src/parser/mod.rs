//! Binary parser for tuplevault containers
//!
//! Decodes a complete container image into an owned [`Group`] tree. The
//! pieces are nom parsers over byte slices; [`parse`] runs them and turns
//! their failures into [`StoreError`]s.

mod dataset;
mod node;
mod primitives;
mod string;

pub use node::{parse_attributes, parse_group_body, parse_node};
pub use primitives::{Cause, DecodeError, PResult, run};

use crate::error::{Result, StoreError};
use crate::types::{Group, HEADER_SIZE, MAGIC, Node, VERSION};
use nom::number::complete::le_u32;
use nom::sequence::pair;

/// Parse a container image into its root group
pub fn parse(bytes: &[u8]) -> Result<Group> {
    if bytes.len() < HEADER_SIZE {
        return Err(StoreError::UnexpectedEof {
            offset: bytes.len() as u64,
        });
    }

    if &bytes[0..8] != MAGIC {
        return Err(StoreError::InvalidMagic);
    }

    let ((version, _flags), _) = run(&bytes[8..HEADER_SIZE], pair(le_u32, le_u32))?;
    if version != VERSION {
        return Err(StoreError::UnsupportedVersion(version));
    }

    let (root, rest) = run(&bytes[HEADER_SIZE..], parse_node)?;
    let root = match root {
        Node::Group(g) => g,
        _ => {
            return Err(StoreError::NotAGroup {
                name: "/".to_string(),
            });
        }
    };

    if !rest.is_empty() {
        return Err(StoreError::TrailingBytes(rest.len() as u64));
    }

    Ok(root)
}
