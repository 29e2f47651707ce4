//! Serialization of tuplevault containers

mod dataset;
mod node;

pub use node::{write_attributes, write_key, write_node};

use crate::error::Result;
use crate::types::{Group, MAGIC, VERSION};
use byteorder::{LittleEndian, WriteBytesExt};
use std::io::Write;

/// Write a container image (header plus root group)
pub fn write<W: Write>(writer: &mut W, root: &Group) -> Result<()> {
    writer.write_all(MAGIC)?;
    writer.write_u32::<LittleEndian>(VERSION)?;
    writer.write_u32::<LittleEndian>(0)?; // flags (reserved)

    node::write_group(writer, root)
}

/// Write a container image to bytes
pub fn to_bytes(root: &Group) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    write(&mut buf, root)?;
    Ok(buf)
}
