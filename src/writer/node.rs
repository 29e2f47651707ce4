//! Node, attribute and group serialization

use super::dataset::{write_dataset_body, write_strings_body};
use crate::error::{Result, StoreError};
use crate::types::{Attribute, Attributes, Group, Node, validate_key};
use byteorder::{LittleEndian, WriteBytesExt};
use std::io::{self, Write};

/// Write a node: tag, attributes, body
pub fn write_node<W: Write>(writer: &mut W, node: &Node) -> Result<()> {
    writer.write_u8(node.tag() as u8)?;
    write_attributes(writer, node.attributes())?;
    match node {
        Node::Group(g) => write_group_body(writer, g),
        Node::Dataset(d) => write_dataset_body(writer, d),
        Node::Strings(s) => write_strings_body(writer, s),
    }
}

/// Write the root group
pub fn write_group<W: Write>(writer: &mut W, group: &Group) -> Result<()> {
    writer.write_u8(crate::types::NodeTag::Group as u8)?;
    write_attributes(writer, &group.attributes)?;
    write_group_body(writer, group)
}

fn write_group_body<W: Write>(writer: &mut W, group: &Group) -> Result<()> {
    writer.write_u32::<LittleEndian>(len_u32(group.children.len())?)?;
    for (key, child) in &group.children {
        write_key(writer, key)?;
        write_node(writer, child)?;
    }
    Ok(())
}

pub fn write_attributes<W: Write>(writer: &mut W, attributes: &Attributes) -> Result<()> {
    let count = u16::try_from(attributes.len())
        .map_err(|_| too_long("attribute count", attributes.len()))?;
    writer.write_u16::<LittleEndian>(count)?;
    for (key, value) in attributes {
        write_key(writer, key)?;
        writer.write_u8(value.tag() as u8)?;
        match value {
            Attribute::String(s) => write_string(writer, s)?,
            Attribute::Int(v) => writer.write_i64::<LittleEndian>(*v)?,
        }
    }
    Ok(())
}

/// Write a u16 length-prefixed key, rejecting empty keys and keys containing '/'
pub fn write_key<W: Write>(writer: &mut W, key: &str) -> Result<()> {
    validate_key(key)?;
    let len = u16::try_from(key.len()).map_err(|_| StoreError::InvalidKey(key.to_string()))?;
    writer.write_u16::<LittleEndian>(len)?;
    writer.write_all(key.as_bytes())?;
    Ok(())
}

/// Write a u32 length-prefixed string
pub fn write_string<W: Write>(writer: &mut W, s: &str) -> Result<()> {
    writer.write_u32::<LittleEndian>(len_u32(s.len())?)?;
    writer.write_all(s.as_bytes())?;
    Ok(())
}

pub(super) fn len_u32(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| too_long("length", len))
}

fn too_long(what: &str, len: usize) -> StoreError {
    StoreError::Io(io::Error::new(
        io::ErrorKind::InvalidInput,
        format!("{what} {len} does not fit the container format"),
    ))
}
