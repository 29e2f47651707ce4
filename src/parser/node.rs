//! Node, attribute and group parsing

use super::dataset::{parse_dataset_body, parse_strings_body};
use super::primitives::{Cause, PResult, fail};
use super::string::{parse_key, parse_string};
use crate::types::{Attribute, AttributeTag, Attributes, Group, Node, NodeTag};
use nom::combinator::map;
use nom::multi::count;
use nom::number::complete::{le_i64, le_u8, le_u16, le_u32};
use nom::sequence::pair;

/// Parse a node: tag, attributes, then the tag-specific body
pub fn parse_node(input: &[u8]) -> PResult<'_, Node> {
    let (input, tag_byte) = le_u8(input)?;
    let Some(tag) = NodeTag::from_u8(tag_byte) else {
        return fail(input, Cause::InvalidNodeTag(tag_byte));
    };
    let (input, attributes) = parse_attributes(input)?;

    let (input, node) = match tag {
        NodeTag::Group => {
            let (input, group) = parse_group_body(input, attributes)?;
            (input, Node::Group(group))
        }
        NodeTag::Dataset => {
            let (input, dataset) = parse_dataset_body(input, attributes)?;
            (input, Node::Dataset(dataset))
        }
        NodeTag::Strings => {
            let (input, strings) = parse_strings_body(input, attributes)?;
            (input, Node::Strings(strings))
        }
    };
    Ok((input, node))
}

/// Parse an attribute block: count (u16), then key + tagged value per entry
pub fn parse_attributes(input: &[u8]) -> PResult<'_, Attributes> {
    let (input, n) = le_u16(input)?;
    let (input, entries) = count(pair(parse_key, parse_attribute_value), n as usize)(input)?;
    Ok((input, entries.into_iter().collect()))
}

fn parse_attribute_value(input: &[u8]) -> PResult<'_, Attribute> {
    let (input, tag_byte) = le_u8(input)?;
    match AttributeTag::from_u8(tag_byte) {
        Some(AttributeTag::String) => map(parse_string, Attribute::String)(input),
        Some(AttributeTag::Int) => map(le_i64, Attribute::Int)(input),
        None => fail(input, Cause::InvalidAttributeTag(tag_byte)),
    }
}

/// Parse a group body: child count (u32), then key + node per child
pub fn parse_group_body(input: &[u8], attributes: Attributes) -> PResult<'_, Group> {
    let (input, n) = le_u32(input)?;
    let (input, children) = count(pair(parse_key, parse_node), n as usize)(input)?;
    Ok((
        input,
        Group {
            attributes,
            children: children.into_iter().collect(),
        },
    ))
}
