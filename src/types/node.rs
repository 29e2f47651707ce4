//! Container nodes and attributes

use super::{Dataset, Group, StringDataset};
use indexmap::IndexMap;

/// Node type tags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum NodeTag {
    Group = 0x01,
    Dataset = 0x02,
    Strings = 0x03,
}

impl NodeTag {
    pub fn from_u8(tag: u8) -> Option<Self> {
        match tag {
            0x01 => Some(NodeTag::Group),
            0x02 => Some(NodeTag::Dataset),
            0x03 => Some(NodeTag::Strings),
            _ => None,
        }
    }
}

/// Attribute type tags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum AttributeTag {
    String = 0x01,
    Int = 0x02,
}

impl AttributeTag {
    pub fn from_u8(tag: u8) -> Option<Self> {
        match tag {
            0x01 => Some(AttributeTag::String),
            0x02 => Some(AttributeTag::Int),
            _ => None,
        }
    }
}

/// Small metadata value attached to a node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attribute {
    String(String),
    Int(i64),
}

impl Attribute {
    pub fn tag(&self) -> AttributeTag {
        match self {
            Attribute::String(_) => AttributeTag::String,
            Attribute::Int(_) => AttributeTag::Int,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Attribute::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Attribute::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl From<&str> for Attribute {
    fn from(v: &str) -> Self {
        Attribute::String(v.to_string())
    }
}

impl From<String> for Attribute {
    fn from(v: String) -> Self {
        Attribute::String(v)
    }
}

impl From<i64> for Attribute {
    fn from(v: i64) -> Self {
        Attribute::Int(v)
    }
}

/// Attributes of one node, in insertion order
pub type Attributes = IndexMap<String, Attribute>;

/// Child of a group
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Group(Group),
    Dataset(Dataset),
    Strings(StringDataset),
}

impl Node {
    pub fn tag(&self) -> NodeTag {
        match self {
            Node::Group(_) => NodeTag::Group,
            Node::Dataset(_) => NodeTag::Dataset,
            Node::Strings(_) => NodeTag::Strings,
        }
    }

    pub fn attributes(&self) -> &Attributes {
        match self {
            Node::Group(g) => &g.attributes,
            Node::Dataset(d) => &d.attributes,
            Node::Strings(s) => &s.attributes,
        }
    }

    pub fn attributes_mut(&mut self) -> &mut Attributes {
        match self {
            Node::Group(g) => &mut g.attributes,
            Node::Dataset(d) => &mut d.attributes,
            Node::Strings(s) => &mut s.attributes,
        }
    }

    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Node::Group(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_dataset(&self) -> Option<&Dataset> {
        match self {
            Node::Dataset(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_strings(&self) -> Option<&StringDataset> {
        match self {
            Node::Strings(s) => Some(s),
            _ => None,
        }
    }
}

impl From<Group> for Node {
    fn from(v: Group) -> Self {
        Node::Group(v)
    }
}

impl From<Dataset> for Node {
    fn from(v: Dataset) -> Self {
        Node::Dataset(v)
    }
}

impl From<StringDataset> for Node {
    fn from(v: StringDataset) -> Self {
        Node::Strings(v)
    }
}
