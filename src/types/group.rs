//! Groups: the directories of the container tree

use super::element::Element;
use super::{Attribute, Attributes, Dataset, Node, StringDataset};
use crate::error::{Result, StoreError};
use indexmap::IndexMap;

/// Check that `key` can name a child or an attribute
pub fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() || key.contains('/') {
        return Err(StoreError::InvalidKey(key.to_string()));
    }
    Ok(())
}

/// Named collection of child nodes plus its own attributes
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Group {
    pub children: IndexMap<String, Node>,
    pub attributes: Attributes,
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of children
    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Child names in stored order
    pub fn child_names(&self) -> impl Iterator<Item = &str> {
        self.children.keys().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.children.contains_key(name)
    }

    pub fn is_group(&self, name: &str) -> bool {
        matches!(self.children.get(name), Some(Node::Group(_)))
    }

    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children.get(name)
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.children.get_mut(name)
    }

    /// Insert or replace a child
    pub fn insert(&mut self, name: &str, node: impl Into<Node>) -> Result<&mut Node> {
        validate_key(name)?;
        let slot = match self.children.entry(name.to_string()) {
            indexmap::map::Entry::Occupied(mut e) => {
                e.insert(node.into());
                e.into_mut()
            }
            indexmap::map::Entry::Vacant(e) => e.insert(node.into()),
        };
        Ok(slot)
    }

    /// Remove a child, keeping the order of the rest
    pub fn remove(&mut self, name: &str) -> Option<Node> {
        self.children.shift_remove(name)
    }

    /// Create a subgroup, or open it when it already exists
    pub fn create_group(&mut self, name: &str) -> Result<&mut Group> {
        validate_key(name)?;
        let node = self
            .children
            .entry(name.to_string())
            .or_insert_with(|| Node::Group(Group::new()));
        match node {
            Node::Group(g) => Ok(g),
            _ => Err(StoreError::NotAGroup {
                name: name.to_string(),
            }),
        }
    }

    pub fn open_group(&self, name: &str) -> Result<&Group> {
        match self.children.get(name) {
            Some(Node::Group(g)) => Ok(g),
            Some(_) => Err(StoreError::NotAGroup {
                name: name.to_string(),
            }),
            None => Err(StoreError::missing(name)),
        }
    }

    pub fn open_group_mut(&mut self, name: &str) -> Result<&mut Group> {
        match self.children.get_mut(name) {
            Some(Node::Group(g)) => Ok(g),
            Some(_) => Err(StoreError::NotAGroup {
                name: name.to_string(),
            }),
            None => Err(StoreError::missing(name)),
        }
    }

    // ------------------------------------------------------------------
    // Datasets
    // ------------------------------------------------------------------

    /// Write (or overwrite) a numeric dataset
    pub fn write_dataset(&mut self, name: &str, dataset: Dataset) -> Result<&mut Dataset> {
        match self.insert(name, dataset)? {
            Node::Dataset(d) => Ok(d),
            _ => Err(StoreError::NotADataset {
                name: name.to_string(),
            }),
        }
    }

    pub fn read_dataset(&self, name: &str) -> Result<&Dataset> {
        match self.children.get(name) {
            Some(Node::Dataset(d)) => Ok(d),
            Some(_) => Err(StoreError::NotADataset {
                name: name.to_string(),
            }),
            None => Err(StoreError::missing(name)),
        }
    }

    /// Write typed values with an explicit shape
    pub fn write_slice<T: Element>(
        &mut self,
        name: &str,
        shape: Vec<u64>,
        values: &[T],
    ) -> Result<&mut Dataset> {
        let dataset = Dataset::from_values(shape, values).map_err(|e| named(e, name))?;
        self.write_dataset(name, dataset)
    }

    /// Read a dataset as a flat vector of `T`
    pub fn read_vec<T: Element>(&self, name: &str) -> Result<Vec<T>> {
        self.read_dataset(name)?
            .values()
            .map_err(|e| named(e, name))
    }

    /// Write a single value as a one-element dataset
    pub fn write_scalar<T: Element>(&mut self, name: &str, value: T) -> Result<()> {
        self.write_slice(name, vec![1], &[value])?;
        Ok(())
    }

    pub fn read_scalar<T: Element>(&self, name: &str) -> Result<T> {
        let values = self.read_vec::<T>(name)?;
        match values.as_slice() {
            [v] => Ok(*v),
            _ => Err(StoreError::ShapeMismatch {
                name: name.to_string(),
                expected: 1,
                actual: values.len(),
            }),
        }
    }

    pub fn write_strings(&mut self, name: &str, values: Vec<String>) -> Result<&mut StringDataset> {
        match self.insert(name, StringDataset::new(values))? {
            Node::Strings(s) => Ok(s),
            _ => Err(StoreError::NotAStringDataset {
                name: name.to_string(),
            }),
        }
    }

    pub fn read_strings(&self, name: &str) -> Result<&[String]> {
        match self.children.get(name) {
            Some(Node::Strings(s)) => Ok(&s.values),
            Some(_) => Err(StoreError::NotAStringDataset {
                name: name.to_string(),
            }),
            None => Err(StoreError::missing(name)),
        }
    }

    // ------------------------------------------------------------------
    // Attributes
    // ------------------------------------------------------------------

    /// Set an attribute on this group
    pub fn set_attribute(&mut self, key: &str, value: impl Into<Attribute>) -> Result<()> {
        validate_key(key)?;
        self.attributes.insert(key.to_string(), value.into());
        Ok(())
    }

    pub fn attribute(&self, key: &str) -> Option<&Attribute> {
        self.attributes.get(key)
    }

    pub fn string_attribute(&self, key: &str) -> Option<&str> {
        self.attribute(key).and_then(Attribute::as_str)
    }

    /// Attribute `key` of child `child`, if both exist
    pub fn child_attribute(&self, child: &str, key: &str) -> Option<&Attribute> {
        self.children.get(child)?.attributes().get(key)
    }

    fn child_attributes_mut(&mut self, child: &str) -> Result<&mut Attributes> {
        self.children
            .get_mut(child)
            .map(Node::attributes_mut)
            .ok_or_else(|| StoreError::missing(child))
    }

    pub fn write_string_attribute(&mut self, child: &str, key: &str, value: &str) -> Result<()> {
        validate_key(key)?;
        self.child_attributes_mut(child)?
            .insert(key.to_string(), Attribute::from(value));
        Ok(())
    }

    pub fn read_string_attribute(&self, child: &str, key: &str) -> Result<&str> {
        match self.lookup_attribute(child, key)? {
            Attribute::String(s) => Ok(s),
            _ => Err(StoreError::AttributeType {
                object: child.to_string(),
                attribute: key.to_string(),
                expected: "string",
            }),
        }
    }

    pub fn write_int_attribute(&mut self, child: &str, key: &str, value: i64) -> Result<()> {
        validate_key(key)?;
        self.child_attributes_mut(child)?
            .insert(key.to_string(), Attribute::Int(value));
        Ok(())
    }

    pub fn read_int_attribute(&self, child: &str, key: &str) -> Result<i64> {
        match self.lookup_attribute(child, key)? {
            Attribute::Int(v) => Ok(*v),
            _ => Err(StoreError::AttributeType {
                object: child.to_string(),
                attribute: key.to_string(),
                expected: "int",
            }),
        }
    }

    fn lookup_attribute(&self, child: &str, key: &str) -> Result<&Attribute> {
        let node = self
            .children
            .get(child)
            .ok_or_else(|| StoreError::missing(child))?;
        node.attributes()
            .get(key)
            .ok_or_else(|| StoreError::MissingAttribute {
                object: child.to_string(),
                attribute: key.to_string(),
            })
    }

    // ------------------------------------------------------------------
    // Paths
    // ------------------------------------------------------------------

    /// Get a nested node by slash-separated path (e.g., "DataContainers/Volume/CELL_DATA")
    pub fn get(&self, path: &str) -> Option<&Node> {
        let mut parts = path.split('/').filter(|p| !p.is_empty());
        let first = parts.next()?;
        let mut current = self.children.get(first)?;
        for key in parts {
            current = current.as_group()?.children.get(key)?;
        }
        Some(current)
    }

    pub fn get_group(&self, path: &str) -> Option<&Group> {
        if path.split('/').all(str::is_empty) {
            return Some(self);
        }
        self.get(path)?.as_group()
    }
}

/// Attach the dataset name to shape/type errors raised below the group level
fn named(err: StoreError, name: &str) -> StoreError {
    match err {
        StoreError::TypeMismatch {
            expected, actual, ..
        } => StoreError::TypeMismatch {
            name: name.to_string(),
            expected,
            actual,
        },
        StoreError::ShapeMismatch {
            expected, actual, ..
        } => StoreError::ShapeMismatch {
            name: name.to_string(),
            expected,
            actual,
        },
        other => other,
    }
}
