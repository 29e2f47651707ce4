//! Reading and writing single arrays, tagged with their object kind

use super::object_kind::{NUM_COMPONENTS, OBJECT_KIND, OBJECT_TYPE, ObjectKind, TUPLE_COUNT};
use super::stats_io;
use crate::config::UnknownObjectPolicy;
use crate::data::attribute_array::with_dtype;
use crate::data::{AttributeArray, DataArray, DynamicListArray, NeighborList, StringDataArray};
use crate::error::{Result, StoreError};
use crate::stats::STATISTICS;
use crate::types::{Attribute, Attributes, DType, Dataset, Element, Group, Node};

/// Attribute on a neighbor list naming its companion count array
pub const LINKED_NUM_NEIGHBORS: &str = "Linked NumNeighbors Dataset";

/// Stamp kind, component count and tuple count onto a freshly written object
pub fn stamp(attributes: &mut Attributes, kind: ObjectKind, num_components: usize, num_tuples: usize) {
    attributes.insert(OBJECT_TYPE.to_string(), Attribute::String(kind.type_name()));
    attributes.insert(OBJECT_KIND.to_string(), Attribute::Int(i64::from(kind.code())));
    attributes.insert(NUM_COMPONENTS.to_string(), Attribute::Int(num_components as i64));
    attributes.insert(TUPLE_COUNT.to_string(), Attribute::Int(num_tuples as i64));
}

/// Write a numeric array as a `[tuples, components]` dataset named after it
pub fn write_data_array<T: Element>(group: &mut Group, array: &DataArray<T>) -> Result<()> {
    write_data_array_as(group, array.name(), array)
}

/// Write a numeric array under a fixed `name`, whatever the array is called
pub fn write_data_array_as<T: Element>(
    group: &mut Group,
    name: &str,
    array: &DataArray<T>,
) -> Result<()> {
    let dataset = group.write_dataset(name, array.to_dataset())?;
    stamp(
        &mut dataset.attributes,
        ObjectKind::DataArray(T::DTYPE),
        array.num_components(),
        array.num_tuples(),
    );
    Ok(())
}

/// Write any array under its own name
pub fn write_array(group: &mut Group, array: &AttributeArray) -> Result<()> {
    log::debug!("writing {} '{}'", array.object_kind(), array.name());
    match array {
        AttributeArray::Int8(a) => write_data_array(group, a),
        AttributeArray::UInt8(a) => write_data_array(group, a),
        AttributeArray::Int16(a) => write_data_array(group, a),
        AttributeArray::UInt16(a) => write_data_array(group, a),
        AttributeArray::Int32(a) => write_data_array(group, a),
        AttributeArray::UInt32(a) => write_data_array(group, a),
        AttributeArray::Int64(a) => write_data_array(group, a),
        AttributeArray::UInt64(a) => write_data_array(group, a),
        AttributeArray::Float(a) => write_data_array(group, a),
        AttributeArray::Double(a) => write_data_array(group, a),
        AttributeArray::Bool(a) => write_data_array(group, a),
        AttributeArray::String(a) => write_string_array(group, a),
        AttributeArray::NeighborList(a) => write_neighbor_list(group, a),
        AttributeArray::Statistics(a) => stats_io::write_stats(group, a),
    }
}

fn write_string_array(group: &mut Group, array: &StringDataArray) -> Result<()> {
    let dataset = group.write_strings(array.name(), array.as_slice().to_vec())?;
    stamp(
        &mut dataset.attributes,
        ObjectKind::StringDataArray,
        1,
        array.num_tuples(),
    );
    Ok(())
}

/// Flat elements under the list's name, plus the per-tuple counts in the
/// linked companion array.
///
/// An existing companion must be an int32 array with one value per tuple;
/// it is rewritten when its values are stale.
fn write_neighbor_list(group: &mut Group, list: &NeighborList) -> Result<()> {
    let counts = DataArray::from_column(list.num_neighbors_array_name(), list.counts());
    let stale = match group.child(counts.name()) {
        None => true,
        Some(node) => {
            let stored = node
                .as_dataset()
                .filter(|d| d.dtype == DType::I32 && d.num_elements() == list.num_tuples() as u64)
                .and_then(|d| d.values::<i32>().ok())
                .ok_or_else(|| StoreError::NeighborCountConflict {
                    list: list.name().to_string(),
                    companion: counts.name().to_string(),
                    tuples: list.num_tuples(),
                })?;
            if stored != counts.as_slice() {
                log::warn!(
                    "rewriting stale '{}' to match neighbor list '{}'",
                    counts.name(),
                    list.name()
                );
                true
            } else {
                false
            }
        }
    };
    if stale {
        write_data_array(group, &counts)?;
    }

    let elements = list.lists().elements();
    let dataset = group.write_slice(list.name(), vec![elements.len() as u64], elements)?;
    stamp(
        &mut dataset.attributes,
        ObjectKind::NeighborList,
        1,
        list.num_tuples(),
    );
    dataset.attributes.insert(
        LINKED_NUM_NEIGHBORS.to_string(),
        Attribute::String(list.num_neighbors_array_name().to_string()),
    );
    Ok(())
}

/// Work out what kind of array `node` holds.
///
/// The integer `ObjectKind` attribute wins; otherwise the legacy
/// `ObjectType` string is parsed. A group named `Statistics` with neither is
/// taken as statistics. On failure the unrecognized tag (possibly empty) is
/// returned.
pub fn resolve_kind(name: &str, node: &Node) -> std::result::Result<ObjectKind, String> {
    let attributes = node.attributes();
    if let Some(code) = attributes.get(OBJECT_KIND).and_then(Attribute::as_int) {
        match u8::try_from(code).ok().and_then(ObjectKind::from_code) {
            Some(kind) => return Ok(kind),
            None => log::debug!("'{name}' has unrecognized kind code {code}, trying {OBJECT_TYPE}"),
        }
    }

    let stored = node.as_dataset().map(|d| d.dtype);
    match attributes.get(OBJECT_TYPE).and_then(Attribute::as_str) {
        Some(tag) => ObjectKind::from_type_name(tag, stored).ok_or_else(|| tag.to_string()),
        None if name == STATISTICS && node.as_group().is_some() => Ok(ObjectKind::StatsDataArray),
        None => Err(String::new()),
    }
}

fn num_components(node: &Node) -> Option<usize> {
    node.attributes()
        .get(NUM_COMPONENTS)
        .and_then(Attribute::as_int)
        .and_then(|c| usize::try_from(c).ok())
}

/// Read child `name` of `group` as an array of `kind`.
///
/// With `preflight` set, nothing is decoded: the result is a zero-tuple
/// array of the right kind and component count.
pub fn read_array(
    group: &Group,
    name: &str,
    kind: ObjectKind,
    preflight: bool,
    policy: UnknownObjectPolicy,
) -> Result<AttributeArray> {
    let node = group.child(name).ok_or_else(|| StoreError::missing(name))?;
    let components = num_components(node);

    if preflight {
        let components = components
            .or_else(|| {
                node.as_dataset()
                    .and_then(|d| d.shape.get(1))
                    .map(|&c| c as usize)
            })
            .unwrap_or(1);
        return Ok(AttributeArray::empty(kind, name, components));
    }

    let array: AttributeArray = match kind {
        ObjectKind::DataArray(dtype) => {
            let dataset = group.read_dataset(name)?;
            with_dtype!(dtype, T => DataArray::<T>::from_dataset(name, dataset, components)?.into())
        }
        ObjectKind::StringDataArray => {
            StringDataArray::from_vec(name, group.read_strings(name)?.to_vec()).into()
        }
        ObjectKind::NeighborList => read_neighbor_list(group, name)?.into(),
        ObjectKind::StatsDataArray => {
            stats_io::read_stats(group.open_group(name)?, name, policy)?.into()
        }
    };
    Ok(array)
}

/// Read a float array written by [`write_data_array`]
pub fn read_float_array(group: &Group, name: &str) -> Result<DataArray<f32>> {
    let dataset: &Dataset = group.read_dataset(name)?;
    let components = group.child(name).and_then(num_components);
    DataArray::from_dataset(name, dataset, components)
}

fn read_neighbor_list(group: &Group, name: &str) -> Result<NeighborList> {
    let counts_name = group
        .child_attribute(name, LINKED_NUM_NEIGHBORS)
        .and_then(Attribute::as_str)
        .unwrap_or(crate::data::neighbor_list::NUM_NEIGHBORS)
        .to_string();
    let elements = group.read_vec::<i32>(name)?;
    let counts = group.read_vec::<i32>(&counts_name)?;

    let total: i64 = counts.iter().map(|&c| i64::from(c.max(0))).sum();
    if counts.iter().any(|&c| c < 0) || total != elements.len() as i64 {
        return Err(StoreError::ShapeMismatch {
            name: name.to_string(),
            expected: total.max(0) as usize,
            actual: elements.len(),
        });
    }

    let mut lists = Vec::with_capacity(counts.len());
    let mut start = 0;
    for &count in &counts {
        let end = start + count as usize;
        lists.push(&elements[start..end]);
        start = end;
    }

    let mut list = NeighborList::from_lists(name, DynamicListArray::from_lists(&lists));
    list.set_num_neighbors_array_name(counts_name);
    Ok(list)
}
