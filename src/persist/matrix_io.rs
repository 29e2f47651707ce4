//! Attribute matrix persistence

use super::ReadOptions;
use super::array_io::{read_array, resolve_kind, write_array};
use super::object_kind::TUPLE_COUNT;
use crate::config::{TupleCountPolicy, UnknownObjectPolicy};
use crate::data::{AttributeArray, AttributeMatrix, AttributeMatrixType};
use crate::error::{Result, StoreError};
use crate::types::Group;

/// Matrix group attribute holding the [`AttributeMatrixType`] code
pub const ATTRIBUTE_MATRIX_TYPE: &str = "AttributeMatrixType";

/// Write every member of `matrix` as a child of `group`
pub fn write_matrix_arrays(matrix: &AttributeMatrix, group: &mut Group) -> Result<()> {
    check_neighbor_counts(matrix)?;
    for (_, array) in matrix.iter() {
        write_array(group, array)?;
    }
    Ok(())
}

/// A member sharing a neighbor list's companion name must hold exactly the
/// list's per-tuple counts, whichever of the two is written last
fn check_neighbor_counts(matrix: &AttributeMatrix) -> Result<()> {
    for (_, array) in matrix.iter() {
        let AttributeArray::NeighborList(list) = array else {
            continue;
        };
        let companion = list.num_neighbors_array_name();
        let Some(member) = matrix.get_array(companion) else {
            continue;
        };
        let consistent = match member {
            AttributeArray::Int32(counts) => {
                counts.num_components() == 1 && counts.as_slice() == list.counts().as_slice()
            }
            _ => false,
        };
        if !consistent {
            return Err(StoreError::NeighborCountConflict {
                list: list.name().to_string(),
                companion: companion.to_string(),
                tuples: list.num_tuples(),
            });
        }
    }
    Ok(())
}

/// Read the children of `group` into `matrix`.
///
/// Children whose kind cannot be resolved are skipped with a warning or
/// abort the read, depending on `options.unknown_object_policy`.
pub fn read_matrix_arrays(
    matrix: &mut AttributeMatrix,
    group: &Group,
    options: &ReadOptions,
) -> Result<()> {
    let stored_tuples = group
        .attribute(TUPLE_COUNT)
        .and_then(|a| a.as_int())
        .and_then(|n| usize::try_from(n).ok());

    for (name, node) in &group.children {
        if !options.selects(name) {
            continue;
        }
        let kind = match resolve_kind(name, node) {
            Ok(kind) => kind,
            Err(tag) => match options.unknown_object_policy {
                UnknownObjectPolicy::Skip => {
                    log::warn!("skipping '{name}' in '{}': unrecognized object type {tag:?}", matrix.name());
                    continue;
                }
                UnknownObjectPolicy::Fail => {
                    return Err(StoreError::UnknownObjectType {
                        name: name.clone(),
                        tag,
                    });
                }
            },
        };

        let array = read_array(
            group,
            name,
            kind,
            options.preflight,
            options.unknown_object_policy,
        )?;
        match options.tuple_count_policy {
            TupleCountPolicy::LastWriterWins => matrix.add_array(name, array),
            TupleCountPolicy::Strict => {
                if let Some(expected) = stored_tuples.filter(|_| !options.preflight) {
                    if array.num_tuples() != expected {
                        return Err(StoreError::TupleCountMismatch {
                            name: name.clone(),
                            expected,
                            actual: array.num_tuples(),
                        });
                    }
                }
                matrix.try_add_array(name, array)?;
            }
        }
    }

    if options.preflight {
        if let Some(tuples) = stored_tuples {
            matrix.set_tuple_count(tuples);
        }
    }
    log::debug!(
        "read {} arrays into '{}' ({} tuples)",
        matrix.len(),
        matrix.name(),
        matrix.tuple_count()
    );
    Ok(())
}

/// Write `matrix` as a group named after it under `parent`
pub fn write_matrix(parent: &mut Group, matrix: &AttributeMatrix) -> Result<()> {
    let group = parent.create_group(matrix.name())?;
    group.set_attribute(ATTRIBUTE_MATRIX_TYPE, matrix.matrix_type().code())?;
    group.set_attribute(TUPLE_COUNT, matrix.tuple_count() as i64)?;
    write_matrix_arrays(matrix, group)
}

/// Read the matrix group `name` under `parent`
pub fn read_matrix(parent: &Group, name: &str, options: &ReadOptions) -> Result<AttributeMatrix> {
    let group = parent.open_group(name)?;
    let matrix_type = group
        .attribute(ATTRIBUTE_MATRIX_TYPE)
        .and_then(|a| a.as_int())
        .and_then(AttributeMatrixType::from_code)
        .unwrap_or_else(|| {
            log::debug!("'{name}' has no usable {ATTRIBUTE_MATRIX_TYPE}, reading as generic");
            AttributeMatrixType::Generic
        });
    let tuples = group
        .attribute(TUPLE_COUNT)
        .and_then(|a| a.as_int())
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(0);

    let mut matrix = AttributeMatrix::new(name, matrix_type, tuples);
    matrix.read_with_options(group, options)?;
    Ok(matrix)
}
