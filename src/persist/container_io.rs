//! Data container persistence
//!
//! ```text
//! /DataContainers/
//!   <name>/            DataContainerName = <name>
//!     DIMENSIONS       i64 [3]   (image geometry only)
//!     ORIGIN           f32 [3]
//!     SPACING          f32 [3]
//!     Vertices, Faces  (surface mesh only)
//!     <matrix>/        AttributeMatrixType, TupleCount
//! ```

use super::ReadOptions;
use super::matrix_io::{read_matrix, write_matrix};
use super::mesh_io::{read_mesh, write_mesh};
use crate::container::ContainerFile;
use crate::data::{DataContainer, ImageGeometry};
use crate::error::{Result, StoreError};
use crate::types::Group;

pub const DATA_CONTAINERS: &str = "DataContainers";
pub const DATA_CONTAINER_NAME: &str = "DataContainerName";
pub const DIMENSIONS: &str = "DIMENSIONS";
pub const ORIGIN: &str = "ORIGIN";
pub const SPACING: &str = "SPACING";

/// Write `containers` into an open file, replacing containers of the same name
pub fn write_data_containers(file: &mut ContainerFile, containers: &[DataContainer]) -> Result<()> {
    write_containers_to(file.root_mut()?, containers)
}

pub fn write_containers_to(root: &mut Group, containers: &[DataContainer]) -> Result<()> {
    let parent = root.create_group(DATA_CONTAINERS)?;
    for container in containers {
        log::debug!("writing data container '{}'", container.name());
        parent.remove(container.name());
        let group = parent.create_group(container.name())?;
        group.set_attribute(DATA_CONTAINER_NAME, container.name())?;

        if let Some(geometry) = &container.geometry {
            write_geometry(group, geometry)?;
        }
        if let Some(mesh) = &container.mesh {
            write_mesh(group, mesh)?;
        }
        for matrix in container.matrices() {
            write_matrix(group, matrix)?;
        }
    }
    Ok(())
}

fn write_geometry(group: &mut Group, geometry: &ImageGeometry) -> Result<()> {
    let dims = geometry.dimensions.map(|d| d as i64);
    group.write_slice(DIMENSIONS, vec![3], &dims)?;
    group.write_slice(ORIGIN, vec![3], &geometry.origin)?;
    group.write_slice(SPACING, vec![3], &geometry.spacing)?;
    Ok(())
}

/// Read every data container in `file`
pub fn read_data_containers(file: &ContainerFile, options: &ReadOptions) -> Result<Vec<DataContainer>> {
    read_containers_from(file.root(), options)
}

pub fn read_containers_from(root: &Group, options: &ReadOptions) -> Result<Vec<DataContainer>> {
    let parent = root.open_group(DATA_CONTAINERS)?;
    let mut containers = Vec::with_capacity(parent.len());
    for name in parent.child_names() {
        let group = parent.open_group(name)?;
        let mut container = DataContainer::new(group.string_attribute(DATA_CONTAINER_NAME).unwrap_or(name));
        container.geometry = read_geometry(group)?;
        container.mesh = read_mesh(group)?;
        for (child, node) in &group.children {
            if node.as_group().is_some() {
                container.add_matrix(read_matrix(group, child, options)?);
            }
        }
        containers.push(container);
    }
    Ok(containers)
}

fn read_geometry(group: &Group) -> Result<Option<ImageGeometry>> {
    if !group.contains(DIMENSIONS) {
        return Ok(None);
    }
    let dimensions = read_triple::<i64>(group, DIMENSIONS)?;
    let dimensions = dimensions.map(|d| usize::try_from(d).unwrap_or(0));
    Ok(Some(ImageGeometry {
        dimensions,
        origin: read_triple(group, ORIGIN)?,
        spacing: read_triple(group, SPACING)?,
    }))
}

fn read_triple<T: crate::types::Element>(group: &Group, name: &str) -> Result<[T; 3]> {
    let values = group.read_vec::<T>(name)?;
    values
        .as_slice()
        .try_into()
        .map_err(|_| StoreError::ShapeMismatch {
            name: name.to_string(),
            expected: 3,
            actual: values.len(),
        })
}
