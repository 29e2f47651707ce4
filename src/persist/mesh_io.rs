//! Surface mesh persistence
//!
//! Vertices and faces are plain `[n, 3]` arrays. Connectivity lists are
//! stored as serialized link buffers (`u8` datasets) and decoded with the
//! face or vertex count as their tuple count.

use super::array_io::write_data_array_as;
use crate::data::mesh::{FACE_NEIGHBORS, FACES, FACES_CONTAINING_VERT, VERTICES};
use crate::data::{DataArray, DynamicListArray, SurfaceMesh};
use crate::error::Result;
use crate::types::Group;

pub fn write_mesh(group: &mut Group, mesh: &SurfaceMesh) -> Result<()> {
    write_data_array_as(group, VERTICES, &mesh.vertices)?;
    write_data_array_as(group, FACES, &mesh.faces)?;
    if let Some(links) = &mesh.face_neighbors {
        write_links(group, FACE_NEIGHBORS, links)?;
    }
    if let Some(links) = &mesh.faces_containing_vert {
        write_links(group, FACES_CONTAINING_VERT, links)?;
    }
    Ok(())
}

fn write_links(group: &mut Group, name: &str, links: &DynamicListArray) -> Result<()> {
    let buffer = links.serialize_links()?;
    group.write_slice(name, vec![buffer.len() as u64], &buffer)?;
    Ok(())
}

/// Read a mesh written by [`write_mesh`]; `None` when `group` holds no vertices
pub fn read_mesh(group: &Group) -> Result<Option<SurfaceMesh>> {
    if !group.contains(VERTICES) {
        return Ok(None);
    }
    let vertices = DataArray::<f32>::from_dataset(VERTICES, group.read_dataset(VERTICES)?, Some(3))?;
    let faces = DataArray::<i32>::from_dataset(FACES, group.read_dataset(FACES)?, Some(3))?;

    let face_neighbors = read_links(group, FACE_NEIGHBORS, faces.num_tuples())?;
    let faces_containing_vert = read_links(group, FACES_CONTAINING_VERT, vertices.num_tuples())?;
    Ok(Some(SurfaceMesh {
        vertices,
        faces,
        face_neighbors,
        faces_containing_vert,
    }))
}

fn read_links(group: &Group, name: &str, tuple_count: usize) -> Result<Option<DynamicListArray>> {
    if !group.contains(name) {
        return Ok(None);
    }
    let buffer = group.read_vec::<u8>(name)?;
    DynamicListArray::deserialize_links(&buffer, tuple_count).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;

    fn two_triangles() -> SurfaceMesh {
        let mut mesh = SurfaceMesh::default();
        mesh.vertices = DataArray::from_vec(
            VERTICES,
            3,
            vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0],
        )
        .unwrap();
        mesh.faces = DataArray::from_vec(FACES, 3, vec![0, 1, 2, 0, 2, 3]).unwrap();
        mesh.face_neighbors = Some(DynamicListArray::from_lists(&[vec![1], vec![0]]));
        mesh.find_faces_containing_vert();
        mesh
    }

    #[test]
    fn mesh_round_trip() {
        let mesh = two_triangles();
        let mut group = Group::new();
        write_mesh(&mut group, &mesh).unwrap();
        assert_eq!(read_mesh(&group).unwrap(), Some(mesh));
    }

    #[test]
    fn no_vertices_no_mesh() {
        assert_eq!(read_mesh(&Group::new()).unwrap(), None);
    }

    #[test]
    fn truncated_link_buffer() {
        let mut group = Group::new();
        write_mesh(&mut group, &two_triangles()).unwrap();
        let mut buffer = group.read_vec::<u8>(FACE_NEIGHBORS).unwrap();
        buffer.pop();
        group
            .write_slice(FACE_NEIGHBORS, vec![buffer.len() as u64], &buffer)
            .unwrap();
        assert!(matches!(
            read_mesh(&group),
            Err(StoreError::TruncatedLinks { tuple: 1, .. })
        ));
    }
}
