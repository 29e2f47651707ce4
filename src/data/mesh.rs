//! Triangle surface meshes

use super::{DataArray, DynamicListArray};

/// Shared-vertex triangle mesh with optional connectivity lists
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceMesh {
    /// xyz per vertex
    pub vertices: DataArray<f32>,
    /// Three vertex indices per face
    pub faces: DataArray<i32>,
    /// Faces sharing an edge with each face
    pub face_neighbors: Option<DynamicListArray>,
    /// Faces touching each vertex
    pub faces_containing_vert: Option<DynamicListArray>,
}

impl Default for SurfaceMesh {
    fn default() -> Self {
        Self {
            vertices: DataArray::new(VERTICES, 0, 3),
            faces: DataArray::new(FACES, 0, 3),
            face_neighbors: None,
            faces_containing_vert: None,
        }
    }
}

pub const VERTICES: &str = "Vertices";
pub const FACES: &str = "Faces";
pub const FACE_NEIGHBORS: &str = "FaceNeighbors";
pub const FACES_CONTAINING_VERT: &str = "FacesContainingVert";

impl SurfaceMesh {
    pub fn num_vertices(&self) -> usize {
        self.vertices.num_tuples()
    }

    pub fn num_faces(&self) -> usize {
        self.faces.num_tuples()
    }

    /// Build the vertex → faces list from the face table
    pub fn find_faces_containing_vert(&mut self) {
        let mut lists = vec![Vec::new(); self.num_vertices()];
        for face in 0..self.num_faces() {
            for &v in self.faces.tuple(face) {
                if let Some(list) = usize::try_from(v).ok().and_then(|v| lists.get_mut(v)) {
                    list.push(face as i32);
                }
            }
        }
        self.faces_containing_vert = Some(DynamicListArray::from_lists(&lists));
    }
}
