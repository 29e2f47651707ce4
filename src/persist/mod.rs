//! Persistence delegate
//!
//! Maps the in-memory data model onto a container [`Group`](crate::types::Group) tree. Every
//! array is stamped with its [`ObjectKind`] so a reader can rebuild the right
//! variant without knowing the layout in advance.

pub mod array_io;
pub mod container_io;
pub mod matrix_io;
pub mod mesh_io;
pub mod object_kind;
pub mod stats_io;

pub use array_io::{read_array, resolve_kind, write_array};
pub use container_io::{read_data_containers, write_data_containers};
pub use matrix_io::{read_matrix, read_matrix_arrays, write_matrix, write_matrix_arrays};
pub use object_kind::{NUM_COMPONENTS, OBJECT_KIND, OBJECT_TYPE, ObjectKind, TUPLE_COUNT};

use crate::config::{TupleCountPolicy, UnknownObjectPolicy};
use std::collections::HashSet;

/// How a read walks a stored matrix
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReadOptions {
    /// Restrict a full read to these array names; `None` reads everything
    pub names_to_read: Option<HashSet<String>>,
    /// Build zero-tuple templates instead of decoding payloads
    pub preflight: bool,
    pub unknown_object_policy: UnknownObjectPolicy,
    pub tuple_count_policy: TupleCountPolicy,
}

impl ReadOptions {
    /// Options for a structure-only read
    pub fn preflight() -> Self {
        Self {
            preflight: true,
            ..Self::default()
        }
    }

    /// Options for a full read of the named arrays only
    pub fn with_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names_to_read: Some(names.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// Whether array `name` is part of this read
    pub fn selects(&self, name: &str) -> bool {
        self.preflight
            || self
                .names_to_read
                .as_ref()
                .is_none_or(|names| names.contains(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection() {
        let all = ReadOptions::default();
        assert!(all.selects("Phases"));

        let some = ReadOptions::with_names(["Phases"]);
        assert!(some.selects("Phases"));
        assert!(!some.selects("EulerAngles"));

        let preflight = ReadOptions {
            names_to_read: Some(HashSet::new()),
            preflight: true,
            ..ReadOptions::default()
        };
        assert!(preflight.selects("EulerAngles"));
        assert!(ReadOptions::preflight().preflight);
    }
}
