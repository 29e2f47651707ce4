//! Store configuration
//!
//! Read policies can be set in code or loaded from a small JSON document:
//!
//! ```json
//! { "unknown_object_policy": "fail", "tuple_count_policy": "strict" }
//! ```
//!
//! Missing fields take their defaults.

use crate::error::Result;
use crate::persist::ReadOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What a reader does with a child whose object type it does not recognize
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownObjectPolicy {
    /// Log a warning and leave the child out
    #[default]
    Skip,
    /// Abort the read with `UnknownObjectType`
    Fail,
}

/// How a reader treats arrays whose tuple count disagrees with their matrix
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TupleCountPolicy {
    /// The last array inserted sets the matrix tuple count
    #[default]
    LastWriterWins,
    /// Abort the read with `TupleCountMismatch`
    Strict,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub unknown_object_policy: UnknownObjectPolicy,
    pub tuple_count_policy: TupleCountPolicy,
}

impl StoreConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }

    /// Full-read options carrying these policies
    pub fn read_options(&self) -> ReadOptions {
        ReadOptions {
            unknown_object_policy: self.unknown_object_policy,
            tuple_count_policy: self.tuple_count_policy,
            ..ReadOptions::default()
        }
    }
}
