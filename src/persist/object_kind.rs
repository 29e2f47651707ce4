//! Object kind tags stamped on every persisted array

use crate::types::DType;
use std::fmt;

/// Integer discriminant attribute, preferred on read
pub const OBJECT_KIND: &str = "ObjectKind";
/// Legacy string tag attribute
pub const OBJECT_TYPE: &str = "ObjectType";
pub const NUM_COMPONENTS: &str = "NumComponents";
pub const TUPLE_COUNT: &str = "TupleCount";

const STRING_CODE: u8 = 0x20;
const NEIGHBOR_LIST_CODE: u8 = 0x21;
const STATS_CODE: u8 = 0x22;

const DATA_ARRAY_PREFIX: &str = "DataArray<";
const NEIGHBOR_LIST_PREFIX: &str = "NeighborList<";

/// Closed set of persistable array kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    DataArray(DType),
    StringDataArray,
    NeighborList,
    StatsDataArray,
}

impl ObjectKind {
    pub fn code(self) -> u8 {
        match self {
            ObjectKind::DataArray(d) => d as u8,
            ObjectKind::StringDataArray => STRING_CODE,
            ObjectKind::NeighborList => NEIGHBOR_LIST_CODE,
            ObjectKind::StatsDataArray => STATS_CODE,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            STRING_CODE => Some(ObjectKind::StringDataArray),
            NEIGHBOR_LIST_CODE => Some(ObjectKind::NeighborList),
            STATS_CODE => Some(ObjectKind::StatsDataArray),
            c => DType::from_u8(c).map(ObjectKind::DataArray),
        }
    }

    /// Legacy `ObjectType` string
    pub fn type_name(self) -> String {
        match self {
            ObjectKind::DataArray(d) => format!("{DATA_ARRAY_PREFIX}{}>", d.type_name()),
            ObjectKind::StringDataArray => "StringDataArray".to_string(),
            ObjectKind::NeighborList => "NeighborList<T>".to_string(),
            ObjectKind::StatsDataArray => "StatsDataArray".to_string(),
        }
    }

    /// Resolve a legacy `ObjectType` string.
    ///
    /// A `DataArray<...>` tag whose element name is not recognized falls back
    /// to `stored`, the dtype of the dataset itself.
    pub fn from_type_name(name: &str, stored: Option<DType>) -> Option<Self> {
        if let Some(inner) = name
            .strip_prefix(DATA_ARRAY_PREFIX)
            .and_then(|rest| rest.strip_suffix('>'))
        {
            return DType::from_type_name(inner)
                .or(stored)
                .map(ObjectKind::DataArray);
        }
        if name.starts_with(NEIGHBOR_LIST_PREFIX) {
            return Some(ObjectKind::NeighborList);
        }
        match name {
            "StringDataArray" => Some(ObjectKind::StringDataArray),
            "StatsDataArray" => Some(ObjectKind::StatsDataArray),
            _ => None,
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.type_name())
    }
}
