//! Sum type over every array kind an attribute matrix can hold

use super::{DataArray, NeighborList, StringDataArray};
use crate::persist::ObjectKind;
use crate::stats::StatsDataArray;
use crate::types::{DType, Element};

/// Any array that can live in an [`AttributeMatrix`](super::AttributeMatrix)
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeArray {
    Int8(DataArray<i8>),
    UInt8(DataArray<u8>),
    Int16(DataArray<i16>),
    UInt16(DataArray<u16>),
    Int32(DataArray<i32>),
    UInt32(DataArray<u32>),
    Int64(DataArray<i64>),
    UInt64(DataArray<u64>),
    Float(DataArray<f32>),
    Double(DataArray<f64>),
    Bool(DataArray<bool>),
    String(StringDataArray),
    NeighborList(NeighborList),
    Statistics(StatsDataArray),
}

/// Apply `$body` to the inner array of any variant
macro_rules! dispatch {
    ($self:expr, $a:ident => $body:expr) => {
        match $self {
            AttributeArray::Int8($a) => $body,
            AttributeArray::UInt8($a) => $body,
            AttributeArray::Int16($a) => $body,
            AttributeArray::UInt16($a) => $body,
            AttributeArray::Int32($a) => $body,
            AttributeArray::UInt32($a) => $body,
            AttributeArray::Int64($a) => $body,
            AttributeArray::UInt64($a) => $body,
            AttributeArray::Float($a) => $body,
            AttributeArray::Double($a) => $body,
            AttributeArray::Bool($a) => $body,
            AttributeArray::String($a) => $body,
            AttributeArray::NeighborList($a) => $body,
            AttributeArray::Statistics($a) => $body,
        }
    };
}

/// Apply `$body` with `$t` bound to the element type of a numeric dtype
macro_rules! with_dtype {
    ($dtype:expr, $t:ident => $body:expr) => {
        match $dtype {
            $crate::types::DType::I8 => {
                type $t = i8;
                $body
            }
            $crate::types::DType::U8 => {
                type $t = u8;
                $body
            }
            $crate::types::DType::I16 => {
                type $t = i16;
                $body
            }
            $crate::types::DType::U16 => {
                type $t = u16;
                $body
            }
            $crate::types::DType::I32 => {
                type $t = i32;
                $body
            }
            $crate::types::DType::U32 => {
                type $t = u32;
                $body
            }
            $crate::types::DType::I64 => {
                type $t = i64;
                $body
            }
            $crate::types::DType::U64 => {
                type $t = u64;
                $body
            }
            $crate::types::DType::F32 => {
                type $t = f32;
                $body
            }
            $crate::types::DType::F64 => {
                type $t = f64;
                $body
            }
            $crate::types::DType::Bool => {
                type $t = bool;
                $body
            }
        }
    };
}
pub(crate) use with_dtype;

impl AttributeArray {
    pub fn name(&self) -> &str {
        dispatch!(self, a => a.name())
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        dispatch!(self, a => a.set_name(name))
    }

    pub fn num_tuples(&self) -> usize {
        dispatch!(self, a => a.num_tuples())
    }

    /// Components per tuple; 1 for strings, lists and statistics
    pub fn num_components(&self) -> usize {
        self.numeric_components().unwrap_or(1)
    }

    fn numeric_components(&self) -> Option<usize> {
        match self {
            AttributeArray::Int8(a) => Some(a.num_components()),
            AttributeArray::UInt8(a) => Some(a.num_components()),
            AttributeArray::Int16(a) => Some(a.num_components()),
            AttributeArray::UInt16(a) => Some(a.num_components()),
            AttributeArray::Int32(a) => Some(a.num_components()),
            AttributeArray::UInt32(a) => Some(a.num_components()),
            AttributeArray::Int64(a) => Some(a.num_components()),
            AttributeArray::UInt64(a) => Some(a.num_components()),
            AttributeArray::Float(a) => Some(a.num_components()),
            AttributeArray::Double(a) => Some(a.num_components()),
            AttributeArray::Bool(a) => Some(a.num_components()),
            _ => None,
        }
    }

    /// Reallocate to `num_tuples`; new tuples are zero/empty
    pub fn resize(&mut self, num_tuples: usize) {
        dispatch!(self, a => a.resize(num_tuples))
    }

    pub fn object_kind(&self) -> ObjectKind {
        let dtype = match self {
            AttributeArray::Int8(_) => DType::I8,
            AttributeArray::UInt8(_) => DType::U8,
            AttributeArray::Int16(_) => DType::I16,
            AttributeArray::UInt16(_) => DType::U16,
            AttributeArray::Int32(_) => DType::I32,
            AttributeArray::UInt32(_) => DType::U32,
            AttributeArray::Int64(_) => DType::I64,
            AttributeArray::UInt64(_) => DType::U64,
            AttributeArray::Float(_) => DType::F32,
            AttributeArray::Double(_) => DType::F64,
            AttributeArray::Bool(_) => DType::Bool,
            AttributeArray::String(_) => return ObjectKind::StringDataArray,
            AttributeArray::NeighborList(_) => return ObjectKind::NeighborList,
            AttributeArray::Statistics(_) => return ObjectKind::StatsDataArray,
        };
        ObjectKind::DataArray(dtype)
    }

    /// Element type of numeric arrays
    pub fn dtype(&self) -> Option<DType> {
        match self.object_kind() {
            ObjectKind::DataArray(dtype) => Some(dtype),
            _ => None,
        }
    }

    /// Zero-tuple array of `kind`, used as a preflight template
    pub fn empty(kind: ObjectKind, name: &str, num_components: usize) -> Self {
        let components = num_components.max(1);
        match kind {
            ObjectKind::DataArray(dtype) => {
                with_dtype!(dtype, T => DataArray::<T>::new(name, 0, components).into())
            }
            ObjectKind::StringDataArray => AttributeArray::String(StringDataArray::new(name, 0)),
            ObjectKind::NeighborList => AttributeArray::NeighborList(NeighborList::new(name, 0)),
            ObjectKind::StatsDataArray => AttributeArray::Statistics(StatsDataArray::new(name, 0)),
        }
    }

    /// Borrow as a typed numeric array
    pub fn as_typed<T: ArrayElement>(&self) -> Option<&DataArray<T>> {
        T::unwrap_ref(self)
    }

    pub fn as_typed_mut<T: ArrayElement>(&mut self) -> Option<&mut DataArray<T>> {
        T::unwrap_mut(self)
    }

    pub fn as_strings(&self) -> Option<&StringDataArray> {
        match self {
            AttributeArray::String(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_neighbor_list(&self) -> Option<&NeighborList> {
        match self {
            AttributeArray::NeighborList(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_statistics(&self) -> Option<&StatsDataArray> {
        match self {
            AttributeArray::Statistics(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_statistics_mut(&mut self) -> Option<&mut StatsDataArray> {
        match self {
            AttributeArray::Statistics(a) => Some(a),
            _ => None,
        }
    }
}

/// Element types with a matching [`AttributeArray`] variant
pub trait ArrayElement: Element {
    fn wrap(array: DataArray<Self>) -> AttributeArray;
    fn unwrap_ref(array: &AttributeArray) -> Option<&DataArray<Self>>;
    fn unwrap_mut(array: &mut AttributeArray) -> Option<&mut DataArray<Self>>;
}

macro_rules! impl_array_element {
    ($t:ty, $variant:ident) => {
        impl ArrayElement for $t {
            fn wrap(array: DataArray<Self>) -> AttributeArray {
                AttributeArray::$variant(array)
            }
            fn unwrap_ref(array: &AttributeArray) -> Option<&DataArray<Self>> {
                match array {
                    AttributeArray::$variant(a) => Some(a),
                    _ => None,
                }
            }
            fn unwrap_mut(array: &mut AttributeArray) -> Option<&mut DataArray<Self>> {
                match array {
                    AttributeArray::$variant(a) => Some(a),
                    _ => None,
                }
            }
        }
    };
}

impl_array_element!(i8, Int8);
impl_array_element!(u8, UInt8);
impl_array_element!(i16, Int16);
impl_array_element!(u16, UInt16);
impl_array_element!(i32, Int32);
impl_array_element!(u32, UInt32);
impl_array_element!(i64, Int64);
impl_array_element!(u64, UInt64);
impl_array_element!(f32, Float);
impl_array_element!(f64, Double);
impl_array_element!(bool, Bool);

impl<T: ArrayElement> From<DataArray<T>> for AttributeArray {
    fn from(array: DataArray<T>) -> Self {
        T::wrap(array)
    }
}

impl From<StringDataArray> for AttributeArray {
    fn from(array: StringDataArray) -> Self {
        AttributeArray::String(array)
    }
}

impl From<NeighborList> for AttributeArray {
    fn from(array: NeighborList) -> Self {
        AttributeArray::NeighborList(array)
    }
}

impl From<StatsDataArray> for AttributeArray {
    fn from(array: StatsDataArray) -> Self {
        AttributeArray::Statistics(array)
    }
}
