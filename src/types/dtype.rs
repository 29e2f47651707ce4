//! Element types for typed arrays

/// Element type of a numeric dataset or array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DType {
    U8 = 0x01,
    I8 = 0x02,
    U16 = 0x03,
    I16 = 0x04,
    U32 = 0x05,
    I32 = 0x06,
    U64 = 0x07,
    I64 = 0x08,
    F32 = 0x09,
    F64 = 0x0A,
    Bool = 0x0B,
}

impl DType {
    /// Every supported element type, in tag order
    pub const ALL: [DType; 11] = [
        DType::U8,
        DType::I8,
        DType::U16,
        DType::I16,
        DType::U32,
        DType::I32,
        DType::U64,
        DType::I64,
        DType::F32,
        DType::F64,
        DType::Bool,
    ];

    /// Size in bytes of a single element
    pub fn element_size(self) -> usize {
        match self {
            DType::U8 | DType::I8 | DType::Bool => 1,
            DType::U16 | DType::I16 => 2,
            DType::U32 | DType::I32 | DType::F32 => 4,
            DType::U64 | DType::I64 | DType::F64 => 8,
        }
    }

    /// Try to convert from u8 tag
    pub fn from_u8(tag: u8) -> Option<Self> {
        match tag {
            0x01 => Some(DType::U8),
            0x02 => Some(DType::I8),
            0x03 => Some(DType::U16),
            0x04 => Some(DType::I16),
            0x05 => Some(DType::U32),
            0x06 => Some(DType::I32),
            0x07 => Some(DType::U64),
            0x08 => Some(DType::I64),
            0x09 => Some(DType::F32),
            0x0A => Some(DType::F64),
            0x0B => Some(DType::Bool),
            _ => None,
        }
    }

    /// C-style type name used inside `DataArray<...>` object tags
    pub fn type_name(self) -> &'static str {
        match self {
            DType::U8 => "uint8_t",
            DType::I8 => "int8_t",
            DType::U16 => "uint16_t",
            DType::I16 => "int16_t",
            DType::U32 => "uint32_t",
            DType::I32 => "int32_t",
            DType::U64 => "uint64_t",
            DType::I64 => "int64_t",
            DType::F32 => "float",
            DType::F64 => "double",
            DType::Bool => "bool",
        }
    }

    /// Inverse of [`DType::type_name`]
    pub fn from_type_name(name: &str) -> Option<Self> {
        DType::ALL.into_iter().find(|d| d.type_name() == name)
    }

    /// XDMF `NumberType` and `Precision`, or `None` when XDMF cannot describe the type
    pub fn xdmf_type_and_precision(self) -> Option<(&'static str, usize)> {
        match self {
            DType::I8 => Some(("Char", 1)),
            DType::U8 => Some(("UChar", 1)),
            DType::I16 | DType::U16 => None,
            DType::I32 => Some(("Int", 4)),
            DType::U32 => Some(("UInt", 4)),
            DType::I64 => Some(("Int", 8)),
            DType::U64 => Some(("UInt", 8)),
            DType::F32 => Some(("Float", 4)),
            DType::F64 => Some(("Float", 8)),
            DType::Bool => Some(("uchar", 1)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_roundtrip() {
        for dtype in DType::ALL {
            assert_eq!(DType::from_u8(dtype as u8), Some(dtype));
        }
        assert_eq!(DType::from_u8(0x00), None);
        assert_eq!(DType::from_u8(0x0C), None);
    }

    #[test]
    fn type_names_roundtrip() {
        for dtype in DType::ALL {
            assert_eq!(DType::from_type_name(dtype.type_name()), Some(dtype));
        }
        assert_eq!(DType::from_type_name("long double"), None);
    }

    #[test]
    fn sixteen_bit_has_no_xdmf_precision() {
        assert_eq!(DType::I16.xdmf_type_and_precision(), None);
        assert_eq!(DType::F64.xdmf_type_and_precision(), Some(("Float", 8)));
    }
}
