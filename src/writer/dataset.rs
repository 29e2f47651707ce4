//! Dataset body serialization

use super::node::write_string;
use crate::error::{Result, StoreError};
use crate::types::{Dataset, StringDataset};
use byteorder::{LittleEndian, WriteBytesExt};
use std::io::Write;

/// Write a numeric dataset body, checking the payload against the shape first
pub fn write_dataset_body<W: Write>(writer: &mut W, ds: &Dataset) -> Result<()> {
    if ds.data.len() as u64 != ds.expected_size() {
        return Err(StoreError::DataSizeMismatch {
            expected: ds.expected_size(),
            actual: ds.data.len() as u64,
        });
    }
    let ndim = u8::try_from(ds.shape.len()).map_err(|_| StoreError::ShapeMismatch {
        name: String::new(),
        expected: u8::MAX as usize,
        actual: ds.shape.len(),
    })?;

    writer.write_u8(ds.dtype as u8)?;
    writer.write_u8(ndim)?;
    for &dim in &ds.shape {
        writer.write_u64::<LittleEndian>(dim)?;
    }
    writer.write_u64::<LittleEndian>(ds.data.len() as u64)?;
    writer.write_all(&ds.data)?;
    Ok(())
}

/// Write a string dataset body
pub fn write_strings_body<W: Write>(writer: &mut W, ds: &StringDataset) -> Result<()> {
    writer.write_u32::<LittleEndian>(super::node::len_u32(ds.values.len())?)?;
    for value in &ds.values {
        write_string(writer, value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DType;

    #[test]
    fn layout_1d_u8() {
        let ds = Dataset::new(DType::U8, vec![4], vec![1, 2, 3, 4]);
        let mut buf = Vec::new();
        write_dataset_body(&mut buf, &ds).unwrap();

        let mut expected = vec![DType::U8 as u8, 1];
        expected.extend_from_slice(&4u64.to_le_bytes());
        expected.extend_from_slice(&4u64.to_le_bytes());
        expected.extend_from_slice(&[1, 2, 3, 4]);
        assert_eq!(buf, expected);
    }

    #[test]
    fn rejects_payload_shape_mismatch() {
        let ds = Dataset::new(DType::F32, vec![2, 3], vec![0u8; 20]);
        let mut buf = Vec::new();
        assert!(matches!(
            write_dataset_body(&mut buf, &ds),
            Err(StoreError::DataSizeMismatch { expected: 24, actual: 20 })
        ));
        assert!(buf.is_empty());
    }

    #[test]
    fn strings_layout() {
        let ds = StringDataset::new(vec!["ab".into()]);
        let mut buf = Vec::new();
        write_strings_body(&mut buf, &ds).unwrap();
        assert_eq!(buf, vec![1, 0, 0, 0, 2, 0, 0, 0, b'a', b'b']);
    }
}
