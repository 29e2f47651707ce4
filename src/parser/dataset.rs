//! Dataset body parsing

use super::primitives::{Cause, PResult, fail};
use super::string::parse_string;
use crate::types::{Attributes, DType, Dataset, StringDataset};
use nom::bytes::complete::take;
use nom::multi::count;
use nom::number::complete::{le_u8, le_u32, le_u64};

/// Parse a numeric dataset body (after tag and attributes)
///
/// Layout: dtype (u8), ndim (u8), shape (ndim × u64), byte size (u64), bytes
pub fn parse_dataset_body(input: &[u8], attributes: Attributes) -> PResult<'_, Dataset> {
    let (input, dtype_byte) = le_u8(input)?;
    let Some(dtype) = DType::from_u8(dtype_byte) else {
        return fail(input, Cause::InvalidDType(dtype_byte));
    };

    let (input, ndim) = le_u8(input)?;
    let (input, shape) = count(le_u64, ndim as usize)(input)?;

    let (input, size) = le_u64(input)?;
    let expected = shape
        .iter()
        .try_fold(dtype.element_size() as u64, |acc, &d| acc.checked_mul(d));
    if expected != Some(size) {
        return fail(
            input,
            Cause::DataSizeMismatch {
                expected: expected.unwrap_or(u64::MAX),
                actual: size,
            },
        );
    }

    let Ok(size) = usize::try_from(size) else {
        return fail(input, Cause::Eof);
    };
    let (input, data) = take(size)(input)?;

    Ok((
        input,
        Dataset {
            dtype,
            shape,
            data: data.to_vec(),
            attributes,
        },
    ))
}

/// Parse a string dataset body: count (u32), then u32-prefixed strings
pub fn parse_strings_body(input: &[u8], attributes: Attributes) -> PResult<'_, StringDataset> {
    let (input, n) = le_u32(input)?;
    let (input, values) = count(parse_string, n as usize)(input)?;
    Ok((input, StringDataset { values, attributes }))
}
