//! String parsing helpers

use super::primitives::{Cause, PResult, fail};
use nom::bytes::complete::take;
use nom::number::complete::{le_u16, le_u32};

/// Parse a u32 length-prefixed UTF-8 string (for values)
pub fn parse_string(input: &[u8]) -> PResult<'_, String> {
    let (input, len) = le_u32(input)?;
    utf8(input, len as usize)
}

/// Parse a u16 length-prefixed UTF-8 string (for keys)
pub fn parse_key(input: &[u8]) -> PResult<'_, String> {
    let (input, len) = le_u16(input)?;
    utf8(input, len as usize)
}

fn utf8(input: &[u8], len: usize) -> PResult<'_, String> {
    let (rest, bytes) = take(len)(input)?;
    match std::str::from_utf8(bytes) {
        Ok(s) => Ok((rest, s.to_string())),
        Err(_) => fail(input, Cause::InvalidUtf8),
    }
}
