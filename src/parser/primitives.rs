//! Error plumbing shared by the binary parsers
//!
//! Every parser has the nom shape `fn(&[u8]) -> PResult<'_, T>`. Failures
//! keep the input slice they stopped at, so the byte offset can be
//! recovered once the outermost parser gives up.

use crate::error::{Result, StoreError};
use nom::IResult;
use nom::error::{ErrorKind, ParseError};

/// What went wrong while decoding
#[derive(Debug, Clone, PartialEq)]
pub enum Cause {
    Eof,
    InvalidNodeTag(u8),
    InvalidDType(u8),
    InvalidAttributeTag(u8),
    InvalidUtf8,
    DataSizeMismatch { expected: u64, actual: u64 },
}

/// Parser error positioned at the remaining input
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeError<'a> {
    pub input: &'a [u8],
    pub cause: Cause,
}

// nom's built-in byte parsers only fail by running out of input
impl<'a> ParseError<&'a [u8]> for DecodeError<'a> {
    fn from_error_kind(input: &'a [u8], _kind: ErrorKind) -> Self {
        Self {
            input,
            cause: Cause::Eof,
        }
    }

    fn append(_input: &'a [u8], _kind: ErrorKind, other: Self) -> Self {
        other
    }
}

pub type PResult<'a, T> = IResult<&'a [u8], T, DecodeError<'a>>;

/// Abort parsing at `input`
pub fn fail<T>(input: &[u8], cause: Cause) -> PResult<'_, T> {
    Err(nom::Err::Failure(DecodeError { input, cause }))
}

impl DecodeError<'_> {
    /// Convert to a [`StoreError`], with the offset measured from `start`
    pub fn into_store_error(self, start: &[u8]) -> StoreError {
        let offset = start.len().saturating_sub(self.input.len()) as u64;
        match self.cause {
            Cause::Eof => StoreError::UnexpectedEof { offset },
            Cause::InvalidNodeTag(tag) => StoreError::InvalidNodeTag(tag),
            Cause::InvalidDType(tag) => StoreError::InvalidDType(tag),
            Cause::InvalidAttributeTag(tag) => StoreError::InvalidAttributeTag(tag),
            Cause::InvalidUtf8 => StoreError::InvalidUtf8 { offset },
            Cause::DataSizeMismatch { expected, actual } => {
                StoreError::DataSizeMismatch { expected, actual }
            }
        }
    }
}

/// Run `parser` over `input`, returning its output and the unconsumed rest
pub fn run<'a, T>(
    input: &'a [u8],
    mut parser: impl FnMut(&'a [u8]) -> PResult<'a, T>,
) -> Result<(T, &'a [u8])> {
    match parser(input) {
        Ok((rest, output)) => Ok((output, rest)),
        Err(nom::Err::Error(e) | nom::Err::Failure(e)) => Err(e.into_store_error(input)),
        Err(nom::Err::Incomplete(_)) => Err(StoreError::UnexpectedEof {
            offset: input.len() as u64,
        }),
    }
}
