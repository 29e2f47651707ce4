//! Variable-length per-tuple integer lists in compressed sparse row form
//!
//! The serialized link buffer is, for every tuple in order, a little-endian
//! `u16` element count followed by that many little-endian `i32` values.

use crate::error::{Result, StoreError};
use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};

const COUNT_SIZE: usize = 2;
const VALUE_SIZE: usize = 4;

/// Per-tuple lists stored as offsets into one flat element buffer.
///
/// `offsets` has `tuple_count + 1` non-decreasing entries starting at 0 and
/// ending at `elements.len()`; tuple `i` owns `elements[offsets[i]..offsets[i + 1]]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamicListArray {
    offsets: Vec<usize>,
    elements: Vec<i32>,
}

impl Default for DynamicListArray {
    fn default() -> Self {
        Self {
            offsets: vec![0],
            elements: Vec::new(),
        }
    }
}

impl DynamicListArray {
    /// `tuple_count` empty lists
    pub fn new(tuple_count: usize) -> Self {
        Self {
            offsets: vec![0; tuple_count + 1],
            elements: Vec::new(),
        }
    }

    /// Build from per-tuple lists in one pass
    pub fn from_lists<L: AsRef<[i32]>>(lists: &[L]) -> Self {
        let total = lists.iter().map(|l| l.as_ref().len()).sum();
        let mut offsets = Vec::with_capacity(lists.len() + 1);
        let mut elements = Vec::with_capacity(total);
        offsets.push(0);
        for list in lists {
            elements.extend_from_slice(list.as_ref());
            offsets.push(elements.len());
        }
        Self { offsets, elements }
    }

    /// Decode a link buffer holding exactly `tuple_count` lists
    pub fn deserialize_links(buffer: &[u8], tuple_count: usize) -> Result<Self> {
        let mut offsets = Vec::with_capacity(tuple_count.min(buffer.len() / COUNT_SIZE) + 1);
        let mut elements = Vec::with_capacity(buffer.len() / VALUE_SIZE);
        offsets.push(0);

        let mut pos = 0;
        for tuple in 0..tuple_count {
            let count_bytes = buffer
                .get(pos..pos + COUNT_SIZE)
                .ok_or(StoreError::TruncatedLinks { tuple, offset: pos })?;
            let count = LittleEndian::read_u16(count_bytes) as usize;
            pos += COUNT_SIZE;

            let values = buffer
                .get(pos..pos + count * VALUE_SIZE)
                .ok_or(StoreError::TruncatedLinks { tuple, offset: pos })?;
            elements.extend(values.chunks_exact(VALUE_SIZE).map(LittleEndian::read_i32));
            pos += count * VALUE_SIZE;
            offsets.push(elements.len());
        }

        if pos != buffer.len() {
            return Err(StoreError::TrailingLinkBytes(buffer.len() - pos));
        }
        Ok(Self { offsets, elements })
    }

    /// Encode as a link buffer; the exact inverse of [`deserialize_links`](Self::deserialize_links)
    pub fn serialize_links(&self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(
            self.tuple_count() * COUNT_SIZE + self.elements.len() * VALUE_SIZE,
        );
        for (tuple, list) in self.iter().enumerate() {
            let count = u16::try_from(list.len()).map_err(|_| StoreError::ListTooLong {
                tuple,
                len: list.len(),
            })?;
            out.write_u16::<LittleEndian>(count)?;
            for &v in list {
                out.write_i32::<LittleEndian>(v)?;
            }
        }
        Ok(out)
    }

    pub fn tuple_count(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Number of elements across every list
    pub fn total_elements(&self) -> usize {
        self.elements.len()
    }

    /// Length of the list for tuple `i`
    ///
    /// # Panics
    ///
    /// Panics if `i >= tuple_count()`.
    pub fn number_of_elements(&self, i: usize) -> usize {
        self.offsets[i + 1] - self.offsets[i]
    }

    /// The list for tuple `i`
    ///
    /// # Panics
    ///
    /// Panics if `i >= tuple_count()`.
    pub fn get_list(&self, i: usize) -> &[i32] {
        assert!(
            i < self.tuple_count(),
            "tuple {i} out of range for {} tuples",
            self.tuple_count()
        );
        &self.elements[self.offsets[i]..self.offsets[i + 1]]
    }

    pub fn try_get_list(&self, i: usize) -> Option<&[i32]> {
        (i < self.tuple_count()).then(|| self.get_list(i))
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &[i32]> + '_ {
        self.offsets
            .windows(2)
            .map(|w| &self.elements[w[0]..w[1]])
    }

    /// Truncate to `n` tuples, or append empty lists up to `n`
    pub fn resize(&mut self, n: usize) {
        if n < self.tuple_count() {
            self.offsets.truncate(n + 1);
            self.elements.truncate(self.offsets[n]);
        } else {
            let end = self.elements.len();
            self.offsets.resize(n + 1, end);
        }
    }

    /// Flat element buffer in tuple order
    pub fn elements(&self) -> &[i32] {
        &self.elements
    }
}
