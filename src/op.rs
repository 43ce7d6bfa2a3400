use std::cmp::min;
use std::mem::replace;

use arbitrary::Arbitrary;
use serde::{Deserialize, Serialize};

use super::utf16::{byte_index, Utf16Len};
use super::Error;

/// Individual keep, add or remove operation.
///
/// Lengths and offsets are UTF-16 code units throughout: an [`Op::Add`]'s
/// length is the number of code units its payload encodes to, not the
/// number of scalar values, grapheme clusters or bytes.
///
/// On the wire an operation is a JSON object with a `"type"` of `"keep"`,
/// `"add"` or `"remove"` and a `"value"` holding the length (for `keep` and
/// `remove`) or the inserted string (for `add`).
#[derive(Arbitrary, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Op {
    /// Copies the next `n` code units of the input to the output unchanged.
    Keep(usize),

    /// Inserts the payload into the output without consuming any input.
    Add(String),

    /// Skips the next `n` code units of the input, emitting nothing.
    Remove(usize),
}

impl Op {
    /// Returns the length of this operation in UTF-16 code units.
    pub fn len(&self) -> usize {
        match self {
            Op::Keep(n) | Op::Remove(n) => *n,
            Op::Add(value) => value.utf16_len(),
        }
    }

    /// Returns `true` if this operation has zero length. Zero-length
    /// operations arise transiently while walking two changesets and never
    /// appear in a [`Changeset`](super::Changeset).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Op {
    fn default() -> Self {
        Op::Keep(0)
    }
}

/// Implemented by operations that can give up a prefix of their length.
pub trait Split: Sized {
    /// Removes and returns the first `len` UTF-16 code units of the
    /// receiver, leaving the remainder in place.
    fn split(&mut self, len: usize) -> Result<Self, Error>;
}

impl Split for Op {
    /// Fails with [`Error::BadTextLength`] only when splitting an
    /// [`Op::Add`] whose payload would be cut between the two code units of
    /// a surrogate pair, which indicates the changeset was produced against
    /// lengths that were not measured in UTF-16 code units.
    fn split(&mut self, len: usize) -> Result<Op, Error> {
        let len = min(self.len(), len);

        match self {
            Op::Keep(n) => {
                *n -= len;
                Ok(Op::Keep(len))
            }
            Op::Remove(n) => {
                *n -= len;
                Ok(Op::Remove(len))
            }
            Op::Add(value) => {
                let at = byte_index(value, len).ok_or(Error::BadTextLength)?;
                let rest = value.split_off(at);
                Ok(Op::Add(replace(value, rest)))
            }
        }
    }
}

/// Splits both operations at the minimum of their lengths and returns the
/// two prefixes.
pub(crate) fn split(lhs: &mut Op, rhs: &mut Op) -> Result<(Op, Op), Error> {
    let len = min(lhs.len(), rhs.len());

    Ok((lhs.split(len)?, rhs.split(len)?))
}
