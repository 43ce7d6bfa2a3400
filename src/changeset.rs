use std::vec::IntoIter;

use serde::{Deserialize, Serialize};

use super::utf16::Utf16Len;
use super::Op;

/// Canonical series of keep, add and remove operations describing the
/// transformation of one text into another.
///
/// A changeset is always in canonical form: no operation has zero length
/// and no two neighbouring operations share a variant. Equal
/// transformations built from differently-chunked operation lists therefore
/// compare equal. Changesets are immutable values; [`compose`][1] and
/// [`transform`][2] return new ones.
///
/// On the wire a changeset is a JSON object with a single `"operations"`
/// array. Decoding re-canonicalizes, so adjacent same-variant and
/// zero-length operations in the wire form are tolerated and normalized
/// away.
///
/// [1]: crate::Compose::compose
/// [2]: crate::Transform::transform
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Wire", into = "Wire")]
pub struct Changeset {
    ops: Vec<Op>,
    from_len: usize,
    to_len: usize,
}

impl Changeset {
    /// Returns a new empty changeset (i.e. an empty series of operations).
    pub fn new() -> Changeset {
        Changeset::default()
    }

    /// Returns a new changeset that keeps the next `n` UTF-16 code units.
    pub fn keep(mut self, n: usize) -> Self {
        self.push(Op::Keep(n));
        self
    }

    /// Returns a new changeset that inserts the given text.
    pub fn add(mut self, value: impl Into<String>) -> Self {
        self.push(Op::Add(value.into()));
        self
    }

    /// Returns a new changeset that removes the next `n` UTF-16 code units.
    pub fn remove(mut self, n: usize) -> Self {
        self.push(Op::Remove(n));
        self
    }

    /// Length of the text this changeset applies to, in UTF-16 code units.
    pub fn from_len(&self) -> usize {
        self.from_len
    }

    /// Length of the text this changeset produces, in UTF-16 code units.
    pub fn to_len(&self) -> usize {
        self.to_len
    }

    /// Returns `true` if applying this changeset returns its input
    /// unchanged (it is empty or consists of a single keep).
    pub fn is_identity(&self) -> bool {
        matches!(self.ops.as_slice(), [] | [Op::Keep(_)])
    }

    pub(crate) fn ops(&self) -> &[Op] {
        &self.ops
    }

    /// Appends the given operation to this series, maintaining canonical
    /// form: zero-length operations are dropped and an operation of the
    /// same variant as the last one is merged into it.
    ///
    /// Keep in mind that this appends rather than composes. Pushing a
    /// [`Op::Remove`] literally adds that operation to the sequence (as
    /// opposed to applying it to the previous operations).
    pub fn push(&mut self, op: Op) {
        if op.is_empty() {
            return;
        }

        match &op {
            Op::Keep(n) => {
                self.from_len = self.from_len.saturating_add(*n);
                self.to_len = self.to_len.saturating_add(*n);
            }
            Op::Add(value) => self.to_len = self.to_len.saturating_add(value.utf16_len()),
            Op::Remove(n) => self.from_len = self.from_len.saturating_add(*n),
        }

        let Some(last) = self.ops.last_mut() else {
            self.ops.push(op);
            return;
        };

        match last {
            Op::Keep(last) => match op {
                Op::Keep(n) => match last.overflowing_add(n) {
                    (sum, false) => *last = sum,
                    (sum, true) => {
                        *last = usize::MAX;
                        self.ops.push(Op::Keep(sum + 1));
                    }
                },
                op => self.ops.push(op),
            },
            Op::Add(last) => match op {
                Op::Add(value) => last.push_str(&value),
                op => self.ops.push(op),
            },
            Op::Remove(last) => match op {
                Op::Remove(n) => match last.overflowing_add(n) {
                    (sum, false) => *last = sum,
                    (sum, true) => {
                        *last = usize::MAX;
                        self.ops.push(Op::Remove(sum + 1));
                    }
                },
                op => self.ops.push(op),
            },
        }
    }

    /// Encodes this changeset as JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Decodes a changeset from JSON, canonicalizing it in the process.
    ///
    /// Malformed JSON, an unknown operation `"type"` and a wrongly-typed
    /// `"value"` all fail; zero-length operations are dropped.
    pub fn from_json(json: &str) -> Result<Changeset, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Extend<Op> for Changeset {
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = Op>,
    {
        iter.into_iter().for_each(|op| self.push(op))
    }
}

impl FromIterator<Op> for Changeset {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Op>,
    {
        let mut changeset = Changeset::new();
        changeset.extend(iter);
        changeset
    }
}

impl IntoIterator for Changeset {
    type Item = Op;

    type IntoIter = IntoIter<Op>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.into_iter()
    }
}

/// Wire form of a changeset: the bare operations array. Rebuilding through
/// [`Changeset::push`] on decode restores canonical form and the derived
/// lengths.
#[derive(Serialize, Deserialize)]
struct Wire {
    operations: Vec<Op>,
}

impl From<Wire> for Changeset {
    fn from(wire: Wire) -> Changeset {
        wire.operations.into_iter().collect()
    }
}

impl From<Changeset> for Wire {
    fn from(changeset: Changeset) -> Wire {
        Wire {
            operations: changeset.ops,
        }
    }
}
