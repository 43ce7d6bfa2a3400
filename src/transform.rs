use std::cmp::min;
use std::mem::take;

use super::{Changeset, Error, Op};

/// Implemented by types that can reconcile two concurrent transformations
/// of the same text.
///
/// Transforming changeset `a` against changeset `b` yields a pair
/// `(a_t, b_t)` such that applying `b` and then `a_t` produces the same
/// text as applying `a` and then `b_t`: both peers converge no matter
/// which edit is folded in first.
///
/// Transformation is deliberately not commutative. When both sides insert
/// at the same position, the receiver's insertion ends up before `rhs`'s
/// in the merged text, so `a.transform(b)` and `b.transform(a)` produce
/// related but swapped results that order the insertions differently.
pub trait Transform<Rhs = Self> {
    /// Output type that transforming the receiver against `Rhs` produces.
    type Output;

    /// Returns the complementary pair of changesets that reconcile the
    /// receiver with `rhs`.
    fn transform(self, rhs: Rhs) -> Self::Output;
}

impl Transform for Changeset {
    type Output = Result<(Changeset, Changeset), Error>;

    /// Walks both operation streams with a cursor and a carry per side,
    /// emitting to both transformed changesets at once. A pairing may
    /// consume its head only partially; the remainder stays in place for
    /// the next round, and zero-length emissions vanish in
    /// [`Changeset::push`].
    ///
    /// Fails with [`Error::Uncombinable`] when the two changesets do not
    /// share an input length and thus cannot be concurrent edits of the
    /// same text.
    fn transform(self, rhs: Changeset) -> Self::Output {
        if self.from_len() != rhs.from_len() {
            return Err(Error::Uncombinable);
        }

        let mut lhs_ops = self.into_iter();
        let mut rhs_ops = rhs.into_iter();

        let mut lhs_head = lhs_ops.next();
        let mut rhs_head = rhs_ops.next();

        let mut lhs_out = Changeset::new();
        let mut rhs_out = Changeset::new();

        loop {
            match (&mut lhs_head, &mut rhs_head) {
                (None, None) => break,

                // Both sides insert at the same position and both
                // insertions must survive; the left side's text lands
                // first, so the right side keeps it and inserts its own
                // after.
                (Some(lhs @ Op::Add(_)), _) => {
                    let lhs = take(lhs);
                    rhs_out.push(Op::Keep(lhs.len()));
                    lhs_out.push(lhs);
                }

                // The right side inserts text the left side is unaware
                // of; the left side keeps it.
                (_, Some(rhs @ Op::Add(_))) => {
                    let rhs = take(rhs);
                    lhs_out.push(Op::Keep(rhs.len()));
                    rhs_out.push(rhs);
                }

                // With equal input lengths, both sides run out of input
                // together, so only insertions can outlive the other side
                // and those were handled above.
                (None, Some(_)) | (Some(_), None) => return Err(Error::Uncombinable),

                // Both sides pass the region through.
                (Some(Op::Keep(lhs)), Some(Op::Keep(rhs))) => {
                    let len = min(*lhs, *rhs);
                    *lhs -= len;
                    *rhs -= len;
                    lhs_out.push(Op::Keep(len));
                    rhs_out.push(Op::Keep(len));
                }

                // Both sides remove the same region; it is already gone
                // either way, so neither needs to remove it again.
                (Some(Op::Remove(lhs)), Some(Op::Remove(rhs))) => {
                    let len = min(*lhs, *rhs);
                    *lhs -= len;
                    *rhs -= len;
                }

                // The right side removes a region the left side kept; the
                // removal stands.
                (Some(Op::Keep(lhs)), Some(Op::Remove(rhs))) => {
                    let len = min(*lhs, *rhs);
                    *lhs -= len;
                    *rhs -= len;
                    rhs_out.push(Op::Remove(len));
                }

                // The left side removes a region the right side kept.
                (Some(Op::Remove(lhs)), Some(Op::Keep(rhs))) => {
                    let len = min(*lhs, *rhs);
                    *lhs -= len;
                    *rhs -= len;
                    lhs_out.push(Op::Remove(len));
                }
            }

            if lhs_head.as_ref().is_some_and(Op::is_empty) {
                lhs_head = lhs_ops.next();
            }

            if rhs_head.as_ref().is_some_and(Op::is_empty) {
                rhs_head = rhs_ops.next();
            }
        }

        Ok((lhs_out, rhs_out))
    }
}
