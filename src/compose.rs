use std::mem::take;

use super::op::split;
use super::{Changeset, Error, Op};

/// Implemented by types that can sequentially combine two transformations
/// into one.
///
/// Composing changesets `a` and `b` yields a single changeset equivalent to
/// applying `a` and then `b`:
///
/// ```text
/// a.apply-then-b  ==  a.compose(b)
/// ```
///
/// for every text whose UTF-16 length matches `a`'s input length.
pub trait Compose<Rhs = Self> {
    /// Output type that composing the receiver with `Rhs` produces.
    type Output;

    /// Returns the sequential combination of the receiver and `rhs`.
    fn compose(self, rhs: Rhs) -> Self::Output;
}

impl Compose for Changeset {
    type Output = Result<Changeset, Error>;

    /// Walks both operation streams with a cursor and a carry per side: a
    /// pairing may consume its head only partially, and the remainder
    /// stays in place for the next round. The first two pairing rules are
    /// absolute priorities; only the remaining cases pair up lengths.
    ///
    /// Fails with [`Error::Uncomposable`] when the receiver's output length
    /// does not match `rhs`'s input length, and with
    /// [`Error::BadTextLength`] when an insertion would have to be cut
    /// between the two code units of a surrogate pair.
    fn compose(self, rhs: Changeset) -> Self::Output {
        if self.to_len() != rhs.from_len() {
            return Err(Error::Uncomposable);
        }

        // The lengths already agree, so an empty side acts as identity.
        if self.ops().is_empty() {
            return Ok(rhs);
        }

        if rhs.ops().is_empty() {
            return Ok(self);
        }

        let mut lhs_ops = self.into_iter();
        let mut rhs_ops = rhs.into_iter();

        let mut lhs_head = lhs_ops.next();
        let mut rhs_head = rhs_ops.next();

        let mut result = Changeset::new();

        loop {
            match (&mut lhs_head, &mut rhs_head) {
                (None, None) => break,

                // The left side already removed this region; the right
                // side never saw it.
                (Some(lhs @ Op::Remove(_)), _) => result.push(take(lhs)),

                // The right side inserts text the left side never saw.
                (_, Some(rhs @ Op::Add(_))) => result.push(take(rhs)),

                // With matching lengths, only a removal on the left or an
                // insertion on the right can outlive the other side, and
                // both were handled above.
                (None, Some(_)) | (Some(_), None) => return Err(Error::Uncomposable),

                // Both sides pass the region through.
                (Some(lhs @ Op::Keep(_)), Some(rhs @ Op::Keep(_))) => {
                    result.push(split(lhs, rhs)?.0);
                }

                // The right side removes a region the left side kept.
                (Some(lhs @ Op::Keep(_)), Some(rhs @ Op::Remove(_))) => {
                    result.push(split(lhs, rhs)?.1);
                }

                // The right side keeps text the left side inserted, so the
                // insertion survives.
                (Some(lhs @ Op::Add(_)), Some(rhs @ Op::Keep(_))) => {
                    result.push(split(lhs, rhs)?.0);
                }

                // The right side removes text the left side inserted; both
                // cancel.
                (Some(lhs @ Op::Add(_)), Some(rhs @ Op::Remove(_))) => {
                    split(lhs, rhs)?;
                }
            }

            if lhs_head.as_ref().is_some_and(Op::is_empty) {
                lhs_head = lhs_ops.next();
            }

            if rhs_head.as_ref().is_some_and(Op::is_empty) {
                rhs_head = rhs_ops.next();
            }
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::{Changeset, Compose, Error};

    #[test]
    fn test_add_then_keep() {
        let lhs = Changeset::new().add("A");
        let rhs = Changeset::new().keep(1);

        assert_eq!(lhs.compose(rhs), Ok(Changeset::new().add("A")));
    }

    #[test]
    fn test_add_then_remove() {
        let lhs = Changeset::new().add("A");
        let rhs = Changeset::new().remove(1);

        assert_eq!(lhs.compose(rhs), Ok(Changeset::new()));
    }

    #[test]
    fn test_add_then_add() {
        let lhs = Changeset::new().add("A");
        let rhs = Changeset::new().add("B").keep(1);

        assert_eq!(lhs.compose(rhs), Ok(Changeset::new().add("BA")));
    }

    #[test]
    fn test_keep_then_add() {
        let lhs = Changeset::new().keep(1);
        let rhs = Changeset::new().add("B").keep(1);

        assert_eq!(lhs.compose(rhs), Ok(Changeset::new().add("B").keep(1)));
    }

    #[test]
    fn test_keep_then_remove() {
        let lhs = Changeset::new().keep(2);
        let rhs = Changeset::new().remove(1).keep(1);

        assert_eq!(lhs.compose(rhs), Ok(Changeset::new().remove(1).keep(1)));
    }

    #[test]
    fn test_remove_then_add() {
        let lhs = Changeset::new().remove(1);
        let rhs = Changeset::new().add("B");

        assert_eq!(lhs.compose(rhs), Ok(Changeset::new().remove(1).add("B")));
    }

    #[test]
    fn test_remove_coalesces_across_sides() {
        let lhs = Changeset::new().keep(1).remove(2);
        let rhs = Changeset::new().remove(1);

        assert_eq!(lhs.compose(rhs), Ok(Changeset::new().remove(3)));
    }

    #[test]
    fn test_add_split_by_keep() {
        let lhs = Changeset::new().add("ab");
        let rhs = Changeset::new().remove(1).keep(1).add("z");

        assert_eq!(lhs.compose(rhs), Ok(Changeset::new().add("bz")));
    }

    #[test]
    fn test_compose_matches_sequential_application() {
        let lhs = Changeset::new().keep(5).add("asdf").remove(3).keep(4).add("zxcv");
        let rhs = Changeset::new()
            .remove(1)
            .keep(2)
            .add(" a")
            .keep(1)
            .add("e ")
            .keep(3)
            .remove(5)
            .add("ty")
            .keep(1)
            .remove(4);

        let composed = lhs.clone().compose(rhs.clone()).unwrap();

        assert_eq!(
            composed,
            Changeset::new()
                .remove(1)
                .keep(2)
                .add(" a")
                .keep(1)
                .add("e ")
                .keep(1)
                .add("as")
                .remove(6)
                .add("ty")
                .keep(1)
        );

        let stepped = rhs.apply(&lhs.apply("qwerty poiu!").unwrap()).unwrap();

        assert_eq!(stepped, "we are tasty!");
        assert_eq!(composed.apply("qwerty poiu!").unwrap(), stepped);
    }

    #[test]
    fn test_empty_side_is_identity() {
        let changeset = Changeset::new().remove(2).add("xy");

        assert_eq!(
            changeset.clone().compose(Changeset::new().keep(2)),
            Ok(changeset.clone())
        );
        assert_eq!(
            Changeset::new().compose(Changeset::new()),
            Ok(Changeset::new())
        );
        assert_eq!(
            Changeset::new().remove(2).compose(Changeset::new()),
            Ok(Changeset::new().remove(2))
        );
    }

    #[test]
    fn test_rejects_mismatched_lengths() {
        let lhs = Changeset::new().keep(5);
        let rhs = Changeset::new().keep(6);

        assert_eq!(lhs.compose(rhs), Err(Error::Uncomposable));
    }

    #[test]
    fn test_length_check_precedes_empty_shortcut() {
        let rhs = Changeset::new().keep(1);

        assert_eq!(Changeset::new().compose(rhs), Err(Error::Uncomposable));
    }

    #[test]
    fn test_rejects_split_inside_surrogate_pair() {
        let lhs = Changeset::new().add("😀");
        let rhs = Changeset::new().keep(1).remove(1);

        assert_eq!(lhs.compose(rhs), Err(Error::BadTextLength));
    }
}
