use super::utf16::{byte_index, Utf16Len};
use super::{Changeset, Error, Op};

impl Changeset {
    /// Applies this changeset to the given text and returns the transformed
    /// text.
    ///
    /// The text must measure exactly [`from_len`](Changeset::from_len)
    /// UTF-16 code units; any other length fails with
    /// [`Error::BadTextLength`]. The result always measures
    /// [`to_len`](Changeset::to_len) code units.
    ///
    /// A keep or remove boundary that would land between the two code units
    /// of a surrogate pair also fails with [`Error::BadTextLength`]. That
    /// can only happen when the changeset was produced against lengths that
    /// were not measured in UTF-16 code units.
    pub fn apply(&self, text: &str) -> Result<String, Error> {
        if text.utf16_len() != self.from_len() {
            return Err(Error::BadTextLength);
        }

        let mut output = String::with_capacity(self.to_len());
        let mut rest = text;

        for op in self.ops() {
            match op {
                Op::Keep(n) => {
                    let at = byte_index(rest, *n).ok_or(Error::BadTextLength)?;
                    output.push_str(&rest[..at]);
                    rest = &rest[at..];
                }
                Op::Add(value) => output.push_str(value),
                Op::Remove(n) => {
                    let at = byte_index(rest, *n).ok_or(Error::BadTextLength)?;
                    rest = &rest[at..];
                }
            }
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::{Changeset, Error, Utf16Len};

    #[test]
    fn test_apply() {
        let changeset = Changeset::new().keep(5).add("asdf").remove(3).keep(4).add("zxcv");

        assert_eq!(
            changeset.apply("qwerty poiu!"),
            Ok("qwertasdfoiu!zxcv".to_owned())
        );
    }

    #[test]
    fn test_apply_identity() {
        let changeset = Changeset::new().keep(12);

        assert_eq!(changeset.apply("qwerty poiu!"), Ok("qwerty poiu!".to_owned()));
    }

    #[test]
    fn test_apply_empty_to_empty() {
        assert_eq!(Changeset::new().apply(""), Ok(String::new()));
    }

    #[test]
    fn test_apply_counts_utf16_units() {
        // The family emoji sequence is 8 code units, so keeping 13 spans it
        // plus "qwert".
        let base = "👨\u{200d}👩\u{200d}👧qwerty poiu!";
        assert_eq!(base.utf16_len(), 20);

        let changeset = Changeset::new().keep(13).add("asdf").remove(3).keep(4).add("zxcv");

        assert_eq!(
            changeset.apply(base),
            Ok("👨\u{200d}👩\u{200d}👧qwertasdfoiu!zxcv".to_owned())
        );
    }

    #[test]
    fn test_apply_result_measures_to_len() {
        let changeset = Changeset::new().keep(2).add("😀").remove(3);

        let applied = changeset.apply("héllo").unwrap();

        assert_eq!(applied.utf16_len(), changeset.to_len());
    }

    #[test]
    fn test_apply_rejects_wrong_length() {
        let changeset = Changeset::new().keep(5).add("asdf").remove(3).keep(4);

        assert_eq!(changeset.apply("qwerty poiu!?"), Err(Error::BadTextLength));
        assert_eq!(changeset.apply("qwerty"), Err(Error::BadTextLength));
    }

    #[test]
    fn test_apply_rejects_boundary_inside_surrogate_pair() {
        // "😀" is two code units; keeping one of them is not meaningful.
        let changeset = Changeset::new().keep(1).remove(1);

        assert_eq!(changeset.apply("😀"), Err(Error::BadTextLength));
    }
}
