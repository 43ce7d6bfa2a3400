use thiserror::Error;

/// Ways in which the changeset algebra can reject its inputs.
///
/// None of these are recovered internally; they always surface to the
/// caller. JSON decoding failures are reported separately, as
/// [`serde_json::Error`], by the serialization layer.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// The text handed to [`Changeset::apply`](crate::Changeset::apply) does
    /// not measure exactly the changeset's input length, or a walk boundary
    /// landed between the two code units of a surrogate pair.
    #[error("text length does not match the changeset's input length")]
    BadTextLength,

    /// The first changeset's output length does not match the second
    /// changeset's input length, so they cannot run in sequence.
    #[error("changesets are not sequential: output and input lengths differ")]
    Uncomposable,

    /// Two supposedly concurrent changesets do not start from the same
    /// input length, so they cannot have been issued against the same text.
    #[error("concurrent changesets do not share an input length")]
    Uncombinable,
}
