#![warn(missing_docs)]
//! Changeset algebra for collaborative plain-text editing: apply, compose
//! and transform concurrent edits, with every length measured in UTF-16
//! code units.
//!
//! Operational Transformation (OT) enables real-time collaborative editing
//! by letting two (or more) peers make changes at the same time. A central
//! server transforms and broadcasts these changes so everyone converges on
//! the same text, even in the presence of severe latency. This crate is the
//! algebraic core of such a system: a pure value library with no transport,
//! no server loop and no I/O, suitable for both the client and the server
//! side.
//!
//! A [`Changeset`] is a canonical series of [`Op`]s (keep, add and remove)
//! that rewrites one text into another. Three operations make up the whole
//! algebra:
//!
//! - [`Changeset::apply`] materializes a changeset against a text;
//! - [`Compose::compose`] merges two sequential changesets into one;
//! - [`Transform::transform`] reconciles two concurrent changesets into a
//!   complementary pair that converges in either application order.
//!
//! Lengths count UTF-16 code units, the unit editor surfaces report, so a
//! scalar above U+FFFF counts as two.
//!
//! # Usage
//!
//! ```
//! use weft::{Changeset, Compose, Transform};
//!
//! // Two peers edit "Hello" concurrently.
//! let alice = Changeset::new().keep(5).add(", world");
//! let bob = Changeset::new().keep(5).add("!");
//!
//! let (alice_t, bob_t) = alice.clone().transform(bob.clone())?;
//!
//! // Either order of application converges, with Alice's insertion first.
//! let ours = alice_t.apply(&bob.apply("Hello")?)?;
//! let theirs = bob_t.apply(&alice.apply("Hello")?)?;
//!
//! assert_eq!(ours, "Hello, world!");
//! assert_eq!(ours, theirs);
//! # Ok::<_, weft::Error>(())
//! ```

mod apply;
mod changeset;
mod compose;
mod error;
mod op;
mod transform;
mod utf16;

pub use changeset::Changeset;
pub use compose::Compose;
pub use error::Error;
pub use op::{Op, Split};
pub use transform::Transform;
pub use utf16::Utf16Len;
