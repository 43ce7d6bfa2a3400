#![no_main]

use libfuzzer_sys::fuzz_target;
use weft::{Changeset, Op, Transform, Utf16Len};

fuzz_target!(|data: (String, Vec<Op>, Vec<Op>)| {
    let (text, lhs, rhs) = data;

    let lhs = lhs.into_iter().collect::<Changeset>();
    let rhs = rhs.into_iter().collect::<Changeset>();

    if text.utf16_len() != lhs.from_len() || lhs.from_len() != rhs.from_len() {
        return;
    }

    let (lhs_t, rhs_t) = lhs
        .clone()
        .transform(rhs.clone())
        .expect("changesets share a base length");

    // Raw op lists may still put a keep/remove boundary inside a surrogate
    // pair of the text; those cannot be applied in the first place.
    let (Ok(ours), Ok(theirs)) = (rhs.apply(&text), lhs.apply(&text)) else {
        return;
    };

    assert_eq!(
        lhs_t.apply(&ours).unwrap(),
        rhs_t.apply(&theirs).unwrap(),
    );
});
