#![no_main]

use libfuzzer_sys::fuzz_target;
use weft::{Changeset, Op};

fuzz_target!(|ops: Vec<Op>| {
    let changeset = ops.into_iter().collect::<Changeset>();

    let json = changeset.to_json().unwrap();
    let decoded = Changeset::from_json(&json).unwrap();

    assert_eq!(decoded, changeset);
});
