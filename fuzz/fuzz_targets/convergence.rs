#![no_main]

use libfuzzer_sys::fuzz_target;
use tandem::{apply, transform, Operation};

fuzz_target!(|data: (String, Operation<String>, Operation<String>)| {
    let (doc, a, b) = data;

    let Ok(after_a) = apply(&doc, &a) else { return };
    let Ok(after_b) = apply(&doc, &b) else { return };

    let Ok((a_prime, b_prime)) = transform(a, b) else {
        panic!("transform failed for two operations applicable to the same document")
    };

    let a_first = apply(&after_a, &b_prime).expect("b' applies after a");
    let b_first = apply(&after_b, &a_prime).expect("a' applies after b");

    assert_eq!(a_first, b_first);
});
