#![no_main]

//! Feeds arbitrary UTF-8 to every registered algorithm and checks the same
//! constraints as the in-process fuzz harness. Panics and hangs are left to
//! libFuzzer to detect.

use std::sync::OnceLock;

use libfuzzer_sys::fuzz_target;
use libphonetic::fuzz::{check_comparator, check_encoder, FuzzCase, Shape};
use libphonetic::registry::{catalog, Algorithm, Registry};

const MAX_CHARS: usize = 256;

fn registry() -> &'static Registry {
    static REGISTRY: OnceLock<Registry> = OnceLock::new();
    REGISTRY.get_or_init(|| catalog::builtin().expect("built-in registry"))
}

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if text.chars().count() > MAX_CHARS * 2 {
        return;
    }

    // A NUL splits the input into the two comparator operands.
    let (input, partner) = text.split_once('\0').unwrap_or((text, text));
    let case = FuzzCase {
        seed: 0,
        index: 0,
        shape: Shape::AnyChar,
        input: input.to_string(),
        partner: partner.to_string(),
    };

    for (id, algorithm) in registry().iter() {
        let result = match algorithm {
            Algorithm::Encoder(encoder) => check_encoder(id, encoder.as_ref(), &case),
            Algorithm::Comparator(comparator) => check_comparator(id, comparator.as_ref(), &case),
        };
        if let Err(e) = result {
            panic!("{e} on {case}");
        }
    }
});
