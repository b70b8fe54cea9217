#![no_main]

use libfuzzer_sys::fuzz_target;
use msgdef_text::{is_valid_identifier, normalize_name};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if text.len() > 1024 {
        return;
    }

    let Ok(first) = normalize_name(text) else {
        assert!(text.trim().is_empty(), "only blank input may fail");
        return;
    };

    assert!(!first.identifier.contains('.'));
    assert!(is_valid_identifier(&first.identifier));
    assert_eq!(first.name.replace('.', "_"), first.identifier);

    // Normalizing a canonical name is a no-op.
    let second = normalize_name(&first.name).expect("canonical name is not blank");
    assert_eq!(second.name, first.name);
    assert!(second.is_clean(), "second pass warned: {:?}", second.warnings);
});
