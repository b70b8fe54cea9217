#![no_main]

use libfuzzer_sys::fuzz_target;
use msgdef_i18n::{compare_placeholders, extract_placeholders, scan_template};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if text.len() > 4096 {
        return;
    }

    let names = extract_placeholders(text);

    // Names are distinct.
    for (i, a) in names.iter().enumerate() {
        assert!(!names[i + 1..].contains(a), "duplicate placeholder {a:?}");
    }

    // Every hole is a braced slice of the input.
    for hole in scan_template(text) {
        let slice = &text[hole.span.clone()];
        assert!(slice.starts_with('{') && slice.ends_with('}'));
        assert!(names.iter().any(|n| n == hole.name));
    }

    // A template always matches itself.
    assert!(compare_placeholders(&names, &names).is_match());
});
