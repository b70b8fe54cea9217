#![no_main]

use libfuzzer_sys::fuzz_target;
use msgdef::{DefinitionReader, LocaleSet};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if text.len() > 8192 {
        return;
    }

    let Ok(locales) = LocaleSet::parse(["fr", "ja"]) else {
        return;
    };
    let reader = DefinitionReader::new(locales);
    let Ok(defs) = reader.build(text.lines()) else {
        return;
    };

    for (i, a) in defs.iter().enumerate() {
        assert!(is_distinct(a.name(), defs[i + 1..].iter().map(|d| d.name())));
        assert!(a.placeholders().len() <= 6);
    }
});

fn is_distinct<'a>(name: &str, mut rest: impl Iterator<Item = &'a str>) -> bool {
    let lowered = name.to_lowercase();
    rest.all(|other| other.to_lowercase() != lowered)
}
