#![forbid(unsafe_code)]

//! Unicode normalization helpers used by the definition reader.
//!
//! Names are canonicalized with NFC before identifier derivation, while the
//! relaxed level parser looks at the NFKD form so that fullwidth or styled
//! letters (`Ｗ`, `𝐄`) still select the intended severity.
//!
//! # Example
//! ```
//! use msgdef_text::normalization::{NormForm, normalize};
//!
//! // Composed form (NFC): e + combining acute -> é
//! let nfc = normalize("e\u{0301}", NormForm::Nfc);
//! assert_eq!(nfc, "\u{00E9}");
//!
//! // Compatibility decomposition (NFKD): fullwidth W -> W
//! let nfkd = normalize("\u{FF37}arn", NormForm::Nfkd);
//! assert_eq!(nfkd, "Warn");
//! ```

use std::borrow::Cow;

use unicode_normalization::UnicodeNormalization;

/// Unicode normalization form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NormForm {
    /// Canonical Decomposition, followed by Canonical Composition (NFC).
    Nfc,
    /// Canonical Decomposition (NFD).
    Nfd,
    /// Compatibility Decomposition, followed by Canonical Composition (NFKC).
    Nfkc,
    /// Compatibility Decomposition (NFKD).
    Nfkd,
}

/// Normalize a string to the specified Unicode normalization form.
#[must_use]
pub fn normalize(s: &str, form: NormForm) -> String {
    match form {
        NormForm::Nfc => s.nfc().collect(),
        NormForm::Nfd => s.nfd().collect(),
        NormForm::Nfkc => s.nfkc().collect(),
        NormForm::Nfkd => s.nfkd().collect(),
    }
}

/// Normalize only when needed, borrowing the input when it is already in
/// the requested form.
#[must_use]
pub fn normalize_cow(s: &str, form: NormForm) -> Cow<'_, str> {
    if is_normalized(s, form) {
        Cow::Borrowed(s)
    } else {
        Cow::Owned(normalize(s, form))
    }
}

/// Check if a string is already in the specified normalization form.
///
/// Uses the quick-check algorithm when available (NFC/NFKC), falling back
/// to full comparison for NFD/NFKD.
#[must_use]
pub fn is_normalized(s: &str, form: NormForm) -> bool {
    match form {
        NormForm::Nfc => unicode_normalization::is_nfc(s),
        NormForm::Nfd => unicode_normalization::is_nfd(s),
        NormForm::Nfkc => unicode_normalization::is_nfkc(s),
        NormForm::Nfkd => unicode_normalization::is_nfkd(s),
    }
}

/// First character of the NFKD form, if any.
///
/// Streams the decomposition and stops after one character.
#[must_use]
pub fn first_nfkd_char(s: &str) -> Option<char> {
    s.nfkd().next()
}
