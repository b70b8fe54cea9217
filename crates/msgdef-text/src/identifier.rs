#![forbid(unsafe_code)]

//! Display-name and program-identifier derivation.
//!
//! A definition name such as `Orders.Created` is turned into two outputs:
//!
//! - the **name** (`Orders.Created`), dots preserved, used as a resource key;
//! - the **identifier** (`Orders_Created`), dots flattened to `_`, used as a
//!   symbol in generated code.
//!
//! # Rules
//!
//! 1. Input is trimmed, then brought to NFC. A changed spelling is reported
//!    as a warning, never as a failure.
//! 2. Text is walked by extended grapheme cluster. A cluster is judged by its
//!    base code point; any trailing code point that is not an identifier
//!    continuation character disqualifies the whole cluster.
//! 3. The first cluster must start with a letter (Lu, Ll, Lt, Lm) or a
//!    letter number (Nl). A leading `_` is kept as is.
//! 4. Later clusters may also be marks (Mn, Mc), decimal digits (Nd) or
//!    connector punctuation (Pc). `.` separates segments. Other letters (Lo)
//!    are rejected in every position.
//! 5. Every rejected cluster becomes a single `_` in both outputs and is
//!    reported as a warning.

use std::fmt;

use thiserror::Error;
use unicode_properties::{GeneralCategory, UnicodeGeneralCategory};
use unicode_segmentation::UnicodeSegmentation;

use crate::normalization::{NormForm, normalize_cow};

/// Failure to derive a name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    /// The name was empty after trimming.
    #[error("Name cannot be blank.")]
    BlankName,
}

/// A non-fatal change made while deriving a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameWarning {
    /// NFC changed the spelling of the input.
    Normalized { from: String, to: String },
    /// A grapheme cluster was replaced with `_`.
    Replaced { cluster: String, leading: bool },
}

impl NameWarning {
    /// Base code point of a replaced cluster.
    #[must_use]
    pub fn code_point(&self) -> Option<u32> {
        match self {
            Self::Normalized { .. } => None,
            Self::Replaced { cluster, .. } => cluster.chars().next().map(u32::from),
        }
    }
}

impl fmt::Display for NameWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normalized { from, to } => write!(
                f,
                "Name '{from}' was normalized to '{to}' with Form C for compatibility."
            ),
            Self::Replaced { cluster, leading } => {
                let position = if *leading { "begin with" } else { "contain" };
                write!(
                    f,
                    "Name cannot {position} '{cluster}'(U+{:04X}). This character was replaced with '_'.",
                    self.code_point().unwrap_or_default()
                )
            }
        }
    }
}

/// Result of [`normalize_name`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedName {
    /// Canonical display name, dot-segmented.
    pub name: String,
    /// Canonical identifier, `name` with every segment dot replaced by `_`.
    pub identifier: String,
    /// Changes made to the raw input, in input order.
    pub warnings: Vec<NameWarning>,
}

impl NormalizedName {
    /// True when the raw input was already canonical.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Derive the canonical name and identifier from a raw label.
///
/// ```
/// use msgdef_text::identifier::normalize_name;
///
/// let n = normalize_name("  Orders.Created ").unwrap();
/// assert_eq!(n.name, "Orders.Created");
/// assert_eq!(n.identifier, "Orders_Created");
/// assert!(n.is_clean());
/// ```
pub fn normalize_name(raw: &str) -> Result<NormalizedName, IdentifierError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(IdentifierError::BlankName);
    }

    let mut warnings = Vec::new();
    let normalized = normalize_cow(trimmed, NormForm::Nfc);
    if normalized != trimmed {
        warnings.push(NameWarning::Normalized {
            from: trimmed.to_string(),
            to: normalized.to_string(),
        });
    }

    let mut name = String::with_capacity(normalized.len());
    let mut identifier = String::with_capacity(normalized.len());
    let mut clusters = normalized.graphemes(true);

    if let Some(first) = clusters.next() {
        if cluster_matches(first, is_leading) {
            name.push_str(first);
            identifier.push_str(first);
        } else {
            warnings.push(replaced(first, true));
            name.push('_');
            identifier.push('_');
        }
    }

    for cluster in clusters {
        if cluster == "." {
            name.push('.');
            identifier.push('_');
        } else if cluster_matches(cluster, is_identifier_continue) {
            name.push_str(cluster);
            identifier.push_str(cluster);
        } else {
            warnings.push(replaced(cluster, false));
            name.push('_');
            identifier.push('_');
        }
    }

    if name.is_empty() {
        return Err(IdentifierError::BlankName);
    }

    Ok(NormalizedName {
        name,
        identifier,
        warnings,
    })
}

/// Whether `c` may start an identifier (underscore excluded).
#[must_use]
pub fn is_identifier_start(c: char) -> bool {
    matches!(
        c.general_category(),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::LetterNumber
    )
}

/// Whether `c` may continue an identifier.
///
/// Format characters (Cf) and other letters (Lo) are rejected even where
/// some languages allow them.
#[must_use]
pub fn is_identifier_continue(c: char) -> bool {
    is_identifier_start(c)
        || matches!(
            c.general_category(),
            GeneralCategory::NonspacingMark
                | GeneralCategory::SpacingMark
                | GeneralCategory::DecimalNumber
                | GeneralCategory::ConnectorPunctuation
        )
}

/// Check a whole identifier: a start character or `_`, then continuations.
#[must_use]
pub fn is_valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => is_leading(first) && chars.all(is_identifier_continue),
        None => false,
    }
}

fn is_leading(c: char) -> bool {
    c == '_' || is_identifier_start(c)
}

fn cluster_matches(cluster: &str, base_ok: fn(char) -> bool) -> bool {
    let mut chars = cluster.chars();
    match chars.next() {
        Some(base) => base_ok(base) && chars.all(is_identifier_continue),
        None => false,
    }
}

fn replaced(cluster: &str, leading: bool) -> NameWarning {
    NameWarning::Replaced {
        cluster: cluster.to_string(),
        leading,
    }
}
