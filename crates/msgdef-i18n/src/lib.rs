#![forbid(unsafe_code)]

//! Template and locale utilities for log message definitions.
//!
//! Provides placeholder extraction from structured-logging templates,
//! structural comparison of localized templates against the invariant one,
//! and the ordered locale configuration that maps locales to columns.
//!
//! # How it fits in the system
//! The `msgdef` reader extracts placeholders from every invariant and
//! localized message with [`extract_placeholders`] and keeps a translation
//! only when [`compare_placeholders`] reports an exact match.

pub mod compare;
pub mod locale;
pub mod template;

pub use compare::{Misplaced, PlaceholderComparison, compare_placeholders};
pub use locale::{LocaleError, LocaleSet};
pub use template::{Hole, extract_placeholders, scan_template};
pub use unic_langid::LanguageIdentifier;
