#![forbid(unsafe_code)]

//! Unicode text utilities for log message definitions.
//!
//! # Role in msgdef
//! `msgdef-text` owns everything that depends on Unicode character data:
//! normalization forms and the grapheme-aware derivation of display names
//! and program identifiers. The definition reader in `msgdef` calls into it
//! for every row, and emitters may reuse the identifier checks.

pub mod identifier;
pub mod normalization;

pub use identifier::{
    IdentifierError, NameWarning, NormalizedName, is_identifier_continue, is_identifier_start,
    is_valid_identifier, normalize_name,
};
pub use normalization::{NormForm, first_nfkd_char, is_normalized, normalize, normalize_cow};
