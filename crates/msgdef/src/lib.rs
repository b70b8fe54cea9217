#![forbid(unsafe_code)]

//! Reader and validator for log message definition tables.
//!
//! # Role in msgdef
//! A definition table is a tab-separated file with one log message per row:
//! id, name, level, exception flag, template, up to six typed placeholders,
//! an optional comment and one translated template per configured locale.
//! [`DefinitionReader`] validates every row and returns the accepted
//! [`MessageDefinition`]s in input order, ready for code emitters.
//!
//! Validation accumulates [`Diagnostic`]s instead of stopping at the first
//! problem. Rows with a fatal diagnostic are dropped; the others keep their
//! warnings.
//!
//! # Example
//!
//! ```
//! use msgdef::{DefinitionReader, Level};
//!
//! let mut row = vec!["1", "UserLoggedIn", "Info", "", "User {userId} logged in", "userId", "int"];
//! row.resize(18, "");
//! row.push("Utilisateur {userId} connecté");
//!
//! let reader = DefinitionReader::with_locales(["fr"]).unwrap();
//! let defs = reader.build([row.join("\t")]).unwrap();
//! assert_eq!(defs[0].level(), Level::Information);
//! assert_eq!(defs[0].localizations().len(), 1);
//! ```

pub mod builder;
pub mod cancellation;
pub mod config;
pub mod diagnostic;
pub mod error;
pub mod model;
pub mod relaxed;
pub mod row;

pub use builder::{DefinitionReader, DefinitionSetBuilder, split_row};
pub use cancellation::{CancellationSource, CancellationToken};
pub use config::ReaderConfig;
pub use diagnostic::{Diagnostic, DiagnosticKind, Validated};
pub use error::{DefinitionError, Result};
pub use model::{Level, MessageDefinition, Placeholder, TypeName, to_json};
pub use msgdef_i18n::{LanguageIdentifier, LocaleSet};
pub use row::{DuplicateIndex, RowDraft, RowOutcome, RowValidator};
