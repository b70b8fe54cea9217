//! Validated definition records handed to emitters.

use std::fmt;

use indexmap::IndexMap;
use msgdef_i18n::LanguageIdentifier;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::diagnostic::Diagnostic;
use crate::error::Result;

/// Severity of a log message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Level {
    Trace,
    Debug,
    Information,
    Warning,
    Error,
    Critical,
}

impl Level {
    pub const ALL: [Level; 6] = [
        Level::Trace,
        Level::Debug,
        Level::Information,
        Level::Warning,
        Level::Error,
        Level::Critical,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "Trace",
            Self::Debug => "Debug",
            Self::Information => "Information",
            Self::Warning => "Warning",
            Self::Error => "Error",
            Self::Critical => "Critical",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical placeholder type name.
///
/// Known aliases resolve to one of the named variants; anything else is
/// carried through verbatim in [`TypeName::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeName {
    Boolean,
    Char,
    String,
    Decimal,
    Byte,
    Int16,
    Int32,
    Int64,
    SByte,
    UInt16,
    UInt32,
    UInt64,
    Single,
    Double,
    DateTimeOffset,
    TimeSpan,
    Exception,
    Other(std::string::String),
}

impl TypeName {
    /// Every canonical variant, excluding [`TypeName::Other`].
    pub const CANONICAL: [TypeName; 17] = [
        TypeName::Boolean,
        TypeName::Char,
        TypeName::String,
        TypeName::Decimal,
        TypeName::Byte,
        TypeName::Int16,
        TypeName::Int32,
        TypeName::Int64,
        TypeName::SByte,
        TypeName::UInt16,
        TypeName::UInt32,
        TypeName::UInt64,
        TypeName::Single,
        TypeName::Double,
        TypeName::DateTimeOffset,
        TypeName::TimeSpan,
        TypeName::Exception,
    ];

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Boolean => "Boolean",
            Self::Char => "Char",
            Self::String => "String",
            Self::Decimal => "Decimal",
            Self::Byte => "Byte",
            Self::Int16 => "Int16",
            Self::Int32 => "Int32",
            Self::Int64 => "Int64",
            Self::SByte => "SByte",
            Self::UInt16 => "UInt16",
            Self::UInt32 => "UInt32",
            Self::UInt64 => "UInt64",
            Self::Single => "Single",
            Self::Double => "Double",
            Self::DateTimeOffset => "DateTimeOffset",
            Self::TimeSpan => "TimeSpan",
            Self::Exception => "Exception",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TypeName {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A named, typed template parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placeholder {
    pub name: String,
    pub type_name: TypeName,
}

impl Placeholder {
    #[must_use]
    pub fn new(name: impl Into<String>, type_name: TypeName) -> Self {
        Self {
            name: name.into(),
            type_name,
        }
    }
}

/// One validated log message definition.
///
/// # Invariants
///
/// | Property | Guarantee |
/// |----------|-----------|
/// | `program_identifier` | `name` with `.` replaced by `_`; a valid identifier |
/// | `placeholders` | first-occurrence order of `message`, at most six |
/// | `localizations` | only locales whose placeholders match exactly, in configured order |
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageDefinition {
    id: u32,
    name: String,
    program_identifier: String,
    level: Level,
    has_exception: bool,
    message: String,
    placeholders: Vec<Placeholder>,
    comment: Option<String>,
    #[serde(serialize_with = "serialize_localizations")]
    localizations: IndexMap<LanguageIdentifier, String>,
    warnings: Vec<Diagnostic>,
}

impl MessageDefinition {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        id: u32,
        name: String,
        program_identifier: String,
        level: Level,
        has_exception: bool,
        message: String,
        placeholders: Vec<Placeholder>,
        comment: Option<String>,
        localizations: IndexMap<LanguageIdentifier, String>,
        warnings: Vec<Diagnostic>,
    ) -> Self {
        Self {
            id,
            name,
            program_identifier,
            level,
            has_exception,
            message,
            placeholders,
            comment,
            localizations,
            warnings,
        }
    }

    #[must_use]
    pub fn id(&self) -> u32 {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn program_identifier(&self) -> &str {
        &self.program_identifier
    }

    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }

    #[must_use]
    pub fn has_exception(&self) -> bool {
        self.has_exception
    }

    /// Base-locale template.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn placeholders(&self) -> &[Placeholder] {
        &self.placeholders
    }

    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    #[must_use]
    pub fn localizations(&self) -> &IndexMap<LanguageIdentifier, String> {
        &self.localizations
    }

    /// Non-fatal diagnostics collected while building this record.
    #[must_use]
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    /// Translation for `locale`, if it was kept.
    #[must_use]
    pub fn localized_message(&self, locale: &LanguageIdentifier) -> Option<&str> {
        self.localizations.get(locale).map(String::as_str)
    }

    /// Template for `locale`, falling back to the base-locale message.
    #[must_use]
    pub fn message_for(&self, locale: Option<&LanguageIdentifier>) -> &str {
        locale
            .and_then(|locale| self.localized_message(locale))
            .unwrap_or(&self.message)
    }
}

fn serialize_localizations<S: Serializer>(
    localizations: &IndexMap<LanguageIdentifier, String>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(localizations.len()))?;
    for (locale, message) in localizations {
        map.serialize_entry(&locale.to_string(), message)?;
    }
    map.end()
}

/// Pretty JSON snapshot of a definition set.
pub fn to_json(definitions: &[MessageDefinition]) -> Result<String> {
    Ok(serde_json::to_string_pretty(definitions)?)
}
