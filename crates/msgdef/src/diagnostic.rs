//! Per-row diagnostics and the value-plus-diagnostics result type.
//!
//! Row validation never stops at the first problem. Every check records a
//! [`Diagnostic`]; a row is rejected when any recorded kind is fatal.

use std::fmt;

use serde::Serialize;

/// What a diagnostic is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DiagnosticKind {
    /// Name empty after trimming.
    BlankName,
    /// Name spelling changed by NFC.
    NameNormalized,
    /// A name character was replaced with `_`.
    NameCharacterReplaced,
    /// Fewer columns than the fixed layout requires.
    FieldCount,
    /// Id is neither decimal nor hexadecimal.
    IdFormat,
    /// Level token not recognized.
    LevelFormat,
    /// More placeholders than the six supported slots.
    TooManyPlaceholders,
    /// Placeholder uses a reserved parameter name.
    ReservedPlaceholderName,
    /// A placeholder exists but its name or type column is blank.
    PlaceholderLabelMissing,
    /// A name or type column is filled beyond the extracted placeholders.
    PlaceholderLabelExtra,
    /// Name column differs from the extracted placeholder name.
    PlaceholderLabelMismatch,
    /// Normalized name already used by an earlier row.
    DuplicateName,
    /// Identifier already used by an earlier row.
    DuplicateIdentifier,
    /// Localization column absent for a configured locale.
    MissingLocalization,
    /// Localized template lacks or adds placeholders; the locale is dropped.
    LocalizationPlaceholderMismatch,
    /// Localized template reorders placeholders.
    LocalizationPlaceholderPosition,
}

impl DiagnosticKind {
    /// Whether this diagnostic rejects the row.
    #[must_use]
    pub const fn is_fatal(self) -> bool {
        !matches!(
            self,
            Self::NameNormalized
                | Self::NameCharacterReplaced
                | Self::PlaceholderLabelExtra
                | Self::PlaceholderLabelMismatch
                | Self::LocalizationPlaceholderMismatch
        )
    }
}

/// One problem found in one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// 1-based line number in the input.
    pub line: usize,
    /// 0-based column index, when the problem belongs to one column.
    pub field: Option<usize>,
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    #[must_use]
    pub fn new(
        line: usize,
        field: Option<usize>,
        kind: DiagnosticKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            line,
            field,
            kind,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn is_fatal(&self) -> bool {
        self.kind.is_fatal()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.field {
            Some(field) => write!(f, "Line {}: Field {}: {}", self.line, field, self.message),
            None => write!(f, "Line {}: {}", self.line, self.message),
        }
    }
}

/// An optional value together with every diagnostic found producing it.
#[derive(Debug, Clone, PartialEq)]
pub struct Validated<T> {
    value: Option<T>,
    diagnostics: Vec<Diagnostic>,
}

impl<T> Validated<T> {
    #[must_use]
    pub fn accepted(value: T, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            value: Some(value),
            diagnostics,
        }
    }

    #[must_use]
    pub fn rejected(diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            value: None,
            diagnostics,
        }
    }

    #[must_use]
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    #[must_use]
    pub fn is_accepted(&self) -> bool {
        self.value.is_some()
    }

    /// True when any diagnostic has the given kind.
    #[must_use]
    pub fn has(&self, kind: DiagnosticKind) -> bool {
        self.diagnostics.iter().any(|d| d.kind == kind)
    }

    pub fn into_parts(self) -> (Option<T>, Vec<Diagnostic>) {
        (self.value, self.diagnostics)
    }
}

/// Collects diagnostics for a single line.
#[derive(Debug)]
pub(crate) struct DiagnosticSink {
    line: usize,
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticSink {
    pub(crate) fn new(line: usize) -> Self {
        Self {
            line,
            diagnostics: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, field: Option<usize>, kind: DiagnosticKind, message: impl Into<String>) {
        self.diagnostics
            .push(Diagnostic::new(self.line, field, kind, message));
    }

    pub(crate) fn field(&mut self, field: usize, kind: DiagnosticKind, message: impl Into<String>) {
        self.push(Some(field), kind, message);
    }

    pub(crate) fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub(crate) fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_with_field() {
        let d = Diagnostic::new(4, Some(2), DiagnosticKind::LevelFormat, "Unknown level 'loud'.");
        assert_eq!(d.to_string(), "Line 4: Field 2: Unknown level 'loud'.");
    }

    #[test]
    fn display_without_field() {
        let d = Diagnostic::new(9, None, DiagnosticKind::FieldCount, "Too short.");
        assert_eq!(d.to_string(), "Line 9: Too short.");
    }

    #[test]
    fn soft_kinds_are_not_fatal() {
        for kind in [
            DiagnosticKind::NameNormalized,
            DiagnosticKind::NameCharacterReplaced,
            DiagnosticKind::PlaceholderLabelExtra,
            DiagnosticKind::PlaceholderLabelMismatch,
            DiagnosticKind::LocalizationPlaceholderMismatch,
        ] {
            assert!(!kind.is_fatal(), "{kind:?}");
        }
    }

    #[test]
    fn structural_kinds_are_fatal() {
        for kind in [
            DiagnosticKind::BlankName,
            DiagnosticKind::FieldCount,
            DiagnosticKind::IdFormat,
            DiagnosticKind::LevelFormat,
            DiagnosticKind::TooManyPlaceholders,
            DiagnosticKind::ReservedPlaceholderName,
            DiagnosticKind::PlaceholderLabelMissing,
            DiagnosticKind::DuplicateName,
            DiagnosticKind::DuplicateIdentifier,
            DiagnosticKind::MissingLocalization,
            DiagnosticKind::LocalizationPlaceholderPosition,
        ] {
            assert!(kind.is_fatal(), "{kind:?}");
        }
    }

    #[test]
    fn validated_parts() {
        let d = Diagnostic::new(1, None, DiagnosticKind::FieldCount, "x");
        let v: Validated<u8> = Validated::rejected(vec![d.clone()]);
        assert!(!v.is_accepted());
        assert!(v.has(DiagnosticKind::FieldCount));
        assert_eq!(v.into_parts(), (None, vec![d]));
    }
}
