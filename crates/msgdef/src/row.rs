//! Validation of a single definition row.
//!
//! A row is validated in two steps. [`RowValidator::prepare`] parses every
//! column without shared state, so it may run on any thread.
//! [`RowValidator::commit`] then resolves duplicates against rows accepted
//! earlier and assembles the record. Commits must happen in line order.
//!
//! # Column layout
//!
//! | Column | Content |
//! |--------|---------|
//! | 0 | id |
//! | 1 | name |
//! | 2 | level |
//! | 3 | has-exception flag |
//! | 4 | invariant message template |
//! | 5..=16 | six (placeholder name, placeholder type) pairs |
//! | 17 | comment, optional |
//! | 18.. | one localized template per configured locale |

use std::collections::HashMap;

use indexmap::IndexMap;
use msgdef_i18n::{LanguageIdentifier, LocaleSet, compare_placeholders, extract_placeholders};
use msgdef_text::{NameWarning, NormalizedName, normalize_name};

use crate::diagnostic::{Diagnostic, DiagnosticKind, DiagnosticSink, Validated};
use crate::model::{Level, MessageDefinition, Placeholder};
use crate::relaxed::{parse_id, parse_level, parse_non_blank, parse_type};

/// Columns every row must have.
pub const MINIMUM_COLUMNS: usize = 17;
/// Placeholder slots in the fixed layout.
pub const MAX_PLACEHOLDERS: usize = 6;
/// Column of the first placeholder name.
pub const PLACEHOLDER_OFFSET: usize = 5;
/// Column of the optional free-text comment.
pub const COMMENT_COLUMN: usize = 17;
/// Column of the first localized template.
pub const LOCALIZATION_OFFSET: usize = 18;

const ID_COLUMN: usize = 0;
const NAME_COLUMN: usize = 1;
const LEVEL_COLUMN: usize = 2;
const EXCEPTION_COLUMN: usize = 3;
const MESSAGE_COLUMN: usize = 4;

/// Parameter names the generated logging methods already use. Matched
/// exactly, so `{Logger}` does not collide with `logger`.
const RESERVED_PLACEHOLDERS: [&str; 2] = ["logger", "exception"];

/// Outcome of validating one row.
pub type RowOutcome = Validated<MessageDefinition>;

/// Names and identifiers of accepted rows, keyed case-insensitively.
#[derive(Debug, Default)]
pub struct DuplicateIndex {
    names: HashMap<String, usize>,
    identifiers: HashMap<String, usize>,
}

impl DuplicateIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Line that first used `name`.
    pub fn name_line(&self, name: &str) -> Option<usize> {
        self.names.get(&name.to_lowercase()).copied()
    }

    /// Line that first used `identifier`.
    pub fn identifier_line(&self, identifier: &str) -> Option<usize> {
        self.identifiers.get(&identifier.to_lowercase()).copied()
    }

    pub fn insert(&mut self, name: &str, identifier: &str, line: usize) {
        self.names.entry(name.to_lowercase()).or_insert(line);
        self.identifiers
            .entry(identifier.to_lowercase())
            .or_insert(line);
    }

    /// Number of accepted rows recorded.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// A parsed row waiting for duplicate resolution.
#[derive(Debug)]
pub struct RowDraft {
    line: usize,
    parts: Option<RowParts>,
    diagnostics: Vec<Diagnostic>,
    // Duplicate diagnostics are spliced here, right after the name ones.
    name_end: usize,
}

impl RowDraft {
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

#[derive(Debug)]
struct RowParts {
    id: Option<u32>,
    name: Option<NormalizedName>,
    level: Option<Level>,
    has_exception: bool,
    message: String,
    placeholders: Vec<Placeholder>,
    comment: Option<String>,
    localizations: IndexMap<LanguageIdentifier, String>,
}

/// Validates rows against a locale configuration.
#[derive(Debug, Clone, Copy)]
pub struct RowValidator<'a> {
    locales: &'a LocaleSet,
}

impl<'a> RowValidator<'a> {
    pub fn new(locales: &'a LocaleSet) -> Self {
        Self { locales }
    }

    pub fn locales(&self) -> &'a LocaleSet {
        self.locales
    }

    /// Validate `columns` and resolve duplicates in one step.
    pub fn validate(&self, columns: &[&str], line: usize, index: &mut DuplicateIndex) -> RowOutcome {
        self.commit(self.prepare(columns, line), index)
    }

    /// Parse every column of a row. Touches no shared state.
    pub fn prepare(&self, columns: &[&str], line: usize) -> RowDraft {
        let mut sink = DiagnosticSink::new(line);

        if columns.len() < MINIMUM_COLUMNS {
            sink.push(
                None,
                DiagnosticKind::FieldCount,
                format!(
                    "This line only contains {} fields. {MINIMUM_COLUMNS} fields are required.",
                    columns.len()
                ),
            );
            return RowDraft {
                line,
                parts: None,
                name_end: sink.len(),
                diagnostics: sink.into_vec(),
            };
        }

        let id = parse_id(columns[ID_COLUMN]);
        if id.is_none() {
            sink.field(
                ID_COLUMN,
                DiagnosticKind::IdFormat,
                "ID format is not valid. It must be decimal or hexa-decimal integer.",
            );
        }

        let name = match normalize_name(columns[NAME_COLUMN]) {
            Ok(name) => {
                for warning in &name.warnings {
                    let kind = match warning {
                        NameWarning::Normalized { .. } => DiagnosticKind::NameNormalized,
                        NameWarning::Replaced { .. } => DiagnosticKind::NameCharacterReplaced,
                    };
                    sink.field(NAME_COLUMN, kind, warning.to_string());
                }
                Some(name)
            }
            Err(error) => {
                sink.field(NAME_COLUMN, DiagnosticKind::BlankName, error.to_string());
                None
            }
        };
        let name_end = sink.len();

        let level = parse_level(columns[LEVEL_COLUMN]);
        if level.is_none() {
            sink.field(
                LEVEL_COLUMN,
                DiagnosticKind::LevelFormat,
                format!("Unknown level '{}'.", columns[LEVEL_COLUMN]),
            );
        }

        let has_exception = parse_non_blank(columns[EXCEPTION_COLUMN]);

        let message = columns[MESSAGE_COLUMN];
        let names = extract_placeholders(message);
        if names.len() > MAX_PLACEHOLDERS {
            sink.field(
                MESSAGE_COLUMN,
                DiagnosticKind::TooManyPlaceholders,
                format!(
                    "Too many placeholders. Maximum allowed count is {MAX_PLACEHOLDERS}, but there are {} placeholders.",
                    names.len()
                ),
            );
        }
        for (position, placeholder) in names.iter().enumerate() {
            if is_reserved(placeholder) {
                sink.field(
                    MESSAGE_COLUMN,
                    DiagnosticKind::ReservedPlaceholderName,
                    format!("Placeholder name '{placeholder}' at index {position} is reserved."),
                );
            }
        }

        let placeholders = reconcile_slots(columns, &names, &mut sink);

        let comment = columns
            .get(COMMENT_COLUMN)
            .map(|comment| comment.trim())
            .filter(|comment| !comment.is_empty())
            .map(str::to_string);

        let localizations = reconcile_localizations(columns, &names, self.locales, &mut sink);

        RowDraft {
            line,
            parts: Some(RowParts {
                id,
                name,
                level,
                has_exception,
                message: message.to_string(),
                placeholders,
                comment,
                localizations,
            }),
            name_end,
            diagnostics: sink.into_vec(),
        }
    }

    /// Resolve duplicates and assemble the record.
    ///
    /// An accepted row claims its name and identifier in `index`.
    pub fn commit(&self, draft: RowDraft, index: &mut DuplicateIndex) -> RowOutcome {
        let RowDraft {
            line,
            parts,
            mut diagnostics,
            name_end,
        } = draft;

        let Some(parts) = parts else {
            return Validated::rejected(diagnostics);
        };

        if let Some(name) = &parts.name {
            let mut duplicates = Vec::new();
            if let Some(first) = index.name_line(&name.name) {
                duplicates.push(Diagnostic::new(
                    line,
                    Some(NAME_COLUMN),
                    DiagnosticKind::DuplicateName,
                    format!("Normalized name '{}' already exists at line {first}.", name.name),
                ));
            }
            if let Some(first) = index.identifier_line(&name.identifier) {
                duplicates.push(Diagnostic::new(
                    line,
                    Some(NAME_COLUMN),
                    DiagnosticKind::DuplicateIdentifier,
                    format!(
                        "Escaped name '{}' already exists at line {first}.",
                        name.identifier
                    ),
                ));
            }
            diagnostics.splice(name_end..name_end, duplicates);
        }

        if diagnostics.iter().any(Diagnostic::is_fatal) {
            return Validated::rejected(diagnostics);
        }

        let RowParts {
            id: Some(id),
            name: Some(name),
            level: Some(level),
            has_exception,
            message,
            placeholders,
            comment,
            localizations,
        } = parts
        else {
            return Validated::rejected(diagnostics);
        };

        index.insert(&name.name, &name.identifier, line);
        let definition = MessageDefinition::new(
            id,
            name.name,
            name.identifier,
            level,
            has_exception,
            message,
            placeholders,
            comment,
            localizations,
            diagnostics.clone(),
        );
        Validated::accepted(definition, diagnostics)
    }
}

fn is_reserved(placeholder: &str) -> bool {
    RESERVED_PLACEHOLDERS.contains(&placeholder)
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

/// Match the six label/type column pairs against the extracted names.
fn reconcile_slots(columns: &[&str], names: &[String], sink: &mut DiagnosticSink) -> Vec<Placeholder> {
    let mut placeholders = Vec::with_capacity(names.len().min(MAX_PLACEHOLDERS));

    for slot in 0..MAX_PLACEHOLDERS {
        let name_column = PLACEHOLDER_OFFSET + slot * 2;
        let type_column = name_column + 1;
        let label = columns[name_column].trim();
        let type_token = columns[type_column];
        let expected = names.get(slot);
        let mut incomplete = false;
        let mut extra = false;

        if label.is_empty() {
            match expected {
                Some(expected) => {
                    sink.field(
                        name_column,
                        DiagnosticKind::PlaceholderLabelMissing,
                        format!("Name label of placeholder '{{{expected}}}'(index {slot}) may be missing."),
                    );
                    incomplete = true;
                }
                None => continue,
            }
        } else if expected.is_none() {
            sink.field(
                name_column,
                DiagnosticKind::PlaceholderLabelExtra,
                format!("Name label of placeholder '{label}'(index {slot}) may be extra."),
            );
            extra = true;
        }

        let type_name = parse_type(type_token);
        match (&type_name, expected) {
            (None, Some(expected)) => {
                sink.field(
                    type_column,
                    DiagnosticKind::PlaceholderLabelMissing,
                    format!(
                        "Type information of placeholder '{{{expected}}}'(index {slot}) may be missing."
                    ),
                );
                incomplete = true;
            }
            (None, None) => continue,
            (Some(_), None) => {
                sink.field(
                    type_column,
                    DiagnosticKind::PlaceholderLabelExtra,
                    format!("Type information of placeholder '{label}'(index {slot}) may be extra."),
                );
                extra = true;
            }
            (Some(_), Some(_)) => {}
        }

        let Some(expected) = expected else {
            continue;
        };
        if extra {
            continue;
        }

        if !label.is_empty() && !eq_ignore_case(expected, label) {
            sink.field(
                name_column,
                DiagnosticKind::PlaceholderLabelMismatch,
                format!("Name label of placeholder '{{{expected}}}'(index {slot}) should not be '{label}'."),
            );
        }

        if let Some(type_name) = type_name.filter(|_| !incomplete) {
            placeholders.push(Placeholder::new(expected.clone(), type_name));
        }
    }

    placeholders
}

/// Keep the localized templates whose placeholders match exactly.
fn reconcile_localizations(
    columns: &[&str],
    names: &[String],
    locales: &LocaleSet,
    sink: &mut DiagnosticSink,
) -> IndexMap<LanguageIdentifier, String> {
    let mut localizations = IndexMap::with_capacity(locales.len());

    for (position, locale) in locales.iter().enumerate() {
        let column = LOCALIZATION_OFFSET + position;
        let Some(template) = columns.get(column) else {
            sink.field(
                column,
                DiagnosticKind::MissingLocalization,
                format!("Localization for '{locale}' is missing."),
            );
            continue;
        };

        let localized = extract_placeholders(template);
        let comparison = compare_placeholders(names, &localized);

        for missing in &comparison.missing {
            sink.field(
                column,
                DiagnosticKind::LocalizationPlaceholderMismatch,
                format!("Localization for '{locale}' does not contain placeholder '{{{missing}}}'."),
            );
        }
        for extra in &comparison.extra {
            sink.field(
                column,
                DiagnosticKind::LocalizationPlaceholderMismatch,
                format!("Localization for '{locale}' has extra placeholder '{{{extra}}}'."),
            );
        }
        if comparison.has_set_mismatch() {
            continue;
        }

        for misplaced in &comparison.misplaced {
            sink.field(
                column,
                DiagnosticKind::LocalizationPlaceholderPosition,
                format!(
                    "Localization for '{locale}' has placeholder position error. A placeholder '{{{}}}' must be at index {} but placed at index {}.",
                    misplaced.name, misplaced.expected, misplaced.actual
                ),
            );
        }

        if comparison.is_match() {
            localizations.insert(locale.clone(), (*template).to_string());
        }
    }

    localizations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        let mut columns: Vec<String> = cells.iter().map(|c| (*c).to_string()).collect();
        while columns.len() < MINIMUM_COLUMNS {
            columns.push(String::new());
        }
        columns
    }

    fn validate(locales: &LocaleSet, columns: &[String], index: &mut DuplicateIndex) -> RowOutcome {
        let refs: Vec<&str> = columns.iter().map(String::as_str).collect();
        RowValidator::new(locales).validate(&refs, 1, index)
    }

    fn kinds(outcome: &RowOutcome) -> Vec<DiagnosticKind> {
        outcome.diagnostics().iter().map(|d| d.kind).collect()
    }

    #[test]
    fn minimal_row_is_accepted() {
        let locales = LocaleSet::empty();
        let mut index = DuplicateIndex::new();
        let outcome = validate(
            &locales,
            &row(&["1", "Started", "info", "", "Service started"]),
            &mut index,
        );
        let def = outcome.value().expect("accepted");
        assert_eq!(def.id(), 1);
        assert_eq!(def.level(), Level::Information);
        assert!(def.placeholders().is_empty());
        assert!(outcome.diagnostics().is_empty());
        assert_eq!(index.name_line("started"), Some(1));
    }

    #[test]
    fn short_row_reports_field_count_only() {
        let locales = LocaleSet::empty();
        let mut index = DuplicateIndex::new();
        let refs = ["1", "", "??"];
        let outcome = RowValidator::new(&locales).validate(&refs, 3, &mut index);
        assert!(!outcome.is_accepted());
        assert_eq!(kinds(&outcome), [DiagnosticKind::FieldCount]);
        assert_eq!(
            outcome.diagnostics()[0].to_string(),
            "Line 3: This line only contains 3 fields. 17 fields are required."
        );
    }

    #[test]
    fn all_structural_problems_are_reported() {
        let locales = LocaleSet::empty();
        let mut index = DuplicateIndex::new();
        let outcome = validate(&locales, &row(&["zz", " ", "loud", "", "x"]), &mut index);
        assert!(!outcome.is_accepted());
        assert_eq!(
            kinds(&outcome),
            [
                DiagnosticKind::IdFormat,
                DiagnosticKind::BlankName,
                DiagnosticKind::LevelFormat
            ]
        );
        assert!(index.is_empty());
    }

    #[test]
    fn reserved_placeholder_is_fatal() {
        let locales = LocaleSet::empty();
        let mut index = DuplicateIndex::new();
        let outcome = validate(
            &locales,
            &row(&["1", "Boom", "error", "", "Failed {exception}", "exception", "string"]),
            &mut index,
        );
        assert!(outcome.has(DiagnosticKind::ReservedPlaceholderName));
        assert!(!outcome.is_accepted());
    }

    #[test]
    fn reserved_names_match_exact_case() {
        let locales = LocaleSet::empty();
        let mut index = DuplicateIndex::new();
        let outcome = validate(
            &locales,
            &row(&["1", "Boom", "info", "", "boom {Logger}", "Logger", "string"]),
            &mut index,
        );
        assert!(outcome.is_accepted());
        assert!(outcome.diagnostics().is_empty());

        let outcome = validate(
            &locales,
            &row(&["2", "Bang", "info", "", "bang {logger}", "logger", "string"]),
            &mut index,
        );
        assert!(!outcome.is_accepted());
        assert_eq!(
            outcome.diagnostics()[0].to_string(),
            "Line 1: Field 4: Placeholder name 'logger' at index 0 is reserved."
        );
    }

    #[test]
    fn missing_type_is_fatal() {
        let locales = LocaleSet::empty();
        let mut index = DuplicateIndex::new();
        let outcome = validate(
            &locales,
            &row(&["1", "Load", "debug", "", "Loaded {count}", "count", ""]),
            &mut index,
        );
        assert!(!outcome.is_accepted());
        let diagnostic = &outcome.diagnostics()[0];
        assert_eq!(diagnostic.kind, DiagnosticKind::PlaceholderLabelMissing);
        assert_eq!(diagnostic.field, Some(6));
    }

    #[test]
    fn extra_label_is_a_warning() {
        let locales = LocaleSet::empty();
        let mut index = DuplicateIndex::new();
        let outcome = validate(
            &locales,
            &row(&["1", "Load", "debug", "", "Loaded {count}", "count", "int", "stale", "string"]),
            &mut index,
        );
        let def = outcome.value().expect("accepted");
        assert_eq!(def.placeholders().len(), 1);
        assert_eq!(
            kinds(&outcome),
            [
                DiagnosticKind::PlaceholderLabelExtra,
                DiagnosticKind::PlaceholderLabelExtra
            ]
        );
        assert_eq!(def.warnings().len(), 2);
    }

    #[test]
    fn label_mismatch_keeps_extracted_name() {
        let locales = LocaleSet::empty();
        let mut index = DuplicateIndex::new();
        let outcome = validate(
            &locales,
            &row(&["1", "Load", "debug", "", "Loaded {count}", "total", "int"]),
            &mut index,
        );
        let def = outcome.value().expect("accepted");
        assert_eq!(def.placeholders()[0].name, "count");
        assert_eq!(kinds(&outcome), [DiagnosticKind::PlaceholderLabelMismatch]);
    }

    #[test]
    fn label_case_is_ignored() {
        let locales = LocaleSet::empty();
        let mut index = DuplicateIndex::new();
        let outcome = validate(
            &locales,
            &row(&["1", "Load", "debug", "", "Loaded {count}", "COUNT", "int"]),
            &mut index,
        );
        assert!(outcome.is_accepted());
        assert!(outcome.diagnostics().is_empty());
    }

    #[test]
    fn duplicate_follows_name_diagnostics() {
        let locales = LocaleSet::empty();
        let mut index = DuplicateIndex::new();
        index.insert("Order.Placed", "Order_Placed", 2);
        let outcome = validate(
            &locales,
            &row(&["9", "order placed", "loud", "", "x"]),
            &mut index,
        );
        assert_eq!(
            kinds(&outcome),
            [
                DiagnosticKind::NameCharacterReplaced,
                DiagnosticKind::DuplicateIdentifier,
                DiagnosticKind::LevelFormat
            ]
        );
        assert!(outcome.diagnostics()[1].message.contains("at line 2"));
    }

    #[test]
    fn position_error_rejects_row() {
        let locales = LocaleSet::parse(["de"]).expect("locale");
        let mut index = DuplicateIndex::new();
        let mut columns = row(&["1", "Moved", "info", "", "{a} to {b}", "a", "string", "b", "string"]);
        columns.push(String::new());
        columns.push("{b} nach {a}".into());
        let outcome = validate(&locales, &columns, &mut index);
        assert!(!outcome.is_accepted());
        assert_eq!(
            kinds(&outcome),
            [
                DiagnosticKind::LocalizationPlaceholderPosition,
                DiagnosticKind::LocalizationPlaceholderPosition
            ]
        );
        assert_eq!(outcome.diagnostics()[0].field, Some(18));
    }

    #[test]
    fn absent_localization_column_is_fatal() {
        let locales = LocaleSet::parse(["de", "ja"]).expect("locales");
        let mut index = DuplicateIndex::new();
        let mut columns = row(&["1", "Moved", "info", "", "done"]);
        columns.push(String::new());
        columns.push("fertig".into());
        let outcome = validate(&locales, &columns, &mut index);
        assert_eq!(kinds(&outcome), [DiagnosticKind::MissingLocalization]);
        assert_eq!(
            outcome.diagnostics()[0].to_string(),
            "Line 1: Field 19: Localization for 'ja' is missing."
        );
    }

    #[test]
    fn comment_is_trimmed_or_none() {
        let locales = LocaleSet::empty();
        let mut index = DuplicateIndex::new();
        let mut columns = row(&["1", "A", "info", "", "a"]);
        columns.push("  note ".into());
        let outcome = validate(&locales, &columns, &mut index);
        assert_eq!(outcome.value().and_then(|d| d.comment()), Some("note"));

        let mut columns = row(&["2", "B", "info", "", "b"]);
        columns.push("   ".into());
        let outcome = validate(&locales, &columns, &mut index);
        assert_eq!(outcome.value().and_then(|d| d.comment()), None);
    }

    #[test]
    fn prepare_is_independent_of_index() {
        let locales = LocaleSet::empty();
        let validator = RowValidator::new(&locales);
        let columns = row(&["1", "Same", "info", "", "x"]);
        let refs: Vec<&str> = columns.iter().map(String::as_str).collect();
        let first = validator.prepare(&refs, 1);
        let second = validator.prepare(&refs, 2);
        let mut index = DuplicateIndex::new();
        assert!(validator.commit(first, &mut index).is_accepted());
        let outcome = validator.commit(second, &mut index);
        assert_eq!(
            kinds(&outcome),
            [DiagnosticKind::DuplicateName, DiagnosticKind::DuplicateIdentifier]
        );
    }
}
