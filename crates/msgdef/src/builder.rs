//! Turns a stream of table lines into an ordered definition set.

use std::io::BufRead;

use msgdef_i18n::LocaleSet;
use tracing::{debug, info, info_span, trace, warn};

use crate::cancellation::CancellationToken;
use crate::config::ReaderConfig;
use crate::diagnostic::Diagnostic;
use crate::error::{DefinitionError, Result};
use crate::model::MessageDefinition;
use crate::row::{DuplicateIndex, RowDraft, RowOutcome, RowValidator};

/// Split a raw line into columns, or `None` when the line is skipped.
///
/// Surrounding whitespace is trimmed except for tabs, so trailing empty
/// columns survive. Blank lines and lines starting with `#` or `/` are
/// skipped.
///
/// ```
/// use msgdef::builder::split_row;
///
/// assert_eq!(split_row("1\ta\t\r\n"), Some(vec!["1", "a", ""]));
/// assert_eq!(split_row("  # note"), None);
/// assert_eq!(split_row("\t \t"), None);
/// ```
#[must_use]
pub fn split_row(line: &str) -> Option<Vec<&str>> {
    let content = line.trim_start();
    if content.trim().is_empty() || content.starts_with(['#', '/']) {
        return None;
    }
    let row = line.trim_matches(|c: char| c.is_whitespace() && c != '\t');
    Some(row.split('\t').collect())
}

/// Accumulates validated rows for one build.
#[derive(Debug)]
pub struct DefinitionSetBuilder<'a> {
    validator: RowValidator<'a>,
    index: DuplicateIndex,
    definitions: Vec<MessageDefinition>,
    run_log: Vec<Diagnostic>,
    rejected: usize,
    skipped: usize,
}

impl<'a> DefinitionSetBuilder<'a> {
    pub fn new(locales: &'a LocaleSet) -> Self {
        Self {
            validator: RowValidator::new(locales),
            index: DuplicateIndex::new(),
            definitions: Vec::new(),
            run_log: Vec::new(),
            rejected: 0,
            skipped: 0,
        }
    }

    /// Validate one raw line. `line_number` is 1-based.
    pub fn push_line(&mut self, line_number: usize, line: &str) {
        match split_row(line) {
            Some(columns) => {
                let outcome = self.validator.validate(&columns, line_number, &mut self.index);
                self.record(line_number, outcome);
            }
            None => self.skip(),
        }
    }

    /// Commit a row prepared elsewhere. Drafts must arrive in line order.
    pub fn commit(&mut self, draft: RowDraft) {
        let line = draft.line();
        let outcome = self.validator.commit(draft, &mut self.index);
        self.record(line, outcome);
    }

    /// Count a blank or comment line.
    pub fn skip(&mut self) {
        self.skipped += 1;
    }

    /// Definitions accepted so far.
    pub fn definitions(&self) -> &[MessageDefinition] {
        &self.definitions
    }

    /// Diagnostics of rejected rows, in line order.
    pub fn run_log(&self) -> &[Diagnostic] {
        &self.run_log
    }

    fn record(&mut self, line: usize, outcome: RowOutcome) {
        match outcome.into_parts() {
            (Some(definition), _) => {
                trace!(line, name = definition.name(), id = definition.id(), "definition accepted");
                self.definitions.push(definition);
            }
            (None, diagnostics) => {
                debug!(line, diagnostics = diagnostics.len(), "definition rejected");
                self.rejected += 1;
                self.run_log.extend(diagnostics);
            }
        }
    }

    /// Finish the build. Fails when no row was accepted.
    pub fn finish(self) -> Result<Vec<MessageDefinition>> {
        info!(
            accepted = self.definitions.len(),
            rejected = self.rejected,
            skipped = self.skipped,
            "definition build finished"
        );
        if self.definitions.is_empty() {
            warn!(rejected = self.rejected, "no valid definitions");
            return Err(DefinitionError::NoValidDefinitions {
                warnings: self.run_log.iter().map(ToString::to_string).collect(),
            });
        }
        Ok(self.definitions)
    }
}

/// Reads definition tables for a fixed locale configuration.
///
/// Line numbers in diagnostics and in `Cancelled` are 1-based and count
/// every input line, skipped ones included. Tools that number lines from 0
/// report each line one lower.
///
/// # Failure Modes
///
/// | Condition | Result |
/// |-----------|--------|
/// | Invalid or duplicate locale | `DefinitionError::Locale` at construction |
/// | No row validates | `DefinitionError::NoValidDefinitions` with every warning |
/// | Token cancelled | `DefinitionError::Cancelled` before the next row |
/// | Read failure | `DefinitionError::Io` |
#[derive(Debug, Clone, Default)]
pub struct DefinitionReader {
    locales: LocaleSet,
}

impl DefinitionReader {
    pub fn new(locales: LocaleSet) -> Self {
        Self { locales }
    }

    /// Parse locale tags and build a reader.
    pub fn with_locales<I, S>(tags: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self::new(LocaleSet::parse(tags)?))
    }

    pub fn from_config(config: &ReaderConfig) -> Result<Self> {
        Ok(Self::new(config.locale_set()?))
    }

    pub fn locales(&self) -> &LocaleSet {
        &self.locales
    }

    /// Validate every line and return the accepted definitions in order.
    ///
    /// ```
    /// use msgdef::DefinitionReader;
    ///
    /// let line = format!("1\tStarted\tinfo\t\tService started{}", "\t".repeat(12));
    /// let defs = DefinitionReader::default().build([line]).unwrap();
    /// assert_eq!(defs[0].name(), "Started");
    /// ```
    pub fn build<I, S>(&self, lines: I) -> Result<Vec<MessageDefinition>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.build_cancellable(lines, &CancellationToken::never())
    }

    /// [`build`](Self::build), checking `token` before each row.
    pub fn build_cancellable<I, S>(
        &self,
        lines: I,
        token: &CancellationToken,
    ) -> Result<Vec<MessageDefinition>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let span = info_span!("msgdef.build", locales = self.locales.len(), mode = "sequential");
        let _guard = span.enter();

        let mut builder = DefinitionSetBuilder::new(&self.locales);
        for (offset, line) in lines.into_iter().enumerate() {
            let line_number = offset + 1;
            if token.is_cancelled() {
                return Err(DefinitionError::Cancelled { line: line_number });
            }
            builder.push_line(line_number, line.as_ref());
        }
        builder.finish()
    }

    /// Read lines from `reader` until EOF.
    pub fn read<R: BufRead>(
        &self,
        reader: R,
        token: &CancellationToken,
    ) -> Result<Vec<MessageDefinition>> {
        let span = info_span!("msgdef.build", locales = self.locales.len(), mode = "reader");
        let _guard = span.enter();

        let mut builder = DefinitionSetBuilder::new(&self.locales);
        for (offset, line) in reader.lines().enumerate() {
            let line_number = offset + 1;
            if token.is_cancelled() {
                return Err(DefinitionError::Cancelled { line: line_number });
            }
            builder.push_line(line_number, &line?);
        }
        builder.finish()
    }

    /// Prepare rows on the rayon pool, then commit them in line order.
    ///
    /// Produces the same definitions and warnings as [`build`](Self::build).
    #[cfg(feature = "parallel")]
    pub fn build_parallel<S>(&self, lines: &[S]) -> Result<Vec<MessageDefinition>>
    where
        S: AsRef<str> + Sync,
    {
        use rayon::prelude::*;

        let span = info_span!("msgdef.build", locales = self.locales.len(), mode = "parallel");
        let _guard = span.enter();

        let validator = RowValidator::new(&self.locales);
        let drafts: Vec<Option<RowDraft>> = lines
            .par_iter()
            .enumerate()
            .map(|(offset, line)| {
                split_row(line.as_ref()).map(|columns| validator.prepare(&columns, offset + 1))
            })
            .collect();

        let mut builder = DefinitionSetBuilder::new(&self.locales);
        for draft in drafts {
            match draft {
                Some(draft) => builder.commit(draft),
                None => builder.skip(),
            }
        }
        builder.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cancellation::CancellationSource;

    fn line(cells: &[&str]) -> String {
        let mut columns: Vec<&str> = cells.to_vec();
        columns.resize(17, "");
        columns.join("\t")
    }

    #[test]
    fn split_keeps_trailing_empty_columns() {
        let columns = split_row(" 1\tName\t\t \n").expect("row");
        assert_eq!(columns, ["1", "Name", "", ""]);
    }

    #[test]
    fn split_skips_comments_and_blank_lines() {
        assert_eq!(split_row(""), None);
        assert_eq!(split_row("   "), None);
        assert_eq!(split_row("// header"), None);
        assert_eq!(split_row("\t# note"), None);
    }

    #[test]
    fn line_numbers_count_skipped_lines() {
        let locales = LocaleSet::empty();
        let mut builder = DefinitionSetBuilder::new(&locales);
        builder.push_line(1, "# header");
        builder.push_line(2, "");
        builder.push_line(3, &line(&["1", "A", "info", "", "a"]));
        builder.push_line(4, &line(&["2", "a", "info", "", "b"]));
        assert_eq!(builder.definitions().len(), 1);
        let duplicate = &builder.run_log()[0];
        assert_eq!(duplicate.line, 4);
        assert!(duplicate.message.ends_with("already exists at line 3."));
        assert_eq!(builder.finish().expect("one accepted")[0].name(), "A");
    }

    #[test]
    fn rejected_rows_feed_the_run_log() {
        let lines = [line(&["x", "A", "info", "", "a"]), "1\t2".to_string()];
        let err = DefinitionReader::default().build(&lines).expect_err("nothing valid");
        assert_eq!(err.warnings().len(), 2);
        assert!(err.warnings()[0].starts_with("Line 1: Field 0:"));
        assert!(err.warnings()[1].starts_with("Line 2: This line only contains 2 fields."));
    }

    #[test]
    fn accepted_rows_keep_their_own_warnings() {
        let lines = [
            line(&["1", "a b", "info", "", "a"]),
            line(&["2", "Clean", "info", "", "b"]),
        ];
        let defs = DefinitionReader::default().build(&lines).expect("accepted");
        assert_eq!(defs[0].warnings().len(), 1);
        assert!(defs[1].warnings().is_empty());
    }

    #[test]
    fn first_input_line_is_line_one() {
        let err = DefinitionReader::default()
            .build([line(&["1", "A", "loud", "", "a"])])
            .expect_err("rejected");
        assert_eq!(err.warnings(), ["Line 1: Field 2: Unknown level 'loud'."]);
    }

    #[test]
    fn cancelled_token_stops_before_first_row() {
        let source = CancellationSource::new();
        source.cancel();
        let lines = [line(&["1", "A", "info", "", "a"])];
        let err = DefinitionReader::default()
            .build_cancellable(&lines, &source.token())
            .expect_err("cancelled");
        assert!(matches!(err, DefinitionError::Cancelled { line: 1 }));
    }

    #[test]
    fn reader_input_matches_line_input() {
        let text = format!("{}\n{}\n", line(&["1", "A", "info", "", "a"]), line(&["2", "B", "warn", "", "b"]));
        let from_reader = DefinitionReader::default()
            .read(text.as_bytes(), &CancellationToken::never())
            .expect("valid");
        let from_lines = DefinitionReader::default().build(text.lines()).expect("valid");
        assert_eq!(from_reader, from_lines);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_build_matches_sequential() {
        let lines: Vec<String> = (0..64)
            .map(|i| line(&[&i.to_string(), &format!("Name{}", i % 40), "info", "", "x {v}", "v", "int"]))
            .collect();
        let reader = DefinitionReader::default();
        assert_eq!(reader.build_parallel(&lines).expect("valid"), reader.build(&lines).expect("valid"));
    }
}
