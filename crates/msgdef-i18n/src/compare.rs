//! Structural comparison of a localized template against the invariant one.

/// A placeholder present in both lists but at a different position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Misplaced {
    /// Placeholder name.
    pub name: String,
    /// Position in the invariant list.
    pub expected: usize,
    /// Position in the localized list.
    pub actual: usize,
}

/// Outcome of [`compare_placeholders`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceholderComparison {
    /// Invariant placeholders absent from the localized list.
    pub missing: Vec<String>,
    /// Localized placeholders absent from the invariant list.
    pub extra: Vec<String>,
    /// Shared placeholders at different positions. Only filled when both
    /// `missing` and `extra` are empty.
    pub misplaced: Vec<Misplaced>,
}

impl PlaceholderComparison {
    /// The two lists are identical in names and order.
    #[must_use]
    pub fn is_match(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty() && self.misplaced.is_empty()
    }

    /// The two lists differ as sets.
    #[must_use]
    pub fn has_set_mismatch(&self) -> bool {
        !self.missing.is_empty() || !self.extra.is_empty()
    }
}

/// Compare localized placeholder names against the invariant ones.
///
/// ```
/// use msgdef_i18n::compare::compare_placeholders;
///
/// let invariant = vec!["id".to_string()];
/// let localized = vec!["id".to_string(), "time".to_string()];
/// let cmp = compare_placeholders(&invariant, &localized);
/// assert_eq!(cmp.extra, ["time"]);
/// assert!(!cmp.is_match());
/// ```
#[must_use]
pub fn compare_placeholders(invariant: &[String], localized: &[String]) -> PlaceholderComparison {
    let missing: Vec<String> = invariant
        .iter()
        .filter(|name| !localized.contains(name))
        .cloned()
        .collect();
    let extra: Vec<String> = localized
        .iter()
        .filter(|name| !invariant.contains(name))
        .cloned()
        .collect();

    let mut misplaced = Vec::new();
    if missing.is_empty() && extra.is_empty() {
        for (expected, name) in invariant.iter().enumerate() {
            if localized.get(expected) != Some(name) {
                let actual = localized
                    .iter()
                    .position(|candidate| candidate == name)
                    .unwrap_or(expected);
                misplaced.push(Misplaced {
                    name: name.clone(),
                    expected,
                    actual,
                });
            }
        }
    }

    PlaceholderComparison {
        missing,
        extra,
        misplaced,
    }
}
