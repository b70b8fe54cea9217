//! Ordered, duplicate-free set of localization locales.
//!
//! The order matters: the n-th locale reads the n-th localization column of
//! every definition row.

use std::slice;

use thiserror::Error;
use unic_langid::{LanguageIdentifier, LanguageIdentifierError};

/// Errors from locale configuration.
#[derive(Debug, Error)]
pub enum LocaleError {
    /// A locale tag was empty after trimming.
    #[error("locale tag at position {position} is blank")]
    BlankLocale { position: usize },
    /// A locale tag could not be parsed.
    #[error("invalid locale '{tag}': {source}")]
    InvalidLocale {
        tag: String,
        #[source]
        source: LanguageIdentifierError,
    },
    /// Two tags resolve to the same locale.
    #[error("There are duplicated locales: '{locale}'.")]
    DuplicateLocale { locale: LanguageIdentifier },
}

/// Locales whose translations are expected after the comment column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocaleSet {
    locales: Vec<LanguageIdentifier>,
}

impl LocaleSet {
    /// A set with no localization columns.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse locale tags, keeping their order.
    ///
    /// Tags are canonicalized before the duplicate check, so `fr-fr` and
    /// `fr-FR` collide.
    ///
    /// ```
    /// use msgdef_i18n::locale::LocaleSet;
    ///
    /// let set = LocaleSet::parse(["fr-FR", "ja"]).unwrap();
    /// assert_eq!(set.len(), 2);
    /// assert!(LocaleSet::parse(["ja", "JA"]).is_err());
    /// ```
    pub fn parse<I, S>(tags: I) -> Result<Self, LocaleError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut locales = Vec::new();
        for (position, tag) in tags.into_iter().enumerate() {
            let tag = tag.as_ref().trim();
            if tag.is_empty() {
                return Err(LocaleError::BlankLocale { position });
            }
            let locale = tag
                .parse::<LanguageIdentifier>()
                .map_err(|source| LocaleError::InvalidLocale {
                    tag: tag.to_string(),
                    source,
                })?;
            locales.push(locale);
        }
        Self::new(locales)
    }

    /// Build from already parsed identifiers, rejecting duplicates.
    pub fn new(locales: Vec<LanguageIdentifier>) -> Result<Self, LocaleError> {
        for (index, locale) in locales.iter().enumerate() {
            if locales[..index].contains(locale) {
                return Err(LocaleError::DuplicateLocale {
                    locale: locale.clone(),
                });
            }
        }
        Ok(Self { locales })
    }

    /// Number of locales.
    #[must_use]
    pub fn len(&self) -> usize {
        self.locales.len()
    }

    /// Whether no localization columns are expected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }

    /// Locale at `index`, in configuration order.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&LanguageIdentifier> {
        self.locales.get(index)
    }

    /// Iterate in configuration order.
    pub fn iter(&self) -> slice::Iter<'_, LanguageIdentifier> {
        self.locales.iter()
    }

    /// Locale tags as strings, in configuration order.
    #[must_use]
    pub fn tags(&self) -> Vec<String> {
        self.locales.iter().map(ToString::to_string).collect()
    }
}

impl<'a> IntoIterator for &'a LocaleSet {
    type Item = &'a LanguageIdentifier;
    type IntoIter = slice::Iter<'a, LanguageIdentifier>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
