//! Reader configuration from JSON or the environment.

use msgdef_i18n::LocaleSet;
use serde::{Deserialize, Serialize};

use crate::error::{DefinitionError, Result};

/// Environment variable holding comma separated locale tags.
pub const LOCALES_ENV: &str = "MSGDEF_LOCALES";

/// Settings for a [`DefinitionReader`](crate::DefinitionReader).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReaderConfig {
    /// Locale tags, one per localization column, in column order.
    #[serde(default)]
    pub locales: Vec<String>,
}

impl ReaderConfig {
    /// Parse a JSON document such as `{"locales": ["fr-FR", "ja"]}`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|error| DefinitionError::Config {
            message: error.to_string(),
        })
    }

    /// Create from environment variables.
    /// Env: `MSGDEF_LOCALES=fr-FR,ja`
    pub fn from_env() -> Self {
        std::env::var(LOCALES_ENV)
            .map(|value| Self::from_locale_list(&value))
            .unwrap_or_default()
    }

    /// Split a comma separated tag list, dropping empty entries.
    pub fn from_locale_list(list: &str) -> Self {
        Self {
            locales: list
                .split(',')
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    /// Parse and validate the configured locales.
    pub fn locale_set(&self) -> Result<LocaleSet> {
        Ok(LocaleSet::parse(&self.locales)?)
    }
}
