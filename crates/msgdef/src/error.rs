use msgdef_i18n::LocaleError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DefinitionError>;

/// Run-level failures. Per-row problems are [`Diagnostic`](crate::Diagnostic)s.
#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("{}", no_valid_definitions(.warnings))]
    NoValidDefinitions { warnings: Vec<String> },

    #[error("locale configuration error: {0}")]
    Locale(#[from] LocaleError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid reader configuration: {message}")]
    Config { message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("definition read cancelled before line {line}")]
    Cancelled { line: usize },
}

impl DefinitionError {
    /// Accumulated warning lines carried by a failed run.
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        match self {
            Self::NoValidDefinitions { warnings } => warnings,
            _ => &[],
        }
    }
}

fn no_valid_definitions(warnings: &[String]) -> String {
    let mut message = String::from("There are no valid messages.");
    for warning in warnings {
        message.push('\n');
        message.push_str(warning);
    }
    message
}
