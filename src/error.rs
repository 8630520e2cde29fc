use std::path::PathBuf;
use thiserror::Error;

/// Errors from the edges of the crate: config and lexicon files, CLI input.
/// Classification itself never fails.
#[derive(Debug, Error)]
pub enum MailmoodError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to parse lexicon file {}: {source}", path.display())]
    LexiconParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid lexicon entry '{term}' in category '{category}': {reason}")]
    InvalidLexiconEntry {
        category: String,
        term: String,
        reason: String,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("text is required")]
    EmptyInput,
}

pub type Result<T> = std::result::Result<T, MailmoodError>;
