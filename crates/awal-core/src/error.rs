use thiserror::Error;

use crate::language::Language;

/// Errors raised by the rotation engine.
#[derive(Error, Debug)]
pub enum AwalError {
    /// A language bucket is absent from the corpus. Fatal at startup.
    #[error("malformed corpus: missing language bucket '{0}'")]
    MissingLanguage(Language),

    /// A rotation targeted a language with no quotes.
    #[error("no quotes available for language '{0}'")]
    EmptyLanguage(Language),

    #[error("invalid corpus JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown language: {0}")]
    UnknownLanguage(String),
}

pub type Result<T> = std::result::Result<T, AwalError>;
