//! Error types for translation and settings.

use thiserror::Error;

/// Fatal failure of a single `translate` call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TranslationError {
    #[error("translating inner class types is not supported: {ty}")]
    UnsupportedConstruct { ty: String },
}

/// Settings rejected before any translation starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid black box class pattern `{pattern}`: {source}")]
    InvalidBlackBoxPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("ignore annotation name must not be empty")]
    EmptyIgnoreAnnotation,
}
