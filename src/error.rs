//! Error types shared across the crate.

use thiserror::Error;

/// Any failure while turning a URL into practice text.
///
/// Network errors, bad status codes and unparseable URLs all collapse into
/// this one kind; `cause` keeps the underlying message.
#[derive(Debug, Error)]
#[error("failed to extract text from {url}: {cause}")]
pub struct ExtractionError {
    pub url: String,
    pub cause: String,
}

/// Errors emitted by a `PageFetcher`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FetchError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("request failed: {0}")]
    Transport(String),
    #[error("server responded with status {0}")]
    Status(u16),
}

/// Errors emitted by `SessionManager`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("cannot load an empty sentence set")]
    EmptySentences,
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
}

/// Errors emitted by a `SentenceGenerator`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GenerationError {
    #[error("sentence generation is not configured")]
    Disabled,
    #[error("sentence generation returned an empty response")]
    EmptyResponse,
    #[error("sentence generation failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted while starting a practice run.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PracticeError {
    #[error("no text to practise")]
    NoText,
    #[error(transparent)]
    Session(#[from] SessionError),
}
