use thiserror::Error;

/// Failures surfaced while opening an article.
///
/// These never escape the article loader: each one is rendered as an inline
/// message inside the open modal.
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("no article with id `{0}`")]
    NotFound(String),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    /// The rendered fragment could not be rewritten by the heading indexer.
    #[error("could not index article markup: {0}")]
    Parse(String),
}

/// A failed content request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("server responded with {status} {status_text}")]
    Status { status: u16, status_text: String },
    #[error("network request failed: {0}")]
    Transport(String),
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("duplicate article id `{0}`")]
    DuplicateId(String),
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid viewer configuration: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// A filter checkbox value that names no [`DateWindow`](crate::filter::DateWindow).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown date window `{0}`")]
pub struct UnknownDateWindow(pub String);
