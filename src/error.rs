//! Error types for the content pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by loading and querying content.
///
/// Per-post problems (a malformed post document, an unparsable date) are
/// recovered inside the loader and only show up as log events; they never
/// reach this type.
#[derive(Error, Debug)]
pub enum ContentError {
    /// The site index document is missing or could not be parsed.
    #[error("site index {path:?} is unavailable: {source}")]
    IndexUnavailable {
        path: PathBuf,
        #[source]
        source: IndexSourceError,
    },

    /// The posts glob pattern is malformed.
    #[error("invalid posts pattern: {0}")]
    InvalidPattern(#[from] glob::PatternError),

    /// The load was cancelled before it completed.
    #[error("content load cancelled")]
    Cancelled,

    /// No published post carries the requested slug.
    #[error("no published post with slug {slug:?}")]
    NotFound { slug: String },
}

/// Underlying cause of [`ContentError::IndexUnavailable`].
#[derive(Error, Debug)]
pub enum IndexSourceError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

impl ContentError {
    /// Whether this error means "nothing to show" rather than a failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ContentError::NotFound { .. })
    }
}

pub type Result<T, E = ContentError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_distinct() {
        let err = ContentError::NotFound {
            slug: "missing".to_string(),
        };
        assert!(err.is_not_found());
        assert!(err.to_string().contains("missing"));
        assert!(!ContentError::Cancelled.is_not_found());
    }

    #[test]
    fn test_index_unavailable_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = ContentError::IndexUnavailable {
            path: PathBuf::from("blogs/blogs.yaml"),
            source: io.into(),
        };
        assert!(!err.is_not_found());
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().contains("blogs.yaml"));
    }
}
