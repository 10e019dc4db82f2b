//! Error types for gearchunk.

use std::io;
use std::sync::Arc;

/// Errors that can occur while configuring or running a chunker.
///
/// The type is `Clone` so a chunking session can keep reporting the same
/// terminal error after it has been observed.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ChunkError {
    /// Reading from the byte source failed. The session that observed it is
    /// terminal.
    #[error("io error: {0}")]
    Io(#[source] Arc<io::Error>),

    /// The `(min, avg, max)` size triple was rejected.
    #[error("invalid config: {message}")]
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },
}

impl ChunkError {
    /// Returns true for the parameter error raised at construction.
    pub fn is_invalid_config(&self) -> bool {
        matches!(self, ChunkError::InvalidConfig { .. })
    }

    /// Returns the underlying I/O error, if this is a read failure.
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            ChunkError::Io(e) => Some(e),
            ChunkError::InvalidConfig { .. } => None,
        }
    }
}

impl From<io::Error> for ChunkError {
    fn from(e: io::Error) -> Self {
        ChunkError::Io(Arc::new(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "test");
        let err: ChunkError = io_err.into();
        assert!(matches!(err, ChunkError::Io(_)));
        assert_eq!(err.io_error().map(|e| e.kind()), Some(io::ErrorKind::NotFound));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_clone_shares_io_error() {
        let err: ChunkError = io::Error::other("disk gone").into();
        let copy = err.clone();
        match (&err, &copy) {
            (ChunkError::Io(a), ChunkError::Io(b)) => assert!(Arc::ptr_eq(a, b)),
            _ => panic!("expected io errors"),
        }
    }

    #[test]
    fn test_display() {
        let err = ChunkError::InvalidConfig {
            message: "min_size must be at least 1",
        };
        assert_eq!(err.to_string(), "invalid config: min_size must be at least 1");
        assert!(err.is_invalid_config());
        assert!(err.io_error().is_none());
    }
}
