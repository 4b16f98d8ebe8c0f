use std::io;
use thiserror::Error;

/// Errors returned by the embedded filesystem.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// No entry exists at the requested path.
    #[error("file does not exist: {path}")]
    NotFound {
        /// The path that was looked up.
        path: String,
    },

    /// A byte-level operation was attempted on a directory.
    #[error("{name} is a directory")]
    IsADirectory {
        /// Name of the directory.
        name: String,
    },

    /// A directory listing was requested from a file.
    #[error("{name} is not a directory")]
    NotADirectory {
        /// Name of the file.
        name: String,
    },
}

impl Error {
    /// Returns `true` if this is a lookup miss.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::NotFound { .. } => io::Error::new(io::ErrorKind::NotFound, err),
            other => io::Error::other(other),
        }
    }
}

/// Result type for embedded filesystem operations.
pub type Result<T> = std::result::Result<T, Error>;
