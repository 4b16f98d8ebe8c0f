use thiserror::Error;

/// Errors that can occur while generating an embedded filesystem.
#[derive(Debug, Error)]
pub enum Error {
    /// The generator configuration is invalid.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A directory could not be listed; the walk cannot produce a
    /// trustworthy table of contents.
    #[error("cannot list directory {path}: {source}")]
    ReadDir {
        /// Directory that failed to list.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A source file could not be opened or read during emission.
    #[error("cannot read source file {path}: {source}")]
    Open {
        /// File that failed to open.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// I/O error writing the generated output.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error in a configuration file.
    #[error("toml parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type for generator operations.
pub type Result<T> = std::result::Result<T, Error>;
