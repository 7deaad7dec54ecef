//! Error types for card news generation

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for card news operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while assembling or rendering card news
#[derive(Error, Debug)]
pub enum Error {
    /// The stylesheet could not be read; nothing is rendered without it
    #[error("Cannot read stylesheet {}: {source}", .path.display())]
    MissingStylesheet {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Filesystem failure while writing outputs
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Failed to start the renderer
    #[error("Renderer initialization failed: {0}")]
    InitializationError(String),

    /// Failed to load the generated document
    #[error("Failed to load document: {0}")]
    LoadError(String),

    /// Failed to export a PDF or screenshot
    #[error("Rendering failed: {0}")]
    RenderError(String),

    /// CDP-specific error
    #[cfg(feature = "cdp")]
    #[error("CDP error: {0}")]
    CdpError(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io { path: path.into(), source }
    }
}

#[cfg(feature = "cdp")]
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::CdpError(err.to_string())
    }
}
