//! Error types for the grid publisher

use std::path::PathBuf;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid destination (empty host, port 0, unresolvable hostname)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Socket-level send failure, passed through untouched
    #[error("Transmission error: {0}")]
    Transmission(#[from] std::io::Error),

    /// A value could not be turned into an OSC argument or the bundle failed to encode
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Config file exists but could not be read or parsed
    #[error("Config file {}: {source}", .path.display())]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<rosc::OscError> for Error {
    fn from(err: rosc::OscError) -> Self {
        Error::Encoding(err.to_string())
    }
}
