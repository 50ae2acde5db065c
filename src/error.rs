//! Error types for the site compiler

use thiserror::Error;

/// Result type alias for compiler operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a compile request.
///
/// Data-level gaps inside a payload (a sprite naming a material that does not
/// exist, a component of an unknown type) are not represented here: the
/// renderers degrade gracefully and keep going.
#[derive(Error, Debug)]
pub enum Error {
    /// The project payload could not be retrieved
    #[error("Failed to fetch project data: {0}")]
    FetchError(String),

    /// The project payload could not be decoded
    #[error("Failed to decode project payload: {0}")]
    DecodeError(String),

    /// An outer HTML/CSS template is missing or unreadable
    #[error("Failed to load template: {0}")]
    TemplateLoadError(String),

    /// The project lists no pages, so there is no first page to name
    #[error("Project page listing is empty")]
    EmptyPageListing,

    /// Compiled artifacts could not be written
    #[error("Failed to write output: {0}")]
    OutputError(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// The trigger server could not be started
    #[error("Server error: {0}")]
    ServerError(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::DecodeError(err.to_string())
    }
}
