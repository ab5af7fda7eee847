use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum HolocronError {
    #[error("request failed: {0}")]
    Http(String),

    #[error("API returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("failed to decode API response: {0}")]
    Decode(String),

    #[error("no start URL for collection: {0}")]
    MissingStartUrl(String),

    #[error("invalid resource url: {0}")]
    InvalidResourceUrl(String),

    #[error("record has no source url")]
    MissingSourceUrl,

    #[error("cache read failed for {name}: {message}")]
    CacheRead { name: String, message: String },

    #[error("cache write failed for {name}: {message}")]
    CacheWrite { name: String, message: String },

    #[error("failed to read config file at {0}")]
    ConfigRead(PathBuf),

    #[error("failed to parse JSON config: {0}")]
    ConfigParse(String),

    #[error("filesystem error: {0}")]
    Filesystem(String),
}
