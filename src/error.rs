//! Error handling for document composition

use std::io;
use thiserror::Error;

/// Boxed error returned by cell renderer callbacks
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The main error type for composition operations
#[derive(Error, Debug)]
pub enum Error {
    /// No formatter recognised the value
    #[error("Cannot format value: {value}")]
    Format { value: String },
    /// A record has no cell for a declared column
    #[error("Missing cell for column '{column}' in row {row}")]
    MissingCell { column: String, row: usize },
    /// A cell is neither a formattable value nor a usable renderer
    #[error("Invalid cell renderer for column '{column}' in row {row}: {reason}")]
    InvalidRenderer {
        column: String,
        row: usize,
        reason: String,
    },
    /// A cell renderer callback failed
    #[error("Cell renderer for column '{column}' in row {row} failed: {source}")]
    Render {
        column: String,
        row: usize,
        #[source]
        source: BoxError,
    },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Unsupported: {0}")]
    Unsupported(String),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::InvalidConfig(msg.into())
    }
    pub fn unsupported<S: Into<String>>(msg: S) -> Self {
        Error::Unsupported(msg.into())
    }
    pub fn format<S: Into<String>>(value: S) -> Self {
        Error::Format {
            value: value.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
