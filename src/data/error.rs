use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors raised while loading and normalizing the listings file.
///
/// Both variants abort the whole pipeline; there is no partial table.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Source file absent or unreadable.
    #[error("Cannot read data file '{}': {source}", .path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A required column is missing or holds a value that does not parse.
    #[error("Malformed data: {0}")]
    DataFormat(String),
}

impl LoadError {
    pub fn not_found(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LoadError::NotFound {
            path: path.into(),
            source,
        }
    }

    /// Build a [`LoadError::DataFormat`] pointing at a data row and column.
    pub fn bad_value(row: usize, column: &str, value: &str, expected: &str) -> Self {
        LoadError::DataFormat(format!(
            "row {row}, column '{column}': '{value}' is not {expected}"
        ))
    }
}

pub type Result<T> = std::result::Result<T, LoadError>;
