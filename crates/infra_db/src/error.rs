//! Storage error types
//!
//! Errors raised while reading or writing the claims file. Adapters hand
//! them to the domain as [`PortError`] through the `From` impl below.

use std::path::PathBuf;
use thiserror::Error;

use core_kernel::PortError;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the data file failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The data file exists but does not hold a claim list
    #[error("Corrupt claims file {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A record could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StorageError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StorageError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn corrupt(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        StorageError::Corrupt {
            path: path.into(),
            source,
        }
    }

    /// Checks if this error comes from the file system rather than the data
    pub fn is_io_error(&self) -> bool {
        matches!(self, StorageError::Io { .. })
    }
}

impl From<StorageError> for PortError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Io { .. } => PortError::Connection {
                message: err.to_string(),
                source: Some(Box::new(err)),
            },
            StorageError::Corrupt { .. } | StorageError::Serialization(_) => {
                PortError::transformation(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_io_error_maps_to_connection() {
        let err = StorageError::io("/data/claims.json", io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(err.is_io_error());
        assert!(err.to_string().contains("/data/claims.json"));

        let port: PortError = err.into();
        assert!(matches!(port, PortError::Connection { .. }));
    }

    #[test]
    fn test_corrupt_file_maps_to_transformation() {
        let source = serde_json::from_str::<Vec<u8>>("{not json").unwrap_err();
        let port: PortError = StorageError::corrupt("/data/claims.json", source).into();
        assert!(matches!(port, PortError::Transformation { .. }));
    }
}
