//! Storage location configuration

use std::path::{Path, PathBuf};

/// File holding the claim records inside the data directory
pub const CLAIMS_FILE_NAME: &str = "insuranceClaims.json";

/// Where the claim store keeps its data
///
/// # Example
///
/// ```rust
/// use infra_db::StorageConfig;
///
/// let config = StorageConfig::new("/var/lib/claims");
/// assert!(config.claims_path().ends_with("insuranceClaims.json"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// Directory holding the data files; created on first write
    pub data_dir: PathBuf,
    /// Name of the claims file inside `data_dir`
    pub file_name: String,
}

impl StorageConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            file_name: CLAIMS_FILE_NAME.to_string(),
        }
    }

    /// Overrides the claims file name
    pub fn file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = name.into();
        self
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Full path of the claims file
    pub fn claims_path(&self) -> PathBuf {
        self.data_dir.join(&self.file_name)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new("./data")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = StorageConfig::new("/tmp/claims").file_name("claims-test.json");

        assert_eq!(config.data_dir(), Path::new("/tmp/claims"));
        assert_eq!(config.claims_path(), PathBuf::from("/tmp/claims/claims-test.json"));
    }

    #[test]
    fn test_default_location() {
        let config = StorageConfig::default();
        assert_eq!(config.claims_path(), PathBuf::from("./data").join(CLAIMS_FILE_NAME));
    }
}
