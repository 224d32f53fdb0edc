//! Claims repository implementation
//!
//! File-backed [`ClaimStore`]: all claim records are kept as one JSON array
//! in `<data_dir>/insuranceClaims.json`. Every operation reads the whole
//! array, changes it and writes it back. A mutex serialises operations
//! within the process, and writes go through a temporary file that is
//! renamed over the old one so readers never see a half-written list.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::time::Instant;
use tokio::sync::Mutex;
use tracing::{debug, instrument};

use core_kernel::{
    AdapterHealth, ClaimNumber, DomainPort, HealthCheckResult, HealthCheckable, PortError,
};
use domain_claims::{ClaimRecord, ClaimStatus, ClaimStore};

use crate::config::StorageConfig;
use crate::error::StorageError;

const ADAPTER_ID: &str = "json-file-claim-store";

/// Claim store persisting to a JSON file
#[derive(Debug)]
pub struct JsonFileClaimStore {
    config: StorageConfig,
    lock: Mutex<()>,
}

impl JsonFileClaimStore {
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            lock: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Loads every record; a missing file is an empty store
    async fn load(&self) -> Result<Vec<ClaimRecord>, StorageError> {
        let path = self.config.claims_path();
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(StorageError::io(path, err)),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        serde_json::from_slice(&bytes).map_err(|err| StorageError::corrupt(path, err))
    }

    /// Replaces the stored list
    async fn save(&self, records: &[ClaimRecord]) -> Result<(), StorageError> {
        let dir = self.config.data_dir();
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|err| StorageError::io(dir, err))?;

        let path = self.config.claims_path();
        let staging = staging_path(&path);
        let json = serde_json::to_vec_pretty(records)?;

        tokio::fs::write(&staging, json)
            .await
            .map_err(|err| StorageError::io(&staging, err))?;
        tokio::fs::rename(&staging, &path)
            .await
            .map_err(|err| StorageError::io(&path, err))?;
        Ok(())
    }
}

fn staging_path(path: &std::path::Path) -> PathBuf {
    let mut staging = path.as_os_str().to_owned();
    staging.push(".tmp");
    PathBuf::from(staging)
}

impl DomainPort for JsonFileClaimStore {}

#[async_trait]
impl HealthCheckable for JsonFileClaimStore {
    /// Checks that the claims file can be read and parsed
    async fn health_check(&self) -> HealthCheckResult {
        let start = Instant::now();
        let _guard = self.lock.lock().await;

        let (status, message) = match self.load().await {
            Ok(records) => (
                AdapterHealth::Healthy,
                format!("{} claim(s) in {}", records.len(), self.config.claims_path().display()),
            ),
            Err(err) => (AdapterHealth::Unhealthy, err.to_string()),
        };

        HealthCheckResult::now(
            ADAPTER_ID,
            status,
            start.elapsed().as_millis() as u64,
            Some(message),
        )
    }
}

#[async_trait]
impl ClaimStore for JsonFileClaimStore {
    #[instrument(skip(self, record), fields(claim_id = %record.id))]
    async fn create(&self, record: &ClaimRecord) -> Result<(), PortError> {
        let _guard = self.lock.lock().await;
        let mut records = self.load().await?;
        records.push(record.clone());
        self.save(&records).await?;
        debug!(total = records.len(), "Claim appended");
        Ok(())
    }

    #[instrument(skip(self), fields(claim_id = %id))]
    async fn get_by_id(&self, id: &ClaimNumber) -> Result<Option<ClaimRecord>, PortError> {
        let _guard = self.lock.lock().await;
        let records = self.load().await?;
        Ok(records.into_iter().find(|record| &record.id == id))
    }

    #[instrument(skip(self), fields(claim_id = %id, status = %status))]
    async fn update_status(
        &self,
        id: &ClaimNumber,
        status: ClaimStatus,
    ) -> Result<Option<ClaimRecord>, PortError> {
        let _guard = self.lock.lock().await;
        let mut records = self.load().await?;

        let updated = match records.iter_mut().find(|record| &record.id == id) {
            Some(record) => {
                record.status = status;
                record.clone()
            }
            None => return Ok(None),
        };

        self.save(&records).await?;
        debug!("Claim status updated");
        Ok(Some(updated))
    }

    #[instrument(skip(self), fields(claim_id = %id))]
    async fn delete(&self, id: &ClaimNumber) -> Result<bool, PortError> {
        let _guard = self.lock.lock().await;
        let mut records = self.load().await?;
        let before = records.len();
        records.retain(|record| &record.id != id);

        if records.len() == before {
            return Ok(false);
        }
        self.save(&records).await?;
        debug!(remaining = records.len(), "Claim deleted");
        Ok(true)
    }

    #[instrument(skip(self))]
    async fn list_all(&self) -> Result<Vec<ClaimRecord>, PortError> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_staging_path_sits_next_to_target() {
        let path = PathBuf::from("/data/insuranceClaims.json");
        assert_eq!(staging_path(&path), PathBuf::from("/data/insuranceClaims.json.tmp"));
    }

    #[tokio::test]
    async fn test_missing_file_is_empty_store() {
        let temp = tempfile::TempDir::new().unwrap();
        let dir = temp.path().join("not-created-yet");
        let store = JsonFileClaimStore::new(StorageConfig::new(&dir));
        assert!(store.list_all().await.unwrap().is_empty());
        assert!(!dir.exists());
    }
}
