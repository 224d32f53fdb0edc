//! Claims Domain Ports
//!
//! The intake core talks to two collaborators, both injected at
//! construction and never reached through global state:
//!
//! - **ClaimStore**: keyed record store for submitted claims
//!   (JSON file adapter in infra_db, in-memory mock for tests)
//! - **DamageAssessor**: external photo analysis
//!   (HTTP adapter in [`crate::adapters`], mock for tests)
//!
//! ```rust,ignore
//! let store: Arc<dyn ClaimStore> = Arc::new(JsonFileClaimStore::new(config));
//! let assessor: Arc<dyn DamageAssessor> = Arc::new(HttpDamageAssessor::new(detection)?);
//! let orchestrator = SubmissionOrchestrator::new(store, assessor);
//! ```

use async_trait::async_trait;

use core_kernel::{ClaimNumber, DomainPort, HealthCheckable, PortError};

use crate::assessment::DamageAssessment;
use crate::claim::{ClaimRecord, ClaimStatus};
use crate::draft::AttachedImage;

/// Keyed store of submitted claim records
#[async_trait]
pub trait ClaimStore: DomainPort + HealthCheckable {
    /// Persists a new record
    async fn create(&self, record: &ClaimRecord) -> Result<(), PortError>;

    /// Looks up a record by claim number
    async fn get_by_id(&self, id: &ClaimNumber) -> Result<Option<ClaimRecord>, PortError>;

    /// Changes the status of a record, returning the updated record if it exists
    async fn update_status(
        &self,
        id: &ClaimNumber,
        status: ClaimStatus,
    ) -> Result<Option<ClaimRecord>, PortError>;

    /// Removes a record, returning whether anything was removed
    async fn delete(&self, id: &ClaimNumber) -> Result<bool, PortError>;

    /// All records in insertion order
    async fn list_all(&self) -> Result<Vec<ClaimRecord>, PortError>;
}

/// External damage analysis of a claim photo
#[async_trait]
pub trait DamageAssessor: DomainPort + HealthCheckable {
    /// Analyses the photo for the given claim; any non-success is an error
    async fn assess(
        &self,
        image: &AttachedImage,
        claim_id: &ClaimNumber,
    ) -> Result<DamageAssessment, PortError>;
}

/// In-memory test doubles for the claims ports
///
/// Both mocks count their calls so tests can assert which collaborators a
/// submission touched.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tokio::sync::RwLock;

    use core_kernel::{AdapterHealth, HealthCheckResult};

    /// In-memory claim store
    #[derive(Debug, Default)]
    pub struct MockClaimStore {
        records: RwLock<Vec<ClaimRecord>>,
        create_calls: AtomicUsize,
        get_calls: AtomicUsize,
        fail_creates: bool,
        drop_writes: bool,
    }

    impl MockClaimStore {
        /// Creates an empty store
        pub fn new() -> Self {
            Self::default()
        }

        /// Store whose `create` always fails
        pub fn failing() -> Self {
            Self {
                fail_creates: true,
                ..Self::default()
            }
        }

        /// Store whose `create` reports success but keeps nothing
        pub fn forgetful() -> Self {
            Self {
                drop_writes: true,
                ..Self::default()
            }
        }

        pub fn create_calls(&self) -> usize {
            self.create_calls.load(Ordering::SeqCst)
        }

        pub fn get_calls(&self) -> usize {
            self.get_calls.load(Ordering::SeqCst)
        }

        pub async fn len(&self) -> usize {
            self.records.read().await.len()
        }

        pub async fn is_empty(&self) -> bool {
            self.records.read().await.is_empty()
        }
    }

    impl DomainPort for MockClaimStore {}

    #[async_trait]
    impl HealthCheckable for MockClaimStore {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult::now(
                "mock-claim-store",
                AdapterHealth::Healthy,
                0,
                Some("Mock adapter always healthy".to_string()),
            )
        }
    }

    #[async_trait]
    impl ClaimStore for MockClaimStore {
        async fn create(&self, record: &ClaimRecord) -> Result<(), PortError> {
            self.create_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_creates {
                return Err(PortError::connection("mock store rejects writes"));
            }
            if !self.drop_writes {
                self.records.write().await.push(record.clone());
            }
            Ok(())
        }

        async fn get_by_id(&self, id: &ClaimNumber) -> Result<Option<ClaimRecord>, PortError> {
            self.get_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.records.read().await.iter().find(|r| &r.id == id).cloned())
        }

        async fn update_status(
            &self,
            id: &ClaimNumber,
            status: ClaimStatus,
        ) -> Result<Option<ClaimRecord>, PortError> {
            let mut records = self.records.write().await;
            Ok(records.iter_mut().find(|r| &r.id == id).map(|record| {
                record.status = status;
                record.clone()
            }))
        }

        async fn delete(&self, id: &ClaimNumber) -> Result<bool, PortError> {
            let mut records = self.records.write().await;
            let before = records.len();
            records.retain(|r| &r.id != id);
            Ok(records.len() != before)
        }

        async fn list_all(&self) -> Result<Vec<ClaimRecord>, PortError> {
            Ok(self.records.read().await.clone())
        }
    }

    /// Damage assessor returning a canned answer
    #[derive(Debug)]
    pub struct MockDamageAssessor {
        response: Result<DamageAssessment, u16>,
        calls: AtomicUsize,
        seen_claims: Mutex<Vec<ClaimNumber>>,
        yields: usize,
    }

    impl MockDamageAssessor {
        /// Assessor that answers with this assessment
        pub fn returning(assessment: DamageAssessment) -> Self {
            Self {
                response: Ok(assessment),
                calls: AtomicUsize::new(0),
                seen_claims: Mutex::new(Vec::new()),
                yields: 0,
            }
        }

        /// Assessor that answers with an HTTP error status
        pub fn failing_with_status(status: u16) -> Self {
            Self {
                response: Err(status),
                calls: AtomicUsize::new(0),
                seen_claims: Mutex::new(Vec::new()),
                yields: 0,
            }
        }

        /// Suspends the call this many times before answering
        pub fn with_yields(mut self, yields: usize) -> Self {
            self.yields = yields;
            self
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        /// Claim numbers the assessor was asked about
        pub fn seen_claims(&self) -> Vec<ClaimNumber> {
            self.seen_claims
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .clone()
        }
    }

    impl DomainPort for MockDamageAssessor {}

    #[async_trait]
    impl HealthCheckable for MockDamageAssessor {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult::now("mock-damage-assessor", AdapterHealth::Healthy, 0, None)
        }
    }

    #[async_trait]
    impl DamageAssessor for MockDamageAssessor {
        async fn assess(
            &self,
            _image: &AttachedImage,
            claim_id: &ClaimNumber,
        ) -> Result<DamageAssessment, PortError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen_claims
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .push(claim_id.clone());

            for _ in 0..self.yields {
                tokio::task::yield_now().await;
            }

            match &self.response {
                Ok(assessment) => Ok(assessment.clone()),
                Err(status) => Err(PortError::ServiceUnavailable {
                    service: format!("damage detection returned {}", status),
                }),
            }
        }
    }
}
