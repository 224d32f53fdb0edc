//! Submission of a completed claim draft
//!
//! A submission runs these steps and stops at the first failure:
//!
//! 1. Draw a random 12-digit claim number
//! 2. If a photo is attached, ask the damage assessor about it
//! 3. Assemble the record with status `New`
//! 4. Save it through the claim store
//! 5. Read it back by claim number; a missing record is a failure even
//!    though the save reported success
//!
//! Nothing is persisted when the assessment fails, and no step is retried.

use chrono::Utc;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use core_kernel::{ClaimNumber, PortError};

use crate::claim::ClaimRecord;
use crate::draft::ClaimDraft;
use crate::error::SubmissionError;
use crate::ports::{ClaimStore, DamageAssessor};

/// Tunables for claim number allocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionOptions {
    /// Re-draw the claim number while the store already holds it
    pub ensure_unique_id: bool,
    /// Draws allowed before giving up when `ensure_unique_id` is set
    pub max_id_attempts: u32,
}

impl Default for SubmissionOptions {
    fn default() -> Self {
        Self {
            ensure_unique_id: false,
            max_id_attempts: 5,
        }
    }
}

/// Turns a validated draft into a persisted claim record
#[derive(Clone)]
pub struct SubmissionOrchestrator {
    store: Arc<dyn ClaimStore>,
    assessor: Arc<dyn DamageAssessor>,
    options: SubmissionOptions,
}

impl SubmissionOrchestrator {
    pub fn new(store: Arc<dyn ClaimStore>, assessor: Arc<dyn DamageAssessor>) -> Self {
        Self {
            store,
            assessor,
            options: SubmissionOptions::default(),
        }
    }

    pub fn with_options(mut self, options: SubmissionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> SubmissionOptions {
        self.options
    }

    /// The record store this orchestrator writes to
    pub fn store(&self) -> &Arc<dyn ClaimStore> {
        &self.store
    }

    /// Submits a draft and returns the record as read back from the store
    #[instrument(skip_all, fields(claim_id = tracing::field::Empty, has_image = draft.attached_image.is_some()))]
    pub async fn submit(&self, draft: &ClaimDraft) -> Result<ClaimRecord, SubmissionError> {
        let claim_id = self.allocate_claim_number().await?;
        tracing::Span::current().record("claim_id", claim_id.as_str());

        let damage_assessment = match draft.attached_image.as_ref() {
            Some(image) => {
                info!(bytes = image.len(), file = image.file_name(), "Requesting damage assessment");
                let assessment = self
                    .assessor
                    .assess(image, &claim_id)
                    .await
                    .map_err(|err| {
                        warn!(error = %err, "Damage assessment failed, claim not saved");
                        SubmissionError::Enrichment(err)
                    })?;
                Some(assessment)
            }
            None => None,
        };

        let record = ClaimRecord::assemble(claim_id.clone(), draft, damage_assessment, Utc::now())
            .map_err(SubmissionError::Assembly)?;

        self.store.create(&record).await.map_err(|err| {
            warn!(error = %err, "Saving claim failed");
            SubmissionError::Storage(err)
        })?;

        match self.store.get_by_id(&claim_id).await {
            Ok(Some(saved)) => {
                info!(status = %saved.status, "Claim submitted");
                Ok(saved)
            }
            Ok(None) => {
                warn!("Claim missing on read-back after a successful save");
                Err(SubmissionError::StorageInconsistency(claim_id))
            }
            Err(err) => {
                warn!(error = %err, "Reading back the saved claim failed");
                Err(SubmissionError::Storage(err))
            }
        }
    }

    async fn allocate_claim_number(&self) -> Result<ClaimNumber, SubmissionError> {
        if !self.options.ensure_unique_id {
            return Ok(ClaimNumber::generate());
        }

        for _ in 0..self.options.max_id_attempts.max(1) {
            let candidate = ClaimNumber::generate();
            let existing = self
                .store
                .get_by_id(&candidate)
                .await
                .map_err(SubmissionError::Storage)?;
            if existing.is_none() {
                return Ok(candidate);
            }
            warn!(claim_id = %candidate, "Claim number already taken, drawing again");
        }

        Err(SubmissionError::Storage(PortError::conflict(format!(
            "no free claim number after {} attempts",
            self.options.max_id_attempts.max(1)
        ))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::mock::{MockClaimStore, MockDamageAssessor};
    use crate::assessment::DamageAssessment;
    use crate::claim::{IncidentType, VehicleType};
    use rust_decimal_macros::dec;

    fn jane_doe() -> ClaimDraft {
        ClaimDraft {
            customer_name: "Jane Doe".to_string(),
            email: "jane@x.com".to_string(),
            phone: "555-0100".to_string(),
            policy_number: "POL123".to_string(),
            incident_date: "2024-01-05".to_string(),
            incident_type: Some(IncidentType::Collision),
            description: "rear-ended at light".to_string(),
            vehicle_brand: "Toyota".to_string(),
            vehicle_type: Some(VehicleType::FourWheeler),
            attached_image: None,
        }
    }

    fn assessment() -> DamageAssessment {
        DamageAssessment {
            severity: "minor".to_string(),
            estimated_cost: dec!(420),
            repair_time: dec!(2),
            notes: "scratched bumper".to_string(),
        }
    }

    #[tokio::test]
    async fn test_unique_id_check_reads_store_first() {
        let store = Arc::new(MockClaimStore::new());
        let orchestrator = SubmissionOrchestrator::new(
            store.clone(),
            Arc::new(MockDamageAssessor::returning(assessment())),
        )
        .with_options(SubmissionOptions {
            ensure_unique_id: true,
            max_id_attempts: 3,
        });

        orchestrator.submit(&jane_doe()).await.unwrap();

        // one lookup for the free number, one read-back
        assert_eq!(store.get_calls(), 2);
    }

    #[tokio::test]
    async fn test_default_options_skip_uniqueness_check() {
        let store = Arc::new(MockClaimStore::new());
        let orchestrator = SubmissionOrchestrator::new(
            store.clone(),
            Arc::new(MockDamageAssessor::returning(assessment())),
        );

        orchestrator.submit(&jane_doe()).await.unwrap();
        assert_eq!(store.get_calls(), 1);
    }

    #[tokio::test]
    async fn test_malformed_draft_fails_assembly() {
        let mut draft = jane_doe();
        draft.vehicle_type = None;
        let store = Arc::new(MockClaimStore::new());
        let orchestrator = SubmissionOrchestrator::new(
            store.clone(),
            Arc::new(MockDamageAssessor::returning(assessment())),
        );

        let result = orchestrator.submit(&draft).await;
        assert!(matches!(result, Err(SubmissionError::Assembly(_))));
        assert_eq!(store.create_calls(), 0);
    }
}
