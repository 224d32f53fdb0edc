//! Test Data Builders
//!
//! Builders for drafts and for a fully wired intake session, so tests only
//! spell out what they care about.

use std::sync::Arc;

use domain_claims::{
    ClaimDraft, DamageAssessment, IntakeController, IntakeStep, MockClaimStore,
    MockDamageAssessor, SubmissionOptions, SubmissionOrchestrator,
};

use crate::fixtures::{AssessmentFixtures, DraftFixtures};

/// Builder for claim drafts, starting from the Jane Doe fixture
pub struct ClaimDraftBuilder {
    draft: ClaimDraft,
}

impl Default for ClaimDraftBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClaimDraftBuilder {
    /// Creates a builder holding the complete Jane Doe draft
    pub fn new() -> Self {
        Self {
            draft: DraftFixtures::jane_doe(),
        }
    }

    pub fn with_customer_name(mut self, name: impl Into<String>) -> Self {
        self.draft.customer_name = name.into();
        self
    }

    pub fn build(self) -> ClaimDraft {
        self.draft
    }
}

/// A controller wired to mock collaborators
pub struct IntakeHarness {
    pub controller: IntakeController,
    pub store: Arc<MockClaimStore>,
    pub assessor: Arc<MockDamageAssessor>,
}

impl IntakeHarness {
    /// Types every Jane Doe field into the form
    pub fn fill_jane_doe(&self) {
        for (field, value) in DraftFixtures::jane_doe_fields() {
            self.controller.set_field(field, value);
        }
    }

    /// Fills the form and jumps to the review step
    pub fn ready_for_review(&self) {
        self.fill_jane_doe();
        assert!(
            self.controller.jump_to(IntakeStep::Review),
            "review should be reachable once every field is filled"
        );
    }
}

/// Builder for an [`IntakeHarness`]
pub struct IntakeHarnessBuilder {
    store: MockClaimStore,
    assessor: MockDamageAssessor,
    options: SubmissionOptions,
}

impl Default for IntakeHarnessBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl IntakeHarnessBuilder {
    /// Empty store and an assessor answering with a minor assessment
    pub fn new() -> Self {
        Self {
            store: MockClaimStore::new(),
            assessor: MockDamageAssessor::returning(AssessmentFixtures::minor()),
            options: SubmissionOptions::default(),
        }
    }

    pub fn with_store(mut self, store: MockClaimStore) -> Self {
        self.store = store;
        self
    }

    pub fn with_assessor(mut self, assessor: MockDamageAssessor) -> Self {
        self.assessor = assessor;
        self
    }

    pub fn with_assessment(self, assessment: DamageAssessment) -> Self {
        self.with_assessor(MockDamageAssessor::returning(assessment))
    }

    pub fn with_options(mut self, options: SubmissionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn build(self) -> IntakeHarness {
        let store = Arc::new(self.store);
        let assessor = Arc::new(self.assessor);
        let orchestrator = SubmissionOrchestrator::new(store.clone(), assessor.clone())
            .with_options(self.options);

        IntakeHarness {
            controller: IntakeController::new(orchestrator),
            store,
            assessor,
        }
    }
}
