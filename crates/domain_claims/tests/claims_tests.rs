//! Intake flow tests for domain_claims

use std::sync::Arc;

use core_kernel::PortError;
use domain_claims::{
    AdvanceOutcome, ClaimField, ClaimStatus, ClaimStore, IncidentType, IntakePhase, IntakeStep,
    MockClaimStore, MockDamageAssessor, Navigation, SubmissionError, SubmissionOptions,
    SubmitOutcome, VehicleType, SUBMISSION_FAILED_MESSAGE,
};
use proptest::prelude::*;
use test_utils::{
    assert_claim_number_format, assert_new_claim, assert_record_matches_draft,
    customer_field_strategy, fake_draft, incident_field_strategy, valid_draft_strategy,
    AssessmentFixtures, DraftFixtures,
    ImageFixtures, IntakeHarnessBuilder,
};

// ============================================================================
// Step Navigation Tests
// ============================================================================

mod navigation_tests {
    use super::*;

    #[test]
    fn test_new_session_starts_on_customer_step() {
        let harness = IntakeHarnessBuilder::new().build();
        assert_eq!(harness.controller.current_step(), IntakeStep::Customer);
        assert_eq!(harness.controller.phase(), IntakePhase::Editing);
        assert!(harness.controller.errors().is_empty());
    }

    #[test]
    fn test_customer_step_completes_with_all_four_fields() {
        let harness = IntakeHarnessBuilder::new().build();
        for (field, value) in DraftFixtures::customer_fields() {
            assert!(!harness.controller.is_step_complete(IntakeStep::Customer));
            harness.controller.set_field(field, value);
        }
        assert!(harness.controller.is_step_complete(IntakeStep::Customer));
        assert!(harness.controller.can_jump_to(IntakeStep::Incident));

        harness.controller.set_field(ClaimField::Phone, "");
        assert!(!harness.controller.is_step_complete(IntakeStep::Customer));
        assert!(harness.controller.errors().contains_key(&ClaimField::Phone));
    }

    #[test]
    fn test_jump_to_review_is_noop_while_incident_incomplete() {
        let harness = IntakeHarnessBuilder::new().build();
        for (field, value) in DraftFixtures::customer_fields() {
            harness.controller.set_field(field, value);
        }

        assert!(!harness.controller.jump_to(IntakeStep::Review));
        assert_eq!(harness.controller.current_step(), IntakeStep::Customer);

        assert!(harness.controller.jump_to(IntakeStep::Evidence));
        assert_eq!(harness.controller.current_step(), IntakeStep::Evidence);
    }

    #[tokio::test]
    async fn test_advance_walks_the_steps_in_order() {
        let harness = IntakeHarnessBuilder::new().build();
        harness.fill_jane_doe();

        for expected in [IntakeStep::Incident, IntakeStep::Evidence, IntakeStep::Review] {
            match harness.controller.advance().await {
                AdvanceOutcome::Moved(step) => assert_eq!(step, expected),
                other => panic!("expected a move to {}, got {:?}", expected, other),
            }
        }
    }

    #[tokio::test]
    async fn test_advance_into_review_blocked_by_incomplete_steps() {
        let harness = IntakeHarnessBuilder::new().build();
        for (field, value) in DraftFixtures::customer_fields() {
            harness.controller.set_field(field, value);
        }
        assert!(harness.controller.jump_to(IntakeStep::Evidence));

        assert!(matches!(
            harness.controller.advance().await,
            AdvanceOutcome::Blocked(IntakeStep::Evidence)
        ));
    }

    #[test]
    fn test_retreat_stops_at_first_step() {
        let harness = IntakeHarnessBuilder::new().build();
        harness.ready_for_review();

        assert_eq!(harness.controller.retreat(), IntakeStep::Evidence);
        assert_eq!(harness.controller.retreat(), IntakeStep::Incident);
        assert_eq!(harness.controller.retreat(), IntakeStep::Customer);
        assert_eq!(harness.controller.retreat(), IntakeStep::Customer);
    }

    #[test]
    fn test_invalid_email_is_outstanding_only_after_edit() {
        let harness = IntakeHarnessBuilder::new().build();
        harness.controller.set_field(ClaimField::CustomerName, "Jane Doe");
        assert!(!harness.controller.errors().contains_key(&ClaimField::Email));

        harness.controller.set_field(ClaimField::Email, "jane-at-example");
        assert!(harness.controller.errors().contains_key(&ClaimField::Email));

        harness.controller.set_field(ClaimField::Email, "jane@x.com");
        assert!(!harness.controller.errors().contains_key(&ClaimField::Email));
    }

    #[test]
    fn test_review_summary_lists_entered_values() {
        let harness = IntakeHarnessBuilder::new().build();
        harness.fill_jane_doe();

        let summary = harness.controller.review_summary();
        assert!(summary.contains(&("Name", "Jane Doe".to_string())));
        assert!(summary.contains(&("Policy #", "POL123".to_string())));
        assert!(summary.contains(&("Vehicle", "4-wheeler".to_string())));
    }
}

// ============================================================================
// Submission Tests
// ============================================================================

mod submission_tests {
    use super::*;

    #[tokio::test]
    async fn test_jane_doe_submission_end_to_end() {
        let harness = IntakeHarnessBuilder::new().build();
        harness.ready_for_review();

        let outcome = harness.controller.submit().await;
        let (record, navigation) = match outcome {
            SubmitOutcome::Submitted { record, navigation } => (record, navigation),
            other => panic!("expected submission, got {:?}", other),
        };

        assert_new_claim(&record);
        assert_record_matches_draft(&record, &DraftFixtures::jane_doe());
        assert_eq!(record.incident_date, DraftFixtures::jane_doe_incident_date());
        assert_eq!(record.incident_type, IncidentType::Collision);
        assert_eq!(record.vehicle_type, VehicleType::FourWheeler);
        assert!(record.image.is_none());
        assert!(record.damage_assessment.is_none());

        assert_eq!(navigation, Navigation::ClaimDetail(record.id.clone()));
        assert_eq!(navigation.path(), format!("/claims/{}", record.id));

        let stored = harness.store.get_by_id(&record.id).await.unwrap();
        assert_eq!(stored, Some(record.clone()));
        assert_eq!(harness.controller.phase(), IntakePhase::Submitted(record.id));
    }

    #[tokio::test]
    async fn test_no_image_means_no_assessment_call() {
        let harness = IntakeHarnessBuilder::new().build();
        harness.ready_for_review();

        assert!(harness.controller.submit().await.is_submitted());
        assert_eq!(harness.assessor.calls(), 0);
    }

    #[tokio::test]
    async fn test_image_is_assessed_under_the_new_claim_number() {
        let harness = IntakeHarnessBuilder::new()
            .with_assessment(AssessmentFixtures::severe())
            .build();
        harness.fill_jane_doe();
        let photo = ImageFixtures::dent_photo();
        let preview = photo.preview().to_string();
        assert!(harness.controller.attach_image(photo));
        assert!(harness.controller.jump_to(IntakeStep::Review));

        let record = match harness.controller.submit().await {
            SubmitOutcome::Submitted { record, .. } => record,
            other => panic!("expected submission, got {:?}", other),
        };

        assert_eq!(harness.assessor.calls(), 1);
        assert_eq!(harness.assessor.seen_claims(), vec![record.id.clone()]);
        assert_eq!(record.damage_assessment, Some(AssessmentFixtures::severe()));
        assert_eq!(record.image.as_deref(), Some(preview.as_str()));
    }

    #[tokio::test]
    async fn test_enrichment_failure_saves_nothing() {
        let harness = IntakeHarnessBuilder::new()
            .with_assessor(MockDamageAssessor::failing_with_status(500))
            .build();
        harness.fill_jane_doe();
        harness.controller.attach_image(ImageFixtures::dent_photo());
        assert!(harness.controller.jump_to(IntakeStep::Review));

        let outcome = harness.controller.submit().await;
        assert_eq!(outcome.error_message(), Some(SUBMISSION_FAILED_MESSAGE));
        match outcome {
            SubmitOutcome::Failed(SubmissionError::Enrichment(err)) => assert!(err.is_transient()),
            other => panic!("expected enrichment failure, got {:?}", other),
        }

        assert_eq!(harness.store.create_calls(), 0);
        assert!(harness.store.is_empty().await);
        assert_eq!(harness.controller.current_step(), IntakeStep::Review);
        assert!(!harness.controller.is_busy());
        let draft = harness.controller.draft();
        assert_eq!(draft.customer_name, "Jane Doe");
        assert!(draft.attached_image.is_some());
    }

    #[tokio::test]
    async fn test_storage_failure_returns_to_review_for_retry() {
        let harness = IntakeHarnessBuilder::new()
            .with_store(MockClaimStore::failing())
            .build();
        harness.ready_for_review();

        let outcome = harness.controller.submit().await;
        assert!(matches!(
            outcome,
            SubmitOutcome::Failed(SubmissionError::Storage(PortError::Connection { .. }))
        ));
        assert_eq!(harness.controller.current_step(), IntakeStep::Review);
        assert_eq!(harness.controller.phase(), IntakePhase::Editing);

        // the user may press submit again
        let retry = harness.controller.submit().await;
        assert!(matches!(retry, SubmitOutcome::Failed(SubmissionError::Storage(_))));
        assert_eq!(harness.store.create_calls(), 2);
    }

    #[tokio::test]
    async fn test_missing_read_back_is_storage_inconsistency() {
        let harness = IntakeHarnessBuilder::new()
            .with_store(MockClaimStore::forgetful())
            .build();
        harness.ready_for_review();

        match harness.controller.submit().await {
            SubmitOutcome::Failed(SubmissionError::StorageInconsistency(id)) => {
                assert_claim_number_format(&id)
            }
            other => panic!("expected storage inconsistency, got {:?}", other),
        }
        assert_eq!(harness.store.create_calls(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_submits_create_one_record() {
        let harness = IntakeHarnessBuilder::new()
            .with_assessor(MockDamageAssessor::returning(AssessmentFixtures::minor()).with_yields(8))
            .build();
        harness.fill_jane_doe();
        harness.controller.attach_image(ImageFixtures::dent_photo());
        assert!(harness.controller.jump_to(IntakeStep::Review));

        let (first, second) = tokio::join!(harness.controller.submit(), harness.controller.submit());

        assert!(first.is_submitted());
        assert!(matches!(second, SubmitOutcome::Ignored));
        assert_eq!(harness.store.create_calls(), 1);
        assert_eq!(harness.assessor.calls(), 1);
        assert_eq!(harness.store.len().await, 1);
    }

    #[tokio::test]
    async fn test_submit_outside_review_is_rejected() {
        let harness = IntakeHarnessBuilder::new().build();
        harness.fill_jane_doe();

        let outcome = harness.controller.submit().await;
        assert!(matches!(
            outcome,
            SubmitOutcome::Failed(SubmissionError::NotOnReview(IntakeStep::Customer))
        ));
        assert_eq!(harness.store.create_calls(), 0);
    }

    #[tokio::test]
    async fn test_edits_and_submits_ignored_after_success() {
        let harness = IntakeHarnessBuilder::new().build();
        harness.ready_for_review();
        assert!(harness.controller.submit().await.is_submitted());

        assert!(!harness.controller.set_field(ClaimField::CustomerName, "John"));
        assert!(matches!(harness.controller.submit().await, SubmitOutcome::Ignored));
        assert_eq!(harness.store.create_calls(), 1);
    }

    #[tokio::test]
    async fn test_advance_on_review_submits() {
        let harness = IntakeHarnessBuilder::new().build();
        harness.ready_for_review();

        match harness.controller.advance().await {
            AdvanceOutcome::Submit(outcome) => assert!(outcome.is_submitted()),
            other => panic!("expected submission, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unique_id_option_still_submits_once() {
        let harness = IntakeHarnessBuilder::new()
            .with_options(SubmissionOptions {
                ensure_unique_id: true,
                max_id_attempts: 3,
            })
            .build();
        harness.ready_for_review();

        assert!(harness.controller.submit().await.is_submitted());
        assert_eq!(harness.store.create_calls(), 1);
    }

    #[tokio::test]
    async fn test_stored_record_status_can_change_after_submission() {
        let harness = IntakeHarnessBuilder::new().build();
        harness.ready_for_review();
        let record = match harness.controller.submit().await {
            SubmitOutcome::Submitted { record, .. } => record,
            other => panic!("expected submission, got {:?}", other),
        };

        let updated = harness
            .store
            .update_status(&record.id, ClaimStatus::InReview)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, ClaimStatus::InReview);
    }
}

// ============================================================================
// Property Tests
// ============================================================================

mod property_tests {
    use super::*;
    use domain_claims::{ClaimDraftValidator, FieldValidator, SubmissionOrchestrator};

    proptest! {
        #[test]
        fn prop_generated_drafts_pass_validation(draft in valid_draft_strategy()) {
            prop_assert!(ClaimDraftValidator.validate(&draft).is_empty());
        }

        #[test]
        fn prop_clearing_a_customer_field_blocks_the_step(field in customer_field_strategy()) {
            let harness = IntakeHarnessBuilder::new().build();
            harness.fill_jane_doe();
            prop_assert!(harness.controller.is_step_complete(IntakeStep::Customer));

            harness.controller.set_field(field, "");
            prop_assert!(!harness.controller.is_step_complete(IntakeStep::Customer));
            prop_assert!(!harness.controller.can_jump_to(IntakeStep::Incident));
        }

        #[test]
        fn prop_clearing_an_incident_field_blocks_review(field in incident_field_strategy()) {
            let harness = IntakeHarnessBuilder::new().build();
            harness.fill_jane_doe();
            prop_assert!(harness.controller.jump_to(IntakeStep::Incident));
            prop_assert!(harness.controller.is_step_complete(IntakeStep::Incident));

            harness.controller.set_field(field, "");
            prop_assert!(!harness.controller.is_step_complete(IntakeStep::Incident));
            prop_assert!(!harness.controller.can_jump_to(IntakeStep::Evidence));
            prop_assert!(!harness.controller.can_jump_to(IntakeStep::Review));
            prop_assert!(harness.controller.errors().contains_key(&field));
        }

        #[test]
        fn prop_submitted_record_reads_back_identically(draft in valid_draft_strategy()) {
            let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
            runtime.block_on(async {
                let store = Arc::new(MockClaimStore::new());
                let orchestrator = SubmissionOrchestrator::new(
                    store.clone(),
                    Arc::new(MockDamageAssessor::returning(AssessmentFixtures::minor())),
                );

                let record = orchestrator.submit(&draft).await.unwrap();
                assert_claim_number_format(&record.id);
                assert_record_matches_draft(&record, &draft);
                assert_eq!(store.get_by_id(&record.id).await.unwrap(), Some(record));
            });
        }
    }

    #[tokio::test]
    async fn test_fake_drafts_submit_and_read_back() {
        let store = Arc::new(MockClaimStore::new());
        let orchestrator = SubmissionOrchestrator::new(
            store.clone(),
            Arc::new(MockDamageAssessor::returning(AssessmentFixtures::minor())),
        );

        for _ in 0..5 {
            let draft = fake_draft();
            assert!(ClaimDraftValidator.validate(&draft).is_empty(), "{:?}", draft);

            let record = orchestrator.submit(&draft).await.unwrap();
            assert_record_matches_draft(&record, &draft);
            assert_eq!(record.damage_assessment, None);
        }
        assert_eq!(store.len().await, 5);
    }
}
