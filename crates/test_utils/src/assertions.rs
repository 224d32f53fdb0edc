//! Custom Test Assertions
//!
//! Assertion helpers for claim records with messages that name the field
//! that differs.

use core_kernel::{ClaimNumber, CLAIM_NUMBER_LEN};
use domain_claims::{ClaimDraft, ClaimRecord, ClaimStatus};

/// Asserts that a claim number is exactly twelve ASCII digits
pub fn assert_claim_number_format(id: &ClaimNumber) {
    let digits = id.as_str();
    assert_eq!(
        digits.len(),
        CLAIM_NUMBER_LEN,
        "Claim number {} should have {} digits",
        digits,
        CLAIM_NUMBER_LEN
    );
    assert!(
        digits.bytes().all(|b| b.is_ascii_digit()),
        "Claim number {} should be numeric",
        digits
    );
}

/// Asserts that a freshly submitted record carries the draft's data
pub fn assert_record_matches_draft(record: &ClaimRecord, draft: &ClaimDraft) {
    assert_eq!(record.customer_name, draft.customer_name, "customerName differs");
    assert_eq!(record.email, draft.email, "email differs");
    assert_eq!(record.phone, draft.phone, "phone differs");
    assert_eq!(record.policy_number, draft.policy_number, "policyNumber differs");
    assert_eq!(
        record.incident_date.format("%Y-%m-%d").to_string(),
        draft.incident_date.trim(),
        "incidentDate differs"
    );
    assert_eq!(Some(record.incident_type), draft.incident_type, "incidentType differs");
    assert_eq!(record.description, draft.description, "description differs");
    assert_eq!(record.vehicle_brand, draft.vehicle_brand, "vehicleBrand differs");
    assert_eq!(Some(record.vehicle_type), draft.vehicle_type, "vehicleType differs");
    assert_eq!(
        record.image.as_deref(),
        draft.attached_image.as_ref().map(|image| image.preview()),
        "image preview differs"
    );
}

/// Asserts that a record is a brand new claim
pub fn assert_new_claim(record: &ClaimRecord) {
    assert_claim_number_format(&record.id);
    assert_eq!(record.status, ClaimStatus::New, "New claims start with status New");
}
