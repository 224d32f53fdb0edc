//! Claim draft validation rules
//!
//! # Rules
//!
//! - Name, phone, policy number, description and brand must not be blank
//! - Email must be present and well-formed
//! - Incident date must be present and a valid `YYYY-MM-DD` date
//! - Incident type and vehicle type must be chosen
//!
//! Validation always covers the whole draft; the intake form decides which
//! of the reported errors are outstanding.

use chrono::NaiveDate;
use std::collections::BTreeMap;
use validator::ValidateEmail;

use crate::claim::INCIDENT_DATE_FORMAT;
use crate::draft::{ClaimDraft, ClaimField};

/// Field name -> error message for every failing field; empty means valid
pub type FieldErrors = BTreeMap<ClaimField, String>;

/// Field-level validator for claim drafts
pub trait FieldValidator: Send + Sync {
    /// Returns one message for every field that fails its constraint
    fn validate(&self, draft: &ClaimDraft) -> FieldErrors;
}

/// Default rules for motor claim drafts
#[derive(Debug, Clone, Copy, Default)]
pub struct ClaimDraftValidator;

impl ClaimDraftValidator {
    fn require_text(draft: &ClaimDraft, field: ClaimField, message: &str, errors: &mut FieldErrors) {
        if draft.value(field).trim().is_empty() {
            errors.insert(field, message.to_string());
        }
    }
}

impl FieldValidator for ClaimDraftValidator {
    fn validate(&self, draft: &ClaimDraft) -> FieldErrors {
        let mut errors = FieldErrors::new();

        Self::require_text(draft, ClaimField::CustomerName, "Full name is required", &mut errors);
        Self::require_text(draft, ClaimField::Phone, "Phone number is required", &mut errors);
        Self::require_text(draft, ClaimField::PolicyNumber, "Policy number is required", &mut errors);
        Self::require_text(draft, ClaimField::Description, "Description is required", &mut errors);
        Self::require_text(draft, ClaimField::VehicleBrand, "Vehicle brand is required", &mut errors);

        let email = draft.email.trim().to_string();
        if email.is_empty() {
            errors.insert(ClaimField::Email, "Email is required".to_string());
        } else if !email.validate_email() {
            errors.insert(ClaimField::Email, "Enter a valid email address".to_string());
        }

        let incident_date = draft.incident_date.trim();
        if incident_date.is_empty() {
            errors.insert(ClaimField::IncidentDate, "Date of incident is required".to_string());
        } else if NaiveDate::parse_from_str(incident_date, INCIDENT_DATE_FORMAT).is_err() {
            errors.insert(
                ClaimField::IncidentDate,
                "Enter a valid date (YYYY-MM-DD)".to_string(),
            );
        }

        if draft.incident_type.is_none() {
            errors.insert(ClaimField::IncidentType, "Select an incident type".to_string());
        }
        if draft.vehicle_type.is_none() {
            errors.insert(ClaimField::VehicleType, "Select a vehicle type".to_string());
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claim::{IncidentType, VehicleType};

    fn complete_draft() -> ClaimDraft {
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

    #[test]
    fn test_complete_draft_is_valid() {
        assert!(ClaimDraftValidator.validate(&complete_draft()).is_empty());
    }

    #[test]
    fn test_empty_draft_reports_every_field() {
        let errors = ClaimDraftValidator.validate(&ClaimDraft::new());
        assert_eq!(errors.len(), ClaimField::ALL.len());
    }

    #[test]
    fn test_malformed_email() {
        let mut draft = complete_draft();
        draft.email = "jane.at.example".to_string();

        let errors = ClaimDraftValidator.validate(&draft);
        assert_eq!(errors.get(&ClaimField::Email).map(String::as_str), Some("Enter a valid email address"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_malformed_date() {
        let mut draft = complete_draft();
        draft.incident_date = "05/01/2024".to_string();
        assert!(ClaimDraftValidator.validate(&draft).contains_key(&ClaimField::IncidentDate));

        draft.incident_date = "2024-02-30".to_string();
        assert!(ClaimDraftValidator.validate(&draft).contains_key(&ClaimField::IncidentDate));
    }

    #[test]
    fn test_blank_text_is_rejected() {
        let mut draft = complete_draft();
        draft.vehicle_brand = "   ".to_string();
        assert!(ClaimDraftValidator.validate(&draft).contains_key(&ClaimField::VehicleBrand));
    }
}
