//! Pre-built Test Fixtures
//!
//! Ready-to-use test data for the intake flow. The values are fixed so
//! tests can assert on them directly.

use chrono::NaiveDate;
use domain_claims::{
    AttachedImage, ClaimDraft, ClaimField, DamageAssessment, IncidentType, VehicleType,
};
use rust_decimal_macros::dec;

/// Fixture for claim drafts
pub struct DraftFixtures;

impl DraftFixtures {
    /// Customer-step values for Jane Doe
    pub fn customer_fields() -> Vec<(ClaimField, &'static str)> {
        vec![
            (ClaimField::CustomerName, "Jane Doe"),
            (ClaimField::Email, "jane@x.com"),
            (ClaimField::Phone, "555-0100"),
            (ClaimField::PolicyNumber, "POL123"),
        ]
    }

    /// Incident-step values for a rear-end collision
    pub fn incident_fields() -> Vec<(ClaimField, &'static str)> {
        vec![
            (ClaimField::IncidentDate, "2024-01-05"),
            (ClaimField::IncidentType, "collision"),
            (ClaimField::Description, "rear-ended at light"),
            (ClaimField::VehicleBrand, "Toyota"),
            (ClaimField::VehicleType, "4-wheeler"),
        ]
    }

    /// Every field of the Jane Doe claim, in form order
    pub fn jane_doe_fields() -> Vec<(ClaimField, &'static str)> {
        let mut fields = Self::customer_fields();
        fields.extend(Self::incident_fields());
        fields
    }

    /// The complete Jane Doe draft without a photo
    pub fn jane_doe() -> ClaimDraft {
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

    /// Incident date of the Jane Doe claim
    pub fn jane_doe_incident_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
    }
}

/// Fixture for damage assessments
pub struct AssessmentFixtures;

impl AssessmentFixtures {
    /// A minor bumper scrape
    pub fn minor() -> DamageAssessment {
        DamageAssessment {
            severity: "minor".to_string(),
            estimated_cost: dec!(420.00),
            repair_time: dec!(2),
            notes: "Scratches on rear bumper".to_string(),
        }
    }

    /// Heavy front-end damage
    pub fn severe() -> DamageAssessment {
        DamageAssessment {
            severity: "severe".to_string(),
            estimated_cost: dec!(8750.50),
            repair_time: dec!(14),
            notes: "Radiator and bonnet need replacement".to_string(),
        }
    }
}

/// Fixture for attached photos
pub struct ImageFixtures;

impl ImageFixtures {
    /// A tiny PNG-looking payload
    pub fn dent_photo() -> AttachedImage {
        AttachedImage::new(
            "dent.png",
            "image/png",
            vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A],
        )
        .unwrap()
    }
}
