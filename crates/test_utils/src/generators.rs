//! Property-Based Test Generators
//!
//! Proptest strategies for claim drafts that pass validation, plus a
//! `fake`-backed generator for realistic one-off drafts.

use chrono::NaiveDate;
use domain_claims::{ClaimDraft, ClaimField, IncidentType, VehicleType};
use fake::faker::internet::en::SafeEmail;
use fake::faker::lorem::en::Sentence;
use fake::faker::name::en::Name;
use fake::Fake;
use proptest::prelude::*;

/// Strategy for incident types
pub fn incident_type_strategy() -> impl Strategy<Value = IncidentType> {
    proptest::sample::select(IncidentType::ALL.to_vec())
}

/// Strategy for vehicle types
pub fn vehicle_type_strategy() -> impl Strategy<Value = VehicleType> {
    proptest::sample::select(VehicleType::ALL.to_vec())
}

/// Strategy for text that is not blank after trimming
pub fn non_blank_text_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9][A-Za-z0-9 .,'-]{0,40}"
}

/// Strategy for well-formed email addresses
pub fn email_strategy() -> impl Strategy<Value = String> {
    ("[a-z]{1,12}", "[a-z]{1,12}", prop_oneof![Just("com"), Just("org"), Just("net")])
        .prop_map(|(user, domain, tld)| format!("{}@{}.{}", user, domain, tld))
}

/// Strategy for incident dates between 2000 and 2030, formatted YYYY-MM-DD
pub fn incident_date_strategy() -> impl Strategy<Value = String> {
    (0i64..11_000).prop_map(|offset| {
        let base = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        (base + chrono::Duration::days(offset))
            .format("%Y-%m-%d")
            .to_string()
    })
}

/// Strategy for complete drafts without a photo
pub fn valid_draft_strategy() -> impl Strategy<Value = ClaimDraft> {
    (
        (
            non_blank_text_strategy(),
            email_strategy(),
            "[0-9]{3}-[0-9]{4}",
            "POL[0-9]{3,8}",
        ),
        (
            incident_date_strategy(),
            incident_type_strategy(),
            non_blank_text_strategy(),
            non_blank_text_strategy(),
            vehicle_type_strategy(),
        ),
    )
        .prop_map(
            |(
                (customer_name, email, phone, policy_number),
                (incident_date, incident_type, description, vehicle_brand, vehicle_type),
            )| ClaimDraft {
                customer_name,
                email,
                phone,
                policy_number,
                incident_date,
                incident_type: Some(incident_type),
                description,
                vehicle_brand,
                vehicle_type: Some(vehicle_type),
                attached_image: None,
            },
        )
}

/// Strategy for one of the customer-step fields
pub fn customer_field_strategy() -> impl Strategy<Value = ClaimField> {
    proptest::sample::select(vec![
        ClaimField::CustomerName,
        ClaimField::Email,
        ClaimField::Phone,
        ClaimField::PolicyNumber,
    ])
}

/// Strategy for one of the incident-step fields
pub fn incident_field_strategy() -> impl Strategy<Value = ClaimField> {
    proptest::sample::select(vec![
        ClaimField::IncidentDate,
        ClaimField::IncidentType,
        ClaimField::Description,
        ClaimField::VehicleBrand,
        ClaimField::VehicleType,
    ])
}

/// A realistic complete draft with random names and text
pub fn fake_draft() -> ClaimDraft {
    ClaimDraft {
        customer_name: Name().fake(),
        email: SafeEmail().fake(),
        phone: format!("555-{:04}", (0u32..10_000).fake::<u32>()),
        policy_number: format!("POL{}", (100u32..999_999).fake::<u32>()),
        incident_date: "2024-03-15".to_string(),
        incident_type: Some(IncidentType::Theft),
        description: Sentence(3..8).fake(),
        vehicle_brand: "Honda".to_string(),
        vehicle_type: Some(VehicleType::TwoWheeler),
        attached_image: None,
    }
}
