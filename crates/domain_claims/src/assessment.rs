//! Damage assessment returned by the damage detection service

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Result of analysing a damage photo
///
/// Only present on a claim when a photo was attached and the service
/// answered successfully. Amounts travel as JSON numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DamageAssessment {
    /// Free-form severity label, e.g. "minor" or "severe"
    pub severity: String,
    /// Estimated repair cost
    #[serde(with = "rust_decimal::serde::float")]
    pub estimated_cost: Decimal,
    /// Estimated repair time in days
    #[serde(with = "rust_decimal::serde::float")]
    pub repair_time: Decimal,
    pub notes: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_accepts_numeric_service_payload() {
        let json = r#"{"severity":"moderate","estimatedCost":1250.5,"repairTime":3,"notes":"rear bumper"}"#;
        let assessment: DamageAssessment = serde_json::from_str(json).unwrap();

        assert_eq!(assessment.severity, "moderate");
        assert_eq!(assessment.estimated_cost, dec!(1250.5));
        assert_eq!(assessment.repair_time, dec!(3));
    }

    #[test]
    fn test_amounts_serialize_as_numbers() {
        let assessment = DamageAssessment {
            severity: "severe".to_string(),
            estimated_cost: dec!(8750.50),
            repair_time: dec!(14),
            notes: "frame damage".to_string(),
        };

        let json = serde_json::to_value(&assessment).unwrap();
        assert_eq!(json["estimatedCost"], serde_json::json!(8750.5));
        assert_eq!(json["repairTime"], serde_json::json!(14.0));
    }
}
