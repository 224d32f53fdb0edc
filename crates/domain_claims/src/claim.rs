//! Claim record and its closed vocabularies

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::ClaimNumber;

use crate::assessment::DamageAssessment;
use crate::draft::{ClaimDraft, ClaimField};
use crate::error::ClaimError;

/// Date format accepted for the incident date
pub const INCIDENT_DATE_FORMAT: &str = "%Y-%m-%d";

/// What happened to the vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncidentType {
    Collision,
    Fire,
    Theft,
    Vandalism,
    Natural,
    Mechanical,
}

impl IncidentType {
    pub const ALL: [IncidentType; 6] = [
        IncidentType::Collision,
        IncidentType::Fire,
        IncidentType::Theft,
        IncidentType::Vandalism,
        IncidentType::Natural,
        IncidentType::Mechanical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IncidentType::Collision => "collision",
            IncidentType::Fire => "fire",
            IncidentType::Theft => "theft",
            IncidentType::Vandalism => "vandalism",
            IncidentType::Natural => "natural",
            IncidentType::Mechanical => "mechanical",
        }
    }
}

impl fmt::Display for IncidentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IncidentType {
    type Err = ClaimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IncidentType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ClaimError::InvalidFieldValue {
                field: ClaimField::IncidentType,
                value: s.to_string(),
            })
    }
}

/// Vehicle class by wheel count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleType {
    #[serde(rename = "2-wheeler")]
    TwoWheeler,
    #[serde(rename = "3-wheeler")]
    ThreeWheeler,
    #[serde(rename = "4-wheeler")]
    FourWheeler,
}

impl VehicleType {
    pub const ALL: [VehicleType; 3] = [
        VehicleType::TwoWheeler,
        VehicleType::ThreeWheeler,
        VehicleType::FourWheeler,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleType::TwoWheeler => "2-wheeler",
            VehicleType::ThreeWheeler => "3-wheeler",
            VehicleType::FourWheeler => "4-wheeler",
        }
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleType {
    type Err = ClaimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VehicleType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ClaimError::InvalidFieldValue {
                field: ClaimField::VehicleType,
                value: s.to_string(),
            })
    }
}

/// Processing status of a stored claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClaimStatus {
    /// Just registered through intake
    New,
    #[serde(rename = "In Review")]
    InReview,
    Approved,
    Rejected,
    Closed,
}

impl ClaimStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::New => "New",
            ClaimStatus::InReview => "In Review",
            ClaimStatus::Approved => "Approved",
            ClaimStatus::Rejected => "Rejected",
            ClaimStatus::Closed => "Closed",
        }
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClaimStatus {
    type Err = ClaimError;

    /// Accepts the display form in any case, with spaces, dashes or
    /// underscores between words ("In Review", "in-review", "in_review").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "new" => Ok(ClaimStatus::New),
            "inreview" => Ok(ClaimStatus::InReview),
            "approved" => Ok(ClaimStatus::Approved),
            "rejected" => Ok(ClaimStatus::Rejected),
            "closed" => Ok(ClaimStatus::Closed),
            _ => Err(ClaimError::UnknownStatus(s.to_string())),
        }
    }
}

/// A submitted claim as persisted by the record store
///
/// Serialized with camelCase keys so stored claims keep the layout of the
/// browser-side claim list they replace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimRecord {
    pub id: ClaimNumber,
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    pub policy_number: String,
    pub incident_date: NaiveDate,
    pub incident_type: IncidentType,
    pub description: String,
    pub vehicle_brand: String,
    pub vehicle_type: VehicleType,
    /// Preview reference of the attached photo
    pub image: Option<String>,
    pub status: ClaimStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub damage_assessment: Option<DamageAssessment>,
}

impl ClaimRecord {
    /// Builds a new record with status `New` from a completed draft
    ///
    /// Fails if the draft is missing an enumerated field or its incident
    /// date does not parse; callers are expected to have validated first.
    pub fn assemble(
        id: ClaimNumber,
        draft: &ClaimDraft,
        damage_assessment: Option<DamageAssessment>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ClaimError> {
        let incident_date = NaiveDate::parse_from_str(draft.incident_date.trim(), INCIDENT_DATE_FORMAT)
            .map_err(|_| ClaimError::InvalidIncidentDate(draft.incident_date.clone()))?;
        let incident_type = draft
            .incident_type
            .ok_or(ClaimError::MissingField(ClaimField::IncidentType))?;
        let vehicle_type = draft
            .vehicle_type
            .ok_or(ClaimError::MissingField(ClaimField::VehicleType))?;

        Ok(Self {
            id,
            customer_name: draft.customer_name.clone(),
            email: draft.email.clone(),
            phone: draft.phone.clone(),
            policy_number: draft.policy_number.clone(),
            incident_date,
            incident_type,
            description: draft.description.clone(),
            vehicle_brand: draft.vehicle_brand.clone(),
            vehicle_type,
            image: draft.attached_image.as_ref().map(|image| image.preview().to_string()),
            status: ClaimStatus::New,
            created_at,
            damage_assessment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_type_wire_names() {
        let json = serde_json::to_string(&VehicleType::FourWheeler).unwrap();
        assert_eq!(json, "\"4-wheeler\"");
        assert_eq!("2-wheeler".parse::<VehicleType>().unwrap(), VehicleType::TwoWheeler);
    }

    #[test]
    fn test_incident_type_rejects_unknown() {
        let err = "flood".parse::<IncidentType>().unwrap_err();
        assert!(matches!(err, ClaimError::InvalidFieldValue { field: ClaimField::IncidentType, .. }));
    }

    #[test]
    fn test_status_parsing_is_lenient() {
        assert_eq!("in-review".parse::<ClaimStatus>().unwrap(), ClaimStatus::InReview);
        assert_eq!("In Review".parse::<ClaimStatus>().unwrap(), ClaimStatus::InReview);
        assert_eq!("APPROVED".parse::<ClaimStatus>().unwrap(), ClaimStatus::Approved);
        assert!("pending".parse::<ClaimStatus>().is_err());
    }

    #[test]
    fn test_status_serializes_as_display_text() {
        assert_eq!(serde_json::to_string(&ClaimStatus::InReview).unwrap(), "\"In Review\"");
        assert_eq!(serde_json::to_string(&ClaimStatus::New).unwrap(), "\"New\"");
    }
}
