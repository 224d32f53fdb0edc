//! In-progress claim data captured by the intake form

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::claim::{IncidentType, VehicleType};
use crate::error::ClaimError;
use crate::intake::IntakeStep;

/// The editable fields of a claim draft
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClaimField {
    CustomerName,
    Email,
    Phone,
    PolicyNumber,
    IncidentDate,
    IncidentType,
    Description,
    VehicleBrand,
    VehicleType,
}

impl ClaimField {
    pub const ALL: [ClaimField; 9] = [
        ClaimField::CustomerName,
        ClaimField::Email,
        ClaimField::Phone,
        ClaimField::PolicyNumber,
        ClaimField::IncidentDate,
        ClaimField::IncidentType,
        ClaimField::Description,
        ClaimField::VehicleBrand,
        ClaimField::VehicleType,
    ];

    /// Wire name of the field, as used in stored records and draft files
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimField::CustomerName => "customerName",
            ClaimField::Email => "email",
            ClaimField::Phone => "phone",
            ClaimField::PolicyNumber => "policyNumber",
            ClaimField::IncidentDate => "incidentDate",
            ClaimField::IncidentType => "incidentType",
            ClaimField::Description => "description",
            ClaimField::VehicleBrand => "vehicleBrand",
            ClaimField::VehicleType => "vehicleType",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            ClaimField::CustomerName => "Full Name",
            ClaimField::Email => "Email",
            ClaimField::Phone => "Phone Number",
            ClaimField::PolicyNumber => "Policy Number",
            ClaimField::IncidentDate => "Date of Incident",
            ClaimField::IncidentType => "Type of Incident",
            ClaimField::Description => "Description",
            ClaimField::VehicleBrand => "Brand",
            ClaimField::VehicleType => "Vehicle Type",
        }
    }

    /// The intake step on which this field is entered
    pub fn step(&self) -> IntakeStep {
        match self {
            ClaimField::CustomerName
            | ClaimField::Email
            | ClaimField::Phone
            | ClaimField::PolicyNumber => IntakeStep::Customer,
            _ => IntakeStep::Incident,
        }
    }
}

impl fmt::Display for ClaimField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClaimField {
    type Err = ClaimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ClaimField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| ClaimError::UnknownField(s.to_string()))
    }
}

/// A damage photo attached to a draft
///
/// The preview reference stands in for a browser object URL: it is unique
/// per attachment and is what the stored claim keeps as its image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachedImage {
    file_name: String,
    content_type: String,
    bytes: Vec<u8>,
    preview: String,
}

impl AttachedImage {
    /// Wraps an uploaded file; only `image/*` content types are accepted
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<Self, ClaimError> {
        let content_type = content_type.into();
        if !content_type.starts_with("image/") {
            return Err(ClaimError::UnsupportedAttachment(content_type));
        }

        Ok(Self {
            file_name: file_name.into(),
            content_type,
            bytes,
            preview: format!("blob:claim-intake/{}", Uuid::new_v4()),
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn preview(&self) -> &str {
        &self.preview
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Mutable claim data owned by one intake session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClaimDraft {
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    pub policy_number: String,
    /// Raw date input, expected as YYYY-MM-DD
    pub incident_date: String,
    pub incident_type: Option<IncidentType>,
    pub description: String,
    pub vehicle_brand: String,
    pub vehicle_type: Option<VehicleType>,
    #[serde(skip)]
    pub attached_image: Option<AttachedImage>,
}

impl ClaimDraft {
    /// Creates an empty draft
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of a field as text; unset enumerated fields are empty
    pub fn value(&self, field: ClaimField) -> &str {
        match field {
            ClaimField::CustomerName => &self.customer_name,
            ClaimField::Email => &self.email,
            ClaimField::Phone => &self.phone,
            ClaimField::PolicyNumber => &self.policy_number,
            ClaimField::IncidentDate => &self.incident_date,
            ClaimField::IncidentType => self.incident_type.map(|t| t.as_str()).unwrap_or(""),
            ClaimField::Description => &self.description,
            ClaimField::VehicleBrand => &self.vehicle_brand,
            ClaimField::VehicleType => self.vehicle_type.map(|t| t.as_str()).unwrap_or(""),
        }
    }

    /// True if the field holds a non-empty value
    pub fn is_filled(&self, field: ClaimField) -> bool {
        !self.value(field).is_empty()
    }

    /// Writes a field from its text form
    ///
    /// Enumerated fields accept only their wire names (or the empty string,
    /// which clears them). A rejected value leaves the field unset.
    pub fn set(&mut self, field: ClaimField, value: &str) -> Result<(), ClaimError> {
        match field {
            ClaimField::CustomerName => self.customer_name = value.to_string(),
            ClaimField::Email => self.email = value.to_string(),
            ClaimField::Phone => self.phone = value.to_string(),
            ClaimField::PolicyNumber => self.policy_number = value.to_string(),
            ClaimField::IncidentDate => self.incident_date = value.to_string(),
            ClaimField::Description => self.description = value.to_string(),
            ClaimField::VehicleBrand => self.vehicle_brand = value.to_string(),
            ClaimField::IncidentType => {
                self.incident_type = None;
                if !value.is_empty() {
                    self.incident_type = Some(value.parse()?);
                }
            }
            ClaimField::VehicleType => {
                self.vehicle_type = None;
                if !value.is_empty() {
                    self.vehicle_type = Some(value.parse()?);
                }
            }
        }
        Ok(())
    }

    /// Label/value pairs shown on the review step, in display order
    pub fn review_summary(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Name", self.customer_name.clone()),
            ("Email", self.email.clone()),
            ("Phone", self.phone.clone()),
            ("Policy #", self.policy_number.clone()),
            ("Date", self.incident_date.clone()),
            ("Type", self.value(ClaimField::IncidentType).to_string()),
            ("Brand", self.vehicle_brand.clone()),
            ("Vehicle", self.value(ClaimField::VehicleType).to_string()),
            ("Description", self.description.clone()),
        ]
    }
}
