//! Claims domain errors

use thiserror::Error;

use core_kernel::{ClaimNumber, PortError};

use crate::draft::ClaimField;
use crate::intake::IntakeStep;
use crate::validation::FieldErrors;

/// Message shown to the user for any failed submission attempt
pub const SUBMISSION_FAILED_MESSAGE: &str = "There was a problem submitting your claim.";

/// Errors raised while editing a claim draft or handling claim records
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("Unknown claim field: {0}")]
    UnknownField(String),

    #[error("Invalid value '{value}' for {field}")]
    InvalidFieldValue { field: ClaimField, value: String },

    #[error("Unknown claim status: {0}")]
    UnknownStatus(String),

    #[error("Unsupported attachment type: {0}")]
    UnsupportedAttachment(String),

    #[error("Claim draft is missing {0}")]
    MissingField(ClaimField),

    #[error("Invalid incident date: {0}")]
    InvalidIncidentDate(String),
}

/// Errors that end a submission attempt
///
/// Every variant leaves the draft untouched so the user can retry.
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("Claims can only be submitted from the review step (currently on {0})")]
    NotOnReview(IntakeStep),

    #[error("Claim draft has {} invalid or missing field(s)", .0.len())]
    Validation(FieldErrors),

    #[error("Damage assessment failed: {0}")]
    Enrichment(#[source] PortError),

    #[error("Claim storage failed: {0}")]
    Storage(#[source] PortError),

    #[error("Claim {0} could not be read back after saving")]
    StorageInconsistency(ClaimNumber),

    #[error("Claim record could not be assembled: {0}")]
    Assembly(#[source] ClaimError),
}

impl SubmissionError {
    /// The single message surfaced to the user for this failure
    pub fn user_message(&self) -> &'static str {
        match self {
            SubmissionError::NotOnReview(_) | SubmissionError::Validation(_) => {
                "Please complete all required fields before submitting."
            }
            _ => SUBMISSION_FAILED_MESSAGE,
        }
    }
}
