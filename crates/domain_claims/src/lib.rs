//! Claim Intake Domain
//!
//! This crate implements the multi-step intake of a motor claim: capturing
//! customer and incident details, attaching an optional damage photo,
//! gating progress on validation, and submitting the finished claim.
//!
//! # Intake Flow
//!
//! ```text
//! Customer -> Incident -> Evidence -> Review -> (submit) -> /claims/{id}
//! ```
//!
//! Submission draws a 12-digit claim number, asks the damage detection
//! service to assess the photo (when one is attached), saves the record
//! through a [`ClaimStore`] and reads it back before reporting success.

pub mod claim;
pub mod assessment;
pub mod draft;
pub mod validation;
pub mod intake;
pub mod submission;
pub mod controller;
pub mod ports;
pub mod adapters;
pub mod error;

pub use claim::{ClaimRecord, ClaimStatus, IncidentType, VehicleType};
pub use assessment::DamageAssessment;
pub use draft::{AttachedImage, ClaimDraft, ClaimField};
pub use validation::{ClaimDraftValidator, FieldErrors, FieldValidator};
pub use intake::{IntakeForm, IntakeStep, StepChange};
pub use submission::{SubmissionOptions, SubmissionOrchestrator};
pub use controller::{AdvanceOutcome, IntakeController, IntakePhase, Navigation, SubmitOutcome};
pub use ports::{ClaimStore, DamageAssessor};
pub use adapters::{DamageDetectionConfig, HttpDamageAssessor};
pub use error::{ClaimError, SubmissionError, SUBMISSION_FAILED_MESSAGE};

#[cfg(any(test, feature = "mock"))]
pub use ports::mock::{MockClaimStore, MockDamageAssessor};
