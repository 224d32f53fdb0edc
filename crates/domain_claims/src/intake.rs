//! Intake step state machine
//!
//! The form walks through four strictly ordered steps:
//!
//! ```text
//! Customer -> Incident -> Evidence -> Review
//! ```
//!
//! A step counts as complete when its required fields are filled and the
//! draft has no outstanding validation errors at all. Jumping to a step
//! needs every earlier step complete; so does entering Review by advancing.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use core_kernel::ClaimNumber;

use crate::draft::{AttachedImage, ClaimDraft, ClaimField};
use crate::error::SubmissionError;
use crate::validation::{ClaimDraftValidator, FieldErrors, FieldValidator};

/// One stage of the intake flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntakeStep {
    Customer,
    Incident,
    Evidence,
    Review,
}

impl IntakeStep {
    pub const ALL: [IntakeStep; 4] = [
        IntakeStep::Customer,
        IntakeStep::Incident,
        IntakeStep::Evidence,
        IntakeStep::Review,
    ];

    pub fn next(self) -> Option<IntakeStep> {
        match self {
            IntakeStep::Customer => Some(IntakeStep::Incident),
            IntakeStep::Incident => Some(IntakeStep::Evidence),
            IntakeStep::Evidence => Some(IntakeStep::Review),
            IntakeStep::Review => None,
        }
    }

    pub fn previous(self) -> Option<IntakeStep> {
        match self {
            IntakeStep::Customer => None,
            IntakeStep::Incident => Some(IntakeStep::Customer),
            IntakeStep::Evidence => Some(IntakeStep::Incident),
            IntakeStep::Review => Some(IntakeStep::Evidence),
        }
    }

    /// Steps strictly before this one
    pub fn predecessors(self) -> impl Iterator<Item = IntakeStep> {
        IntakeStep::ALL.into_iter().take_while(move |step| *step < self)
    }

    /// Fields that must be filled for this step to be complete
    pub fn required_fields(self) -> &'static [ClaimField] {
        match self {
            IntakeStep::Customer => &[
                ClaimField::CustomerName,
                ClaimField::Email,
                ClaimField::Phone,
                ClaimField::PolicyNumber,
            ],
            IntakeStep::Incident => &[
                ClaimField::IncidentDate,
                ClaimField::IncidentType,
                ClaimField::Description,
                ClaimField::VehicleBrand,
                ClaimField::VehicleType,
            ],
            IntakeStep::Evidence | IntakeStep::Review => &[],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IntakeStep::Customer => "customer",
            IntakeStep::Incident => "incident",
            IntakeStep::Evidence => "evidence",
            IntakeStep::Review => "review",
        }
    }
}

impl fmt::Display for IntakeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of asking the form to move forward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepChange {
    /// The form is now on this step
    Moved(IntakeStep),
    /// The form stayed on this step
    Unchanged(IntakeStep),
    /// Advancing from Review means submitting
    SubmitRequested,
}

/// Synchronous intake state: current step, draft and validation status
///
/// Validation runs over the whole draft after every edit. Only errors on
/// fields the user has edited are outstanding, so an untouched incident
/// field does not block the customer step.
pub struct IntakeForm {
    step: IntakeStep,
    draft: ClaimDraft,
    validator: Arc<dyn FieldValidator>,
    touched: BTreeSet<ClaimField>,
    validation: FieldErrors,
    rejected: FieldErrors,
    submitted: Option<ClaimNumber>,
}

impl Default for IntakeForm {
    fn default() -> Self {
        Self::new(Arc::new(ClaimDraftValidator))
    }
}

impl fmt::Debug for IntakeForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntakeForm")
            .field("step", &self.step)
            .field("draft", &self.draft)
            .field("touched", &self.touched)
            .field("submitted", &self.submitted)
            .finish()
    }
}

impl IntakeForm {
    /// Starts an empty form on the customer step
    pub fn new(validator: Arc<dyn FieldValidator>) -> Self {
        let draft = ClaimDraft::new();
        let validation = validator.validate(&draft);
        Self {
            step: IntakeStep::Customer,
            draft,
            validator,
            touched: BTreeSet::new(),
            validation,
            rejected: FieldErrors::new(),
            submitted: None,
        }
    }

    pub fn step(&self) -> IntakeStep {
        self.step
    }

    pub fn draft(&self) -> &ClaimDraft {
        &self.draft
    }

    /// Claim number of the successful submission, once there is one
    pub fn submitted(&self) -> Option<&ClaimNumber> {
        self.submitted.as_ref()
    }

    /// Updates one field and re-validates the whole draft
    pub fn set_field(&mut self, field: ClaimField, value: &str) {
        self.touched.insert(field);
        match self.draft.set(field, value) {
            Ok(()) => {
                self.rejected.remove(&field);
            }
            Err(err) => {
                self.rejected.insert(field, err.to_string());
            }
        }
        self.validation = self.validator.validate(&self.draft);
    }

    /// Replaces any attached photo
    pub fn attach_image(&mut self, image: AttachedImage) {
        self.draft.attached_image = Some(image);
    }

    pub fn clear_image(&mut self) {
        self.draft.attached_image = None;
    }

    /// Errors on edited fields plus rejected enumerated values
    pub fn errors(&self) -> FieldErrors {
        let mut outstanding: FieldErrors = self
            .validation
            .iter()
            .filter(|(field, _)| self.touched.contains(*field))
            .map(|(field, message)| (*field, message.clone()))
            .collect();
        for (field, message) in &self.rejected {
            outstanding.insert(*field, message.clone());
        }
        outstanding
    }

    /// Completeness predicate for a single step
    pub fn is_step_complete(&self, step: IntakeStep) -> bool {
        match step {
            IntakeStep::Customer | IntakeStep::Incident => {
                step.required_fields().iter().all(|field| self.draft.is_filled(*field))
                    && self.errors().is_empty()
            }
            IntakeStep::Evidence => true,
            IntakeStep::Review => false,
        }
    }

    /// True if every step before `step` is complete
    pub fn can_enter(&self, step: IntakeStep) -> bool {
        step.predecessors().all(|earlier| self.is_step_complete(earlier))
    }

    /// Moves to the next step; on Review asks for submission instead
    pub fn advance(&mut self) -> StepChange {
        if self.submitted.is_some() {
            return StepChange::Unchanged(self.step);
        }
        match self.step.next() {
            None => StepChange::SubmitRequested,
            Some(IntakeStep::Review) if !self.can_enter(IntakeStep::Review) => {
                StepChange::Unchanged(self.step)
            }
            Some(next) => {
                self.step = next;
                StepChange::Moved(next)
            }
        }
    }

    /// Moves to the previous step; no-op on the first step
    pub fn retreat(&mut self) -> IntakeStep {
        if self.submitted.is_none() {
            if let Some(previous) = self.step.previous() {
                self.step = previous;
            }
        }
        self.step
    }

    /// Jumps directly to a step if every earlier step is complete
    pub fn jump_to(&mut self, step: IntakeStep) -> bool {
        if self.submitted.is_some() || !self.can_enter(step) {
            return false;
        }
        self.step = step;
        true
    }

    /// Copy of the draft for submission, re-checked against a fresh validation
    pub fn submission_snapshot(&self) -> Result<ClaimDraft, SubmissionError> {
        if self.step != IntakeStep::Review {
            return Err(SubmissionError::NotOnReview(self.step));
        }

        let mut errors = self.validator.validate(&self.draft);
        for (field, message) in &self.rejected {
            errors.insert(*field, message.clone());
        }
        let filled = [IntakeStep::Customer, IntakeStep::Incident]
            .iter()
            .flat_map(|step| step.required_fields())
            .all(|field| self.draft.is_filled(*field));

        if !errors.is_empty() || !filled {
            return Err(SubmissionError::Validation(errors));
        }
        Ok(self.draft.clone())
    }

    /// Records a successful submission; the form accepts no further moves
    pub fn mark_submitted(&mut self, claim_id: ClaimNumber) {
        self.submitted = Some(claim_id);
    }
}
