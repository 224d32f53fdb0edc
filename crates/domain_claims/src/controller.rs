//! Intake controller: one claim intake session
//!
//! Wraps the [`IntakeForm`] state machine with the submission flow. While a
//! submission is running the controller is busy and ignores further submit
//! requests; they are dropped, not queued. A failed submission returns the
//! controller to the review step so the user can try again.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

use core_kernel::{ClaimNumber, IntakeSessionId};

use crate::claim::ClaimRecord;
use crate::draft::{AttachedImage, ClaimDraft, ClaimField};
use crate::error::SubmissionError;
use crate::intake::{IntakeForm, IntakeStep, StepChange};
use crate::submission::SubmissionOrchestrator;
use crate::validation::FieldErrors;

/// Where the UI should go after a successful submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Detail view of a stored claim
    ClaimDetail(ClaimNumber),
}

impl Navigation {
    /// Route of the target view
    pub fn path(&self) -> String {
        match self {
            Navigation::ClaimDetail(id) => format!("/claims/{}", id),
        }
    }
}

/// Coarse lifecycle of a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntakePhase {
    Editing,
    Submitting,
    Submitted(ClaimNumber),
}

/// Outcome of a submit request
#[derive(Debug)]
pub enum SubmitOutcome {
    Submitted {
        record: ClaimRecord,
        navigation: Navigation,
    },
    Failed(SubmissionError),
    /// Busy or already submitted
    Ignored,
}

impl SubmitOutcome {
    pub fn is_submitted(&self) -> bool {
        matches!(self, SubmitOutcome::Submitted { .. })
    }

    /// Message for the user when the attempt failed
    pub fn error_message(&self) -> Option<&'static str> {
        match self {
            SubmitOutcome::Failed(err) => Some(err.user_message()),
            _ => None,
        }
    }
}

/// Outcome of the "next" action
#[derive(Debug)]
pub enum AdvanceOutcome {
    Moved(IntakeStep),
    Blocked(IntakeStep),
    Submit(SubmitOutcome),
}

/// Clears the busy flag when the submission ends, even if it is cancelled
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Controller for a single intake session
pub struct IntakeController {
    session_id: IntakeSessionId,
    form: Mutex<IntakeForm>,
    busy: AtomicBool,
    orchestrator: SubmissionOrchestrator,
}

impl fmt::Debug for IntakeController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntakeController")
            .field("session_id", &self.session_id)
            .field("busy", &self.busy)
            .finish_non_exhaustive()
    }
}

impl IntakeController {
    /// Starts a session with an empty draft and the default validation rules
    pub fn new(orchestrator: SubmissionOrchestrator) -> Self {
        let form = IntakeForm::default();
        let session_id = IntakeSessionId::new_v7();
        debug!(session = %session_id, "Intake session started");
        Self {
            session_id,
            form: Mutex::new(form),
            busy: AtomicBool::new(false),
            orchestrator,
        }
    }

    pub fn session_id(&self) -> IntakeSessionId {
        self.session_id
    }

    fn form(&self) -> MutexGuard<'_, IntakeForm> {
        self.form.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub fn phase(&self) -> IntakePhase {
        if let Some(id) = self.form().submitted() {
            return IntakePhase::Submitted(id.clone());
        }
        if self.is_busy() {
            IntakePhase::Submitting
        } else {
            IntakePhase::Editing
        }
    }

    pub fn current_step(&self) -> IntakeStep {
        self.form().step()
    }

    /// Copy of the current draft
    pub fn draft(&self) -> ClaimDraft {
        self.form().draft().clone()
    }

    pub fn errors(&self) -> FieldErrors {
        self.form().errors()
    }

    pub fn is_step_complete(&self, step: IntakeStep) -> bool {
        self.form().is_step_complete(step)
    }

    /// Whether the UI should enable the control for this step
    pub fn can_jump_to(&self, step: IntakeStep) -> bool {
        self.form().can_enter(step)
    }

    pub fn review_summary(&self) -> Vec<(&'static str, String)> {
        self.form().draft().review_summary()
    }

    /// Edits a field; ignored while submitting or after submission
    pub fn set_field(&self, field: ClaimField, value: &str) -> bool {
        if !self.accepts_edits() {
            return false;
        }
        self.form().set_field(field, value);
        true
    }

    pub fn attach_image(&self, image: AttachedImage) -> bool {
        if !self.accepts_edits() {
            return false;
        }
        debug!(session = %self.session_id, file = image.file_name(), "Image attached");
        self.form().attach_image(image);
        true
    }

    pub fn clear_image(&self) -> bool {
        if !self.accepts_edits() {
            return false;
        }
        self.form().clear_image();
        true
    }

    pub fn retreat(&self) -> IntakeStep {
        if self.is_busy() {
            return self.current_step();
        }
        self.form().retreat()
    }

    pub fn jump_to(&self, step: IntakeStep) -> bool {
        if self.is_busy() {
            return false;
        }
        self.form().jump_to(step)
    }

    /// "Next" action: moves forward, or submits when on the review step
    pub async fn advance(&self) -> AdvanceOutcome {
        if self.is_busy() {
            return AdvanceOutcome::Submit(SubmitOutcome::Ignored);
        }
        let change = self.form().advance();
        match change {
            StepChange::Moved(step) => AdvanceOutcome::Moved(step),
            StepChange::Unchanged(step) => AdvanceOutcome::Blocked(step),
            StepChange::SubmitRequested => AdvanceOutcome::Submit(self.submit().await),
        }
    }

    /// Submits the draft from the review step
    pub async fn submit(&self) -> SubmitOutcome {
        if self.busy.swap(true, Ordering::AcqRel) {
            debug!(session = %self.session_id, "Submission already in progress, ignoring");
            return SubmitOutcome::Ignored;
        }
        let _busy = BusyGuard(&self.busy);

        let snapshot = {
            let form = self.form();
            if form.submitted().is_some() {
                return SubmitOutcome::Ignored;
            }
            form.submission_snapshot()
        };
        let draft = match snapshot {
            Ok(draft) => draft,
            Err(err) => return SubmitOutcome::Failed(err),
        };

        match self.orchestrator.submit(&draft).await {
            Ok(record) => {
                self.form().mark_submitted(record.id.clone());
                let navigation = Navigation::ClaimDetail(record.id.clone());
                info!(session = %self.session_id, claim_id = %record.id, "Intake complete");
                SubmitOutcome::Submitted { record, navigation }
            }
            Err(err) => {
                warn!(session = %self.session_id, error = %err, "Submission error");
                SubmitOutcome::Failed(err)
            }
        }
    }

    fn accepts_edits(&self) -> bool {
        !self.is_busy() && self.form().submitted().is_none()
    }
}
