//! Claim Intake CLI
//!
//! Wires the intake controller to the file-backed claim store and the HTTP
//! damage detection service, and exposes the commands behind the
//! `claim-intake` binary.
//!
//! # Commands
//!
//! - `register`: walks a draft through the intake steps and submits it
//! - `list`, `show`, `set-status`, `delete`: manage stored claims
//! - `check`: reports the health of both collaborators

pub mod config;
pub mod error;

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

use core_kernel::{ClaimNumber, HealthCheckResult, HealthCheckable};
use domain_claims::{
    AdvanceOutcome, AttachedImage, ClaimField, ClaimRecord, ClaimStatus, ClaimStore,
    HttpDamageAssessor, IntakeController, IntakeStep, Navigation, SubmissionError,
    SubmissionOrchestrator, SubmitOutcome,
};
use infra_db::JsonFileClaimStore;

pub use crate::config::IntakeConfig;
pub use crate::error::CliError;

/// Collaborators built from configuration
pub struct IntakeServices {
    pub store: Arc<JsonFileClaimStore>,
    pub assessor: Arc<HttpDamageAssessor>,
    pub orchestrator: SubmissionOrchestrator,
}

impl IntakeServices {
    pub fn from_config(config: &IntakeConfig) -> Result<Self, CliError> {
        let store = Arc::new(JsonFileClaimStore::new(config.storage()));
        let assessor = Arc::new(HttpDamageAssessor::new(config.damage_detection())?);
        let orchestrator = SubmissionOrchestrator::new(store.clone(), assessor.clone())
            .with_options(config.submission_options());

        Ok(Self {
            store,
            assessor,
            orchestrator,
        })
    }

    /// Starts a fresh intake session
    pub fn controller(&self) -> IntakeController {
        IntakeController::new(self.orchestrator.clone())
    }

    pub async fn health(&self) -> Vec<HealthCheckResult> {
        vec![
            self.store.health_check().await,
            self.assessor.health_check().await,
        ]
    }
}

/// Field values keyed by field, as typed by the user
pub type DraftInput = BTreeMap<ClaimField, String>;

/// Parses a draft file: a JSON object of camelCase field names to strings
pub fn parse_draft(json: &str) -> Result<DraftInput, CliError> {
    let raw: BTreeMap<String, serde_json::Value> =
        serde_json::from_str(json).map_err(|err| CliError::Draft(err.to_string()))?;

    let mut input = DraftInput::new();
    for (key, value) in raw {
        let field: ClaimField = key.parse()?;
        let text = match value {
            serde_json::Value::String(text) => text,
            serde_json::Value::Null => String::new(),
            other => {
                return Err(CliError::Draft(format!(
                    "{} must be a string, got {}",
                    key, other
                )))
            }
        };
        input.insert(field, text);
    }
    Ok(input)
}

/// Reads a photo from disk, detecting the content type from its bytes
pub async fn load_image(path: &Path) -> Result<AttachedImage, CliError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|err| CliError::io(path, err))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());

    let content_type = infer::get(&bytes)
        .map(|kind| kind.mime_type())
        .unwrap_or("application/octet-stream");
    debug!(file = %file_name, content_type, "Loaded damage photo");
    Ok(AttachedImage::new(file_name, content_type, bytes)?)
}

/// Result of a successful registration
#[derive(Debug)]
pub struct Registration {
    pub record: ClaimRecord,
    pub navigation: Navigation,
}

/// Walks the draft through every intake step and submits it
pub async fn register(
    controller: &IntakeController,
    input: &DraftInput,
    image: Option<AttachedImage>,
) -> Result<Registration, CliError> {
    for step in [IntakeStep::Customer, IntakeStep::Incident] {
        for (field, value) in input.iter().filter(|(field, _)| field.step() == step) {
            controller.set_field(*field, value);
        }
        advance_past(controller, step).await?;
    }

    if let Some(image) = image {
        controller.attach_image(image);
    }
    advance_past(controller, IntakeStep::Evidence).await?;

    debug!(session = %controller.session_id(), "Draft ready for review");
    match controller.advance().await {
        AdvanceOutcome::Submit(SubmitOutcome::Submitted { record, navigation }) => {
            info!(claim_id = %record.id, "Claim registered");
            Ok(Registration { record, navigation })
        }
        AdvanceOutcome::Submit(SubmitOutcome::Failed(err)) => Err(err.into()),
        AdvanceOutcome::Submit(SubmitOutcome::Ignored) => {
            Err(SubmissionError::NotOnReview(controller.current_step()).into())
        }
        AdvanceOutcome::Moved(step) | AdvanceOutcome::Blocked(step) => {
            Err(SubmissionError::NotOnReview(step).into())
        }
    }
}

async fn advance_past(controller: &IntakeController, step: IntakeStep) -> Result<(), CliError> {
    // the form only gates the move into review, so check the data steps here
    let ready = step == IntakeStep::Evidence || controller.is_step_complete(step);
    if ready {
        if let AdvanceOutcome::Moved(_) = controller.advance().await {
            return Ok(());
        }
    }

    // evidence is blocked by the steps before it
    let gating: Vec<IntakeStep> = match step {
        IntakeStep::Evidence => step.predecessors().collect(),
        _ => vec![step],
    };
    let draft = controller.draft();
    let mut errors = controller.errors();
    for field in gating.iter().flat_map(|step| step.required_fields()) {
        if !draft.is_filled(*field) {
            errors
                .entry(*field)
                .or_insert_with(|| format!("{} is required", field.label()));
        }
    }
    Err(CliError::Incomplete { step, errors })
}

/// Looks up a stored claim by its number
pub async fn show(store: &dyn ClaimStore, id: &str) -> Result<ClaimRecord, CliError> {
    let id: ClaimNumber = id.parse()?;
    store
        .get_by_id(&id)
        .await?
        .ok_or_else(|| CliError::NotFound(id.to_string()))
}

/// Changes the status of a stored claim
pub async fn set_status(
    store: &dyn ClaimStore,
    id: &str,
    status: &str,
) -> Result<ClaimRecord, CliError> {
    let id: ClaimNumber = id.parse()?;
    let status: ClaimStatus = status.parse()?;
    store
        .update_status(&id, status)
        .await?
        .ok_or_else(|| CliError::NotFound(id.to_string()))
}

/// Deletes a stored claim
pub async fn delete(store: &dyn ClaimStore, id: &str) -> Result<(), CliError> {
    let id: ClaimNumber = id.parse()?;
    if store.delete(&id).await? {
        Ok(())
    } else {
        Err(CliError::NotFound(id.to_string()))
    }
}
