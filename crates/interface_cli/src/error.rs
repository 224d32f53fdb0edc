//! CLI error handling

use std::path::PathBuf;
use thiserror::Error;

use core_kernel::{CoreError, PortError};
use domain_claims::{ClaimError, FieldErrors, IntakeStep, SubmissionError};

/// CLI error types
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed draft file: {0}")]
    Draft(String),

    #[error("The {step} step is incomplete")]
    Incomplete { step: IntakeStep, errors: FieldErrors },

    #[error("{}", .0.user_message())]
    Submission(#[source] SubmissionError),

    #[error("Claim not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Claim(#[from] ClaimError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Port(#[from] PortError),
}

impl CliError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CliError::Io {
            path: path.into(),
            source,
        }
    }

    /// Field errors to show under the main message, if any
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            CliError::Incomplete { errors, .. } => Some(errors),
            CliError::Submission(SubmissionError::Validation(errors)) => Some(errors),
            _ => None,
        }
    }
}

impl From<SubmissionError> for CliError {
    fn from(err: SubmissionError) -> Self {
        CliError::Submission(err)
    }
}
