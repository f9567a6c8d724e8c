//! Error taxonomy for a download run

use std::path::PathBuf;

use thiserror::Error;

use crate::prompt::PromptError;
use crate::transport::FetchError;

/// Every way a run can end without writing a file
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The user interrupted or escaped a prompt
    #[error("cancelled")]
    Cancelled,

    #[error("prompt failed: {0}")]
    Prompt(String),

    /// The hosting API answered with a status >= 400
    #[error("{message}")]
    Upstream { status: u16, message: String },

    #[error("No releases found")]
    NoReleases,

    /// A response body did not match the expected record shape
    #[error("unexpected response from {what}: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Transport(#[from] FetchError),

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The prompt returned a choice that is not in the list it was given
    #[error("no entry named {0:?}")]
    UnknownSelection(String),
}

impl WorkflowError {
    /// Process exit status for this failure
    pub fn exit_code(&self) -> i32 {
        1
    }

    /// Whether the user should see a message for this failure
    pub fn is_silent(&self) -> bool {
        matches!(self, WorkflowError::Cancelled)
    }
}

impl From<PromptError> for WorkflowError {
    fn from(e: PromptError) -> Self {
        match e {
            PromptError::Cancelled => WorkflowError::Cancelled,
            PromptError::Failed(msg) => WorkflowError::Prompt(msg),
        }
    }
}
