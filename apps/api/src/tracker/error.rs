use thiserror::Error;
use uuid::Uuid;

/// Failures raised by tracker operations. Every variant aborts only the operation that
/// produced it; session state is left exactly as it was before the call.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error(
        "The uploaded file is missing the following required headers: {}",
        .missing.join(", ")
    )]
    MissingHeaders { missing: Vec<String> },

    #[error("The ID already exists. Please use a different ID.")]
    DuplicateId { id: String },

    #[error("No job application with ID '{id}'")]
    NotFound { id: String },

    #[error("Unknown checklist task '{task}'")]
    UnknownTask { task: String },

    #[error("Line {line}: invalid value '{value}' in column '{column}'")]
    InvalidField {
        line: u64,
        column: &'static str,
        value: String,
    },

    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session {session_id} not found or expired")]
    SessionNotFound { session_id: Uuid },
}
