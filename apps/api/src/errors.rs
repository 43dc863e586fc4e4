use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::tracker::error::TrackerError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Tracker(#[from] TrackerError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String, Option<Value>) {
        match self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                msg.clone(),
                None,
            ),
            AppError::Tracker(e) => match e {
                TrackerError::MissingHeaders { missing } => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "MISSING_HEADERS",
                    e.to_string(),
                    Some(json!({ "missing_headers": missing })),
                ),
                TrackerError::InvalidField { .. } | TrackerError::Csv(_) => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "INVALID_FILE",
                    e.to_string(),
                    None,
                ),
                TrackerError::DuplicateId { id } => (
                    StatusCode::CONFLICT,
                    "DUPLICATE_ID",
                    e.to_string(),
                    Some(json!({ "id": id })),
                ),
                TrackerError::NotFound { .. } | TrackerError::SessionNotFound { .. } => {
                    (StatusCode::NOT_FOUND, "NOT_FOUND", e.to_string(), None)
                }
                TrackerError::UnknownTask { .. } => (
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    e.to_string(),
                    None,
                ),
                TrackerError::Io(err) => {
                    tracing::error!("I/O error: {err}");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal server error occurred".to_string(),
                        None,
                    )
                }
            },
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                    None,
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = self.parts();

        let mut error = json!({
            "code": code,
            "message": message
        });
        if let Some(details) = details {
            error["details"] = details;
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_headers_maps_to_422_with_details() {
        let err = AppError::from(TrackerError::MissingHeaders {
            missing: vec!["ID".to_string(), "Thank You".to_string()],
        });
        let (status, code, message, details) = err.parts();
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(code, "MISSING_HEADERS");
        assert_eq!(
            message,
            "The uploaded file is missing the following required headers: ID, Thank You"
        );
        assert_eq!(details.unwrap()["missing_headers"][1], "Thank You");
    }

    #[test]
    fn test_duplicate_id_maps_to_conflict() {
        let err = AppError::from(TrackerError::DuplicateId { id: "1".into() });
        let (status, code, message, _) = err.parts();
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(code, "DUPLICATE_ID");
        assert_eq!(message, "The ID already exists. Please use a different ID.");
    }

    #[test]
    fn test_not_found_variants_map_to_404() {
        let job = AppError::from(TrackerError::NotFound { id: "9".into() });
        let session = AppError::from(TrackerError::SessionNotFound {
            session_id: uuid::Uuid::nil(),
        });
        assert_eq!(job.parts().0, StatusCode::NOT_FOUND);
        assert_eq!(session.parts().0, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_internal_hides_detail() {
        let err = AppError::Internal(anyhow::anyhow!("secret path /etc/x"));
        let (status, _, message, _) = err.parts();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!message.contains("secret"));
    }
}
