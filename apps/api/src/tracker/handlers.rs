//! Axum route handlers for the tracker API. Each handler serves one presentation intent and
//! answers with the state the page needs to redraw.

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Multipart, Path, Query, State},
    http::{header, request::Parts, StatusCode},
    response::IntoResponse,
    Json,
};
use bytes::Bytes;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job::{ChecklistFlags, NewJob};
use crate::state::AppState;
use crate::tracker::table::TableStore;
use crate::tracker::views::{
    AddJobForm, ChecklistView, Outcome, Page, TableView, UpdateJobView, ViewMode, ViewModel,
};

pub const SESSION_HEADER: &str = "x-session-id";

/// Field name the upload form uses for the CSV file.
const UPLOAD_FIELD: &str = "file";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Session id taken from the `x-session-id` header.
#[derive(Debug, Clone, Copy)]
pub struct SessionId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for SessionId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(SESSION_HEADER)
            .ok_or_else(|| AppError::Validation(format!("Missing {SESSION_HEADER} header")))?
            .to_str()
            .map_err(|_| AppError::Validation(format!("{SESSION_HEADER} must be ASCII")))?;
        Uuid::parse_str(raw.trim())
            .map(SessionId)
            .map_err(|_| AppError::Validation(format!("{SESSION_HEADER} must be a UUID")))
    }
}

#[derive(Debug, Serialize)]
pub struct SessionCreated {
    pub session_id: Uuid,
    pub page: Page,
}

#[derive(Debug, Deserialize)]
pub struct TaskToggle {
    pub task: String,
    pub value: bool,
}

#[derive(Debug, Deserialize)]
pub struct ViewQuery {
    pub id: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Sessions
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<SessionCreated>) {
    let mut sessions = state.sessions.lock().await;
    let session_id = sessions.create(Utc::now());
    let page = Page::new(ViewModel::Data(TableView::from(&TableStore::new())));
    (StatusCode::CREATED, Json(SessionCreated { session_id, page }))
}

/// DELETE /api/v1/sessions
pub async fn handle_end_session(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
) -> Result<StatusCode, AppError> {
    state.sessions.lock().await.end(session_id)?;
    Ok(StatusCode::NO_CONTENT)
}

// ────────────────────────────────────────────────────────────────────────────
// Job table
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/jobs
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
) -> Result<Json<TableView>, AppError> {
    let mut sessions = state.sessions.lock().await;
    let session = sessions.get_mut(session_id, Utc::now())?;
    debug!("Listing {} job(s) for session {session_id}", session.table.len());
    Ok(Json(TableView::from(&session.table)))
}

/// POST /api/v1/jobs
pub async fn handle_add_job(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
    Json(job): Json<NewJob>,
) -> Result<(StatusCode, Json<Outcome<TableView>>), AppError> {
    let mut sessions = state.sessions.lock().await;
    let session = sessions.get_mut(session_id, Utc::now())?;
    session.table.add_record(job)?;
    Ok((
        StatusCode::CREATED,
        Json(Outcome::new(
            "Job entry added successfully.",
            TableView::from(&session.table),
        )),
    ))
}

/// PUT /api/v1/jobs/:id/checklist
///
/// Replaces all nine checklist flags of one application.
pub async fn handle_update_checklist(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
    Path(id): Path<String>,
    Json(flags): Json<ChecklistFlags>,
) -> Result<Json<Outcome<TableView>>, AppError> {
    let mut sessions = state.sessions.lock().await;
    let session = sessions.get_mut(session_id, Utc::now())?;
    session.table.update_checklist(&id, flags)?;
    Ok(Json(Outcome::new(
        "Application status updated successfully!",
        TableView::from(&session.table),
    )))
}

/// POST /api/v1/jobs/import
///
/// Multipart upload with the CSV in the `file` field. The body is read completely before the
/// session is touched; the table is replaced only if the whole file validates.
pub async fn handle_import(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
    mut multipart: Multipart,
) -> Result<Json<Outcome<TableView>>, AppError> {
    let mut upload: Option<Bytes> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() == Some(UPLOAD_FIELD) {
            let file_name = field.file_name().unwrap_or("upload.csv").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
            debug!("Received {file_name} ({} bytes)", data.len());
            upload = Some(data);
        }
    }
    let upload = upload
        .ok_or_else(|| AppError::Validation(format!("Missing '{UPLOAD_FIELD}' field")))?;

    let mut sessions = state.sessions.lock().await;
    let session = sessions.get_mut(session_id, Utc::now())?;
    let rows = session.import(&upload)?;
    info!("Session {session_id} imported {rows} row(s)");

    Ok(Json(Outcome::new(
        "File uploaded and validated successfully!",
        TableView::from(&session.table),
    )))
}

/// GET /api/v1/jobs/export
///
/// Downloads the current table as CSV.
pub async fn handle_export(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
) -> Result<impl IntoResponse, AppError> {
    let mut sessions = state.sessions.lock().await;
    let session = sessions.get_mut(session_id, Utc::now())?;
    let body = session.export()?;
    info!(
        "Session {session_id} exported {} row(s)",
        session.table.len()
    );

    let disposition = format!(
        "attachment; filename=\"{}\"",
        state.config.export_filename
    );
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        Bytes::from(body),
    ))
}

// ────────────────────────────────────────────────────────────────────────────
// Session checklist
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/checklist
pub async fn handle_get_checklist(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
) -> Result<Json<ChecklistView>, AppError> {
    let mut sessions = state.sessions.lock().await;
    let session = sessions.get_mut(session_id, Utc::now())?;
    Ok(Json(ChecklistView::from(&session.checklist)))
}

/// PATCH /api/v1/checklist
pub async fn handle_toggle_task(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
    Json(req): Json<TaskToggle>,
) -> Result<Json<Outcome<ChecklistView>>, AppError> {
    let mut sessions = state.sessions.lock().await;
    let session = sessions.get_mut(session_id, Utc::now())?;
    session.checklist.toggle(&req.task, req.value)?;

    let progress = session.checklist.progress();
    Ok(Json(Outcome::new(
        format!(
            "Progress: {} out of {} tasks completed",
            progress.completed, progress.total
        ),
        ChecklistView::from(&session.checklist),
    )))
}

/// POST /api/v1/checklist/reset
pub async fn handle_reset_checklist(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
) -> Result<Json<Outcome<ChecklistView>>, AppError> {
    let mut sessions = state.sessions.lock().await;
    let session = sessions.get_mut(session_id, Utc::now())?;
    session.checklist.reset();
    Ok(Json(Outcome::new(
        "Checklist reset.",
        ChecklistView::from(&session.checklist),
    )))
}

// ────────────────────────────────────────────────────────────────────────────
// Menu
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/views/:mode
///
/// `mode` is one of `data`, `add-job`, `update-job`, `checklist`. For `update-job` the
/// optional `id` query picks the application; the first row is used otherwise.
pub async fn handle_view(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
    Path(mode): Path<ViewMode>,
    Query(query): Query<ViewQuery>,
) -> Result<Json<Page>, AppError> {
    let mut sessions = state.sessions.lock().await;
    let session = sessions.get_mut(session_id, Utc::now())?;

    let view = match mode {
        ViewMode::Data => ViewModel::Data(TableView::from(&session.table)),
        ViewMode::AddJob => ViewModel::AddJob(AddJobForm::today()),
        ViewMode::UpdateJob => {
            ViewModel::UpdateJob(UpdateJobView::build(&session.table, query.id.as_deref())?)
        }
        ViewMode::Checklist => ViewModel::Checklist(ChecklistView::from(&session.checklist)),
    };
    Ok(Json(Page::new(view)))
}
