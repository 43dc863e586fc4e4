pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};

use crate::state::AppState;
use crate::tracker::handlers;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/sessions",
            post(handlers::handle_create_session).delete(handlers::handle_end_session),
        )
        // Job table
        .route(
            "/api/v1/jobs",
            get(handlers::handle_list_jobs).post(handlers::handle_add_job),
        )
        .route("/api/v1/jobs/import", post(handlers::handle_import))
        .route("/api/v1/jobs/export", get(handlers::handle_export))
        .route(
            "/api/v1/jobs/:id/checklist",
            put(handlers::handle_update_checklist),
        )
        // Session checklist
        .route(
            "/api/v1/checklist",
            get(handlers::handle_get_checklist).patch(handlers::handle_toggle_task),
        )
        .route(
            "/api/v1/checklist/reset",
            post(handlers::handle_reset_checklist),
        )
        // Menu
        .route("/api/v1/views/:mode", get(handlers::handle_view))
        .layer(upload_limit)
        .with_state(state)
}
