pub mod features;
pub mod health;
pub mod session;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Navigation & identity
        .route("/api/v1/view", get(session::handle_get_view))
        .route("/api/v1/history", get(session::handle_get_history))
        .route(
            "/api/v1/state",
            get(session::handle_get_state).patch(session::handle_save_state),
        )
        .route("/api/v1/navigate", post(session::handle_navigate))
        .route("/api/v1/back", post(session::handle_back))
        .route("/api/v1/login", post(session::handle_login))
        .route("/api/v1/role", post(session::handle_select_role))
        .route("/api/v1/target-role", put(session::handle_set_target_role))
        .route("/api/v1/sign-out", post(session::handle_sign_out))
        // Student features
        .route(
            "/api/v1/resume/analyze",
            post(features::handle_analyze_resume),
        )
        .route(
            "/api/v1/resume/upload",
            post(features::handle_upload_resume).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route(
            "/api/v1/skill-gap/analyze",
            post(features::handle_analyze_skill_gap),
        )
        .route(
            "/api/v1/roadmap/generate",
            post(features::handle_generate_roadmap),
        )
        .route(
            "/api/v1/roadmap/weeks/:week/complete",
            post(features::handle_toggle_week),
        )
        .route(
            "/api/v1/roadmap/weeks/:week/expand",
            post(features::handle_expand_week),
        )
        .route("/api/v1/voice/analyze", post(features::handle_analyze_voice))
        .route("/api/v1/interview-prep", post(features::handle_interview_prep))
        // Recruiter shortlist
        .route(
            "/api/v1/shortlist",
            get(features::handle_get_shortlist).patch(features::handle_configure_shortlist),
        )
        .route("/api/v1/shortlist/skills", post(features::handle_add_skill))
        .route(
            "/api/v1/shortlist/skills/:skill",
            delete(features::handle_remove_skill),
        )
        .route("/api/v1/shortlist/run", post(features::handle_run_shortlist))
        .route(
            "/api/v1/shortlist/candidates/:id/select",
            post(features::handle_select_candidate),
        )
        .with_state(state)
}
