use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::{UserRole, ViewId};
use crate::navigation::ResolvedView;
use crate::state::AppState;
use crate::store::{PersistedState, StatePatch};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigateRequest {
    pub view: ViewId,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleRequest {
    pub role: UserRole,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetRoleRequest {
    pub target_role: String,
}

/// GET /api/v1/view
pub async fn handle_get_view(State(state): State<AppState>) -> Json<ResolvedView> {
    Json(state.ctx.view().await)
}

/// GET /api/v1/history
pub async fn handle_get_history(State(state): State<AppState>) -> Json<Vec<ViewId>> {
    Json(state.ctx.history().await)
}

/// GET /api/v1/state
pub async fn handle_get_state(State(state): State<AppState>) -> Json<PersistedState> {
    Json(state.ctx.state().await)
}

/// PATCH /api/v1/state
/// Merges the given fields into the saved record.
pub async fn handle_save_state(
    State(state): State<AppState>,
    Json(patch): Json<StatePatch>,
) -> Result<Json<PersistedState>, AppError> {
    Ok(Json(state.ctx.save_state(patch).await?))
}

/// POST /api/v1/navigate
pub async fn handle_navigate(
    State(state): State<AppState>,
    Json(req): Json<NavigateRequest>,
) -> Json<ResolvedView> {
    Json(state.ctx.navigate(req.view).await)
}

/// POST /api/v1/back
pub async fn handle_back(State(state): State<AppState>) -> Json<ResolvedView> {
    Json(state.ctx.go_back().await)
}

/// POST /api/v1/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ResolvedView>, AppError> {
    Ok(Json(state.ctx.login(&req.name).await?))
}

/// POST /api/v1/role
pub async fn handle_select_role(
    State(state): State<AppState>,
    Json(req): Json<RoleRequest>,
) -> Result<Json<ResolvedView>, AppError> {
    Ok(Json(state.ctx.select_role(req.role).await?))
}

/// PUT /api/v1/target-role
pub async fn handle_set_target_role(
    State(state): State<AppState>,
    Json(req): Json<TargetRoleRequest>,
) -> Result<Json<ResolvedView>, AppError> {
    Ok(Json(state.ctx.set_target_role(req.target_role).await?))
}

/// POST /api/v1/sign-out
pub async fn handle_sign_out(
    State(state): State<AppState>,
) -> Result<Json<ResolvedView>, AppError> {
    Ok(Json(state.ctx.sign_out().await?))
}
