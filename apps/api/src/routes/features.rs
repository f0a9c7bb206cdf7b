use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use bytes::Bytes;
use serde::Deserialize;

use crate::app::documents::{extract_pdf_text, PDF_CONTENT_TYPE};
use crate::app::features::ShortlistDraft;
use crate::errors::AppError;
use crate::models::{
    CandidateData, InterviewPrep, ResumeAnalysis, Roadmap, ShortlistResponse, SkillGapAnalysis,
    VoiceAnalysis,
};
use crate::navigation::ResolvedView;
use crate::state::AppState;

// ── Resume ──────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeRequest {
    pub resume_text: String,
    pub domain: Option<String>,
}

/// POST /api/v1/resume/analyze
pub async fn handle_analyze_resume(
    State(state): State<AppState>,
    Json(req): Json<ResumeRequest>,
) -> Result<Json<ResumeAnalysis>, AppError> {
    let analysis = state
        .ctx
        .analyze_resume(&req.resume_text, req.domain.as_deref())
        .await?;
    Ok(Json(analysis))
}

/// POST /api/v1/resume/upload
/// Multipart form: `file` (PDF) and an optional `domain`.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ResumeAnalysis>, AppError> {
    let mut file: Option<Bytes> = None;
    let mut domain: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                if let Some(content_type) = field.content_type() {
                    if content_type != PDF_CONTENT_TYPE {
                        return Err(AppError::Validation(format!(
                            "expected {PDF_CONTENT_TYPE}, got {content_type}"
                        )));
                    }
                }
                file = Some(field.bytes().await.map_err(bad_multipart)?);
            }
            Some("domain") => domain = Some(field.text().await.map_err(bad_multipart)?),
            _ => {}
        }
    }

    let file = file.ok_or_else(|| AppError::Validation("missing `file` field".into()))?;
    let resume_text = extract_pdf_text(file).await?;
    let analysis = state
        .ctx
        .analyze_resume(&resume_text, domain.as_deref())
        .await?;
    Ok(Json(analysis))
}

fn bad_multipart(e: axum::extract::multipart::MultipartError) -> AppError {
    AppError::Validation(format!("invalid multipart body: {e}"))
}

// ── Skill gap & roadmap ─────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SkillGapRequest {
    pub target_role: Option<String>,
}

/// POST /api/v1/skill-gap/analyze
pub async fn handle_analyze_skill_gap(
    State(state): State<AppState>,
    body: Option<Json<SkillGapRequest>>,
) -> Result<Json<SkillGapAnalysis>, AppError> {
    let req = body.map(|Json(req)| req).unwrap_or_default();
    Ok(Json(state.ctx.analyze_skill_gap(req.target_role).await?))
}

/// POST /api/v1/roadmap/generate
pub async fn handle_generate_roadmap(
    State(state): State<AppState>,
) -> Result<Json<Roadmap>, AppError> {
    Ok(Json(state.ctx.generate_roadmap().await?))
}

/// POST /api/v1/roadmap/weeks/:week/complete
pub async fn handle_toggle_week(
    State(state): State<AppState>,
    Path(week): Path<u32>,
) -> Result<Json<ResolvedView>, AppError> {
    Ok(Json(state.ctx.toggle_roadmap_week(week).await?))
}

/// POST /api/v1/roadmap/weeks/:week/expand
pub async fn handle_expand_week(
    State(state): State<AppState>,
    Path(week): Path<u32>,
) -> Result<Json<ResolvedView>, AppError> {
    Ok(Json(state.ctx.expand_roadmap_week(week).await?))
}

// ── Voice & interview prep ──────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceRequest {
    /// Base64 audio, bare or as a data URL.
    pub audio: String,
    pub mime_type: Option<String>,
}

/// POST /api/v1/voice/analyze
pub async fn handle_analyze_voice(
    State(state): State<AppState>,
    Json(req): Json<VoiceRequest>,
) -> Result<Json<VoiceAnalysis>, AppError> {
    let analysis = state
        .ctx
        .analyze_voice(&req.audio, req.mime_type.as_deref())
        .await?;
    Ok(Json(analysis))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewPrepRequest {
    pub jd_text: String,
}

/// POST /api/v1/interview-prep
pub async fn handle_interview_prep(
    State(state): State<AppState>,
    Json(req): Json<InterviewPrepRequest>,
) -> Result<Json<InterviewPrep>, AppError> {
    Ok(Json(state.ctx.prepare_interview(&req.jd_text).await?))
}

// ── Shortlist ───────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortlistConfigRequest {
    pub job_role: Option<String>,
    pub bias_free: Option<bool>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddSkillRequest {
    pub skill: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortlistRunRequest {
    pub candidates: Vec<CandidateData>,
}

/// GET /api/v1/shortlist
pub async fn handle_get_shortlist(State(state): State<AppState>) -> Json<ShortlistDraft> {
    Json(state.ctx.edit_shortlist(|_| {}).await)
}

/// PATCH /api/v1/shortlist
pub async fn handle_configure_shortlist(
    State(state): State<AppState>,
    Json(req): Json<ShortlistConfigRequest>,
) -> Json<ShortlistDraft> {
    let draft = state
        .ctx
        .edit_shortlist(move |draft| {
            if let Some(job_role) = req.job_role {
                draft.job_role = job_role;
            }
            if let Some(bias_free) = req.bias_free {
                draft.bias_free = bias_free;
            }
        })
        .await;
    Json(draft)
}

/// POST /api/v1/shortlist/skills
pub async fn handle_add_skill(
    State(state): State<AppState>,
    Json(req): Json<AddSkillRequest>,
) -> Json<ShortlistDraft> {
    Json(
        state
            .ctx
            .edit_shortlist(|draft| {
                draft.add_skill(&req.skill);
            })
            .await,
    )
}

/// DELETE /api/v1/shortlist/skills/:skill
pub async fn handle_remove_skill(
    State(state): State<AppState>,
    Path(skill): Path<String>,
) -> Json<ShortlistDraft> {
    Json(
        state
            .ctx
            .edit_shortlist(|draft| {
                draft.remove_skill(&skill);
            })
            .await,
    )
}

/// POST /api/v1/shortlist/run
pub async fn handle_run_shortlist(
    State(state): State<AppState>,
    Json(req): Json<ShortlistRunRequest>,
) -> Result<Json<ShortlistResponse>, AppError> {
    Ok(Json(state.ctx.run_shortlist(req.candidates).await?))
}

/// POST /api/v1/shortlist/candidates/:id/select
pub async fn handle_select_candidate(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<ShortlistDraft> {
    Json(state.ctx.edit_shortlist(|draft| draft.select(&id)).await)
}
