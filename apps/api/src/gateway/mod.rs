//! AI Gateway: one request/response operation per feature.
//!
//! Each operation is a single schema-constrained call to the model. The
//! decoded response is validated before it is returned; anything that fails
//! to arrive, decode or validate is a [`GatewayError`] and no partial result
//! is produced. There is no retry, caching or deduplication.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::{LlmClient, LlmError, PromptPart};
use crate::models::{
    CandidateData, InterviewPrep, ResumeAnalysis, Roadmap, ShortlistResponse, SkillGapAnalysis,
    VoiceAnalysis,
};

pub mod prompts;
pub mod schemas;
#[cfg(test)]
pub mod stub;
pub mod validate;

use prompts::*;
use validate::Validate;

pub const DEFAULT_AUDIO_MIME_TYPE: &str = "audio/webm";

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("Invalid model response: {0}")]
    Invalid(String),

    #[error("Could not encode request: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A recorded answer, base64-encoded.
#[derive(Debug, Clone)]
pub struct AudioClip {
    pub data_base64: String,
    pub mime_type: String,
}

#[derive(Debug, Clone)]
pub struct ShortlistRequest {
    pub job_role: String,
    pub mandatory_skills: Vec<String>,
    pub candidates: Vec<CandidateData>,
    pub bias_free: bool,
}

/// The AI-backed operations. Carried in the app context as `Arc<dyn AiGateway>`
/// so tests can substitute a stub.
#[async_trait]
pub trait AiGateway: Send + Sync {
    async fn analyze_resume(
        &self,
        resume_text: &str,
        domain: &str,
    ) -> Result<ResumeAnalysis, GatewayError>;

    async fn analyze_skill_gap(
        &self,
        skills: &[String],
        target_role: &str,
    ) -> Result<SkillGapAnalysis, GatewayError>;

    async fn generate_roadmap(
        &self,
        missing_skills: &[String],
        target_role: &str,
    ) -> Result<Roadmap, GatewayError>;

    async fn analyze_voice(&self, clip: &AudioClip) -> Result<VoiceAnalysis, GatewayError>;

    async fn prepare_interview(&self, jd_text: &str) -> Result<InterviewPrep, GatewayError>;

    async fn shortlist(&self, request: &ShortlistRequest)
        -> Result<ShortlistResponse, GatewayError>;
}

/// Gateway backed by Gemini through [`LlmClient`].
pub struct GeminiGateway {
    llm: LlmClient,
}

impl GeminiGateway {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }

    async fn request<T>(&self, parts: &[PromptPart<'_>], schema: Value) -> Result<T, GatewayError>
    where
        T: DeserializeOwned + Validate,
    {
        let decoded: T = self.llm.call_json(parts, &schema).await?;
        decoded.validate().map_err(GatewayError::Invalid)
    }

    async fn request_text<T>(&self, prompt: &str, schema: Value) -> Result<T, GatewayError>
    where
        T: DeserializeOwned + Validate,
    {
        let prompt = format!("{prompt}\n\n{JSON_ONLY_INSTRUCTION}");
        self.request(&[PromptPart::Text(&prompt)], schema).await
    }
}

#[async_trait]
impl AiGateway for GeminiGateway {
    async fn analyze_resume(
        &self,
        resume_text: &str,
        domain: &str,
    ) -> Result<ResumeAnalysis, GatewayError> {
        let prompt = RESUME_ANALYSIS_PROMPT
            .replace("{domain}", domain)
            .replace("{resume_text}", resume_text);
        let analysis: ResumeAnalysis = self
            .request_text(&prompt, schemas::resume_analysis())
            .await?;
        info!(
            "Resume analysed: score={} ats={} skills={}",
            analysis.score,
            analysis.ats_score,
            analysis.skills.len()
        );
        Ok(analysis)
    }

    async fn analyze_skill_gap(
        &self,
        skills: &[String],
        target_role: &str,
    ) -> Result<SkillGapAnalysis, GatewayError> {
        let prompt = SKILL_GAP_PROMPT
            .replace("{skills}", &skills.join(", "))
            .replace("{target_role}", target_role);
        self.request_text(&prompt, schemas::skill_gap()).await
    }

    async fn generate_roadmap(
        &self,
        missing_skills: &[String],
        target_role: &str,
    ) -> Result<Roadmap, GatewayError> {
        let prompt = ROADMAP_PROMPT
            .replace("{skills}", &missing_skills.join(", "))
            .replace("{target_role}", target_role);
        let roadmap: Roadmap = self.request_text(&prompt, schemas::roadmap()).await?;
        debug!("Roadmap generated with {} weeks", roadmap.len());
        Ok(roadmap)
    }

    async fn analyze_voice(&self, clip: &AudioClip) -> Result<VoiceAnalysis, GatewayError> {
        let instruction = format!("{VOICE_ANALYSIS_PROMPT}\n\n{JSON_ONLY_INSTRUCTION}");
        let parts = [
            PromptPart::Inline {
                mime_type: &clip.mime_type,
                data: &clip.data_base64,
            },
            PromptPart::Text(&instruction),
        ];
        self.request(&parts, schemas::voice_analysis()).await
    }

    async fn prepare_interview(&self, jd_text: &str) -> Result<InterviewPrep, GatewayError> {
        let prompt = INTERVIEW_PREP_PROMPT.replace("{jd_text}", jd_text);
        self.request_text(&prompt, schemas::interview_prep()).await
    }

    async fn shortlist(
        &self,
        request: &ShortlistRequest,
    ) -> Result<ShortlistResponse, GatewayError> {
        let prompt = SHORTLIST_PROMPT
            .replace("{job_role}", &request.job_role)
            .replace("{skills}", &request.mandatory_skills.join(", "))
            .replace(
                "{bias_instruction}",
                if request.bias_free {
                    BIAS_FREE_INSTRUCTION
                } else {
                    ""
                },
            )
            .replace("{candidates}", &serde_json::to_string(&request.candidates)?);
        let response: ShortlistResponse = self.request_text(&prompt, schemas::shortlist()).await?;
        check_candidate_ids(&response, &request.candidates)?;
        Ok(response)
    }
}

/// Every ranked candidate must come from the submitted pool.
fn check_candidate_ids(
    response: &ShortlistResponse,
    pool: &[CandidateData],
) -> Result<(), GatewayError> {
    match response
        .candidates
        .iter()
        .find(|c| !pool.iter().any(|p| p.id == c.id))
    {
        Some(unknown) => Err(GatewayError::Invalid(format!(
            "ranked candidate '{}' is not in the submitted pool",
            unknown.id
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ShortlistedCandidate;

    fn pool() -> Vec<CandidateData> {
        ["c1", "c2"]
            .into_iter()
            .map(|id| CandidateData {
                id: id.into(),
                name: format!("Candidate {id}"),
                resume_text: "Backend engineer".into(),
                verified_skills: vec!["Go".into()],
            })
            .collect()
    }

    fn ranked(ids: &[&str]) -> ShortlistResponse {
        ShortlistResponse {
            candidates: ids
                .iter()
                .map(|id| ShortlistedCandidate {
                    id: id.to_string(),
                    name: id.to_string(),
                    score: 50.0,
                    reasoning: String::new(),
                    technical_match: vec![],
                    soft_skill_analysis: String::new(),
                    requirement_gaps: vec![],
                })
                .collect(),
            summary: String::new(),
        }
    }

    #[test]
    fn test_ranked_candidates_must_come_from_pool() {
        assert!(check_candidate_ids(&ranked(&["c2", "c1"]), &pool()).is_ok());
        assert!(check_candidate_ids(&ranked(&[]), &pool()).is_ok());
        assert!(matches!(
            check_candidate_ids(&ranked(&["c1", "c9"]), &pool()),
            Err(GatewayError::Invalid(_))
        ));
    }

    #[test]
    fn test_prompt_templates_have_placeholders() {
        assert!(RESUME_ANALYSIS_PROMPT.contains("{resume_text}"));
        assert!(RESUME_ANALYSIS_PROMPT.contains("{domain}"));
        assert!(SKILL_GAP_PROMPT.contains("{skills}"));
        assert!(ROADMAP_PROMPT.contains("{target_role}"));
        assert!(INTERVIEW_PREP_PROMPT.contains("{jd_text}"));
        assert!(SHORTLIST_PROMPT.contains("{bias_instruction}"));
        assert!(SHORTLIST_PROMPT.contains("{candidates}"));
    }
}
