//! Scripted gateway for tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use super::{AiGateway, AudioClip, GatewayError, ShortlistRequest};
use crate::llm_client::LlmError;
use crate::models::{
    InterviewPrep, ResumeAnalysis, Roadmap, ShortlistResponse, SkillGapAnalysis, VoiceAnalysis,
};

/// `Ok` replies are returned as-is; `Err(message)` becomes an upstream 503.
type Reply<T> = Mutex<Option<Result<T, String>>>;

#[derive(Default)]
pub struct StubGateway {
    pub resume: Reply<ResumeAnalysis>,
    pub skill_gap: Reply<SkillGapAnalysis>,
    pub roadmap: Reply<Roadmap>,
    pub voice: Reply<VoiceAnalysis>,
    pub interview: Reply<InterviewPrep>,
    pub shortlist: Reply<ShortlistResponse>,
    /// One line per call: operation name and its main inputs.
    pub calls: Mutex<Vec<String>>,
    /// When set, every call waits for a notification before replying.
    pub gate: Option<Arc<Notify>>,
}

impl StubGateway {
    pub fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    pub fn set<T>(slot: &Reply<T>, reply: Result<T, &str>) {
        *slot.lock().unwrap() = Some(reply.map_err(str::to_string));
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    async fn reply<T: Clone>(&self, call: String, slot: &Reply<T>) -> Result<T, GatewayError> {
        self.calls.lock().unwrap().push(call);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        let reply = slot.lock().unwrap().clone();
        match reply {
            Some(Ok(value)) => Ok(value),
            Some(Err(message)) => Err(GatewayError::Llm(LlmError::Api {
                status: 503,
                message,
            })),
            None => Err(GatewayError::Invalid("no stub reply configured".into())),
        }
    }
}

#[async_trait]
impl AiGateway for StubGateway {
    async fn analyze_resume(
        &self,
        resume_text: &str,
        domain: &str,
    ) -> Result<ResumeAnalysis, GatewayError> {
        self.reply(format!("resume:{resume_text}|{domain}"), &self.resume)
            .await
    }

    async fn analyze_skill_gap(
        &self,
        skills: &[String],
        target_role: &str,
    ) -> Result<SkillGapAnalysis, GatewayError> {
        self.reply(
            format!("skill-gap:{}|{target_role}", skills.join(",")),
            &self.skill_gap,
        )
        .await
    }

    async fn generate_roadmap(
        &self,
        missing_skills: &[String],
        target_role: &str,
    ) -> Result<Roadmap, GatewayError> {
        self.reply(
            format!("roadmap:{}|{target_role}", missing_skills.join(",")),
            &self.roadmap,
        )
        .await
    }

    async fn analyze_voice(&self, clip: &AudioClip) -> Result<VoiceAnalysis, GatewayError> {
        self.reply(format!("voice:{}", clip.mime_type), &self.voice)
            .await
    }

    async fn prepare_interview(&self, jd_text: &str) -> Result<InterviewPrep, GatewayError> {
        self.reply(format!("interview:{jd_text}"), &self.interview)
            .await
    }

    async fn shortlist(
        &self,
        request: &ShortlistRequest,
    ) -> Result<ShortlistResponse, GatewayError> {
        self.reply(
            format!(
                "shortlist:{}|{}|{}|{}",
                request.job_role,
                request.mandatory_skills.join(","),
                request.candidates.len(),
                request.bias_free
            ),
            &self.shortlist,
        )
        .await
    }
}
