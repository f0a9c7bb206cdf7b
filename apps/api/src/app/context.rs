//! The context object handed to every route: one locked session plus the
//! gateway. Feature actions check their inputs, reserve the feature, call the
//! gateway without holding the lock, then settle the result back into the
//! session.

use std::future::Future;
use std::sync::Arc;

use anyhow::anyhow;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tokio::sync::Mutex;
use tracing::info;

use crate::app::features::{Feature, ShortlistDraft, Ticket};
use crate::app::session::AppSession;
use crate::errors::AppError;
use crate::gateway::{AiGateway, AudioClip, GatewayError, ShortlistRequest, DEFAULT_AUDIO_MIME_TYPE};
use crate::models::{
    CandidateData, InterviewPrep, ResumeAnalysis, Roadmap, ShortlistResponse, SkillGapAnalysis,
    UserRole, ViewId, VoiceAnalysis,
};
use crate::navigation::ResolvedView;
use crate::store::{PersistedState, StatePatch};

pub const DEFAULT_RESUME_DOMAIN: &str = "Web Development";

#[derive(Clone)]
pub struct AppContext {
    session: Arc<Mutex<AppSession>>,
    gateway: Arc<dyn AiGateway>,
}

impl AppContext {
    pub fn new(session: AppSession, gateway: Arc<dyn AiGateway>) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            gateway,
        }
    }

    pub async fn view(&self) -> ResolvedView {
        self.session.lock().await.view()
    }

    pub async fn state(&self) -> PersistedState {
        self.session.lock().await.state().clone()
    }

    pub async fn history(&self) -> Vec<ViewId> {
        self.session.lock().await.navigation().history().to_vec()
    }

    // ── Navigation & identity ───────────────────────────────────

    pub async fn navigate(&self, target: ViewId) -> ResolvedView {
        let mut session = self.session.lock().await;
        session.navigate(target);
        session.view()
    }

    pub async fn go_back(&self) -> ResolvedView {
        let mut session = self.session.lock().await;
        session.go_back();
        session.view()
    }

    pub async fn save_state(&self, patch: StatePatch) -> Result<PersistedState, AppError> {
        let mut session = self.session.lock().await;
        Ok(session.save_state(patch).await?.clone())
    }

    pub async fn login(&self, name: &str) -> Result<ResolvedView, AppError> {
        let mut session = self.session.lock().await;
        session.login(name).await?;
        Ok(session.view())
    }

    pub async fn select_role(&self, role: UserRole) -> Result<ResolvedView, AppError> {
        let mut session = self.session.lock().await;
        session.select_role(role).await?;
        Ok(session.view())
    }

    pub async fn set_target_role(&self, target_role: String) -> Result<ResolvedView, AppError> {
        let mut session = self.session.lock().await;
        session.set_target_role(target_role).await?;
        Ok(session.view())
    }

    pub async fn sign_out(&self) -> Result<ResolvedView, AppError> {
        let mut session = self.session.lock().await;
        session.sign_out().await?;
        Ok(session.view())
    }

    // ── View-local edits ────────────────────────────────────────

    pub async fn toggle_roadmap_week(&self, week: u32) -> Result<ResolvedView, AppError> {
        let mut session = self.session.lock().await;
        check_roadmap_week(session.state(), week)?;
        session.features.roadmap.toggle_completed(week);
        Ok(session.view())
    }

    pub async fn expand_roadmap_week(&self, week: u32) -> Result<ResolvedView, AppError> {
        let mut session = self.session.lock().await;
        check_roadmap_week(session.state(), week)?;
        session.features.roadmap.toggle_expanded(week);
        Ok(session.view())
    }

    /// Applies an edit to the shortlist campaign and returns the new draft.
    pub async fn edit_shortlist<F>(&self, edit: F) -> ShortlistDraft
    where
        F: FnOnce(&mut ShortlistDraft),
    {
        let mut session = self.session.lock().await;
        edit(&mut session.features.shortlist);
        session.features.shortlist.clone()
    }

    // ── AI-backed actions ───────────────────────────────────────

    pub async fn analyze_resume(
        &self,
        resume_text: &str,
        domain: Option<&str>,
    ) -> Result<ResumeAnalysis, AppError> {
        let resume_text = resume_text.trim().to_string();
        if resume_text.is_empty() {
            return Err(AppError::Validation("resume text cannot be empty".into()));
        }
        let domain = domain
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .unwrap_or(DEFAULT_RESUME_DOMAIN)
            .to_string();

        let ticket = self.session.lock().await.features.begin(Feature::Resume)?;
        self.run(
            ticket,
            move |gateway| async move { gateway.analyze_resume(&resume_text, &domain).await },
            |_, analysis| Some(StatePatch::resume(analysis.clone())),
        )
        .await
    }

    /// Compares the stored resume skills against the target role. A supplied
    /// role replaces the stored one once the call is reserved.
    pub async fn analyze_skill_gap(
        &self,
        target_role: Option<String>,
    ) -> Result<SkillGapAnalysis, AppError> {
        let (ticket, skills, role) = {
            let mut session = self.session.lock().await;
            let skills = session
                .state()
                .resume
                .as_ref()
                .map(|resume| resume.skills.clone())
                .ok_or_else(|| {
                    AppError::Precondition(
                        "analyze a resume before requesting a skill gap analysis".into(),
                    )
                })?;
            let ticket = session.features.begin(Feature::SkillGap)?;
            if let Some(role) = target_role {
                if let Err(e) = session.set_target_role(role).await {
                    session.features.release(ticket);
                    return Err(e);
                }
            }
            let role = session.state().target_role.clone();
            (ticket, skills, role)
        };

        self.run(
            ticket,
            move |gateway| async move { gateway.analyze_skill_gap(&skills, &role).await },
            |_, gap| Some(StatePatch::skill_gap(gap.clone())),
        )
        .await
    }

    pub async fn generate_roadmap(&self) -> Result<Roadmap, AppError> {
        let (ticket, skills, role) = {
            let mut session = self.session.lock().await;
            let skills = session
                .state()
                .skill_gap
                .as_ref()
                .map(SkillGapAnalysis::roadmap_skills)
                .ok_or_else(|| {
                    AppError::Precondition(
                        "run a skill gap analysis before generating a roadmap".into(),
                    )
                })?;
            let role = session.state().target_role.clone();
            (session.features.begin(Feature::Roadmap)?, skills, role)
        };

        self.run(
            ticket,
            move |gateway| async move { gateway.generate_roadmap(&skills, &role).await },
            |session, roadmap| {
                session.features.roadmap = Default::default();
                Some(StatePatch::roadmap(roadmap.clone()))
            },
        )
        .await
    }

    /// Accepts bare base64 or a `data:<mime>;base64,` URL.
    pub async fn analyze_voice(
        &self,
        audio: &str,
        mime_type: Option<&str>,
    ) -> Result<VoiceAnalysis, AppError> {
        let clip = parse_audio(audio, mime_type)?;
        let ticket = self.session.lock().await.features.begin(Feature::Voice)?;
        self.run(
            ticket,
            move |gateway| async move { gateway.analyze_voice(&clip).await },
            |session, analysis| {
                session.features.voice = Some(analysis.clone());
                None
            },
        )
        .await
    }

    pub async fn prepare_interview(&self, jd_text: &str) -> Result<InterviewPrep, AppError> {
        let jd_text = jd_text.trim().to_string();
        if jd_text.is_empty() {
            return Err(AppError::Validation("job description cannot be empty".into()));
        }
        let ticket = self
            .session
            .lock()
            .await
            .features
            .begin(Feature::InterviewPrep)?;
        self.run(
            ticket,
            move |gateway| async move { gateway.prepare_interview(&jd_text).await },
            |session, prep| {
                session.features.interview = Some(prep.clone());
                None
            },
        )
        .await
    }

    /// Ranks `candidates` against the current campaign draft.
    pub async fn run_shortlist(
        &self,
        candidates: Vec<CandidateData>,
    ) -> Result<ShortlistResponse, AppError> {
        if candidates.is_empty() {
            return Err(AppError::Validation("candidate pool cannot be empty".into()));
        }
        let (ticket, request) = {
            let mut session = self.session.lock().await;
            let draft = &session.features.shortlist;
            if draft.job_role.trim().is_empty() {
                return Err(AppError::Validation("job role cannot be empty".into()));
            }
            if draft.mandatory_skills.is_empty() {
                return Err(AppError::Validation(
                    "add at least one mandatory skill".into(),
                ));
            }
            let request = ShortlistRequest {
                job_role: draft.job_role.trim().to_string(),
                mandatory_skills: draft.mandatory_skills.clone(),
                candidates,
                bias_free: draft.bias_free,
            };
            (session.features.begin(Feature::Shortlist)?, request)
        };

        self.run(
            ticket,
            move |gateway| async move { gateway.shortlist(&request).await },
            |session, response| {
                let draft = &mut session.features.shortlist;
                draft.result = Some(response.clone());
                draft.selected_candidate = None;
                None
            },
        )
        .await
    }

    /// Drives one reserved gateway call to completion on its own task, so the
    /// outcome is settled even if the caller goes away. `apply` runs under the
    /// session lock and may return a patch to persist.
    async fn run<T, C, Fut, A>(&self, ticket: Ticket, call: C, apply: A) -> Result<T, AppError>
    where
        T: Send + 'static,
        C: FnOnce(Arc<dyn AiGateway>) -> Fut,
        Fut: Future<Output = Result<T, GatewayError>> + Send + 'static,
        A: FnOnce(&mut AppSession, &T) -> Option<StatePatch> + Send + 'static,
    {
        info!("{} request {} started", ticket.feature.view(), ticket.id);
        let pending = call(Arc::clone(&self.gateway));
        let session = Arc::clone(&self.session);

        let task = tokio::spawn(async move {
            let outcome = pending.await;
            let mut session = session.lock().await;
            let value = session.features.settle(ticket, outcome)?;
            if let Some(patch) = apply(&mut session, &value) {
                session.save_state(patch).await?;
            }
            info!("{} request {} completed", ticket.feature.view(), ticket.id);
            Ok::<T, AppError>(value)
        });

        task.await.map_err(|e| {
            AppError::Internal(anyhow!(
                "{} request {} task failed: {e}",
                ticket.feature.view(),
                ticket.id
            ))
        })?
    }
}

/// Only weeks of the stored roadmap can be ticked off or expanded.
fn check_roadmap_week(state: &PersistedState, week: u32) -> Result<(), AppError> {
    let roadmap = state.roadmap.as_ref().ok_or_else(|| {
        AppError::Precondition("generate a roadmap before tracking progress".into())
    })?;
    if !roadmap.iter().any(|step| step.week == week) {
        return Err(AppError::Validation(format!(
            "week {week} is not part of the roadmap"
        )));
    }
    Ok(())
}

fn parse_audio(audio: &str, mime_type: Option<&str>) -> Result<AudioClip, AppError> {
    let audio = audio.trim();
    let (embedded_mime, data) = match audio.strip_prefix("data:") {
        Some(url) => {
            let (header, data) = url
                .split_once(',')
                .ok_or_else(|| AppError::Validation("malformed audio data URL".into()))?;
            let mime = header.strip_suffix(";base64").ok_or_else(|| {
                AppError::Validation("audio data URL must be base64-encoded".into())
            })?;
            (Some(mime), data)
        }
        None => (None, audio),
    };

    if data.is_empty() {
        return Err(AppError::Validation("audio clip is empty".into()));
    }
    STANDARD
        .decode(data)
        .map_err(|e| AppError::Validation(format!("audio is not valid base64: {e}")))?;

    let mime_type = mime_type
        .or(embedded_mime)
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .unwrap_or(DEFAULT_AUDIO_MIME_TYPE);

    Ok(AudioClip {
        data_base64: data.to_string(),
        mime_type: mime_type.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::sync::Notify;

    use super::*;
    use crate::gateway::stub::StubGateway;
    use crate::models::{
        Difficulty, InterviewQuestion, LearningResource, PrioritizedSkill, Priority, RoadmapStep,
        ShortlistedCandidate, View,
    };
    use crate::navigation::ViewProps;
    use crate::store::{MemorySlot, StateSlot, StateStore, StoreError, DEFAULT_STATE_KEY};

    fn resume() -> ResumeAnalysis {
        ResumeAnalysis {
            score: 82.0,
            ats_score: 74.0,
            strengths: vec!["Clear impact statements".into()],
            weaknesses: vec!["No metrics".into()],
            tips: vec!["Quantify results".into()],
            skills: vec!["React".into(), "TypeScript".into()],
            domain: "Web Development".into(),
        }
    }

    fn skill_gap() -> SkillGapAnalysis {
        SkillGapAnalysis {
            match_percentage: 60.0,
            matching_skills: vec!["React".into()],
            missing_skills: vec!["Docker".into(), "GraphQL".into()],
            prioritized_missing_skills: vec![
                PrioritizedSkill {
                    skill: "Docker".into(),
                    priority: Priority::High,
                    suggestions: vec![],
                },
                PrioritizedSkill {
                    skill: "GraphQL".into(),
                    priority: Priority::Medium,
                    suggestions: vec![],
                },
            ],
        }
    }

    fn roadmap() -> Roadmap {
        vec![RoadmapStep {
            week: 1,
            title: "Containers".into(),
            topics: vec!["Images".into()],
            practice_ideas: vec!["Dockerize an API".into()],
            resources: vec![LearningResource {
                name: "Docker docs".into(),
                url: "https://docs.docker.com".into(),
            }],
        }]
    }

    /// Slot that cannot be written to.
    struct ReadOnlySlot;

    #[async_trait::async_trait]
    impl StateSlot for ReadOnlySlot {
        async fn read(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Ok(None)
        }

        async fn write(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only").into())
        }

        async fn remove(&self, _key: &str) -> Result<(), StoreError> {
            Ok(())
        }

        fn backend(&self) -> &'static str {
            "read-only"
        }
    }

    struct Harness {
        ctx: AppContext,
        stub: Arc<StubGateway>,
        slot: Arc<MemorySlot>,
    }

    fn harness(stub: StubGateway) -> Harness {
        let slot = Arc::new(MemorySlot::default());
        let stub = Arc::new(stub);
        let session = AppSession::new(StateStore::new(slot.clone(), DEFAULT_STATE_KEY));
        Harness {
            ctx: AppContext::new(session, stub.clone()),
            stub,
            slot,
        }
    }

    async fn reload(slot: Arc<MemorySlot>) -> AppSession {
        let mut session = AppSession::new(StateStore::new(slot, DEFAULT_STATE_KEY));
        session.restore().await;
        session
    }

    async fn wait_for_calls(stub: &StubGateway, n: usize) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while stub.calls().len() < n {
                tokio::task::yield_now().await;
            }
        })
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_resume_analysis_is_stored() {
        let stub = StubGateway::default();
        StubGateway::set(&stub.resume, Ok(resume()));
        let h = harness(stub);

        let analysis = h.ctx.analyze_resume("  Built things  ", None).await.unwrap();
        assert_eq!(analysis.score, 82.0);
        assert_eq!(h.stub.calls(), vec!["resume:Built things|Web Development"]);
        assert_eq!(h.ctx.state().await.resume, Some(resume()));
        assert_eq!(reload(h.slot).await.state().resume, Some(resume()));
    }

    #[tokio::test]
    async fn test_empty_resume_is_rejected_without_a_call() {
        let h = harness(StubGateway::default());
        assert!(matches!(
            h.ctx.analyze_resume("   ", Some("Data")).await,
            Err(AppError::Validation(_))
        ));
        assert!(h.stub.calls().is_empty());
    }

    #[tokio::test]
    async fn test_skill_gap_requires_resume() {
        let h = harness(StubGateway::default());
        assert!(matches!(
            h.ctx.analyze_skill_gap(None).await,
            Err(AppError::Precondition(_))
        ));
        assert!(matches!(
            h.ctx.generate_roadmap().await,
            Err(AppError::Precondition(_))
        ));
        assert!(h.stub.calls().is_empty());
    }

    #[tokio::test]
    async fn test_failed_skill_gap_leaves_store_untouched() {
        let stub = StubGateway::default();
        StubGateway::set(&stub.resume, Ok(resume()));
        StubGateway::set(&stub.skill_gap, Err("model overloaded"));
        let h = harness(stub);
        h.ctx.analyze_resume("text", None).await.unwrap();
        h.ctx.navigate(View::SkillGap.into()).await;

        assert!(matches!(
            h.ctx.analyze_skill_gap(Some("Data Engineer".into())).await,
            Err(AppError::Llm(_))
        ));

        let state = h.ctx.state().await;
        assert!(state.skill_gap.is_none());
        assert_eq!(state.target_role, "Data Engineer");

        let ViewProps::SkillGap { status, .. } = h.ctx.view().await.props else {
            panic!("expected skill gap props");
        };
        assert!(!status.in_flight);
        assert!(status.failure.is_some());
    }

    #[tokio::test]
    async fn test_rejected_skill_gap_keeps_stored_target_role() {
        let gate = Arc::new(Notify::new());
        let stub = StubGateway::gated(gate.clone());
        StubGateway::set(&stub.resume, Ok(resume()));
        StubGateway::set(&stub.skill_gap, Ok(skill_gap()));
        let h = harness(stub);

        gate.notify_one();
        h.ctx.analyze_resume("text", None).await.unwrap();

        let first = tokio::spawn({
            let ctx = h.ctx.clone();
            async move { ctx.analyze_skill_gap(Some("Data Engineer".into())).await }
        });
        wait_for_calls(&h.stub, 2).await;

        assert!(matches!(
            h.ctx.analyze_skill_gap(Some("Designer".into())).await,
            Err(AppError::InFlight(_))
        ));
        assert_eq!(h.ctx.state().await.target_role, "Data Engineer");

        gate.notify_one();
        first.await.unwrap().unwrap();
        assert_eq!(reload(h.slot).await.state().target_role, "Data Engineer");
    }

    #[tokio::test]
    async fn test_roadmap_progress_only_tracks_roadmap_weeks() {
        let h = harness(StubGateway::default());
        assert!(matches!(
            h.ctx.toggle_roadmap_week(1).await,
            Err(AppError::Precondition(_))
        ));

        h.ctx.save_state(StatePatch::roadmap(roadmap())).await.unwrap();
        h.ctx.navigate(View::Roadmap.into()).await;
        h.ctx.toggle_roadmap_week(1).await.unwrap();
        for week in [7, 42] {
            assert!(matches!(
                h.ctx.toggle_roadmap_week(week).await,
                Err(AppError::Validation(_))
            ));
        }
        assert!(matches!(
            h.ctx.expand_roadmap_week(7).await,
            Err(AppError::Validation(_))
        ));

        let ViewProps::Roadmap {
            percent_complete,
            progress,
            ..
        } = h.ctx.view().await.props
        else {
            panic!("expected roadmap props");
        };
        assert_eq!(percent_complete, 100);
        assert_eq!(progress.completed.into_iter().collect::<Vec<_>>(), vec![1]);
    }

    #[tokio::test]
    async fn test_failed_save_does_not_expose_result() {
        let session = AppSession::new(StateStore::new(Arc::new(ReadOnlySlot), DEFAULT_STATE_KEY));
        let stub = Arc::new(StubGateway::default());
        StubGateway::set(&stub.resume, Ok(resume()));
        let ctx = AppContext::new(session, stub);

        assert!(matches!(
            ctx.analyze_resume("5 years React", None).await,
            Err(AppError::Storage(_))
        ));
        assert!(ctx.state().await.resume.is_none());
        // The reservation was settled, so a retry reaches the store again.
        assert!(matches!(
            ctx.analyze_resume("5 years React", None).await,
            Err(AppError::Storage(_))
        ));
    }

    #[tokio::test]
    async fn test_roadmap_uses_prioritized_skills_and_target_role() {
        let stub = StubGateway::default();
        StubGateway::set(&stub.resume, Ok(resume()));
        StubGateway::set(&stub.skill_gap, Ok(skill_gap()));
        StubGateway::set(&stub.roadmap, Ok(roadmap()));
        let h = harness(stub);

        h.ctx.analyze_resume("text", None).await.unwrap();
        h.ctx.analyze_skill_gap(None).await.unwrap();
        h.ctx.generate_roadmap().await.unwrap();

        assert_eq!(
            h.stub.calls()[1..],
            [
                "skill-gap:React,TypeScript|Fullstack Developer",
                "roadmap:Docker,GraphQL|Fullstack Developer",
            ]
        );
        let restored = reload(h.slot).await;
        assert_eq!(restored.state().skill_gap, Some(skill_gap()));
        assert_eq!(restored.state().roadmap, Some(roadmap()));
    }

    #[tokio::test]
    async fn test_duplicate_trigger_is_rejected_while_in_flight() {
        let gate = Arc::new(Notify::new());
        let stub = StubGateway::gated(gate.clone());
        StubGateway::set(&stub.resume, Ok(resume()));
        let h = harness(stub);

        let first = tokio::spawn({
            let ctx = h.ctx.clone();
            async move { ctx.analyze_resume("text", None).await }
        });
        wait_for_calls(&h.stub, 1).await;

        assert!(matches!(
            h.ctx.analyze_resume("text", None).await,
            Err(AppError::InFlight(_))
        ));

        gate.notify_one();
        assert!(first.await.unwrap().is_ok());
        assert_eq!(h.stub.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_result_for_closed_view_is_discarded() {
        let gate = Arc::new(Notify::new());
        let stub = StubGateway::gated(gate.clone());
        StubGateway::set(&stub.interview, Ok(InterviewPrep {
            role: "Backend Engineer".into(),
            questions: vec![InterviewQuestion {
                question: "Design a rate limiter".into(),
                focus: "System design".into(),
                difficulty: Difficulty::Hard,
            }],
        }));
        let h = harness(stub);
        h.ctx.navigate(View::InterviewPrep.into()).await;

        let pending = tokio::spawn({
            let ctx = h.ctx.clone();
            async move { ctx.prepare_interview("We need a backend engineer").await }
        });
        wait_for_calls(&h.stub, 1).await;

        h.ctx.navigate(View::Dashboard.into()).await;
        gate.notify_one();

        assert!(matches!(
            pending.await.unwrap(),
            Err(AppError::Discarded(_))
        ));
        h.ctx.go_back().await;
        let ViewProps::InterviewPrep { prep, status } = h.ctx.view().await.props else {
            panic!("expected interview prep props");
        };
        assert!(prep.is_none());
        assert!(!status.in_flight);
    }

    #[tokio::test]
    async fn test_dropped_caller_still_settles() {
        let gate = Arc::new(Notify::new());
        let stub = StubGateway::gated(gate.clone());
        StubGateway::set(&stub.resume, Ok(resume()));
        let h = harness(stub);

        let caller = tokio::spawn({
            let ctx = h.ctx.clone();
            async move { ctx.analyze_resume("text", None).await }
        });
        wait_for_calls(&h.stub, 1).await;
        caller.abort();
        gate.notify_one();

        tokio::time::timeout(Duration::from_secs(5), async {
            while h.ctx.state().await.resume.is_none() {
                tokio::task::yield_now().await;
            }
        })
        .await
        .unwrap();
        gate.notify_one();
        assert!(h.ctx.analyze_resume("again", None).await.is_ok());
    }

    #[tokio::test]
    async fn test_voice_accepts_data_url_and_rejects_garbage() {
        let stub = StubGateway::default();
        StubGateway::set(&stub.voice, Ok(VoiceAnalysis {
            confidence_score: 71.0,
            filler_word_count: 3,
            speaking_speed: "Moderate".into(),
            hesitation_notes: "Long pause before the second answer".into(),
            tips: vec!["Pause instead of saying um".into()],
        }));
        let h = harness(stub);
        h.ctx.navigate(View::VoiceAnalyzer.into()).await;

        assert!(matches!(
            h.ctx.analyze_voice("not base64!!", None).await,
            Err(AppError::Validation(_))
        ));
        h.ctx
            .analyze_voice("data:audio/ogg;base64,AAECAw==", None)
            .await
            .unwrap();
        h.ctx.analyze_voice("AAECAw==", None).await.unwrap();
        assert_eq!(h.stub.calls(), vec!["voice:audio/ogg", "voice:audio/webm"]);

        let ViewProps::VoiceAnalyzer { result, .. } = h.ctx.view().await.props else {
            panic!("expected voice props");
        };
        assert_eq!(result.map(|r| r.filler_word_count), Some(3));
        // Voice results are view-local.
        assert_eq!(h.ctx.state().await, PersistedState::default());
    }

    #[tokio::test]
    async fn test_shortlist_uses_draft_and_resets_selection() {
        let stub = StubGateway::default();
        StubGateway::set(&stub.shortlist, Ok(ShortlistResponse {
            candidates: vec![ShortlistedCandidate {
                id: "c1".into(),
                name: "Alex".into(),
                score: 91.0,
                reasoning: "Strong React background".into(),
                technical_match: vec!["React".into()],
                soft_skill_analysis: "Clear communicator".into(),
                requirement_gaps: vec![],
            }],
            summary: "One strong match".into(),
        }));
        let h = harness(stub);
        let pool = vec![CandidateData {
            id: "c1".into(),
            name: "Alex".into(),
            resume_text: "React developer".into(),
            verified_skills: vec!["React".into()],
        }];

        h.ctx
            .edit_shortlist(|draft| {
                draft.add_skill("AWS");
                draft.remove_skill("Node.js");
                draft.bias_free = false;
                draft.select("c9");
            })
            .await;
        let response = h.ctx.run_shortlist(pool.clone()).await.unwrap();
        assert_eq!(response.candidates.len(), 1);
        assert_eq!(
            h.stub.calls(),
            vec!["shortlist:Senior Fullstack Engineer|React,TypeScript,AWS|1|false"]
        );
        let draft = h.ctx.edit_shortlist(|_| {}).await;
        assert!(draft.result.is_some());
        assert!(draft.selected_candidate.is_none());

        h.ctx
            .edit_shortlist(|draft| draft.mandatory_skills.clear())
            .await;
        assert!(matches!(
            h.ctx.run_shortlist(pool).await,
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            h.ctx.run_shortlist(vec![]).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_sign_out_forgets_results() {
        let stub = StubGateway::default();
        StubGateway::set(&stub.resume, Ok(resume()));
        let h = harness(stub);
        h.ctx.login("Ada").await.unwrap();
        h.ctx.select_role(UserRole::Student).await.unwrap();
        h.ctx.analyze_resume("text", None).await.unwrap();

        let view = h.ctx.sign_out().await.unwrap();
        assert_eq!(view.view, View::Landing);
        assert!(view.chrome.is_none());
        assert_eq!(h.ctx.history().await, vec![ViewId::landing()]);
        assert!(reload(h.slot).await.state().resume.is_none());
    }

    #[test]
    fn test_parse_audio_defaults_mime_type() {
        let clip = parse_audio("AAECAw==", None).unwrap();
        assert_eq!(clip.mime_type, DEFAULT_AUDIO_MIME_TYPE);
        let clip = parse_audio("data:audio/ogg;base64,AAECAw==", Some("audio/mp4")).unwrap();
        assert_eq!(clip.mime_type, "audio/mp4");
        assert_eq!(clip.data_base64, "AAECAw==");
        assert!(parse_audio("", None).is_err());
        assert!(parse_audio("data:audio/webm,AAEC", None).is_err());
    }
}
