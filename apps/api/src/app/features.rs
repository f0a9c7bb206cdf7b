//! Transient per-view state: in-flight flags, failure notices and the
//! view-local results that never reach the persisted store.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;
use tracing::error;
use uuid::Uuid;

use crate::errors::AppError;
use crate::gateway::GatewayError;
use crate::models::{InterviewPrep, RoadmapStep, ShortlistResponse, View, VoiceAnalysis};

pub const DEFAULT_SHORTLIST_ROLE: &str = "Senior Fullstack Engineer";
pub const DEFAULT_MANDATORY_SKILLS: [&str; 3] = ["React", "TypeScript", "Node.js"];

/// An AI-backed action owned by one view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Feature {
    Resume,
    SkillGap,
    Roadmap,
    Voice,
    InterviewPrep,
    Shortlist,
}

impl Feature {
    pub const ALL: [Feature; 6] = [
        Feature::Resume,
        Feature::SkillGap,
        Feature::Roadmap,
        Feature::Voice,
        Feature::InterviewPrep,
        Feature::Shortlist,
    ];

    pub fn view(self) -> View {
        match self {
            Feature::Resume => View::Resume,
            Feature::SkillGap => View::SkillGap,
            Feature::Roadmap => View::Roadmap,
            Feature::Voice => View::VoiceAnalyzer,
            Feature::InterviewPrep => View::InterviewPrep,
            Feature::Shortlist => View::AutoShortlist,
        }
    }

    pub fn for_view(view: View) -> Option<Feature> {
        Feature::ALL.into_iter().find(|f| f.view() == view)
    }

    fn failure_notice(self) -> &'static str {
        match self {
            Feature::Resume => "Analysis failed. Please try again.",
            Feature::SkillGap => "Skill gap analysis failed. Please try again.",
            Feature::Roadmap => {
                "Failed to generate roadmap. Please try again or check your internet connection."
            }
            Feature::Voice => "Speech analysis failed. Please try a shorter clip.",
            Feature::InterviewPrep => "Could not build the interview guide. Please try again.",
            Feature::Shortlist => {
                "Shortlisting timed out. Please reduce requirements or candidate pool size."
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallStatus {
    pub in_flight: bool,
    pub failure: Option<String>,
    #[serde(skip)]
    mount: u64,
}

/// Proof that a call was started while its view was mounted.
#[derive(Debug, Clone, Copy)]
pub struct Ticket {
    pub feature: Feature,
    pub id: Uuid,
    mount: u64,
}

/// Week checkboxes and the expanded week on the roadmap view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapProgress {
    pub completed: BTreeSet<u32>,
    pub expanded: Option<u32>,
}

impl Default for RoadmapProgress {
    fn default() -> Self {
        Self {
            completed: BTreeSet::new(),
            expanded: Some(1),
        }
    }
}

impl RoadmapProgress {
    pub fn toggle_completed(&mut self, week: u32) {
        if !self.completed.remove(&week) {
            self.completed.insert(week);
        }
    }

    pub fn toggle_expanded(&mut self, week: u32) {
        self.expanded = if self.expanded == Some(week) {
            None
        } else {
            Some(week)
        };
    }

    /// Share of the roadmap's weeks ticked off, rounded to a whole percent.
    /// Ticks for weeks the roadmap does not have are ignored.
    pub fn percent(&self, roadmap: &[RoadmapStep]) -> u32 {
        if roadmap.is_empty() {
            return 0;
        }
        let done = roadmap
            .iter()
            .filter(|step| self.completed.contains(&step.week))
            .count();
        ((done as f64 / roadmap.len() as f64) * 100.0).round() as u32
    }
}

/// Recruiter-side shortlist campaign being edited.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortlistDraft {
    pub job_role: String,
    pub mandatory_skills: Vec<String>,
    pub bias_free: bool,
    pub result: Option<ShortlistResponse>,
    pub selected_candidate: Option<String>,
}

impl Default for ShortlistDraft {
    fn default() -> Self {
        Self {
            job_role: DEFAULT_SHORTLIST_ROLE.to_string(),
            mandatory_skills: DEFAULT_MANDATORY_SKILLS.map(String::from).to_vec(),
            bias_free: true,
            result: None,
            selected_candidate: None,
        }
    }
}

impl ShortlistDraft {
    /// Adds a trimmed skill. Blank and duplicate entries are ignored.
    pub fn add_skill(&mut self, skill: &str) -> bool {
        let skill = skill.trim();
        if skill.is_empty() || self.mandatory_skills.iter().any(|s| s == skill) {
            return false;
        }
        self.mandatory_skills.push(skill.to_string());
        true
    }

    pub fn remove_skill(&mut self, skill: &str) -> bool {
        let before = self.mandatory_skills.len();
        self.mandatory_skills.retain(|s| s != skill);
        self.mandatory_skills.len() != before
    }

    /// Selecting the open candidate again closes it.
    pub fn select(&mut self, candidate_id: &str) {
        self.selected_candidate = match self.selected_candidate.as_deref() {
            Some(open) if open == candidate_id => None,
            _ => Some(candidate_id.to_string()),
        };
    }
}

/// All transient view state for the page.
#[derive(Debug, Default)]
pub struct FeatureBoard {
    status: HashMap<Feature, CallStatus>,
    pub roadmap: RoadmapProgress,
    pub voice: Option<VoiceAnalysis>,
    pub interview: Option<InterviewPrep>,
    pub shortlist: ShortlistDraft,
}

impl FeatureBoard {
    pub fn status(&self, feature: Feature) -> CallStatus {
        self.status.get(&feature).cloned().unwrap_or_default()
    }

    /// Marks a call as started. Only one call per feature may be outstanding.
    pub fn begin(&mut self, feature: Feature) -> Result<Ticket, AppError> {
        let status = self.status.entry(feature).or_default();
        if status.in_flight {
            return Err(AppError::InFlight(format!(
                "{} request already in progress",
                feature.view()
            )));
        }
        status.in_flight = true;
        status.failure = None;
        Ok(Ticket {
            feature,
            id: Uuid::new_v4(),
            mount: status.mount,
        })
    }

    /// Gives back a reservation whose call was never made.
    pub fn release(&mut self, ticket: Ticket) {
        let status = self.status.entry(ticket.feature).or_default();
        if status.mount == ticket.mount {
            status.in_flight = false;
        }
    }

    /// Records how a call ended. Clears the in-flight flag, sets or clears the
    /// failure notice, and refuses results whose view has since unmounted.
    pub fn settle<T>(
        &mut self,
        ticket: Ticket,
        outcome: Result<T, GatewayError>,
    ) -> Result<T, AppError> {
        let status = self.status.entry(ticket.feature).or_default();
        if status.mount != ticket.mount {
            return Err(AppError::Discarded(format!(
                "{} closed before request {} finished",
                ticket.feature.view(),
                ticket.id
            )));
        }

        status.in_flight = false;
        match outcome {
            Ok(value) => {
                status.failure = None;
                Ok(value)
            }
            Err(e) => {
                error!(
                    "{} request {} failed: {e}",
                    ticket.feature.view(),
                    ticket.id
                );
                status.failure = Some(ticket.feature.failure_notice().to_string());
                Err(AppError::Llm(e.to_string()))
            }
        }
    }

    /// Drops everything a view held locally, as if it stopped rendering.
    pub fn unmount(&mut self, view: View) {
        let Some(feature) = Feature::for_view(view) else {
            return;
        };
        let status = self.status.entry(feature).or_default();
        *status = CallStatus {
            mount: status.mount + 1,
            ..CallStatus::default()
        };
        match feature {
            Feature::Roadmap => self.roadmap = RoadmapProgress::default(),
            Feature::Voice => self.voice = None,
            Feature::InterviewPrep => self.interview = None,
            Feature::Shortlist => self.shortlist = ShortlistDraft::default(),
            Feature::Resume | Feature::SkillGap => {}
        }
    }

    pub fn unmount_all(&mut self) {
        for feature in Feature::ALL {
            self.unmount(feature.view());
        }
    }
}
