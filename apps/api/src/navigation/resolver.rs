//! View Resolver: maps the current view identifier and the accumulated state
//! to the screen to render and the read-only data it receives.

use serde::Serialize;

use crate::app::features::{CallStatus, Feature, FeatureBoard, RoadmapProgress, ShortlistDraft};
use crate::models::{
    InterviewPrep, PrioritizedSkill, ResumeAnalysis, Roadmap, SkillGapAnalysis, UserRole, View,
    ViewId, VoiceAnalysis,
};
use crate::store::PersistedState;

/// Display name used when nobody has logged in.
pub const FALLBACK_USER_NAME: &str = "User";

const CORE_SKILL_LIMIT: usize = 10;
const HIGH_IMPACT_GAP_LIMIT: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub view: View,
    pub label: &'static str,
    pub active: bool,
}

/// Side navigation and header shown around every non-initial view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Chrome {
    pub user_name: String,
    pub menu: Vec<MenuItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub user_name: String,
    pub profile_strength: f64,
    pub job_readiness: f64,
    pub skills_missing: usize,
    pub core_skills: Vec<String>,
    pub high_impact_gaps: Vec<PrioritizedSkill>,
}

/// Per-view read-only data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ViewProps {
    Landing,
    Login,
    RoleSelection {
        user_name: String,
    },
    Dashboard(DashboardSummary),
    Resume {
        result: Option<ResumeAnalysis>,
        can_analyze: bool,
        status: CallStatus,
    },
    SkillGap {
        target_role: String,
        analysis: Option<SkillGapAnalysis>,
        can_analyze: bool,
        status: CallStatus,
    },
    Roadmap {
        target_role: String,
        roadmap: Option<Roadmap>,
        progress: RoadmapProgress,
        percent_complete: u32,
        can_generate: bool,
        status: CallStatus,
    },
    VoiceAnalyzer {
        result: Option<VoiceAnalysis>,
        status: CallStatus,
    },
    InterviewPrep {
        prep: Option<InterviewPrep>,
        status: CallStatus,
    },
    SkillSync,
    Jobs {
        user_skills: Vec<String>,
    },
    Recruiter,
    RecruiterHeatmap,
    AutoShortlist {
        draft: ShortlistDraft,
        can_run: bool,
        status: CallStatus,
    },
    About,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedView {
    pub view: View,
    /// `None` for the initial flow (landing, login, role selection).
    pub chrome: Option<Chrome>,
    pub props: ViewProps,
}

/// Resolves what to render. Pure: reads its inputs and nothing else.
pub fn resolve(current: &ViewId, state: &PersistedState, features: &FeatureBoard) -> ResolvedView {
    let view = current.resolve();
    let identity = state.identity();
    let user_name = identity
        .user_name
        .unwrap_or_else(|| FALLBACK_USER_NAME.to_string());

    let chrome = (!view.is_initial_flow()).then(|| Chrome {
        user_name: user_name.clone(),
        menu: menu_for(identity.user_role, view),
    });

    let props = match view {
        View::Landing => ViewProps::Landing,
        View::Login => ViewProps::Login,
        View::RoleSelection => ViewProps::RoleSelection { user_name },
        View::Dashboard => ViewProps::Dashboard(dashboard_summary(user_name, state)),
        View::Resume => {
            let status = features.status(Feature::Resume);
            ViewProps::Resume {
                result: state.resume.clone(),
                can_analyze: !status.in_flight,
                status,
            }
        }
        View::SkillGap => {
            let status = features.status(Feature::SkillGap);
            ViewProps::SkillGap {
                target_role: state.target_role.clone(),
                analysis: state.skill_gap.clone(),
                can_analyze: state.resume.is_some() && !status.in_flight,
                status,
            }
        }
        View::Roadmap => {
            let status = features.status(Feature::Roadmap);
            let steps = state.roadmap.as_deref().unwrap_or_default();
            ViewProps::Roadmap {
                target_role: state.target_role.clone(),
                roadmap: state.roadmap.clone(),
                progress: features.roadmap.clone(),
                percent_complete: features.roadmap.percent(steps),
                can_generate: state.skill_gap.is_some() && !status.in_flight,
                status,
            }
        }
        View::VoiceAnalyzer => ViewProps::VoiceAnalyzer {
            result: features.voice.clone(),
            status: features.status(Feature::Voice),
        },
        View::InterviewPrep => ViewProps::InterviewPrep {
            prep: features.interview.clone(),
            status: features.status(Feature::InterviewPrep),
        },
        View::SkillSync => ViewProps::SkillSync,
        View::Jobs => ViewProps::Jobs {
            user_skills: state
                .resume
                .as_ref()
                .map(|r| r.skills.clone())
                .unwrap_or_default(),
        },
        View::Recruiter => ViewProps::Recruiter,
        View::RecruiterHeatmap => ViewProps::RecruiterHeatmap,
        View::AutoShortlist => {
            let status = features.status(Feature::Shortlist);
            ViewProps::AutoShortlist {
                draft: features.shortlist.clone(),
                can_run: !features.shortlist.mandatory_skills.is_empty() && !status.in_flight,
                status,
            }
        }
        View::About => ViewProps::About,
    };

    ResolvedView {
        view,
        chrome,
        props,
    }
}

fn menu_for(role: Option<UserRole>, active: View) -> Vec<MenuItem> {
    let items: &[(View, &'static str)] = match role {
        Some(UserRole::Recruiter) => &[
            (View::Recruiter, "Talent Dashboard"),
            (View::RecruiterHeatmap, "Talent Heatmap"),
            (View::AutoShortlist, "AI Shortlist"),
            (View::InterviewPrep, "JD-to-Interview"),
        ],
        Some(UserRole::Student) | None => &[
            (View::Dashboard, "Dashboard"),
            (View::Resume, "Resume Analyzer"),
            (View::SkillGap, "Skill Gap Analysis"),
            (View::Roadmap, "Learning Roadmap"),
            (View::VoiceAnalyzer, "Voice Confidence"),
            (View::InterviewPrep, "Interview Prep"),
            (View::SkillSync, "Unified Profile"),
            (View::Jobs, "Jobs"),
        ],
    };
    items
        .iter()
        .map(|&(view, label)| MenuItem {
            view,
            label,
            active: view == active,
        })
        .collect()
}

fn dashboard_summary(user_name: String, state: &PersistedState) -> DashboardSummary {
    let resume = state.resume.as_ref();
    let gap = state.skill_gap.as_ref();
    DashboardSummary {
        user_name,
        profile_strength: resume.map_or(0.0, |r| r.score),
        job_readiness: gap.map_or(0.0, |g| g.match_percentage),
        skills_missing: gap.map_or(0, |g| g.missing_skills.len()),
        core_skills: resume
            .map(|r| r.skills.iter().take(CORE_SKILL_LIMIT).cloned().collect())
            .unwrap_or_default(),
        high_impact_gaps: gap
            .map(|g| g.high_priority().take(HIGH_IMPACT_GAP_LIMIT).cloned().collect())
            .unwrap_or_default(),
    }
}
