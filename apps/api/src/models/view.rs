use std::fmt;

use serde::{Deserialize, Serialize};

/// Every screen the page can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    Landing,
    Login,
    RoleSelection,
    Dashboard,
    Resume,
    SkillGap,
    Roadmap,
    VoiceAnalyzer,
    InterviewPrep,
    SkillSync,
    Jobs,
    Recruiter,
    RecruiterHeatmap,
    AutoShortlist,
    About,
}

impl View {
    pub const ALL: [View; 15] = [
        View::Landing,
        View::Login,
        View::RoleSelection,
        View::Dashboard,
        View::Resume,
        View::SkillGap,
        View::Roadmap,
        View::VoiceAnalyzer,
        View::InterviewPrep,
        View::SkillSync,
        View::Jobs,
        View::Recruiter,
        View::RecruiterHeatmap,
        View::AutoShortlist,
        View::About,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            View::Landing => "landing",
            View::Login => "login",
            View::RoleSelection => "role-selection",
            View::Dashboard => "dashboard",
            View::Resume => "resume",
            View::SkillGap => "skill-gap",
            View::Roadmap => "roadmap",
            View::VoiceAnalyzer => "voice-analyzer",
            View::InterviewPrep => "interview-prep",
            View::SkillSync => "skill-sync",
            View::Jobs => "jobs",
            View::Recruiter => "recruiter",
            View::RecruiterHeatmap => "recruiter-heatmap",
            View::AutoShortlist => "auto-shortlist",
            View::About => "about",
        }
    }

    /// Looks up a view by identifier. `home` and `skillgap` are older spellings.
    pub fn from_id(id: &str) -> Option<View> {
        match id {
            "home" => Some(View::Landing),
            "skillgap" => Some(View::SkillGap),
            other => View::ALL.into_iter().find(|v| v.as_str() == other),
        }
    }

    /// Landing, login and role selection render without side navigation or header.
    pub fn is_initial_flow(self) -> bool {
        matches!(self, View::Landing | View::Login | View::RoleSelection)
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A view identifier as pushed onto the navigation stack.
///
/// Identifiers are not validated when navigating; [`ViewId::resolve`] maps
/// anything unrecognized to the landing view at render time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewId(String);

impl ViewId {
    #[cfg(test)]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn landing() -> Self {
        View::Landing.into()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn resolve(&self) -> View {
        View::from_id(self.as_str()).unwrap_or(View::Landing)
    }
}

impl From<View> for ViewId {
    fn from(view: View) -> Self {
        Self(view.as_str().to_string())
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
