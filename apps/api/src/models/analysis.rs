use serde::{Deserialize, Serialize};

use crate::models::whole_number;

/// Scored review of a pasted or uploaded resume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeAnalysis {
    pub score: f64,
    pub ats_score: f64,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub tips: Vec<String>,
    pub skills: Vec<String>,
    pub domain: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Course,
    Project,
}

/// A course or project that closes one missing skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrioritizedSkill {
    pub skill: String,
    pub priority: Priority,
    #[serde(default)]
    pub suggestions: Vec<Suggestion>,
}

/// Comparison of the resume's skills against a target role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillGapAnalysis {
    pub match_percentage: f64,
    pub matching_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub prioritized_missing_skills: Vec<PrioritizedSkill>,
}

impl SkillGapAnalysis {
    /// Skills a roadmap should cover, in priority-list order.
    pub fn roadmap_skills(&self) -> Vec<String> {
        self.prioritized_missing_skills
            .iter()
            .map(|p| p.skill.clone())
            .collect()
    }

    pub fn high_priority(&self) -> impl Iterator<Item = &PrioritizedSkill> {
        self.prioritized_missing_skills
            .iter()
            .filter(|p| p.priority == Priority::High)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningResource {
    pub name: String,
    pub url: String,
}

/// One week of a learning roadmap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapStep {
    #[serde(deserialize_with = "whole_number::deserialize")]
    pub week: u32,
    pub title: String,
    pub topics: Vec<String>,
    pub practice_ideas: Vec<String>,
    pub resources: Vec<LearningResource>,
}

pub type Roadmap = Vec<RoadmapStep>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceAnalysis {
    pub confidence_score: f64,
    #[serde(deserialize_with = "whole_number::deserialize")]
    pub filler_word_count: u32,
    pub speaking_speed: String,
    pub hesitation_notes: String,
    pub tips: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewQuestion {
    pub question: String,
    pub focus: String,
    pub difficulty: Difficulty,
}

/// Interview guide derived from a job description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewPrep {
    pub role: String,
    pub questions: Vec<InterviewQuestion>,
}

/// A candidate in the recruiter's talent pool, as sent to the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateData {
    pub id: String,
    pub name: String,
    pub resume_text: String,
    #[serde(default)]
    pub verified_skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortlistedCandidate {
    pub id: String,
    pub name: String,
    pub score: f64,
    pub reasoning: String,
    pub technical_match: Vec<String>,
    pub soft_skill_analysis: String,
    pub requirement_gaps: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortlistResponse {
    pub candidates: Vec<ShortlistedCandidate>,
    pub summary: String,
}
