//! Checks applied to every decoded model response before the rest of the
//! application sees it. Serde already guarantees required fields and enum
//! values; these cover ranges and ordering.

use crate::models::{InterviewPrep, ResumeAnalysis, Roadmap, ShortlistResponse, SkillGapAnalysis, VoiceAnalysis};

pub trait Validate: Sized {
    /// Returns the value, possibly normalized, or a description of what is wrong.
    fn validate(self) -> Result<Self, String>;
}

fn percentage(field: &str, value: f64) -> Result<(), String> {
    if value.is_finite() && (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        Err(format!("{field} must be within 0-100, got {value}"))
    }
}

fn non_blank(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{field} must not be empty"))
    } else {
        Ok(())
    }
}

impl Validate for ResumeAnalysis {
    fn validate(self) -> Result<Self, String> {
        percentage("score", self.score)?;
        percentage("atsScore", self.ats_score)?;
        Ok(self)
    }
}

impl Validate for SkillGapAnalysis {
    fn validate(self) -> Result<Self, String> {
        percentage("matchPercentage", self.match_percentage)?;
        for item in &self.prioritized_missing_skills {
            non_blank("prioritizedMissingSkills.skill", &item.skill)?;
        }
        Ok(self)
    }
}

impl Validate for Roadmap {
    /// Sorts steps by week; rejects empty plans, week 0 and repeated weeks.
    fn validate(mut self) -> Result<Self, String> {
        if self.is_empty() {
            return Err("roadmap has no steps".to_string());
        }
        self.sort_by_key(|step| step.week);
        if let Some(step) = self.iter().find(|s| s.week == 0) {
            return Err(format!("week numbers start at 1, got 0 for '{}'", step.title));
        }
        if let Some(pair) = self.windows(2).find(|w| w[0].week == w[1].week) {
            return Err(format!("week {} appears more than once", pair[0].week));
        }
        Ok(self)
    }
}

impl Validate for VoiceAnalysis {
    fn validate(self) -> Result<Self, String> {
        percentage("confidenceScore", self.confidence_score)?;
        Ok(self)
    }
}

impl Validate for InterviewPrep {
    fn validate(self) -> Result<Self, String> {
        if self.questions.is_empty() {
            return Err("interview guide has no questions".to_string());
        }
        for q in &self.questions {
            non_blank("questions.question", &q.question)?;
        }
        Ok(self)
    }
}

impl Validate for ShortlistResponse {
    /// Orders candidates best first.
    fn validate(mut self) -> Result<Self, String> {
        for c in &self.candidates {
            non_blank("candidates.id", &c.id)?;
            percentage("candidates.score", c.score)?;
        }
        self.candidates
            .sort_by(|a, b| b.score.total_cmp(&a.score));
        Ok(self)
    }
}
