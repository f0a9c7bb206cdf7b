pub mod analysis;
pub mod session;
pub mod view;

pub use analysis::{
    CandidateData, InterviewPrep, PrioritizedSkill, ResumeAnalysis, Roadmap, RoadmapStep,
    ShortlistResponse, SkillGapAnalysis, VoiceAnalysis,
};
#[cfg(test)]
pub use analysis::{Difficulty, InterviewQuestion, LearningResource, Priority, ShortlistedCandidate};
pub use session::{SessionIdentity, UserRole};
pub use view::{View, ViewId};

/// Deserializes a count the model may emit as `3` or `3.0`.
pub(crate) mod whole_number {
    use serde::{de::Error, Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
        let value = f64::deserialize(deserializer)?;
        if value.fract() != 0.0 || value < 0.0 || value > f64::from(u32::MAX) {
            return Err(D::Error::custom(format!(
                "expected a whole number, got {value}"
            )));
        }
        Ok(value as u32)
    }
}
