//! Persisted State Store: one serialized record under one storage key.
//!
//! The record is loaded once at startup and rewritten wholesale after every
//! mutating action. Writes merge a [`StatePatch`] over the in-memory snapshot,
//! so fields the patch does not mention keep their last known value.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::{ResumeAnalysis, Roadmap, SessionIdentity, SkillGapAnalysis, UserRole};

pub mod file;
pub mod memory;
pub mod redis_slot;

pub use file::FileSlot;
pub use memory::MemorySlot;
pub use redis_slot::RedisSlot;

/// Storage key used when none is configured.
pub const DEFAULT_STATE_KEY: &str = "career-craft-data";
pub const DEFAULT_TARGET_ROLE: &str = "Fullstack Developer";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Redis error: {0}")]
    Redis(#[from] ::redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A single named slot in some key-value storage.
#[async_trait]
pub trait StateSlot: Send + Sync {
    async fn read(&self, key: &str) -> Result<Option<String>, StoreError>;
    async fn write(&self, key: &str, value: &str) -> Result<(), StoreError>;
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
    fn backend(&self) -> &'static str;
}

/// The persisted record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    #[serde(default)]
    pub resume: Option<ResumeAnalysis>,
    #[serde(default)]
    pub skill_gap: Option<SkillGapAnalysis>,
    #[serde(default)]
    pub roadmap: Option<Roadmap>,
    #[serde(default)]
    pub target_role: String,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub user_role: Option<UserRole>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            resume: None,
            skill_gap: None,
            roadmap: None,
            target_role: DEFAULT_TARGET_ROLE.to_string(),
            user_name: None,
            user_role: None,
            updated_at: None,
        }
    }
}

impl PersistedState {
    pub fn identity(&self) -> SessionIdentity {
        SessionIdentity {
            user_name: self.user_name.clone(),
            user_role: self.user_role,
        }
    }

    /// Overlays every field the patch carries. Each entity is replaced whole.
    pub fn merge(&mut self, patch: StatePatch) {
        let StatePatch {
            resume,
            skill_gap,
            roadmap,
            target_role,
            user_name,
            user_role,
        } = patch;
        if let Some(resume) = resume {
            self.resume = Some(resume);
        }
        if let Some(skill_gap) = skill_gap {
            self.skill_gap = Some(skill_gap);
        }
        if let Some(roadmap) = roadmap {
            self.roadmap = Some(roadmap);
        }
        if let Some(target_role) = target_role {
            self.target_role = target_role;
        }
        if let Some(user_name) = user_name {
            self.user_name = Some(user_name);
        }
        if let Some(user_role) = user_role {
            self.user_role = Some(user_role);
        }
    }

    fn normalize(mut self) -> Self {
        if self.target_role.trim().is_empty() {
            self.target_role = DEFAULT_TARGET_ROLE.to_string();
        }
        self
    }
}

/// Fields to overwrite on the next save. `None` leaves the stored value alone.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StatePatch {
    pub resume: Option<ResumeAnalysis>,
    pub skill_gap: Option<SkillGapAnalysis>,
    pub roadmap: Option<Roadmap>,
    pub target_role: Option<String>,
    pub user_name: Option<String>,
    pub user_role: Option<UserRole>,
}

impl StatePatch {
    pub fn resume(resume: ResumeAnalysis) -> Self {
        Self {
            resume: Some(resume),
            ..Self::default()
        }
    }

    pub fn skill_gap(skill_gap: SkillGapAnalysis) -> Self {
        Self {
            skill_gap: Some(skill_gap),
            ..Self::default()
        }
    }

    pub fn roadmap(roadmap: Roadmap) -> Self {
        Self {
            roadmap: Some(roadmap),
            ..Self::default()
        }
    }

    pub fn target_role(target_role: impl Into<String>) -> Self {
        Self {
            target_role: Some(target_role.into()),
            ..Self::default()
        }
    }
}

/// Owns the in-memory snapshot and the slot it is mirrored to.
pub struct StateStore {
    slot: Arc<dyn StateSlot>,
    key: String,
    current: PersistedState,
}

impl StateStore {
    pub fn new(slot: Arc<dyn StateSlot>, key: impl Into<String>) -> Self {
        Self {
            slot,
            key: key.into(),
            current: PersistedState::default(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn snapshot(&self) -> &PersistedState {
        &self.current
    }

    /// Reads the slot and adopts its contents as the in-memory snapshot.
    ///
    /// Returns `Ok(None)` when nothing is stored or the stored value cannot be
    /// parsed; both mean "no prior session".
    pub async fn load(&mut self) -> Result<Option<PersistedState>, StoreError> {
        let Some(raw) = self.slot.read(&self.key).await? else {
            debug!("No saved state under '{}'", self.key);
            return Ok(None);
        };

        match serde_json::from_str::<PersistedState>(&raw) {
            Ok(state) => {
                let state = state.normalize();
                info!(
                    "Restored saved state from {} slot '{}'",
                    self.slot.backend(),
                    self.key
                );
                self.current = state.clone();
                Ok(Some(state))
            }
            Err(e) => {
                warn!("Ignoring unreadable saved state under '{}': {e}", self.key);
                Ok(None)
            }
        }
    }

    /// Merges `patch` over the current snapshot and writes the whole record.
    /// The snapshot only changes once the write has succeeded.
    pub async fn save(&mut self, patch: StatePatch) -> Result<&PersistedState, StoreError> {
        let mut next = self.current.clone();
        next.merge(patch);
        next.updated_at = Some(Utc::now());

        let raw = serde_json::to_string(&next)?;
        self.slot.write(&self.key, &raw).await?;
        debug!("Saved state to {} slot '{}'", self.slot.backend(), self.key);

        self.current = next;
        Ok(&self.current)
    }

    /// Removes the slot and forgets the in-memory snapshot.
    pub async fn clear(&mut self) -> Result<(), StoreError> {
        self.slot.remove(&self.key).await?;
        self.current = PersistedState::default();
        info!("Cleared saved state '{}'", self.key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Priority, PrioritizedSkill};

    fn sample_resume() -> ResumeAnalysis {
        ResumeAnalysis {
            score: 80.0,
            ats_score: 70.0,
            strengths: vec!["React".into()],
            weaknesses: vec![],
            tips: vec![],
            skills: vec!["React".into()],
            domain: "Web Development".into(),
        }
    }

    fn sample_gap() -> SkillGapAnalysis {
        SkillGapAnalysis {
            match_percentage: 55.0,
            matching_skills: vec!["React".into()],
            missing_skills: vec!["Docker".into()],
            prioritized_missing_skills: vec![PrioritizedSkill {
                skill: "Docker".into(),
                priority: Priority::High,
                suggestions: vec![],
            }],
        }
    }

    fn store() -> (Arc<MemorySlot>, StateStore) {
        let slot = Arc::new(MemorySlot::default());
        let store = StateStore::new(slot.clone(), DEFAULT_STATE_KEY);
        (slot, store)
    }

    #[tokio::test]
    async fn test_load_without_saved_state_returns_none() {
        let (_, mut store) = store();
        assert!(store.load().await.unwrap().is_none());
        assert_eq!(store.snapshot().target_role, DEFAULT_TARGET_ROLE);
    }

    #[tokio::test]
    async fn test_save_then_load_keeps_untouched_fields() {
        let (slot, mut store) = store();
        store.save(StatePatch::resume(sample_resume())).await.unwrap();
        store.save(StatePatch::target_role("Data Engineer")).await.unwrap();
        store.save(StatePatch::skill_gap(sample_gap())).await.unwrap();

        let mut reloaded = StateStore::new(slot, DEFAULT_STATE_KEY);
        let state = reloaded.load().await.unwrap().unwrap();
        assert_eq!(state.resume, Some(sample_resume()));
        assert_eq!(state.skill_gap, Some(sample_gap()));
        assert_eq!(state.target_role, "Data Engineer");
        assert!(state.roadmap.is_none());
        assert!(state.updated_at.is_some());
    }

    #[tokio::test]
    async fn test_save_replaces_entity_whole() {
        let (_, mut store) = store();
        store.save(StatePatch::resume(sample_resume())).await.unwrap();

        let mut second = sample_resume();
        second.skills = vec!["Go".into()];
        second.strengths = vec![];
        let state = store.save(StatePatch::resume(second.clone())).await.unwrap();
        assert_eq!(state.resume, Some(second));
    }

    #[tokio::test]
    async fn test_clear_removes_slot() {
        let (slot, mut store) = store();
        store.save(StatePatch::resume(sample_resume())).await.unwrap();
        store.clear().await.unwrap();

        assert!(slot.read(DEFAULT_STATE_KEY).await.unwrap().is_none());
        assert!(store.load().await.unwrap().is_none());
        assert!(store.snapshot().resume.is_none());
    }

    #[tokio::test]
    async fn test_unparseable_slot_is_treated_as_absent() {
        let (slot, mut store) = store();
        slot.write(DEFAULT_STATE_KEY, "{not json").await.unwrap();
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_empty_target_role_falls_back_to_default() {
        let (slot, mut store) = store();
        slot.write(
            DEFAULT_STATE_KEY,
            r#"{"resume":null,"skillGap":null,"roadmap":null,"targetRole":"","userName":"Ada","userRole":"student"}"#,
        )
        .await
        .unwrap();

        let state = store.load().await.unwrap().unwrap();
        assert_eq!(state.target_role, DEFAULT_TARGET_ROLE);
        assert_eq!(state.user_name.as_deref(), Some("Ada"));
        assert_eq!(state.user_role, Some(UserRole::Student));
    }

    /// Accepts reads but refuses every write.
    struct FullDiskSlot;

    #[async_trait]
    impl StateSlot for FullDiskSlot {
        async fn read(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Ok(None)
        }

        async fn write(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full").into())
        }

        async fn remove(&self, _key: &str) -> Result<(), StoreError> {
            Ok(())
        }

        fn backend(&self) -> &'static str {
            "full-disk"
        }
    }

    #[tokio::test]
    async fn test_failed_write_leaves_snapshot_untouched() {
        let mut store = StateStore::new(Arc::new(FullDiskSlot), DEFAULT_STATE_KEY);

        let err = store.save(StatePatch::resume(sample_resume())).await.unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
        assert_eq!(store.snapshot(), &PersistedState::default());
    }

    #[test]
    fn test_record_uses_page_field_names() {
        let value = serde_json::to_value(PersistedState::default()).unwrap();
        for field in ["resume", "skillGap", "roadmap", "targetRole", "userName", "userRole"] {
            assert!(value.get(field).is_some(), "missing {field}");
        }
        assert!(value.get("updatedAt").is_none());
    }
}
