use tracing::{debug, info, warn};

use crate::app::features::FeatureBoard;
use crate::errors::AppError;
use crate::models::{UserRole, View, ViewId};
use crate::navigation::{resolve, NavigationStack, ResolvedView};
use crate::store::{PersistedState, StatePatch, StateStore};

/// The application-state container: persisted record, navigation and
/// transient view state. All mutation of shared state goes through here.
pub struct AppSession {
    store: StateStore,
    nav: NavigationStack,
    pub features: FeatureBoard,
}

impl AppSession {
    pub fn new(store: StateStore) -> Self {
        Self {
            store,
            nav: NavigationStack::new(),
            features: FeatureBoard::default(),
        }
    }

    /// Loads the saved record once at startup. A slot that cannot be read is
    /// treated like an empty one.
    pub async fn restore(&mut self) -> Option<PersistedState> {
        match self.store.load().await {
            Ok(Some(state)) => {
                info!(
                    "Resumed session for {} from '{}'",
                    state.user_name.as_deref().unwrap_or("anonymous user"),
                    self.store.key()
                );
                Some(state)
            }
            Ok(None) => None,
            Err(e) => {
                warn!("Could not read saved state, starting fresh: {e}");
                None
            }
        }
    }

    pub fn state(&self) -> &PersistedState {
        self.store.snapshot()
    }

    pub fn navigation(&self) -> &NavigationStack {
        &self.nav
    }

    pub fn view(&self) -> ResolvedView {
        resolve(self.nav.current(), self.store.snapshot(), &self.features)
    }

    pub fn navigate(&mut self, target: impl Into<ViewId>) {
        let target = target.into();
        debug!("Navigating {} -> {target}", self.nav.current());
        self.leave_for(target.resolve());
        self.nav.navigate(target);
    }

    pub fn go_back(&mut self) {
        let target = self
            .nav
            .history()
            .last()
            .map_or(View::Landing, ViewId::resolve);
        self.leave_for(target);
        self.nav.go_back();
    }

    /// Unmounts the current view when the next one is a different screen.
    fn leave_for(&mut self, next: View) {
        let leaving = self.nav.current().resolve();
        if leaving != next {
            self.features.unmount(leaving);
        }
    }

    pub async fn save_state(&mut self, patch: StatePatch) -> Result<&PersistedState, AppError> {
        Ok(self.store.save(patch).await?)
    }

    pub async fn login(&mut self, name: &str) -> Result<(), AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("name cannot be empty".to_string()));
        }
        self.save_state(StatePatch {
            user_name: Some(name.to_string()),
            ..StatePatch::default()
        })
        .await?;
        info!("Signed in as {name}");
        self.navigate(View::RoleSelection);
        Ok(())
    }

    pub async fn select_role(&mut self, role: UserRole) -> Result<(), AppError> {
        self.save_state(StatePatch {
            user_role: Some(role),
            ..StatePatch::default()
        })
        .await?;
        self.navigate(match role {
            UserRole::Recruiter => View::Recruiter,
            UserRole::Student => View::Dashboard,
        });
        Ok(())
    }

    pub async fn set_target_role(&mut self, target_role: impl Into<String>) -> Result<(), AppError> {
        self.save_state(StatePatch::target_role(target_role)).await?;
        Ok(())
    }

    /// Forgets identity and every result, and returns to the landing view with
    /// a single root history entry.
    pub async fn sign_out(&mut self) -> Result<(), AppError> {
        self.store.clear().await?;
        self.features.unmount_all();
        self.nav.reset();
        info!("Signed out");
        Ok(())
    }
}
