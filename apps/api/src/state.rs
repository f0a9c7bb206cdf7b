use std::sync::Arc;

use crate::app::AppContext;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub ctx: AppContext,
    pub config: Arc<Config>,
}
