use std::sync::Arc;

use crate::config::Config;
use crate::matching::scoring::ProjectMatcher;
use crate::scholar::rate_limit::RateLimiter;
use crate::scholar::ScholarSource;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable matcher. Default: SkillOverlapMatcher over the loaded catalogue.
    pub matcher: Arc<dyn ProjectMatcher>,
    /// Pluggable profile source. Default: HttpScholarSource.
    pub scholar_source: Arc<dyn ScholarSource>,
    /// Per-client limit on profile fetches.
    pub rate_limiter: Arc<RateLimiter>,
}
