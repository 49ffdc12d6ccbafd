use std::sync::Arc;

use crate::config::Config;
use crate::services::{PdfProcessor, SkillMatcher};

/// Shared application state injected into route handlers. Built in full
/// before the listener binds and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct AppState {
    pub matcher: Arc<SkillMatcher>,
    pub pdf: PdfProcessor,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(matcher: SkillMatcher, config: Config) -> Self {
        Self {
            matcher: Arc::new(matcher),
            pdf: PdfProcessor::new(),
            config: Arc::new(config),
        }
    }
}
