//! Skillscan resume skill extractor
//!
//! Accepts a PDF upload, pulls the text out of every page, and reports which
//! entries of a fixed technology skill list appear in it.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;

pub use config::Config;
pub use error::{AppError, AppResult, CatalogError};
pub use handlers::create_router;
pub use services::{SkillCatalog, SkillMatcher};
pub use state::AppState;

/// Load the reference skill list named by `config` and build the matcher.
/// Any failure here means the service must not start.
pub fn build_state(config: Config) -> anyhow::Result<AppState> {
    let catalog = SkillCatalog::load(
        &config.skills_file,
        config.skills_sheet.as_deref(),
        &config.skills_column,
    )?;

    if catalog.is_empty() {
        tracing::warn!(
            path = %catalog.source().display(),
            "Skill catalog is empty; every request will return no skills"
        );
    }

    let matcher = SkillMatcher::new(catalog.skills())?;
    Ok(AppState::new(matcher, config))
}
