use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use skillscan::{build_state, create_router, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skillscan=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let config = Config::from_env()?;

    tracing::info!("Starting Skillscan resume skill extractor");
    tracing::info!("Max file size: {}MB", config.max_file_size_mb);
    tracing::info!("Skills file: {}", config.skills_file.display());

    // The index must be complete before the first request is accepted.
    let state = build_state(config.clone()).context("Failed to load skill reference data")?;
    tracing::info!("Skill index ready with {} entries", state.matcher.len());

    let app = create_router(state);

    let addr = config.bind_address();
    tracing::info!("Server listening on {}", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
