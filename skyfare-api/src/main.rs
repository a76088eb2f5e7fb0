use std::net::SocketAddr;
use std::sync::Arc;
use anyhow::Context;
use skyfare_api::{app, AppState};
use skyfare_offer::{FormatterConfig, OfferFormatter, SearchConfig, SearchOrchestrator};
use skyfare_store::{app_config::Config, HttpFlightProvider};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skyfare_api=debug,skyfare_offer=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting Skyfare API on port {}", config.server.port);

    let provider = HttpFlightProvider::new(&config.provider).context("Failed to build provider client")?;

    if config.search.fallback_enabled {
        tracing::warn!("Offline fallback is enabled; provider outages will be served sample data");
    }

    let orchestrator = SearchOrchestrator::new(
        Arc::new(provider),
        OfferFormatter::new(FormatterConfig {
            logo_url_template: config.search.logo_url_template.clone(),
        }),
        SearchConfig {
            search_path: config.provider.search_path.clone(),
            fallback_enabled: config.search.fallback_enabled,
        },
    );

    let app = app(AppState::new(orchestrator));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
