use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lotto_core::config::Settings;
use lotto_core::results::service::ResultService;
use lotto_core::source::fixture::FixtureDrawSource;
use lotto_core::source::http::HttpJsonDrawSource;
use lotto_core::source::DrawSource;

mod query;
mod routes;

const DEFAULT_PORT: u16 = 8000;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let source = build_source(&settings).await.inspect_err(|e| {
        sentry_anyhow::capture_anyhow(e);
        tracing::error!(error = %e, "draw source setup failed");
    })?;
    let service = ResultService::new(source, settings.utc_offset_hours)?;
    tracing::info!(
        source = service.source_name(),
        utc_offset_hours = settings.utc_offset_hours,
        "draw source ready"
    );

    let state = routes::AppState {
        service: Arc::new(service),
    };
    let app = routes::build_router(state).layer(TraceLayer::new_for_http());

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_PORT);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!(%addr, "api listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn build_source(settings: &Settings) -> anyhow::Result<Arc<dyn DrawSource>> {
    if let Some(path) = settings.draw_source_fixture.as_deref() {
        let fixture = FixtureDrawSource::from_path(path).await?;
        tracing::info!(path, draws = fixture.len(), "serving draws from fixture");
        return Ok(Arc::new(fixture));
    }
    Ok(Arc::new(HttpJsonDrawSource::from_settings(settings)?))
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

fn init_sentry(settings: &Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
