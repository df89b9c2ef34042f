use anyhow::Context;
use axum::http::{header, HeaderValue, Method};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pokestarter_core::catalog::pokemontcg::PokemonTcgClient;
use pokestarter_core::config::Settings;
use pokestarter_core::llm::openai::OpenAiClient;
use pokestarter_core::present::Presenter;
use pokestarter_core::recommend::Recommender;

mod routes;

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

    // Missing keys stop startup instead of failing the first request.
    if let Err(e) = settings.validate() {
        sentry_anyhow::capture_anyhow(&e);
        tracing::error!(error = %e, "invalid configuration");
        return Err(e);
    }

    let llm = OpenAiClient::from_settings(&settings)?;
    let catalog = PokemonTcgClient::from_settings(&settings)?;
    let state = routes::AppState {
        service: Arc::new(Recommender::new(Arc::new(llm), Arc::new(catalog))),
        presenter: Arc::new(Presenter::new(routes::VIEW_PATH)?),
    };

    let app = routes::router(state)
        .layer(cors_layer(&settings)?)
        .layer(TraceLayer::new_for_http());

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], settings.port));

    tracing::info!(%addr, model = %settings.openai_model, "api listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn cors_layer(settings: &Settings) -> anyhow::Result<CorsLayer> {
    if settings.cors_allowed_origins.is_empty() {
        return Ok(CorsLayer::permissive());
    }

    let origins = settings
        .cors_allowed_origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .with_context(|| format!("invalid CORS origin: {origin}"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]))
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
