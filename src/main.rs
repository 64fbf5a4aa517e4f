use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use promo_cms::auth::{AuthGate, SessionStore, StaticCredentialProvider};
use promo_cms::config::AppConfig;
use promo_cms::http::{self, AppState, Stores};
use promo_cms::media::ImageAttachmentHandler;
use promo_cms::metrics::{self, Metrics};
use promo_cms::resource::store::PgResourceStore;
use promo_cms::utils::{retry_with_backoff, RetryConfig};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured logging with environment-based filtering
    // Default to INFO level, can be overridden with RUST_LOG env var
    // Example: RUST_LOG=debug cargo run
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,promo_cms=debug"))
        )
        .init();

    tracing::info!("🚀 Starting promo CMS");

    let config = AppConfig::from_env().context("Failed to load configuration")?;

    // === 1. Initialize Prometheus metrics ===
    let metrics = Arc::new(Metrics::new()?);
    tracing::info!("📊 Metrics registry created with {} metrics", metrics.registry().gather().len());

    // === 2. Upload directory ===
    let images = Arc::new(ImageAttachmentHandler::new(config.upload_dir.clone(), metrics.clone()));
    images
        .ensure_root()
        .await
        .with_context(|| format!("Failed to create upload directory {}", config.upload_dir.display()))?;

    // === 3. Stores ===
    let stores = if config.uses_memory_store() {
        tracing::warn!("DATABASE_URL=memory, records will not survive a restart");
        Stores::in_memory()
    } else {
        connect_postgres(&config).await?
    };

    // === 4. Admin gate ===
    let auth = AuthGate::new(
        Arc::new(StaticCredentialProvider::new(
            config.admin_username.clone(),
            config.admin_password.clone(),
        )),
        SessionStore::new(config.session_ttl),
        metrics.clone(),
    );

    let state = web::Data::new(AppState::new(
        stores,
        images,
        auth,
        metrics.clone(),
        config.upload_max_bytes,
    ));

    // === 5. Serve the site and the metrics endpoint side by side ===
    tracing::info!(
        "🌐 Listening on http://{}:{}",
        config.bind_address,
        config.port
    );
    let site = HttpServer::new(move || {
        App::new()
            .wrap(http::cors())
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(http::configure)
    })
    .bind((config.bind_address.as_str(), config.port))
    .with_context(|| format!("Failed to bind {}:{}", config.bind_address, config.port))?
    .run();

    let metrics_server = metrics::start_metrics_server(metrics.registry().clone(), config.metrics_port);

    tokio::try_join!(site, metrics_server)?;

    tracing::info!("👋 Shut down");
    Ok(())
}

async fn connect_postgres(config: &AppConfig) -> anyhow::Result<Stores> {
    tracing::info!("Connecting to PostgreSQL...");

    let store = retry_with_backoff("connect to database", RetryConfig::startup(), |_attempt| {
        PgResourceStore::connect(&config.database_url, config.db_max_connections)
    })
    .await
    .into_result()
    .context("Failed to connect to PostgreSQL")?;

    store.migrate().await.context("Failed to create schema")?;

    Ok(Stores::postgres(store))
}
