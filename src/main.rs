//! Hereafter, Pal API server.

use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use hereafter_pal::adapters::auth::{JwtConfig, JwtSessionValidator};
use hereafter_pal::adapters::http::{app_router, AppState, MediaUrls};
use hereafter_pal::adapters::paymongo::{PaymongoConfig, PaymongoPaymentAdapter};
use hereafter_pal::adapters::postgres::{
    PostgresGalleryRepository, PostgresGuestbookRepository, PostgresMemorialRepository,
    PostgresProfileRepository, PostgresSubscriptionRepository,
};
use hereafter_pal::config::{AppConfig, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    tracing::info!(
        environment = ?config.server.environment,
        database = %config.database.redacted_url(),
        payment_mode = if config.payment.is_live_mode() { "live" } else { "test" },
        "Starting Hereafter, Pal API"
    );

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .idle_timeout(config.database.idle_timeout())
        .connect(config.database.url.expose_secret())
        .await?;

    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");
    }

    let mut paymongo = PaymongoConfig::new(
        config.payment.secret_key.clone(),
        config.payment.webhook_secret.clone(),
    )
    .with_webhook_tolerance_secs(config.payment.webhook_tolerance_secs);
    if let Some(url) = &config.payment.api_base_url {
        paymongo = paymongo.with_base_url(url.clone());
    }

    let state = AppState {
        memorials: Arc::new(PostgresMemorialRepository::new(pool.clone())),
        gallery: Arc::new(PostgresGalleryRepository::new(pool.clone())),
        guestbook: Arc::new(PostgresGuestbookRepository::new(pool.clone())),
        profiles: Arc::new(PostgresProfileRepository::new(pool.clone())),
        subscriptions: Arc::new(PostgresSubscriptionRepository::new(pool.clone())),
        payment_provider: Arc::new(PaymongoPaymentAdapter::new(paymongo)),
        session_validator: Arc::new(JwtSessionValidator::new(JwtConfig::new(
            config.auth.jwt_secret.clone(),
            config.auth.audience.clone(),
        ))),
        base_url: config.server.base_url.clone(),
        media: MediaUrls::new(config.media.cloud_name.clone()),
    };

    let app = app_router(state)
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors_layer(&config.server))
        .layer(TraceLayer::new_for_http());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// JSON logs in production, human-readable otherwise. `RUST_LOG`
/// overrides `server.log_level`.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(AllowOrigin::list(origins))
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutting down");
}
