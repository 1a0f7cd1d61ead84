//! Local Exchange server binary.
//!
//! Loads configuration, connects to PostgreSQL, wires the adapters into
//! the HTTP router and serves it until Ctrl-C.

use std::error::Error;
use std::sync::Arc;

use axum::http::HeaderValue;
use axum::Router;
use sqlx::PgPool;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use local_exchange::adapters::auth::{Argon2PasswordHasher, JwtAuthenticator};
use local_exchange::adapters::http::{api_router, AppState};
use local_exchange::adapters::postgres::{
    PostgresExchangeRepository, PostgresItemListingRepository, PostgresMessageRepository,
    PostgresNotificationRepository, PostgresReviewRepository, PostgresSkillListingRepository,
    PostgresUserRepository,
};
use local_exchange::adapters::storage::LocalFileStorage;
use local_exchange::config::{AppConfig, ServerConfig};
use local_exchange::ports::UserRepository;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    tracing::info!(
        environment = ?config.server.environment,
        "Starting local-exchange"
    );

    let pool = config
        .database
        .pool_options()
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");
    }

    let state = build_state(&config, pool);
    let app = with_layers(api_router(state), &config.server);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// `RUST_LOG` wins over the configured level. JSON lines in production.
fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(server.log_level.clone()));

    if server.is_production() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn build_state(config: &AppConfig, pool: PgPool) -> AppState {
    let users: Arc<dyn UserRepository> = Arc::new(PostgresUserRepository::new(pool.clone()));
    let authenticator = Arc::new(JwtAuthenticator::new(
        &config.auth.jwt_secret,
        config.auth.token_ttl_hours,
        users.clone(),
    ));

    AppState {
        users,
        items: Arc::new(PostgresItemListingRepository::new(pool.clone())),
        skills: Arc::new(PostgresSkillListingRepository::new(pool.clone())),
        exchanges: Arc::new(PostgresExchangeRepository::new(pool.clone())),
        messages: Arc::new(PostgresMessageRepository::new(pool.clone())),
        notifications: Arc::new(PostgresNotificationRepository::new(pool.clone())),
        reviews: Arc::new(PostgresReviewRepository::new(pool)),
        password_hasher: Arc::new(Argon2PasswordHasher::new()),
        token_issuer: authenticator.clone(),
        session_validator: authenticator,
        file_storage: Arc::new(LocalFileStorage::new(config.storage.upload_dir.clone())),
        max_upload_bytes: config.storage.max_upload_bytes,
    }
}

fn with_layers(router: Router, server: &ServerConfig) -> Router {
    router
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(CompressionLayer::new())
        .layer(cors_layer(server))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

/// Configured origins, or any origin when none are set.
fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
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
