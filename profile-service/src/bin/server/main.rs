use std::future::Future;
use std::sync::Arc;

use auth::Authenticator;
use chrono::Duration;
use profile_service::config::Config;
use profile_service::domain::user::service::UserService;
use profile_service::inbound::http::router::create_router;
use profile_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "profile_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "profile-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        request_timeout_secs = config.server.request_timeout_secs,
        token_lifetime_hours = config.jwt.expiration_hours,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let token_lifetime = Duration::try_hours(config.jwt.expiration_hours).ok_or_else(|| {
        anyhow::anyhow!(
            "jwt.expiration_hours out of range: {}",
            config.jwt.expiration_hours
        )
    })?;
    let authenticator = Arc::new(
        Authenticator::new(config.jwt.secret.as_bytes()).with_token_lifetime(token_lifetime),
    );
    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let user_service = Arc::new(UserService::new(
        user_repository,
        Arc::clone(&authenticator),
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        user_service,
        authenticator,
        config.server.request_timeout(),
    );

    axum::serve(http_listener, http_application)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pg_pool.close().await;
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = until_signal(tokio::signal::ctrl_c(), "ctrl_c");

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutting down...");
}

/// Resolves when `signal` fires. A listener that fails to register never
/// resolves, so it cannot trigger shutdown on its own.
async fn until_signal(signal: impl Future<Output = std::io::Result<()>>, name: &str) {
    if let Err(e) = signal.await {
        tracing::error!(error = %e, signal = name, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
