use std::sync::Arc;

use auth::Authenticator;
use sqlx::postgres::PgPoolOptions;
use teamsphere::config::Config;
use teamsphere::domain::authentication::service::AuthenticationService;
use teamsphere::inbound::http::router::create_router;
use teamsphere::outbound::repositories::PostgresUserRepository;
use teamsphere::outbound::security::Argon2PasswordEncoder;
use teamsphere::outbound::security::DaoAuthenticationManager;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const MAX_CONNECTIONS: u32 = 5;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "teamsphere=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "teamsphere-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        jwt_expiration_hours = config.jwt.expiration_hours,
        "Configuration loaded"
    );

    // Refuse to start without a usable signing key.
    let expiration = config.jwt.expiration()?;
    let authenticator = Arc::new(
        Authenticator::from_base64_secret(&config.jwt.secret, expiration).map_err(|e| {
            tracing::error!(error = %e, "Invalid JWT signing secret");
            e
        })?,
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = MAX_CONNECTIONS,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool));
    let password_encoder = Arc::new(Argon2PasswordEncoder::new());
    let authentication_manager = Arc::new(DaoAuthenticationManager::new(
        Arc::clone(&user_repository),
        Arc::clone(&password_encoder),
    ));

    let auth_service = Arc::new(AuthenticationService::new(
        Arc::clone(&user_repository),
        password_encoder,
        authentication_manager,
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

    let http_application = create_router(auth_service, user_repository, authenticator);
    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited successfully");
    Ok(())
}
