use std::sync::Arc;

use auth::AuthenticationService;
use auth::SigningSecret;
use auth_service::config::Config;
use auth_service::inbound::http::router::create_router;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auth_service=debug,auth=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "auth-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        admin_username = %config.admin.username,
        admin_role = %config.admin.role,
        token_lifetime_hours = ?config.jwt.expiration_hours,
        "Configuration loaded"
    );

    let mut authentication_service =
        AuthenticationService::new(SigningSecret::new(config.jwt.secret.as_bytes()));
    if let Some(lifetime) = config.jwt.token_lifetime() {
        authentication_service = authentication_service.with_token_lifetime(lifetime);
    }

    authentication_service.add_user(
        &config.admin.username,
        &config.admin.password,
        &config.admin.role,
    )?;
    tracing::info!(
        username = %config.admin.username,
        role = %config.admin.role,
        "Admin user registered"
    );

    let authentication_service = Arc::new(authentication_service);

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(authentication_service)).await?;

    tracing::info!("Server exited successfully");

    Ok(())
}
