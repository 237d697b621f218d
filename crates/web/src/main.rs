use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use club_client::ClubClient;
use utoipa::OpenApi;

mod config;
mod error;
mod features;
mod middleware;
mod routes;
mod state;

use config::Config;
use middleware::auth::ApiKeys;
use state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::athletes::handlers::list_athletes,
        features::athletes::handlers::get_athlete,
        features::athletes::handlers::create_athlete,
        features::athletes::handlers::update_athlete,
        features::athletes::handlers::delete_athlete,
        features::fees::handlers::list_fees,
        features::fees::handlers::create_fee,
        features::fees::handlers::update_fee,
        features::fees::handlers::delete_fee,
        features::memberships::handlers::list_active_memberships,
        features::menu::handlers::get_menu,
    ),
    components(
        schemas(
            membership::models::Athlete,
            membership::models::Fee,
            membership::models::MenuItem,
            membership::dto::athlete::AthleteForm,
            membership::dto::fee::FeeForm,
            membership::dto::fee::FeeWithAthlete,
            membership::dto::membership::ActiveMembership,
            membership::dto::menu::MenuEntry,
        )
    ),
    tags(
        (name = "athletes", description = "Athlete records"),
        (name = "fees", description = "Membership fees"),
        (name = "memberships", description = "Derived membership views"),
        (name = "menu", description = "Role based dashboard menu"),
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("API Key")
                        .build(),
                ),
            )
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting club dashboard API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    let client = ClubClient::with_timeout(
        &config.club_api_url,
        Duration::from_secs(config.upstream_timeout_secs),
    )
    .context("Failed to build club API client")?;
    tracing::info!("Using club API at: {}", client.base_url());

    let api_keys = ApiKeys::from_comma_separated(&config.api_keys);
    if api_keys.is_empty() {
        tracing::warn!("API_KEYS is empty, every write endpoint will answer 401");
    }

    let app = routes::build_router(AppState::new(Arc::new(client)), api_keys);

    let bind_address = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
