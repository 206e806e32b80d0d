use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{AppState, router};
use clinic_core::config::{page_limit_from_env_value, seed_file_from_env_value};
use clinic_core::constants::DEFAULT_REST_ADDR;
use clinic_core::{ClinicServices, CoreConfig};

/// Main entry point for the clinic records service
///
/// Resolves configuration from the environment once, loads the seed data into the in-memory
/// store and serves the REST API (with Swagger UI at `/swagger-ui`).
///
/// # Environment Variables
/// - `CLINIC_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `CLINIC_SEED_FILE`: YAML file replacing the built-in seed data (optional)
/// - `CLINIC_PAGE_LIMIT`: default page size of list endpoints (default: 10)
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - configuration values are invalid or the seed data cannot be loaded,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("clinic=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("CLINIC_REST_ADDR").unwrap_or_else(|_| DEFAULT_REST_ADDR.into());

    let cfg = Arc::new(CoreConfig::new(
        seed_file_from_env_value(std::env::var("CLINIC_SEED_FILE").ok()),
        page_limit_from_env_value(std::env::var("CLINIC_PAGE_LIMIT").ok())?,
    )?);
    let services = ClinicServices::load(&cfg)?;

    let app = router(AppState::new(cfg, services));

    tracing::info!("++ Starting clinic REST on {}", rest_addr);

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
