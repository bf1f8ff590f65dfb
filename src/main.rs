//! Craft Workbench - back-office service for a handmade-crafts shop

use anyhow::Result;
use craft_workbench::{api, config::AppConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())).with(tracing_subscriber::fmt::layer()).init();

    let config = AppConfig::from_env()?;
    let services = [
        ("WooCommerce", config.woo.is_some()),
        ("Anthropic", config.anthropic.is_some()),
        ("Airtable", config.airtable.is_some()),
        ("Facebook", config.facebook.is_some()),
        ("Instagram", config.instagram.is_some()),
    ];
    for (service, configured) in services {
        if !configured { tracing::warn!(service, "credentials missing; calls to this service will fail"); }
    }

    let state = api::AppState::from_config(&config)?;
    let app = api::router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("craft-workbench listening on {}", addr);
    axum::serve(tokio::net::TcpListener::bind(&addr).await?, app).await?;
    Ok(())
}
