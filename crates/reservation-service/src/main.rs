//! Reservation Service
//!
//! REST API for restaurant table reservations

use anyhow::{Context, Result};
use reservation_service::{
    create_router, AppState, Catalog, Config, LogNotifier, Notifier, WebhookNotifier,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reservation_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Reservation Service");

    let config = Config::from_env().context("Failed to load configuration")?;

    let catalog = match &config.catalog_path {
        Some(path) => Catalog::from_file(path).context("Failed to load catalog")?,
        None => Catalog::seeded(),
    };
    info!("Catalog ready with {} restaurants", catalog.list().len());

    let notifier: Arc<dyn Notifier> = match &config.notify_webhook_url {
        Some(url) => {
            info!("Notifications relayed to {}", url);
            Arc::new(WebhookNotifier::new(url.clone()))
        }
        None => {
            info!("No NOTIFY_WEBHOOK_URL set, notifications are logged only");
            Arc::new(LogNotifier)
        }
    };

    // Create router
    let app = create_router(AppState::new(catalog, notifier));

    // Bind and serve
    let addr = config.api_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Reservation Service running on http://{}", addr);

    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}
