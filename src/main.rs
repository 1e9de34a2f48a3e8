use std::sync::Arc;
use tracing::{error, info};

use storefront_orders::app_system::{seed_demo_data, setup_tracing, OrderSystem};
use storefront_orders::config::AppConfig;
use storefront_orders::http::{identity::HeaderIdentity, router, AppState};

#[tokio::main]
async fn main() -> Result<(), String> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();
    let config = AppConfig::from_env().map_err(|e| e.to_string())?;

    // Setup tracing once for the entire application
    setup_tracing(&config.log_filter);
    info!(addr = %config.bind_addr, "Starting order service");

    let system = OrderSystem::new(&config);
    if config.seed_demo_data {
        match seed_demo_data(&system).await {
            Ok(demo) => info!(user_id = %demo.user_id, voucher = %demo.voucher_code, "Demo data ready"),
            Err(e) => error!(error = %e, "Seeding failed"),
        }
    }

    let app = router(AppState::new(system.order_client.clone(), Arc::new(HeaderIdentity)));
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .map_err(|e| format!("Failed to bind {}: {}", config.bind_addr, e))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!(error = %e, "Failed to listen for shutdown signal");
            }
            info!("Shutdown signal received");
        })
        .await
        .map_err(|e| e.to_string())?;

    // The router and its state are gone once serve returns
    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
