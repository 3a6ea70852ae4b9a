use std::sync::Arc;

use course_admin::api::{self, AppState};
use course_admin::config::Config;
use course_admin::lifecycle::{setup_tracing, CourseSystem};
use course_admin::password::Sha256Encoder;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();

    let config = Config::load()?;
    let system = CourseSystem::new(config.buffer_size, Arc::new(Sha256Encoder));

    match config.admin_password.as_deref() {
        Some(password) => {
            let admin = system.seed_admin(&config.admin_username, password).await?;
            info!(user_id = %admin.id, username = %admin.username, "Administrator ready");
        }
        None => warn!("COURSE_ADMIN_PASSWORD not set, skipping administrator seed"),
    }

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    info!(port = config.port, "Listening");

    if let Err(e) = api::serve(listener, AppState::from(&system), shutdown_signal()).await {
        error!("Server error: {e}");
    }

    system.shutdown().await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
