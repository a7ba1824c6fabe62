//! OS signal handling.

/// Resolve once Ctrl+C (SIGINT) is received.
pub async fn wait_for_shutdown() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => {
            // Without a signal handler we can never be told to stop; park
            // forever rather than exiting immediately.
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    }
}
