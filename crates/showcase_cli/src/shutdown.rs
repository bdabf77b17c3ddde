/// Resolve on Ctrl+C, letting in-flight requests finish.
pub(crate) async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::warn!("Shutdown requested, finishing in-flight requests");
}
