// Process signals mapped onto cooperative shutdown
use crate::application::shutdown::ShutdownTrigger;

/// Resolves on the first interrupt (Ctrl-C) or terminate request
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received interrupt"),
        _ = terminate => tracing::info!("Received terminate"),
    }
}

pub fn spawn_signal_listener(trigger: ShutdownTrigger) {
    tokio::spawn(async move {
        shutdown_signal().await;
        trigger.trigger();
    });
}
