// ABOUTME: Binds the listener and runs the router until Ctrl-C or SIGTERM.
// ABOUTME: No state survives shutdown; in-flight requests are allowed to finish.

use tokio::net::TcpListener;

use crate::app_state::SharedState;
use crate::routes::create_router;

/// Serve `state` on `state.config.bind` until a shutdown signal arrives.
pub async fn serve(state: SharedState) -> std::io::Result<()> {
    let bind = state.config.bind;
    let app = create_router(state, None);

    let listener = TcpListener::bind(bind).await?;
    tracing::info!(address = %listener.local_addr()?, "spellgate listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("spellgate shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for ctrl-c: {}", e);
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
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
