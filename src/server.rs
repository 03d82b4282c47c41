use crate::adapters::{cache::build_cache, github::GithubClient};
use crate::api::{self, AppState};
use crate::config::ServiceConfig;
use crate::core::search::SearchService;
use crate::utils::error::Result;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Wires the cache, GitHub client and search service together.
pub fn build_state(config: &ServiceConfig) -> Result<Arc<AppState>> {
    let cache = build_cache(config.cache_capacity, config.cache_ttl_secs);
    let github = GithubClient::new(config, cache)?;
    let search = SearchService::new(Arc::new(github), config);
    Ok(Arc::new(AppState::new(search)))
}

/// Binds `config.bind` and serves until SIGINT or SIGTERM.
pub async fn run_server(config: ServiceConfig) -> Result<()> {
    tracing::info!(
        bind = %config.bind,
        github_api = %config.github_api_url,
        cache_enabled = config.cache_enabled(),
        authenticated = config.github_token.is_some(),
        "starting gistapi"
    );

    let state = build_state(&config)?;
    let listener = TcpListener::bind(config.bind).await.map_err(|e| {
        tracing::error!(bind = %config.bind, error = %e, "failed to bind listener");
        e
    })?;

    serve(listener, state, shutdown_signal()).await
}

/// Serves on an already-bound listener until `shutdown` resolves. In-flight
/// requests are allowed to finish.
pub async fn serve<F>(listener: TcpListener, state: Arc<AppState>, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    tracing::info!(bind = %addr, "listening");

    axum::serve(listener, api::router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

/// Resolves on SIGINT, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
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
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received SIGINT, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
