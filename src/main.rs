use daily_score::{router, ApiClient, AppState, Config, SessionManager, TokenStore};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();
    info!(api = %config.api_base_url, session = %config.session_path.display(), "starting");

    let client = ApiClient::new(config.api_base_url.clone());
    let session = SessionManager::load(TokenStore::new(config.session_path.clone())).await;
    session.spawn_restore(client.clone());

    let app = router(AppState::new(client, session));

    let addr = config.listen_addr();
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
}
