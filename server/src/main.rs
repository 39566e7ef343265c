mod identity;
mod routes;
mod services;
mod state;

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

const SESSION_PURGE_INTERVAL: Duration = Duration::from_secs(300);

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");

    let identity = match identity::IdentityClient::from_env() {
        Ok(client) => {
            tracing::info!(region = client.region(), "identity provider configured");
            client
        }
        Err(e) => {
            tracing::error!(error = %e, "identity provider not configured");
            std::process::exit(1);
        }
    };

    let state = state::AppState::new(Arc::new(identity));

    // Spawn background session cleanup.
    let _purge = services::session::spawn_purge_task(state.sessions.clone(), SESSION_PURGE_INTERVAL);

    let app = match routes::leptos_app(state) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!(error = %e, "leptos app setup failed");
            std::process::exit(1);
        }
    };
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "wayfarer listening");
    axum::serve(listener, app).await.expect("server failed");
}
