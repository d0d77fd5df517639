use tokio::net::TcpListener;
use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let token = std::env::var("MOCK_ACCESS_TOKEN").unwrap_or_else(|_| "test-token".to_string());
    let count = std::env::var("MOCK_USER_COUNT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(30);

    let listener = TcpListener::bind(format!("127.0.0.1:{port}")).await?;
    mock_server::run(listener, &token, mock_server::seed_users(count)).await
}
