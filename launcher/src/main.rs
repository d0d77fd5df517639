use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};
use user_workflow_core::{Workflow, WorkflowConfig};
use workflow_launcher::UreqTransport;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = WorkflowConfig::from_env()?;
    if config.access_token.is_empty() {
        warn!("GOREST_ACCESS_TOKEN is not set; remote calls will be unauthorized");
    }

    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, base_url = %config.base_url, page = config.page, "launcher listening");

    workflow_launcher::run(listener, Workflow::new(UreqTransport::new(), config)).await?;
    Ok(())
}
