//! HTTP trigger for the user workflow.
//!
//! # Design
//! `GET /launch` (and the legacy `GET /challenge/launch`) runs one workflow
//! on tokio's blocking pool, since the core and its ureq transport are
//! synchronous. The response body is the outcome message and the status
//! mirrors the outcome.

pub mod transport;

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Router};
use tokio::net::TcpListener;
use tracing::{error, info};
use user_workflow_core::{Transport, Workflow, WorkflowOutcome};

pub use transport::UreqTransport;

pub fn app<T>(workflow: Workflow<T>) -> Router
where
    T: Transport + Send + Sync + 'static,
{
    Router::new()
        .route("/launch", get(launch::<T>))
        .route("/challenge/launch", get(launch::<T>))
        .with_state(Arc::new(workflow))
}

pub async fn run<T>(listener: TcpListener, workflow: Workflow<T>) -> Result<(), std::io::Error>
where
    T: Transport + Send + Sync + 'static,
{
    axum::serve(listener, app(workflow)).await
}

async fn launch<T>(State(workflow): State<Arc<Workflow<T>>>) -> (StatusCode, String)
where
    T: Transport + Send + Sync + 'static,
{
    info!("workflow launched");
    let outcome = match tokio::task::spawn_blocking(move || workflow.launch()).await {
        Ok(outcome) => outcome,
        Err(e) => {
            error!(error = %e, "workflow task failed");
            WorkflowOutcome {
                message: "Workflow aborted".to_string(),
                status: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
            }
        }
    };
    info!(
        success = outcome.is_success(),
        status = outcome.status,
        message = %outcome.message,
        "workflow finished"
    );
    into_response_parts(outcome)
}

/// Statuses outside the valid HTTP range are reported as 500.
fn into_response_parts(outcome: WorkflowOutcome) -> (StatusCode, String) {
    let status = StatusCode::from_u16(outcome.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, outcome.message)
}
