//! The fetch / sort / modify / delete / lookup workflow.
//!
//! # Design
//! Steps run strictly in order and each one awaits its single request before
//! the next begins. The first hard failure ends the run and becomes the
//! outcome. The final lookup of a nonexistent user only logs its result.

use tracing::{info, warn};

use crate::client::RestClient;
use crate::config::WorkflowConfig;
use crate::error::OperationError;
use crate::http::Transport;
use crate::types::{UserRecord, WorkflowOutcome};

pub const WORKFLOW_COMPLETE: &str = "Workflow complete";
pub const GET_FAILED: &str = "Get user request: failed";
pub const MODIFY_FAILED: &str = "Modify user request: failed";
pub const DELETE_FAILED: &str = "Delete user request: failed";

/// Drives one user workflow against the configured service.
///
/// Holds only immutable configuration and the client; every call to
/// [`Workflow::launch`] allocates its own records.
#[derive(Debug, Clone)]
pub struct Workflow<T> {
    client: RestClient<T>,
    config: WorkflowConfig,
}

impl<T: Transport> Workflow<T> {
    pub fn new(transport: T, config: WorkflowConfig) -> Self {
        Self {
            client: RestClient::new(transport),
            config,
        }
    }

    pub fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    pub fn client(&self) -> &RestClient<T> {
        &self.client
    }

    /// Run every step and report the first failure, or success.
    pub fn launch(&self) -> WorkflowOutcome {
        match self.run() {
            Ok(()) => WorkflowOutcome {
                message: WORKFLOW_COMPLETE.to_string(),
                status: 200,
            },
            Err(err) => {
                warn!(status = err.status(), error = %err, "workflow aborted");
                WorkflowOutcome {
                    message: err.message().to_string(),
                    status: err.status(),
                }
            }
        }
    }

    fn run(&self) -> Result<(), OperationError> {
        let mut user = self.fetch_last_user_on_page()?;
        self.modify_user(&mut user)?;
        self.delete_user(&user.id)?;
        self.lookup_nonexistent_user();
        Ok(())
    }

    /// Fetch the configured page and return the user whose name sorts last.
    pub fn fetch_last_user_on_page(&self) -> Result<UserRecord, OperationError> {
        let response = self
            .client
            .get(&self.config.page_uri(), &self.config.access_token)
            .map_err(|e| e.with_message(GET_FAILED))?;

        info!(
            pages = response.header(&self.config.pagination_header).unwrap_or("unknown"),
            "total number of pages"
        );

        let users: Vec<UserRecord> = serde_json::from_str(&response.body)
            .map_err(|e| OperationError::parse(format!("user page is not valid JSON: {e}")))?;
        let last = select_last_by_name(users)
            .ok_or_else(|| OperationError::parse("user page is empty"))?;

        info!(name = %last.name, id = %last.id, "name of last user in list");
        Ok(last)
    }

    /// Rename `user` to the configured replacement and save it.
    pub fn modify_user(&self, user: &mut UserRecord) -> Result<(), OperationError> {
        user.name = self.config.replacement_name.clone();
        self.client
            .put(&self.config.user_uri(&user.id), &self.config.access_token, &*user)
            .map_err(|e| e.with_message(MODIFY_FAILED))?;
        info!(id = %user.id, "Modify user request: success");
        Ok(())
    }

    pub fn delete_user(&self, id: &str) -> Result<(), OperationError> {
        self.client
            .delete(&self.config.user_uri(id), &self.config.access_token)
            .map_err(|e| e.with_message(DELETE_FAILED))?;
        info!(id, "Delete user request: success");
        Ok(())
    }

    /// Request a user that should not exist and log the status received.
    pub fn lookup_nonexistent_user(&self) {
        let id = &self.config.nonexistent_user_id;
        match self
            .client
            .get(&self.config.user_uri(id), &self.config.access_token)
        {
            Ok(response) => info!(id = %id, status = response.status, "nonexistent user was found"),
            Err(err) => info!(id = %id, status = err.status(), "status code from invalid get user"),
        }
    }
}

/// Stable ascending sort by `name`, then take the last record.
pub fn select_last_by_name(mut users: Vec<UserRecord>) -> Option<UserRecord> {
    users.sort_by(|a, b| a.name.cmp(&b.name));
    users.pop()
}
