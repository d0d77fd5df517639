//! Workflow configuration.
//!
//! Defaults target the public GoRest service. Every value can be overridden
//! through the environment; the access token has no usable default.

use thiserror::Error;

pub const ENV_BASE_URL: &str = "GOREST_BASE_URL";
pub const ENV_USERS_PATH: &str = "GOREST_USERS_PATH";
pub const ENV_ACCESS_TOKEN: &str = "GOREST_ACCESS_TOKEN";
pub const ENV_PAGE: &str = "GOREST_PAGE";
pub const ENV_PAGINATION_HEADER: &str = "GOREST_PAGINATION_HEADER";
pub const ENV_REPLACEMENT_NAME: &str = "WORKFLOW_REPLACEMENT_NAME";
pub const ENV_NONEXISTENT_USER_ID: &str = "WORKFLOW_NONEXISTENT_USER_ID";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be a positive integer, got {value:?}")]
    InvalidPage { key: &'static str, value: String },

    #[error("{key} must not be empty")]
    Empty { key: &'static str },
}

/// Values the workflow needs to address the remote users service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowConfig {
    pub base_url: String,
    pub users_path: String,
    pub access_token: String,
    pub page: u32,
    pub pagination_header: String,
    pub replacement_name: String,
    pub nonexistent_user_id: String,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            base_url: "https://gorest.co.in".to_string(),
            users_path: "/public/v2/users".to_string(),
            access_token: String::new(),
            page: 3,
            pagination_header: "X-Pagination-Pages".to_string(),
            replacement_name: "Lea Cook".to_string(),
            nonexistent_user_id: "5555".to_string(),
        }
    }
}

impl WorkflowConfig {
    /// Read overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from `lookup`, falling back to defaults for absent keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_BASE_URL) {
            config.base_url = non_empty(ENV_BASE_URL, value)?;
        }
        if let Some(value) = lookup(ENV_USERS_PATH) {
            config.users_path = non_empty(ENV_USERS_PATH, value)?;
        }
        if let Some(value) = lookup(ENV_ACCESS_TOKEN) {
            config.access_token = value;
        }
        if let Some(value) = lookup(ENV_PAGE) {
            let parsed = value.trim().parse::<u32>();
            config.page = match parsed {
                Ok(page) if page > 0 => page,
                _ => return Err(ConfigError::InvalidPage { key: ENV_PAGE, value }),
            };
        }
        if let Some(value) = lookup(ENV_PAGINATION_HEADER) {
            config.pagination_header = non_empty(ENV_PAGINATION_HEADER, value)?;
        }
        if let Some(value) = lookup(ENV_REPLACEMENT_NAME) {
            config.replacement_name = non_empty(ENV_REPLACEMENT_NAME, value)?;
        }
        if let Some(value) = lookup(ENV_NONEXISTENT_USER_ID) {
            config.nonexistent_user_id = non_empty(ENV_NONEXISTENT_USER_ID, value)?;
        }

        Ok(config)
    }

    /// Listing URI for the configured page.
    pub fn page_uri(&self) -> String {
        format!("{}?page={}", self.users_uri(), self.page)
    }

    /// Per-record URI.
    pub fn user_uri(&self, id: &str) -> String {
        format!("{}/{id}", self.users_uri())
    }

    fn users_uri(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.users_path.trim_matches('/')
        )
    }
}

fn non_empty(key: &'static str, value: String) -> Result<String, ConfigError> {
    if value.trim().is_empty() {
        Err(ConfigError::Empty { key })
    } else {
        Ok(value)
    }
}
