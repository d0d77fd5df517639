//! Synchronous core for the user maintenance workflow.
//!
//! # Overview
//! Fetches a page of users from a GoRest-style service, renames the user
//! whose name sorts last, deletes it, then looks up an id that should not
//! exist. The core builds `HttpRequest` values and interprets
//! `HttpResponse` values; a host-supplied `Transport` does the I/O.
//!
//! # Design
//! - `RestClient` attaches JSON and bearer-token headers and maps unexpected
//!   statuses to `OperationError`.
//! - `Workflow` sequences the steps and turns the first failure into a
//!   `WorkflowOutcome`.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod types;
pub mod workflow;

pub use client::RestClient;
pub use config::{ConfigError, WorkflowConfig};
pub use error::{OperationError, INTERNAL_ERROR_STATUS};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use types::{UserRecord, WorkflowOutcome};
pub use workflow::{select_last_by_name, Workflow};
