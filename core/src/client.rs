//! JSON-over-HTTP client wrapper for the users API.
//!
//! # Design
//! `RestClient` owns a `Transport` and carries no mutable state between
//! calls. Each operation is split into a `build_*` function that produces an
//! `HttpRequest` and a status check that interprets the `HttpResponse`, so
//! both halves can be tested without a network.
//!
//! `get` only accepts 2xx statuses. `put` and `delete` reject redirects as
//! well as client and server errors; informational statuses never reach
//! this layer in practice.

use serde::Serialize;
use tracing::debug;

use crate::error::OperationError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};

const APPLICATION_JSON: &str = "application/json";

/// Synchronous client that attaches JSON and bearer-token headers to every
/// request and turns unexpected statuses into `OperationError`.
#[derive(Debug, Clone)]
pub struct RestClient<T> {
    transport: T,
}

impl<T: Transport> RestClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Issue a GET; any non-2xx status is an error.
    pub fn get(&self, uri: &str, token: &str) -> Result<HttpResponse, OperationError> {
        let request = build_get(uri, token);
        check_get(self.send(&request)?)
    }

    /// Issue a PUT with `body` encoded as JSON; 3xx, 4xx and 5xx are errors.
    pub fn put<B: Serialize>(
        &self,
        uri: &str,
        token: &str,
        body: &B,
    ) -> Result<HttpResponse, OperationError> {
        let request = build_put(uri, token, body)?;
        check_mutation(self.send(&request)?, "put request failed")
    }

    /// Issue a DELETE; 3xx, 4xx and 5xx are errors.
    pub fn delete(&self, uri: &str, token: &str) -> Result<HttpResponse, OperationError> {
        let request = build_delete(uri, token);
        check_mutation(self.send(&request)?, "delete request failed")
    }

    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, OperationError> {
        debug!(method = request.method.as_str(), uri = %request.uri, "sending request");
        let response = self.transport.execute(request).ok_or_else(|| {
            OperationError::missing(format!(
                "{} {}: no response",
                request.method.as_str(),
                request.uri
            ))
        })?;
        debug!(status = response.status, uri = %request.uri, "received response");
        Ok(response)
    }
}

pub fn build_get(uri: &str, token: &str) -> HttpRequest {
    HttpRequest {
        method: HttpMethod::Get,
        uri: uri.to_string(),
        headers: json_headers(token),
        body: None,
    }
}

pub fn build_put<B: Serialize>(
    uri: &str,
    token: &str,
    body: &B,
) -> Result<HttpRequest, OperationError> {
    let body = serde_json::to_string(body)
        .map_err(|e| OperationError::parse(format!("request body serialization failed: {e}")))?;
    Ok(HttpRequest {
        method: HttpMethod::Put,
        uri: uri.to_string(),
        headers: json_headers(token),
        body: Some(body),
    })
}

pub fn build_delete(uri: &str, token: &str) -> HttpRequest {
    HttpRequest {
        method: HttpMethod::Delete,
        uri: uri.to_string(),
        headers: json_headers(token),
        body: None,
    }
}

fn json_headers(token: &str) -> Vec<(String, String)> {
    vec![
        ("Accept".to_string(), APPLICATION_JSON.to_string()),
        ("Content-Type".to_string(), APPLICATION_JSON.to_string()),
        ("Authorization".to_string(), format!("Bearer {token}")),
    ]
}

fn check_get(response: HttpResponse) -> Result<HttpResponse, OperationError> {
    if response.is_success() {
        Ok(response)
    } else {
        Err(OperationError::remote("get request failed", response.status))
    }
}

fn check_mutation(
    response: HttpResponse,
    message: &'static str,
) -> Result<HttpResponse, OperationError> {
    if response.is_error() || response.is_redirection() {
        Err(OperationError::remote(message, response.status))
    } else {
        Ok(response)
    }
}
