//! Blocking HTTP transport backed by ureq.
//!
//! ureq's automatic status-code-as-error behavior and redirect following
//! are disabled so 3xx/4xx/5xx responses reach the core as data. Only
//! failures that produce no response at all (connect, DNS, I/O) are
//! reported as `None`, after being logged. Once a status is known the
//! response is always returned; an unreadable body becomes empty.

use tracing::warn;
use ureq::{Agent, RequestBuilder};
use user_workflow_core::{HttpMethod, HttpRequest, HttpResponse, Transport};

#[derive(Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .max_redirects(0)
            .max_redirects_will_error(false)
            .build()
            .new_agent();
        Self { agent }
    }

    fn call(&self, req: &HttpRequest) -> Result<HttpResponse, ureq::Error> {
        let mut response = match (req.method, &req.body) {
            (HttpMethod::Get, _) => with_headers(self.agent.get(&req.uri), &req.headers).call(),
            (HttpMethod::Delete, _) => {
                with_headers(self.agent.delete(&req.uri), &req.headers).call()
            }
            (HttpMethod::Put, Some(body)) => {
                with_headers(self.agent.put(&req.uri), &req.headers).send(body.as_bytes())
            }
            (HttpMethod::Put, None) => {
                with_headers(self.agent.put(&req.uri), &req.headers).send_empty()
            }
        }?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = match response.body_mut().read_to_vec() {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(error) => {
                warn!(status, uri = %req.uri, %error, "response body could not be read");
                String::new()
            }
        };

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, req: &HttpRequest) -> Option<HttpResponse> {
        match self.call(req) {
            Ok(response) => Some(response),
            Err(error) => {
                warn!(method = req.method.as_str(), uri = %req.uri, %error, "no response from remote service");
                None
            }
        }
    }
}

fn with_headers<B>(mut builder: RequestBuilder<B>, headers: &[(String, String)]) -> RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}
