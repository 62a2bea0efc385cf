//! `reqwest` transport for the auth endpoints.
//!
//! The client keeps a cookie store, so the session cookie set by a successful
//! login rides along on every later request in the same process.

use std::time::Duration;

use ydyd_gate::{AuthRequest, AuthTransport, HttpReply, Method, TransportError};

#[cfg(test)]
#[path = "transport_test.rs"]
mod tests;

pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestTransport {
    /// Build a cookie-keeping client rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns the underlying `reqwest` error if the client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .build()?;
        Ok(Self { client, base_url: base_url.trim_end_matches('/').to_owned() })
    }

    fn url(&self, path: &str) -> String {
        endpoint_url(&self.base_url, path)
    }
}

fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

fn map_error(error: &reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout
    } else if error.is_builder() {
        TransportError::Request(error.to_string())
    } else {
        TransportError::Network(error.to_string())
    }
}

#[async_trait::async_trait(?Send)]
impl AuthTransport for ReqwestTransport {
    async fn send(&self, request: AuthRequest) -> Result<HttpReply, TransportError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        };
        let url = self.url(&request.path);
        tracing::debug!(endpoint = request.endpoint.as_str(), %url, "sending auth request");

        let builder = self.client.request(method, &url);
        let builder = match &request.body {
            Some(body) => builder.json(body),
            None => builder,
        };
        let response = builder.send().await.map_err(|e| map_error(&e))?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| map_error(&e))?;
        Ok(HttpReply { status, body })
    }
}
