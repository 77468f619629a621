//! HTTP transport seam for chat-completion calls.
//!
//! Descriptors stay pure; this trait is the single point where network I/O
//! happens, which also makes the conversation controller testable with an
//! in-memory double.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use super::error::TransportError;

/// Performs one chat-completion POST and returns the decoded JSON body.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn post(
        &self,
        endpoint: &str,
        headers: &[(String, String)],
        body: &Value,
    ) -> Result<Value, TransportError>;
}

/// Transport over a shared [`reqwest::Client`].
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn post(
        &self,
        endpoint: &str,
        headers: &[(String, String)],
        body: &Value,
    ) -> Result<Value, TransportError> {
        let mut request = self.client.post(endpoint);
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request.json(body).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(TransportError::Api { status, message });
        }

        Ok(response.json().await?)
    }
}
