use super::serialization::serialize_message;
use super::{MessageSender, WebhookClient};
use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),
    #[error("Webhook did not respond with 200 OK (got HTTP {status})")]
    UnexpectedStatus { status: u16 },
    #[error("Delivery task aborted: {0}")]
    TaskAborted(String),
}

impl TransportError {
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::UnexpectedStatus { status } => Some(*status),
            _ => None,
        }
    }
}

impl WebhookClient {
    /// POST one message to the configured endpoint.
    ///
    /// Only `200 OK` counts as delivered. The response body is drained on
    /// every path so the pooled connection is released.
    pub async fn send_message(&self, message: &str) -> Result<(), TransportError> {
        let body = serialize_message(message)?;
        let start = Instant::now();

        let response = self
            .client
            .post(self.url.clone())
            .headers(self.build_headers())
            .body(body)
            .send()
            .await;

        let response = match response {
            Ok(response) => response,
            Err(e) => {
                self.stats.record_request(false, start.elapsed());
                warn!(endpoint = %self.endpoint(), error = %e, "Webhook request failed");
                return Err(self.classify(e));
            }
        };

        let status = response.status();
        if let Err(e) = response.bytes().await {
            debug!(error = %e, "Failed to drain webhook response body");
        }

        let latency = start.elapsed();
        let success = status == StatusCode::OK;
        self.stats.record_request(success, latency);

        if success {
            debug!(
                bytes = message.len(),
                latency_ms = latency.as_millis() as u64,
                "Message delivered"
            );
            Ok(())
        } else {
            warn!(
                endpoint = %self.endpoint(),
                status = status.as_u16(),
                "Webhook rejected message"
            );
            Err(TransportError::UnexpectedStatus {
                status: status.as_u16(),
            })
        }
    }

    pub fn build_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }

    fn classify(&self, error: reqwest::Error) -> TransportError {
        if error.is_timeout() {
            TransportError::Timeout(self.config.timeout)
        } else {
            TransportError::Network(error)
        }
    }
}

impl MessageSender for WebhookClient {
    async fn send(&self, message: &str) -> Result<(), TransportError> {
        self.send_message(message).await
    }
}
