use crate::domain::Endpoint;
use reqwest::{Client, ClientBuilder};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Upper bound for a whole request, body included.
    pub timeout: Duration,
    pub connection_timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connection_timeout: Duration::from_secs(10),
            user_agent: concat!("rask-log-notifier/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionStats {
    pub total_requests: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
    pub average_response_time: Duration,
}

#[derive(Debug, Default)]
pub struct ClientStats {
    total_requests: AtomicU64,
    successful_requests: AtomicU64,
    failed_requests: AtomicU64,
    total_response_time: AtomicU64,
}

impl ClientStats {
    pub fn record_request(&self, success: bool, response_time: Duration) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        self.total_response_time
            .fetch_add(response_time.as_millis() as u64, Ordering::Relaxed);

        if success {
            self.successful_requests.fetch_add(1, Ordering::Relaxed);
        } else {
            self.failed_requests.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn snapshot(&self) -> ConnectionStats {
        let total_requests = self.total_requests.load(Ordering::Relaxed);
        let total_response_time = self.total_response_time.load(Ordering::Relaxed);

        let average_response_time = if total_requests > 0 {
            Duration::from_millis(total_response_time / total_requests)
        } else {
            Duration::ZERO
        };

        ConnectionStats {
            total_requests,
            successful_requests: self.successful_requests.load(Ordering::Relaxed),
            failed_requests: self.failed_requests.load(Ordering::Relaxed),
            average_response_time,
        }
    }
}

/// HTTP transport posting messages to a single webhook endpoint.
///
/// Cloning is cheap: the reqwest connection pool and the stats are shared
/// between clones, which makes one client usable from every delivery task.
#[derive(Debug, Clone)]
pub struct WebhookClient {
    pub(crate) client: Client,
    pub(crate) config: ClientConfig,
    endpoint: Endpoint,
    pub(crate) url: Url,
    pub(crate) stats: Arc<ClientStats>,
}

impl WebhookClient {
    pub fn new(endpoint: Endpoint, config: ClientConfig) -> Result<Self, ClientError> {
        let url: Url = endpoint.url().parse().map_err(|e| {
            ClientError::InvalidConfiguration(format!(
                "Invalid webhook URL '{}': {}",
                endpoint.url(),
                e
            ))
        })?;

        let client = ClientBuilder::new()
            .timeout(config.timeout)
            .connect_timeout(config.connection_timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(ClientError::Build)?;

        Ok(Self {
            client,
            config,
            endpoint,
            url,
            stats: Arc::new(ClientStats::default()),
        })
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn connection_stats(&self) -> ConnectionStats {
        self.stats.snapshot()
    }
}
