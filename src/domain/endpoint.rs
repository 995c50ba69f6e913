use serde::{Deserialize, Serialize};
use std::fmt;

/// Base URL of Slack incoming webhooks. The endpoint path carries the
/// workspace/channel token triple, e.g. `T000/B000/XXXX`.
pub const DEFAULT_BASE_URL: &str = "https://hooks.slack.com/services/";

/// Destination of every message sent by a notifier run.
///
/// The full URL is the plain concatenation of base URL and path, so the
/// base is expected to carry its trailing slash (or the path its leading one).
/// An `Endpoint` is never mutated after construction; share it by reference
/// or behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    base_url: String,
    path: String,
}

impl Endpoint {
    /// Endpoint on the default webhook host.
    pub fn new(path: impl Into<String>) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, path)
    }

    pub fn with_base_url(base_url: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            path: path.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn url(&self) -> String {
        format!("{}{}", self.base_url, self.path)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.base_url, self.path)
    }
}
