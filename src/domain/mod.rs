//! Domain layer for rask-log-notifier.
//!
//! Contains the canonical types shared across all modules:
//! - `Endpoint`: Webhook destination (base URL + path)
//! - `NotifierError`: Top-level error type

pub mod endpoint;
pub mod error;

pub use endpoint::{DEFAULT_BASE_URL, Endpoint};
pub use error::NotifierError;
