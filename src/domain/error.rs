use crate::app::ConfigError;
use crate::sender::ClientError;
use crate::source::SourceError;
use thiserror::Error;

/// Top-level error type for a notifier run.
///
/// Delivery failures are not part of it: they are collected into a
/// `DeliveryReport` and never abort the run on their own.
#[derive(Error, Debug)]
pub enum NotifierError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Client error: {0}")]
    Client(#[from] ClientError),

    #[error("Source error: {0}")]
    Source(#[from] SourceError),
}
