//! Delivery coordinator: drives a [`MessageSender`] over a set of messages,
//! either one at a time (short-circuiting) or all at once (fan-out/fan-in).

pub mod concurrent;
pub mod sequential;

pub use concurrent::{send_concurrently, send_concurrently_bounded};
pub use sequential::send_sequentially;

use crate::sender::{MessageSender, TransportError};
use std::fmt;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeliveryMode {
    /// Input order, stop at the first failure.
    Sequential,
    /// One task per message, every failure collected.
    #[default]
    Concurrent,
}

impl DeliveryMode {
    pub fn from_sync_flag(sync: bool) -> Self {
        if sync {
            DeliveryMode::Sequential
        } else {
            DeliveryMode::Concurrent
        }
    }
}

impl fmt::Display for DeliveryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryMode::Sequential => f.write_str("sequential"),
            DeliveryMode::Concurrent => f.write_str("concurrent"),
        }
    }
}

/// Outcome of one delivery run.
#[derive(Debug)]
pub struct DeliveryReport {
    pub mode: DeliveryMode,
    pub total: usize,
    /// Messages handed to the sender. Lower than `total` only when a
    /// sequential run halted early.
    pub attempted: usize,
    pub failures: Vec<TransportError>,
}

impl DeliveryReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    pub fn into_failures(self) -> Vec<TransportError> {
        self.failures
    }
}

/// Owns a shared sender and applies the configured delivery mode to it.
#[derive(Debug)]
pub struct DeliveryCoordinator<S> {
    sender: Arc<S>,
    max_in_flight: Option<NonZeroUsize>,
}

impl<S> Clone for DeliveryCoordinator<S> {
    fn clone(&self) -> Self {
        Self {
            sender: Arc::clone(&self.sender),
            max_in_flight: self.max_in_flight,
        }
    }
}

impl<S: MessageSender + 'static> DeliveryCoordinator<S> {
    pub fn new(sender: S) -> Self {
        Self::from_shared(Arc::new(sender))
    }

    pub fn from_shared(sender: Arc<S>) -> Self {
        Self {
            sender,
            max_in_flight: None,
        }
    }

    /// Cap the number of concurrent sends; `None` keeps the unbounded fan-out.
    #[must_use]
    pub fn with_max_in_flight(mut self, max_in_flight: Option<NonZeroUsize>) -> Self {
        self.max_in_flight = max_in_flight;
        self
    }

    pub fn sender(&self) -> &S {
        &self.sender
    }

    pub fn max_in_flight(&self) -> Option<NonZeroUsize> {
        self.max_in_flight
    }

    pub async fn deliver<M: AsRef<str>>(&self, mode: DeliveryMode, messages: &[M]) -> DeliveryReport {
        let start = Instant::now();
        let total = messages.len();

        let (attempted, failures) = match mode {
            DeliveryMode::Sequential => {
                let (attempted, result) = sequential::run(&*self.sender, messages).await;
                (attempted, result.err().into_iter().collect())
            }
            DeliveryMode::Concurrent => {
                let failures = match self.max_in_flight {
                    Some(limit) => {
                        send_concurrently_bounded(Arc::clone(&self.sender), messages, limit).await
                    }
                    None => send_concurrently(Arc::clone(&self.sender), messages).await,
                };
                (total, failures)
            }
        };

        let report = DeliveryReport {
            mode,
            total,
            attempted,
            failures,
        };

        if report.is_success() {
            info!(
                mode = %mode,
                total,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "All messages delivered"
            );
        } else {
            warn!(
                mode = %mode,
                total,
                attempted = report.attempted,
                failed = report.failure_count(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Delivery finished with failures"
            );
        }

        report
    }
}
