#![allow(dead_code)]

use rask_log_notifier::sender::{MessageSender, TransportError};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Test double that records every message it is handed and answers with a
/// fixed outcome.
#[derive(Debug, Default)]
pub struct RecordingSender {
    fail_with: Option<u16>,
    messages: Mutex<Vec<String>>,
}

impl RecordingSender {
    pub fn succeeding() -> Self {
        Self::default()
    }

    /// Every call fails with `UnexpectedStatus { status }`.
    pub fn failing(status: u16) -> Self {
        Self {
            fail_with: Some(status),
            ..Self::default()
        }
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    pub fn sorted_messages(&self) -> Vec<String> {
        let mut messages = self.messages();
        messages.sort();
        messages
    }
}

impl MessageSender for RecordingSender {
    async fn send(&self, message: &str) -> Result<(), TransportError> {
        self.messages.lock().unwrap().push(message.to_string());

        match self.fail_with {
            Some(status) => Err(TransportError::UnexpectedStatus { status }),
            None => Ok(()),
        }
    }
}

/// Sender that sleeps on every call and tracks how many calls overlap.
#[derive(Debug)]
pub struct SlowSender {
    delay: Duration,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    calls: AtomicUsize,
}

impl SlowSender {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl MessageSender for SlowSender {
    async fn send(&self, _message: &str) -> Result<(), TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        tokio::time::sleep(self.delay).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(())
    }
}

pub fn messages(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| (*item).to_string()).collect()
}
