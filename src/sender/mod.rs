pub mod client;
pub mod serialization;
pub mod transmission;

pub use client::{ClientConfig, ClientError, ClientStats, ConnectionStats, WebhookClient};
pub use serialization::{WebhookPayload, serialize_message};
pub use transmission::TransportError;

use std::future::Future;
use std::sync::Arc;

/// Anything able to deliver a single message.
///
/// The delivery coordinator only talks to this trait, so the real webhook
/// client and recording test doubles are interchangeable. Implementations
/// are invoked from many tasks at once and must not rely on per-call
/// mutable state without synchronizing it themselves.
pub trait MessageSender: Send + Sync {
    fn send(&self, message: &str) -> impl Future<Output = Result<(), TransportError>> + Send;
}

impl<S: MessageSender> MessageSender for Arc<S> {
    fn send(&self, message: &str) -> impl Future<Output = Result<(), TransportError>> + Send {
        (**self).send(message)
    }
}
