use crate::sender::{MessageSender, TransportError};
use tracing::warn;

/// Send `messages` one after another in input order.
///
/// Stops at the first failure and returns it; the remaining messages are not
/// attempted. A failure therefore means some unknown-length prefix of the
/// input was delivered.
pub async fn send_sequentially<S, M>(sender: &S, messages: &[M]) -> Result<(), TransportError>
where
    S: MessageSender + ?Sized,
    M: AsRef<str>,
{
    run(sender, messages).await.1
}

/// Same as [`send_sequentially`], also returning how many messages were
/// handed to the sender.
pub(crate) async fn run<S, M>(sender: &S, messages: &[M]) -> (usize, Result<(), TransportError>)
where
    S: MessageSender + ?Sized,
    M: AsRef<str>,
{
    for (index, message) in messages.iter().enumerate() {
        if let Err(e) = sender.send(message.as_ref()).await {
            warn!(
                position = index,
                remaining = messages.len() - index - 1,
                error = %e,
                "Sequential delivery halted"
            );
            return (index + 1, Err(e));
        }
    }

    (messages.len(), Ok(()))
}
