use crate::sender::{MessageSender, TransportError};
use std::num::NonZeroUsize;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error};

/// Send every message at once, one task per message, and collect the
/// failures.
///
/// All messages are attempted exactly once whatever happens to the others.
/// The returned errors are in completion order, not input order; an empty
/// vector means everything was delivered.
pub async fn send_concurrently<S, M>(sender: Arc<S>, messages: &[M]) -> Vec<TransportError>
where
    S: MessageSender + 'static,
    M: AsRef<str>,
{
    dispatch(sender, messages, None).await
}

/// [`send_concurrently`] with at most `max_in_flight` sends running at the
/// same time. Tasks are still spawned up front and wait for a permit.
pub async fn send_concurrently_bounded<S, M>(
    sender: Arc<S>,
    messages: &[M],
    max_in_flight: NonZeroUsize,
) -> Vec<TransportError>
where
    S: MessageSender + 'static,
    M: AsRef<str>,
{
    let permits = Arc::new(Semaphore::new(max_in_flight.get()));
    dispatch(sender, messages, Some(permits)).await
}

async fn dispatch<S, M>(
    sender: Arc<S>,
    messages: &[M],
    permits: Option<Arc<Semaphore>>,
) -> Vec<TransportError>
where
    S: MessageSender + 'static,
    M: AsRef<str>,
{
    let total = messages.len();
    let mut tasks = JoinSet::new();

    for message in messages {
        let sender = Arc::clone(&sender);
        let permits = permits.clone();
        let message = message.as_ref().to_owned();

        tasks.spawn(async move {
            let _permit = match permits {
                Some(semaphore) => match semaphore.acquire_owned().await {
                    Ok(permit) => Some(permit),
                    Err(e) => return Err(TransportError::TaskAborted(e.to_string())),
                },
                None => None,
            };

            sender.send(&message).await
        });
    }

    debug!(tasks = total, "Dispatched concurrent deliveries");

    // JoinSet hands back exactly one result per spawned task, panics and
    // cancellations included, so this drains `total` outcomes.
    let mut failures = Vec::new();
    let mut drained = 0usize;
    while let Some(joined) = tasks.join_next().await {
        drained += 1;
        match joined {
            Ok(Ok(())) => {}
            Ok(Err(e)) => failures.push(e),
            Err(join_error) => {
                error!(error = %join_error, "Delivery task did not complete");
                failures.push(TransportError::TaskAborted(join_error.to_string()));
            }
        }
    }

    debug_assert_eq!(drained, total);
    failures
}
