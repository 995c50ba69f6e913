use serde::Serialize;

/// JSON body accepted by Slack-compatible incoming webhooks.
///
/// `text` is left out of the document when the message is empty, so the
/// empty message is posted as `{}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WebhookPayload<'a> {
    #[serde(skip_serializing_if = "str::is_empty")]
    pub text: &'a str,
}

impl<'a> WebhookPayload<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }
}

pub fn serialize_message(message: &str) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(&WebhookPayload::new(message))
}
