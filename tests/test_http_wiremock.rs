use rask_log_notifier::delivery::send_concurrently;
use rask_log_notifier::domain::Endpoint;
use rask_log_notifier::sender::{ClientConfig, MessageSender, TransportError, WebhookClient};
use std::sync::Arc;
use std::time::Duration;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_string, header, method, path},
};

const SERVICE_ENDPOINT: &str = "/this/is/a/test";

fn client_for(server: &MockServer, config: ClientConfig) -> WebhookClient {
    let endpoint = Endpoint::with_base_url(server.uri(), SERVICE_ENDPOINT);
    WebhookClient::new(endpoint, config).unwrap()
}

#[tokio::test]
async fn test_send_message_returns_error_on_500() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(SERVICE_ENDPOINT))
        .and(header("content-type", "application/json"))
        .and(body_string(r#"{"text":"Ciao!"}"#))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, ClientConfig::default());
    let result = client.send("Ciao!").await;

    match result {
        Err(TransportError::UnexpectedStatus { status }) => assert_eq!(status, 500),
        other => panic!("Expected UnexpectedStatus, got {other:?}"),
    }

    let stats = client.connection_stats();
    assert_eq!(stats.total_requests, 1);
    assert_eq!(stats.failed_requests, 1);
}

#[tokio::test]
async fn test_send_message_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(SERVICE_ENDPOINT))
        .and(body_string(r#"{"text":"deploy finished"}"#))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, ClientConfig::default());

    assert!(client.send("deploy finished").await.is_ok());

    let stats = client.connection_stats();
    assert_eq!(stats.successful_requests, 1);
    assert_eq!(stats.failed_requests, 0);
}

#[tokio::test]
async fn test_empty_message_posts_empty_object() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(SERVICE_ENDPOINT))
        .and(body_string("{}"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, ClientConfig::default());
    assert!(client.send("").await.is_ok());
}

#[tokio::test]
async fn test_non_200_success_codes_are_failures() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(202))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, ClientConfig::default());
    let err = client.send("queued?").await.unwrap_err();

    assert_eq!(err.status(), Some(202));
}

#[tokio::test]
async fn test_user_agent_is_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(header("user-agent", "rask-log-notifier/test"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = ClientConfig {
        user_agent: "rask-log-notifier/test".to_string(),
        ..Default::default()
    };
    let client = client_for(&mock_server, config);

    assert!(client.send("hello").await.is_ok());
}

#[tokio::test]
async fn test_request_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&mock_server)
        .await;

    let config = ClientConfig {
        timeout: Duration::from_millis(100),
        ..Default::default()
    };
    let client = client_for(&mock_server, config);

    let err = client.send("slow").await.unwrap_err();
    assert!(
        matches!(err, TransportError::Timeout(_)),
        "Expected timeout, got {err:?}"
    );
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    // Port 9 (discard) is essentially never listening on loopback.
    let endpoint = Endpoint::with_base_url("http://127.0.0.1:9", SERVICE_ENDPOINT);
    let config = ClientConfig {
        timeout: Duration::from_secs(2),
        connection_timeout: Duration::from_secs(1),
        ..Default::default()
    };
    let client = WebhookClient::new(endpoint, config).unwrap();

    let err = client.send("anyone there?").await.unwrap_err();
    assert!(
        matches!(err, TransportError::Network(_) | TransportError::Timeout(_)),
        "Expected network error, got {err:?}"
    );
    assert_eq!(client.connection_stats().failed_requests, 1);
}

#[tokio::test]
async fn test_concurrent_delivery_through_webhook() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(SERVICE_ENDPOINT))
        .and(body_string(r#"{"text":"bad"}"#))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path(SERVICE_ENDPOINT))
        .respond_with(ResponseTemplate::new(200))
        .expect(8)
        .mount(&mock_server)
        .await;

    let client = Arc::new(client_for(&mock_server, ClientConfig::default()));
    let mut to_send: Vec<String> = (0..8).map(|i| format!("line {i}")).collect();
    to_send.push("bad".to_string());
    to_send.push("bad".to_string());

    let errors = send_concurrently(client.clone(), &to_send).await;

    assert_eq!(errors.len(), 2);
    assert!(errors.iter().all(|e| e.status() == Some(500)));

    let stats = client.connection_stats();
    assert_eq!(stats.total_requests, 10);
    assert_eq!(stats.successful_requests, 8);
}
