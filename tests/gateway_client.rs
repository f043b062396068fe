//! Integration tests for the gateway client.
//!
//! These drive `ReqwestTransport` and `execute_batch` against a wiremock HTTP
//! server standing in for a WhatsApp-Web-JS gateway.

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use wawebjs::config::{GatewayCredentials, HttpConfig};
use wawebjs::{
    build_request, execute_batch, BatchPolicy, Error, FieldValues, NormalizedResult, Operation,
    ReqwestTransport, Resource, Transport, TransportError,
};

// ============================================================================
// Test Helpers
// ============================================================================

fn credentials(server: &MockServer, api_key: Option<&str>) -> GatewayCredentials {
    GatewayCredentials {
        url: server.uri(),
        session: "default".to_string(),
        api_key: api_key.map(String::from),
    }
}

fn transport(credentials: &GatewayCredentials) -> ReqwestTransport {
    ReqwestTransport::new(credentials, &HttpConfig::default()).expect("transport")
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_send_text_round_trip() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/default/messages/send-text"))
        .and(header("accept", "application/json"))
        .and(body_json(json!({ "chatId": "628123@c.us", "text": "hello" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "123" })))
        .expect(1)
        .mount(&server)
        .await;

    let creds = credentials(&server, None);
    let items = vec![FieldValues::new()
        .with("chatId", "628123@c.us")
        .with("text", "hello")];

    let results = execute_batch(
        &transport(&creds),
        &creds,
        Resource::Chatting,
        Operation::SendText,
        &items,
        BatchPolicy::FailFast,
    )
    .await
    .unwrap();

    assert_eq!(results, vec![NormalizedResult::json(json!({ "id": "123" }))]);
}

#[tokio::test]
async fn test_send_poll_posts_poll_payload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/default/messages/send-text"))
        .and(body_json(json!({
            "chatId": "group@g.us",
            "poll": {
                "name": "Lunch?",
                "options": ["Pizza", "Sushi"],
                "multipleAnswers": true,
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    let creds = credentials(&server, None);
    let items = vec![FieldValues::new()
        .with("chatId", "group@g.us")
        .with("title", "Lunch?")
        .with("pollOptions", "Pizza ; Sushi")
        .with("multipleAnswers", "true")];

    let results = execute_batch(
        &transport(&creds),
        &creds,
        Resource::Chatting,
        Operation::SendPoll,
        &items,
        BatchPolicy::FailFast,
    )
    .await
    .unwrap();

    assert_eq!(results[0].json, json!({ "success": true }));
}

#[tokio::test]
async fn test_session_lifecycle_paths() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/sessions/default/start"))
        .and(body_json(json!({ "webhookUrl": "https://hooks.example.com/wa" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "STARTING" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/sessions/default/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "628123@c.us" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/sessions/default/stop"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let creds = credentials(&server, None);
    let transport = transport(&creds);

    let start = FieldValues::new().with("webhookUrl", "https://hooks.example.com/wa");
    let intent = build_request(Resource::Session, Operation::Start, &creds.session, &creds.url, &start)
        .unwrap();
    assert_eq!(transport.send(&intent).await.unwrap(), json!({ "status": "STARTING" }));

    let intent = build_request(
        Resource::Session,
        Operation::Me,
        &creds.session,
        &creds.url,
        &FieldValues::new(),
    )
    .unwrap();
    assert_eq!(transport.send(&intent).await.unwrap(), json!({ "id": "628123@c.us" }));

    let intent = build_request(
        Resource::Session,
        Operation::Stop,
        &creds.session,
        &creds.url,
        &FieldValues::new(),
    )
    .unwrap();
    assert_eq!(transport.send(&intent).await.unwrap(), json!({}));
}

#[tokio::test]
async fn test_qr_produces_attachment() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sessions/default/auth/qr"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "mimetype": "image/png",
            "data": "data:image/png;base64,iVBORw0KGgo=",
        })))
        .mount(&server)
        .await;

    let creds = credentials(&server, None);
    let results = execute_batch(
        &transport(&creds),
        &creds,
        Resource::Auth,
        Operation::Qr,
        &vec![FieldValues::new()],
        BatchPolicy::FailFast,
    )
    .await
    .unwrap();

    let qr = results[0].attachment("qrcode").expect("qrcode attachment");
    assert_eq!(qr.data, "iVBORw0KGgo=");
    assert_eq!(qr.file_name, "qrcode.png");
    assert_eq!(qr.mime_type, "image/png");
    assert_eq!(&qr.decode().unwrap()[1..4], b"PNG");
}

#[tokio::test]
async fn test_qr_when_already_authenticated() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sessions/default/auth/qr"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "message": "already authenticated" })),
        )
        .mount(&server)
        .await;

    let creds = credentials(&server, None);
    let results = execute_batch(
        &transport(&creds),
        &creds,
        Resource::Auth,
        Operation::Qr,
        &vec![FieldValues::new()],
        BatchPolicy::FailFast,
    )
    .await
    .unwrap();

    assert_eq!(
        results,
        vec![NormalizedResult::json(json!({ "message": "already authenticated" }))]
    );
}

#[tokio::test]
async fn test_api_key_header_is_sent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sessions/default/me"))
        .and(header("x-api-key", "s3cret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    let creds = credentials(&server, Some("s3cret"));
    let results = execute_batch(
        &transport(&creds),
        &creds,
        Resource::Session,
        Operation::Me,
        &vec![FieldValues::new()],
        BatchPolicy::FailFast,
    )
    .await
    .unwrap();
    assert_eq!(results[0].json, json!({ "ok": true }));
}

#[tokio::test]
async fn test_non_success_status_passes_through() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sessions/default/me"))
        .respond_with(ResponseTemplate::new(404).set_body_string("session not found"))
        .mount(&server)
        .await;

    let creds = credentials(&server, None);
    let err = execute_batch(
        &transport(&creds),
        &creds,
        Resource::Session,
        Operation::Me,
        &vec![FieldValues::new()],
        BatchPolicy::FailFast,
    )
    .await
    .unwrap_err();

    match err {
        Error::Transport(TransportError::Status { status, body }) => {
            assert_eq!(status, 404);
            assert_eq!(body, "session not found");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_continue_on_fail_keeps_going() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/default/messages/send-text"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "ok" })))
        .expect(1)
        .mount(&server)
        .await;

    let creds = credentials(&server, None);
    let items = vec![
        FieldValues::new().with("chatId", "a@c.us"),
        FieldValues::new().with("chatId", "b@c.us").with("text", "hi"),
    ];

    let results = execute_batch(
        &transport(&creds),
        &creds,
        Resource::Chatting,
        Operation::SendText,
        &items,
        BatchPolicy::ContinueOnFail,
    )
    .await
    .unwrap();

    assert_eq!(
        results,
        vec![
            NormalizedResult::json(json!({ "error": "missing required field 'text'" })),
            NormalizedResult::json(json!({ "id": "ok" })),
        ]
    );
}

#[tokio::test]
async fn test_check_credentials_probes_root() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("WhatsApp API"))
        .expect(1)
        .mount(&server)
        .await;

    let creds = credentials(&server, None);
    let response = transport(&creds).check_credentials().await.unwrap();
    assert_eq!(response, json!("WhatsApp API"));
}
