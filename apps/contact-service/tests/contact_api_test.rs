//! # お問い合わせ API の統合テスト
//!
//! `build_app` で本番と同じルーター・レイヤー構成を組み、送信器だけを
//! `MockMailSender` に差し替えて HTTP レベルの振る舞いを検証する。
//!
//! - 送信成功 → 200 + messageId、送信は 1 回
//! - 必須項目の欠落 → 400、送信なし
//! - リレー拒否 → 500 + エラー内容、送信試行は 1 回
//! - 旧パス `/api/send-email` も同じ振る舞い
//! - HTML フォーム（`application/x-www-form-urlencoded`）からの送信も受け付ける
//! - `Content-Type` なしのボディは空として扱い、必須項目不足の 400
//! - Request ID がレスポンスヘッダーに付与される

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use chrono::{TimeZone, Utc};
use formrelay_contact_service::{
    build_app,
    handler::{ContactState, ReadinessState},
    usecase::{MailDispatcher, TemplateRenderer},
};
use formrelay_domain::clock::FixedClock;
use formrelay_infra::mock::MockMailSender;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};
use tower::ServiceExt;

const RECIPIENT: &str = "owner@example.com";

fn test_app(sender: MockMailSender) -> Router {
    let clock = FixedClock::new(Utc.with_ymd_and_hms(2026, 10, 17, 9, 30, 0).unwrap());
    let sender = Arc::new(sender);
    let dispatcher = MailDispatcher::new(
        sender.clone(),
        TemplateRenderer::new().unwrap(),
        Arc::new(clock),
        RECIPIENT,
    );

    build_app(
        Arc::new(ContactState {
            dispatcher: Arc::new(dispatcher),
        }),
        Arc::new(ReadinessState { sender }),
    )
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn post_form(uri: &str, body: &'static str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

async fn into_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn full_submission() -> Value {
    json!({
        "name": "Ann",
        "email": "ann@example.com",
        "message": "Hello\nWorld",
        "phone": "+1 (555) 123-4567",
        "address": "1 Main St",
        "quantity": 3
    })
}

#[rstest]
#[case("/api/contact")]
#[case("/api/send-email")]
#[tokio::test]
async fn test_送信成功で200とmessage_idを返す(#[case] uri: &str) {
    // Given
    let sender = MockMailSender::new();
    let app = test_app(sender.clone());

    // When
    let response = app
        .oneshot(post_json(
            uri,
            json!({ "name": "Ann", "email": "ann@example.com", "message": "Hello" }),
        ))
        .await
        .unwrap();

    // Then
    assert_eq!(response.status(), StatusCode::OK);
    let body = into_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("Email sent successfully"));
    assert_eq!(body["messageId"], json!("<mock-1@example.com>"));
    assert!(body.get("error").is_none());

    let sent = sender.sent_emails();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, RECIPIENT);
    assert!(sent[0].subject.contains("Ann"));
}

#[rstest]
#[case(json!({ "email": "ann@example.com", "message": "Hello" }))]
#[case(json!({ "name": "Ann", "message": "Hello" }))]
#[case(json!({ "name": "Ann", "email": "ann@example.com" }))]
#[case(json!({ "name": "Ann", "email": "ann@example.com", "message": "" }))]
#[tokio::test]
async fn test_必須項目が欠けていると400を返しリレーに接続しない(#[case] body: Value) {
    // Given
    let sender = MockMailSender::new();
    let app = test_app(sender.clone());

    // When
    let response = app.oneshot(post_json("/api/contact", body)).await.unwrap();

    // Then
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        into_json(response).await,
        json!({ "success": false, "message": "Name, email, and message are required" })
    );
    assert_eq!(sender.attempt_count(), 0);
}

#[rstest]
#[case("/api/contact")]
#[case("/api/send-email")]
#[tokio::test]
async fn test_フォーム送信でも200を返し1回だけ送信する(#[case] uri: &str) {
    // Given
    let sender = MockMailSender::new();
    let app = test_app(sender.clone());

    // When
    let response = app
        .oneshot(post_form(uri, "name=Ann&email=ann%40x.com&message=Hi"))
        .await
        .unwrap();

    // Then
    assert_eq!(response.status(), StatusCode::OK);
    let body = into_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["messageId"], json!("<mock-1@example.com>"));

    let sent = sender.sent_emails();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].subject, "🔥 New Contact: Ann");
    assert!(sent[0].text_body.contains("Email: ann@x.com"));
    assert!(sent[0].text_body.contains("Message:\nHi"));
}

#[tokio::test]
async fn test_content_typeなしのjsonは必須項目不足の400を返す() {
    // Given
    let sender = MockMailSender::new();
    let app = test_app(sender.clone());
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/contact")
        .body(Body::from(
            json!({ "name": "Ann", "email": "ann@example.com", "message": "Hello" }).to_string(),
        ))
        .unwrap();

    // When
    let response = app.oneshot(request).await.unwrap();

    // Then
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        into_json(response).await,
        json!({ "success": false, "message": "Name, email, and message are required" })
    );
    assert_eq!(sender.attempt_count(), 0);
}

#[tokio::test]
async fn test_リレーが拒否すると500でエラー内容を返す() {
    // Given
    let sender = MockMailSender::failing("permanent error (535): Authentication failed");
    let app = test_app(sender.clone());

    // When
    let response = app
        .oneshot(post_json("/api/contact", full_submission()))
        .await
        .unwrap();

    // Then
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        into_json(response).await,
        json!({
            "success": false,
            "message": "Failed to send email",
            "error": "permanent error (535): Authentication failed"
        })
    );
    assert_eq!(sender.attempt_count(), 1, "リトライしないこと");
}

#[tokio::test]
async fn test_plaintext本文に全項目がそのまま含まれる() {
    let sender = MockMailSender::new();
    let app = test_app(sender.clone());

    app.oneshot(post_json("/api/contact", full_submission()))
        .await
        .unwrap();

    let text = &sender.sent_emails()[0].text_body;
    assert!(text.contains("Name: Ann"));
    assert!(text.contains("Email: ann@example.com"));
    assert!(text.contains("Phone: +1 (555) 123-4567"));
    assert!(text.contains("Address: 1 Main St"));
    assert!(text.contains("Quantity: 3"));
    assert!(text.contains("Message:\nHello\nWorld"));
    assert!(text.contains("Received at: 2026-10-17 09:30:00 UTC"));
}

#[tokio::test]
async fn test_本文の改行はhtmlでbrになる() {
    let sender = MockMailSender::new();
    let app = test_app(sender.clone());

    app.oneshot(post_json(
        "/api/contact",
        json!({ "name": "Ann", "email": "ann@example.com", "message": "line1\nline2" }),
    ))
    .await
    .unwrap();

    let email = &sender.sent_emails()[0];
    assert!(email.html_body.contains("line1<br>line2"));
    assert!(email.text_body.contains("line1\nline2"));
}

#[tokio::test]
async fn test_phoneがなければ電話の行を出さない() {
    let sender = MockMailSender::new();
    let app = test_app(sender.clone());

    app.oneshot(post_json(
        "/api/contact",
        json!({ "name": "Ann", "email": "ann@example.com", "message": "Hello" }),
    ))
    .await
    .unwrap();

    let email = &sender.sent_emails()[0];
    assert!(!email.text_body.contains("Phone:"));
    assert!(!email.html_body.contains("tel:"));
}

#[tokio::test]
async fn test_レスポンスにx_request_idヘッダーが含まれる() {
    let app = test_app(MockMailSender::new());

    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("レスポンスに x-request-id ヘッダーが含まれること")
        .to_str()
        .unwrap();
    // UUID v7: xxxxxxxx-xxxx-7xxx-xxxx-xxxxxxxxxxxx
    assert_eq!(request_id.len(), 36);
    assert_eq!(request_id.chars().nth(14), Some('7'));
}

#[tokio::test]
async fn test_クライアント提供のx_request_idがそのまま返される() {
    let app = test_app(MockMailSender::new());

    let response = app
        .oneshot(
            Request::get("/health")
                .header("x-request-id", "client-provided-request-id-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.headers().get("x-request-id").unwrap(),
        "client-provided-request-id-123"
    );
}

#[tokio::test]
async fn test_全オリジンからのプリフライトを許可する() {
    let app = test_app(MockMailSender::new());

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/api/contact")
                .header(header::ORIGIN, "https://www.example.com")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );
}
