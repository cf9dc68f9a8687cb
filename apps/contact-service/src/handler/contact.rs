//! # お問い合わせハンドラ
//!
//! フォーム送信を受け取り、検証してメールとして転送する。
//!
//! ## エンドポイント
//!
//! - `POST /api/contact` - お問い合わせ送信
//! - `POST /api/send-email` - 同上（旧パス。同じハンドラを使う）
//!
//! ## レスポンス
//!
//! | 状況 | ステータス | ボディ |
//! |------|-----------|--------|
//! | 送信成功 | 200 | `{ "success": true, "message": "Email sent successfully", "messageId": ... }` |
//! | 必須項目の欠落 | 400 | `{ "success": false, "message": "Name, email, and message are required" }` |
//! | ボディが JSON/フォームとして不正 | 400 | `{ "success": false, "message": "Invalid request body" }` |
//!
//! ## リクエストボディ
//!
//! `Content-Type` で読み方を切り替える。
//!
//! - `application/json`（`+json` を含む）: JSON として読む
//! - `application/x-www-form-urlencoded`: HTML フォームの送信として読む
//! - それ以外・指定なし: ボディを読まず空の入力として扱う（必須項目不足の 400 になる）
//! | 送信失敗 | 500 | `{ "success": false, "message": "Failed to send email", "error": ... }` |

use std::sync::Arc;

use axum::{
    Form,
    Json,
    extract::{FromRequest, Request, State},
    http::header,
    response::IntoResponse,
};
use formrelay_domain::{
    contact::ContactForm,
    notification::{DELIVERED_MESSAGE, DeliveryOutcome, MessageId},
};
use formrelay_shared::{
    event_log::{error, event},
    log_business_event,
};
use serde::{Deserialize, Deserializer, Serialize};

use crate::{error::ContactError, usecase::MailDispatcher};

/// お問い合わせハンドラの共有状態
pub struct ContactState {
    pub dispatcher: Arc<MailDispatcher>,
}

// --- リクエスト/レスポンス型 ---

/// お問い合わせリクエスト
///
/// 必須項目の有無はハンドラではなく [`ContactForm::validate`] で判定するため、
/// すべて任意で受け取る。
#[derive(Debug, Default, Deserialize)]
pub struct ContactRequest {
    #[serde(default)]
    pub name:     Option<String>,
    #[serde(default)]
    pub email:    Option<String>,
    #[serde(default)]
    pub message:  Option<String>,
    /// 数値で送られてくるフォームもあるため文字列化して受け取る
    #[serde(default, deserialize_with = "string_or_number")]
    pub phone:    Option<String>,
    #[serde(default)]
    pub address:  Option<String>,
    /// 数値で送られてくるフォームもあるため文字列化して受け取る
    #[serde(default, deserialize_with = "string_or_number")]
    pub quantity: Option<String>,
}

impl From<ContactRequest> for ContactForm {
    fn from(req: ContactRequest) -> Self {
        Self {
            name:     req.name,
            email:    req.email,
            message:  req.message,
            phone:    req.phone,
            address:  req.address,
            quantity: req.quantity,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(serde_json::Number),
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<StringOrNumber>::deserialize(deserializer)?.map(|value| match value {
            StringOrNumber::String(s) => s,
            StringOrNumber::Number(n) => n.to_string(),
        }),
    )
}

/// ボディの読み方
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyFormat {
    Json,
    Form,
    /// 読まずに空として扱う
    Ignored,
}

impl BodyFormat {
    fn from_content_type(content_type: Option<&str>) -> Self {
        let Some(content_type) = content_type else {
            return Self::Ignored;
        };
        let mime = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        if mime == "application/x-www-form-urlencoded" {
            Self::Form
        } else if mime == "application/json" || mime.ends_with("+json") {
            Self::Json
        } else {
            Self::Ignored
        }
    }
}

/// JSON とフォーム送信のどちらからでも [`ContactRequest`] を取り出すエクストラクタ
#[derive(Debug)]
pub struct ContactPayload(pub ContactRequest);

impl<S> FromRequest<S> for ContactPayload
where
    S: Send + Sync,
{
    type Rejection = ContactError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let format = BodyFormat::from_content_type(
            req.headers()
                .get(header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok()),
        );

        let request = match format {
            BodyFormat::Json => Json::<ContactRequest>::from_request(req, state)
                .await
                .map(|Json(body)| body)
                .map_err(|rejection| invalid_body(rejection.body_text()))?,
            BodyFormat::Form => Form::<ContactRequest>::from_request(req, state)
                .await
                .map(|Form(body)| body)
                .map_err(|rejection| invalid_body(rejection.body_text()))?,
            BodyFormat::Ignored => ContactRequest::default(),
        };

        Ok(Self(request))
    }
}

fn invalid_body(detail: String) -> ContactError {
    log_business_event!(
        event.category = event::category::CONTACT,
        event.action = event::action::CONTACT_REJECTED,
        event.result = event::result::FAILURE,
        error.category = error::category::CLIENT_INPUT,
        error.kind = error::kind::REQUEST_BODY,
        error = %detail,
        "お問い合わせのリクエストボディが不正"
    );
    ContactError::InvalidBody(detail)
}

/// お問い合わせレスポンス
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactResponse {
    pub success:    bool,
    pub message:    String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error:      Option<String>,
}

impl ContactResponse {
    pub fn delivered(message_id: MessageId) -> Self {
        Self {
            success:    true,
            message:    DELIVERED_MESSAGE.to_string(),
            message_id: Some(message_id.into_string()),
            error:      None,
        }
    }

    pub fn failure(message: impl Into<String>, error: Option<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            message_id: None,
            error,
        }
    }
}

// --- ハンドラ ---

/// POST /api/contact, POST /api/send-email
///
/// 検証 → 送信を 1 回だけ行い、結果をそのまま返す。
///
/// 送信は別タスクで実行して完了を待つ。クライアントが切断してハンドラの
/// future が破棄されても、実行中の送信は中断されない。
pub async fn send_contact(
    State(state): State<Arc<ContactState>>,
    ContactPayload(req): ContactPayload,
) -> Result<impl IntoResponse, ContactError> {
    let submission = ContactForm::from(req).validate().inspect_err(|e| {
        log_business_event!(
            event.category = event::category::CONTACT,
            event.action = event::action::CONTACT_REJECTED,
            event.result = event::result::FAILURE,
            error.category = error::category::CLIENT_INPUT,
            contact.missing_fields = ?e.missing_fields(),
            "お問い合わせの必須項目が不足"
        );
    })?;

    log_business_event!(
        event.category = event::category::CONTACT,
        event.action = event::action::CONTACT_RECEIVED,
        event.result = event::result::SUCCESS,
        contact.has_phone = submission.phone().is_some(),
        contact.has_address = submission.address().is_some(),
        contact.has_quantity = submission.quantity().is_some(),
        "お問い合わせを受付"
    );

    let dispatcher = state.dispatcher.clone();
    let outcome = tokio::spawn(async move { dispatcher.dispatch(&submission).await })
        .await
        .unwrap_or_else(|e| DeliveryOutcome::Failed {
            error: e.to_string(),
        });

    match outcome {
        DeliveryOutcome::Delivered { message_id } => Ok(Json(ContactResponse::delivered(message_id))),
        DeliveryOutcome::Failed { error } => Err(ContactError::Delivery(error)),
    }
}
