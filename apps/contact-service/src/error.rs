//! # Contact Service エラー定義
//!
//! お問い合わせ API のエラーと、HTTP レスポンスへの変換を定義する。
//! レスポンスはすべて `{ "success": false, "message": ... }` 形式に揃える。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use formrelay_domain::{contact::ValidationError, notification::FAILED_MESSAGE};
use thiserror::Error;

use crate::handler::contact::ContactResponse;

/// JSON として解釈できないリクエストボディへのメッセージ
pub const INVALID_BODY_MESSAGE: &str = "Invalid request body";

/// お問い合わせ API で発生するエラー
#[derive(Debug, Error)]
pub enum ContactError {
    /// リクエストボディが JSON として不正
    #[error("リクエストボディが不正です: {0}")]
    InvalidBody(String),

    /// 必須項目の欠落
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// メール送信に失敗（エラー内容をそのまま返す）
    #[error("メール送信に失敗しました: {0}")]
    Delivery(String),
}

impl IntoResponse for ContactError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ContactError::InvalidBody(_) => (
                StatusCode::BAD_REQUEST,
                ContactResponse::failure(INVALID_BODY_MESSAGE, None),
            ),
            ContactError::Validation(e) => (
                StatusCode::BAD_REQUEST,
                ContactResponse::failure(e.to_string(), None),
            ),
            ContactError::Delivery(error) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ContactResponse::failure(FAILED_MESSAGE, Some(error)),
            ),
        };

        (status, Json(body)).into_response()
    }
}
