//! # 通知
//!
//! メール配送に関するドメインモデルを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 説明 |
//! |---|------------|------|
//! | [`EmailMessage`] | メールメッセージ | テンプレートレンダリングの出力。送信器に渡される |
//! | [`MessageId`] | メッセージ ID | リレーに渡した `Message-ID` ヘッダーの値 |
//! | [`DeliveryOutcome`] | 配送結果 | 1 回の送信試行の結果（成功 or 失敗） |
//!
//! ## 設計方針
//!
//! - **失敗は値で返す**: 配送失敗は [`DeliveryOutcome::Failed`] として呼び出し元に返し、
//!   リトライもエスカレーションもしない
//! - **冪等性なし**: 同じ送信内容で 2 回送れば 2 通届く

use derive_more::{Deref, Display, From};
use thiserror::Error;

/// 配送成功時のレスポンスメッセージ
pub const DELIVERED_MESSAGE: &str = "Email sent successfully";

/// 配送失敗時のレスポンスメッセージ
pub const FAILED_MESSAGE: &str = "Failed to send email";

/// メール送信エラー
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// メールアドレスの形式が不正（送信元・宛先）
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// メッセージの組み立てに失敗
    #[error("failed to build message: {0}")]
    Build(String),

    /// リレーへの送信に失敗（接続・認証・拒否・タイムアウト）
    #[error("{0}")]
    Send(String),

    /// テンプレートレンダリングに失敗
    #[error("failed to render template: {0}")]
    Template(String),
}

/// メッセージ ID
///
/// `Message-ID` ヘッダーの値（例: `<0190...@example.com>`）。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Deref, From)]
#[display("{_0}")]
pub struct MessageId(String);

impl MessageId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// メールメッセージ
///
/// テンプレートレンダリングの出力。`MailSender` に渡される。
/// 送信元は送信器側が保持する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// 送信先メールアドレス
    pub to:        String,
    /// 件名
    pub subject:   String,
    /// HTML 本文
    pub html_body: String,
    /// プレーンテキスト本文
    pub text_body: String,
}

/// 配送結果
///
/// 1 回の送信試行の結果。HTTP レスポンスへ変換された後に破棄される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// リレーが受理した
    Delivered { message_id: MessageId },
    /// 送信に失敗した（エラー内容をそのまま保持）
    Failed { error: String },
}

impl DeliveryOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Delivered { .. })
    }

    /// 人間可読なメッセージ
    pub fn message(&self) -> &'static str {
        match self {
            Self::Delivered { .. } => DELIVERED_MESSAGE,
            Self::Failed { .. } => FAILED_MESSAGE,
        }
    }
}

impl From<Result<MessageId, DeliveryError>> for DeliveryOutcome {
    fn from(result: Result<MessageId, DeliveryError>) -> Self {
        match result {
            Ok(message_id) => Self::Delivered { message_id },
            Err(e) => Self::Failed {
                error: e.to_string(),
            },
        }
    }
}
