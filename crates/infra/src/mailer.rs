//! # メール送信
//!
//! お問い合わせメールの送信を担当するインフラストラクチャモジュール。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: `MailSender` trait でメール送信を抽象化し、依存性注入でテスト時に差し替える
//! - **2 つの実装**: SMTP（本番・開発）、Noop（ローカル確認用）
//! - **環境変数切替**: `MAIL_BACKEND` でランタイム選択
//! - **単発送信**: リトライ・キューイングは行わない。失敗はそのまま呼び出し元に返す

mod noop;
mod smtp;

use async_trait::async_trait;
use formrelay_domain::notification::{DeliveryError, EmailMessage, MessageId};
pub use noop::NoopMailSender;
pub use smtp::{SmtpMailSender, SmtpSettings, SmtpTlsMode};

/// 送信バックエンドの種別
///
/// `MAIL_BACKEND` 環境変数の値に対応する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum MailBackend {
    /// SMTP リレー経由で送信
    Smtp,
    /// 送信しない（ログ出力のみ）
    Noop,
}

/// メール送信トレイト
///
/// 配送の中核。リレーとのセッションは実装側が保持し、プロセス全体で共有される。
#[async_trait]
pub trait MailSender: Send + Sync {
    /// メールを 1 回だけ送信する
    ///
    /// 成功時はリレーに渡した `Message-ID` を返す。
    async fn send_email(&self, email: &EmailMessage) -> Result<MessageId, DeliveryError>;

    /// リレーへの疎通を確認する
    ///
    /// 起動時のセルフチェックと readiness check で使用する。
    async fn check_connection(&self) -> Result<(), DeliveryError>;
}
