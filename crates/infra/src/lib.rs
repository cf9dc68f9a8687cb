//! # FormRelay インフラ層
//!
//! 外部システム（SMTP リレー）との通信を担当するインフラストラクチャ層。
//!
//! ## 設計方針
//!
//! このクレートはメール送信の具体的な実装を提供する。リレーの詳細を
//! [`mailer::MailSender`] トレイトの裏側にカプセル化し、アプリ層を
//! SMTP ライブラリの変更から保護する。
//!
//! ## 依存関係
//!
//! ```text
//! contact-service → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`mailer`] - メール送信トレイトと SMTP / Noop 実装
//! - `mock` - テスト用の記録付き送信器（`test-utils` feature）

pub mod mailer;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

pub use mailer::{MailBackend, MailSender, NoopMailSender, SmtpMailSender, SmtpSettings, SmtpTlsMode};
