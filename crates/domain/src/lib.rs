//! # FormRelay ドメイン層
//!
//! お問い合わせフォームの送信内容と、メール配送結果を表現するドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **純粋性**: I/O を持たない。SMTP や HTTP の詳細はインフラ層・アプリ層に置く
//! - **検証済みの型**: 必須項目の検証を通過した値だけが [`contact::ContactSubmission`] になる
//! - **時刻の注入**: 受付時刻は [`clock::Clock`] 経由で取得し、テストで固定可能にする
//!
//! ## 依存関係の方向
//!
//! ```text
//! contact-service → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`clock`] - 時刻プロバイダ
//! - [`contact`] - 送信内容（ContactForm / ContactSubmission）とバリデーション
//! - [`notification`] - メールメッセージと配送結果
//!
//! ## 使用例
//!
//! ```rust
//! use formrelay_domain::contact::ContactForm;
//!
//! let form = ContactForm {
//!     name: Some("Ann".to_string()),
//!     email: Some("ann@example.com".to_string()),
//!     message: Some("Hi".to_string()),
//!     ..Default::default()
//! };
//!
//! let submission = form.validate().unwrap();
//! assert_eq!(submission.name(), "Ann");
//! ```

pub mod clock;
pub mod contact;
pub mod notification;
