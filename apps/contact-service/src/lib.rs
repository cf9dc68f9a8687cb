//! # Contact Service ライブラリ
//!
//! お問い合わせフォームの送信内容をメールとして転送する HTTP サービス。
//! 統合テスト用にルーター構築と内部モジュールを公開する。

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod usecase;

pub use app_builder::build_app;
