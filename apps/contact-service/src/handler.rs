//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュール（この `handler.rs`）で re-export し、フラットな API を提供
//! - ハンドラは薄く保ち、送信処理はユースケース層に委譲

pub mod contact;
pub mod health;

pub use contact::{ContactPayload, ContactRequest, ContactResponse, ContactState, send_contact};
pub use health::{ReadinessState, health_check, readiness_check};
