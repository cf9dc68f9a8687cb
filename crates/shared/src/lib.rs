//! # FormRelay 共有ユーティリティ
//!
//! このクレートは、FormRelay の各クレートで使用される共通ユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - HTTP / tracing への依存は `observability` feature の内側に閉じ込める

#[cfg(feature = "observability")]
pub mod canonical_log;
pub mod event_log;
pub mod health;
pub mod observability;

pub use health::{CheckStatus, HealthResponse, ReadinessResponse, ReadinessStatus};
