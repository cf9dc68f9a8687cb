//! # ユースケース層
//!
//! ハンドラから呼ばれるアプリケーションロジックを配置する。

pub mod contact;

pub use contact::{MailDispatcher, TemplateRenderer};
