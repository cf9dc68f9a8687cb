//! # お問い合わせユースケース
//!
//! 検証済みの送信内容をメールに整形し、SMTP リレーへ送る。

mod dispatcher;
mod template_renderer;

pub use dispatcher::MailDispatcher;
pub use template_renderer::{TemplateRenderer, subject_for};
