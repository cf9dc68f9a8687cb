//! # テンプレートレンダラー
//!
//! tera テンプレートエンジンでお問い合わせ通知メールを HTML/plaintext 両形式で生成する。
//!
//! ## 設計方針
//!
//! - **`include_str!` によるコンパイル時埋め込み**: テンプレートはバイナリに埋め込まれる
//! - **件名パターン**: `🔥 New Contact: {name}`
//! - **HTML はエスケープする**: `.html` テンプレートは tera の autoescape 対象。
//!   本文はエスケープ後に改行を `<br>` に置き換える
//! - **plaintext はエスケープしない**: 入力値をそのまま載せる

use formrelay_domain::{
    clock::ReceivedAt,
    contact::ContactSubmission,
    notification::{DeliveryError, EmailMessage},
};
use tera::{Context, Tera};

const HTML_TEMPLATE: &str = "contact.html";
const TEXT_TEMPLATE: &str = "contact.txt";

/// テンプレートレンダラー
///
/// tera テンプレートエンジンをラップし、[`ContactSubmission`] から
/// [`EmailMessage`] を生成する。
pub struct TemplateRenderer {
    engine: Tera,
}

impl TemplateRenderer {
    /// 新しいレンダラーインスタンスを作成
    ///
    /// `include_str!` で埋め込んだテンプレートを tera に登録する。
    pub fn new() -> Result<Self, DeliveryError> {
        let mut engine = Tera::default();

        engine
            .add_raw_templates(vec![
                (
                    HTML_TEMPLATE,
                    include_str!("../../../templates/contact.html"),
                ),
                (TEXT_TEMPLATE, include_str!("../../../templates/contact.txt")),
            ])
            .map_err(|e| DeliveryError::Template(e.to_string()))?;

        Ok(Self { engine })
    }

    /// 送信内容からメールメッセージを生成する
    ///
    /// # 引数
    ///
    /// - `submission`: 検証済みの送信内容
    /// - `recipient`: 送信先メールアドレス（設定値）
    /// - `received_at`: 受付時刻（フッターに表示）
    pub fn render(
        &self,
        submission: &ContactSubmission,
        recipient: &str,
        received_at: ReceivedAt,
    ) -> Result<EmailMessage, DeliveryError> {
        let context = build_context(submission, received_at);

        let html_body = self
            .engine
            .render(HTML_TEMPLATE, &context)
            .map_err(|e| DeliveryError::Template(e.to_string()))?;

        let text_body = self
            .engine
            .render(TEXT_TEMPLATE, &context)
            .map_err(|e| DeliveryError::Template(e.to_string()))?;

        Ok(EmailMessage {
            to: recipient.to_string(),
            subject: subject_for(submission),
            html_body,
            text_body,
        })
    }
}

/// 件名
pub fn subject_for(submission: &ContactSubmission) -> String {
    format!("🔥 New Contact: {}", submission.name())
}

/// `tel:` リンク用に数字と `+` だけを残す
fn tel_href(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

fn build_context(submission: &ContactSubmission, received_at: ReceivedAt) -> Context {
    let mut context = Context::new();
    context.insert("name", submission.name());
    context.insert("email", submission.email());
    context.insert("message", submission.message());
    context.insert("phone", &submission.phone());
    context.insert("phone_href", &submission.phone().map(tel_href));
    context.insert("address", &submission.address());
    context.insert("quantity", &submission.quantity());
    context.insert("received_at", &received_at.to_string());
    context
}
