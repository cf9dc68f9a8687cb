//! # メールディスパッチャ
//!
//! テンプレートレンダリング → メール送信 → ビジネスイベントログを統合する。
//!
//! ## 設計方針
//!
//! - **失敗は値で返す**: `dispatch()` はエラーを返さず、結果を [`DeliveryOutcome`] に畳み込む
//! - **1 リクエスト 1 送信**: リトライ・バックオフ・サーキットブレーカーなし
//! - **依存性注入**: `MailSender` と `Clock` は trait で抽象化

use std::sync::Arc;

use formrelay_domain::{
    clock::Clock,
    contact::ContactSubmission,
    notification::{DeliveryError, DeliveryOutcome, MessageId},
};
use formrelay_infra::MailSender;
use formrelay_shared::{
    event_log::{error, event},
    log_business_event,
};

use super::TemplateRenderer;

/// メールディスパッチャ
///
/// プロセス内で 1 つだけ作られ、全リクエストで共有される（変更されない）。
pub struct MailDispatcher {
    sender:    Arc<dyn MailSender>,
    renderer:  TemplateRenderer,
    clock:     Arc<dyn Clock>,
    recipient: String,
}

impl MailDispatcher {
    pub fn new(
        sender: Arc<dyn MailSender>,
        renderer: TemplateRenderer,
        clock: Arc<dyn Clock>,
        recipient: impl Into<String>,
    ) -> Self {
        Self {
            sender,
            renderer,
            clock,
            recipient: recipient.into(),
        }
    }

    /// 送信先メールアドレス
    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    /// 送信内容をメールとして 1 回だけ送信する
    ///
    /// レンダリング・アドレス・送信のいずれで失敗しても
    /// [`DeliveryOutcome::Failed`] を返す（エラー内容はそのまま保持）。
    pub async fn dispatch(&self, submission: &ContactSubmission) -> DeliveryOutcome {
        let outcome = DeliveryOutcome::from(self.render_and_send(submission).await);

        match &outcome {
            DeliveryOutcome::Delivered { message_id } => {
                log_business_event!(
                    event.category = event::category::CONTACT,
                    event.action = event::action::MAIL_SENT,
                    event.result = event::result::SUCCESS,
                    contact.recipient = %self.recipient,
                    mail.message_id = %message_id,
                    "お問い合わせメール送信成功"
                );
            }
            DeliveryOutcome::Failed { error } => {
                log_business_event!(
                    event.category = event::category::CONTACT,
                    event.action = event::action::MAIL_FAILED,
                    event.result = event::result::FAILURE,
                    contact.recipient = %self.recipient,
                    error = %error,
                    "お問い合わせメール送信失敗"
                );
            }
        }

        outcome
    }

    async fn render_and_send(
        &self,
        submission: &ContactSubmission,
    ) -> Result<MessageId, DeliveryError> {
        let email = self
            .renderer
            .render(submission, &self.recipient, self.clock.received_at())
            .inspect_err(|e| {
                tracing::error!(
                    error.category = error::category::EXTERNAL_SERVICE,
                    error.kind = error::kind::TEMPLATE,
                    error = %e,
                    "お問い合わせメールのレンダリングに失敗"
                );
            })?;

        self.sender.send_email(&email).await.inspect_err(|e| {
            tracing::error!(
                error.category = error::category::EXTERNAL_SERVICE,
                error.kind = error::kind::MAIL_DELIVERY,
                error = %e,
                "SMTP リレーへの送信に失敗"
            );
        })
    }
}
