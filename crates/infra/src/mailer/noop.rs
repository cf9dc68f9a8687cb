//! Noop メール送信実装
//!
//! メールを実際に送信せず、ログ出力のみ行う。
//! リレーを用意できないローカル環境での動作確認に使用する。

use async_trait::async_trait;
use formrelay_domain::notification::{DeliveryError, EmailMessage, MessageId};

use super::MailSender;

/// Noop メール送信（ログ出力のみ）
#[derive(Debug, Clone, Default)]
pub struct NoopMailSender;

#[async_trait]
impl MailSender for NoopMailSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<MessageId, DeliveryError> {
        let message_id = MessageId::new(format!("<{}@localhost>", uuid::Uuid::now_v7()));
        tracing::info!(
            to = %email.to,
            subject = %email.subject,
            message_id = %message_id,
            "Noop: メール送信をスキップ"
        );
        Ok(message_id)
    }

    async fn check_connection(&self) -> Result<(), DeliveryError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn send_emailがmessage_idを返す() {
        let sender = NoopMailSender;
        let email = EmailMessage {
            to:        "owner@example.com".to_string(),
            subject:   "テスト件名".to_string(),
            html_body: "<p>テスト</p>".to_string(),
            text_body: "テスト".to_string(),
        };

        let message_id = sender.send_email(&email).await.unwrap();
        assert!(message_id.as_str().starts_with('<'));
        assert!(message_id.as_str().ends_with("@localhost>"));
    }

    #[tokio::test]
    async fn check_connectionは常に成功する() {
        assert!(NoopMailSender.check_connection().await.is_ok());
    }
}
