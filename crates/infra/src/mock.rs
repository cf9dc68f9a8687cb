//! # テスト用モック送信器
//!
//! ユースケース・ハンドラのテストで使用するインメモリのメール送信器。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! formrelay-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use formrelay_domain::notification::{DeliveryError, EmailMessage, MessageId};

use crate::mailer::MailSender;

// ===== MockMailSender =====

/// 送信試行を記録するモック送信器
///
/// 送信に成功するか失敗するかは生成時に決める。どちらの場合も試行は記録される。
#[derive(Clone, Default)]
pub struct MockMailSender {
    attempts:         Arc<Mutex<Vec<EmailMessage>>>,
    send_error:       Option<String>,
    connection_error: Option<String>,
}

impl MockMailSender {
    /// 常に送信に成功するモック
    pub fn new() -> Self {
        Self::default()
    }

    /// 常に送信に失敗するモック（リレーのエラーを模擬）
    pub fn failing(error: impl Into<String>) -> Self {
        Self {
            send_error: Some(error.into()),
            ..Self::default()
        }
    }

    /// 疎通確認が失敗するモック（リレー停止を模擬）
    pub fn unreachable(error: impl Into<String>) -> Self {
        let error = error.into();
        Self {
            send_error: Some(error.clone()),
            connection_error: Some(error),
            ..Self::default()
        }
    }

    /// 送信を試みたメッセージの一覧（成功・失敗を問わない）
    pub fn sent_emails(&self) -> Vec<EmailMessage> {
        self.attempts.lock().unwrap().clone()
    }

    /// 送信試行回数
    pub fn attempt_count(&self) -> usize {
        self.attempts.lock().unwrap().len()
    }
}

#[async_trait]
impl MailSender for MockMailSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<MessageId, DeliveryError> {
        let attempt = {
            let mut attempts = self.attempts.lock().unwrap();
            attempts.push(email.clone());
            attempts.len()
        };

        match &self.send_error {
            Some(error) => Err(DeliveryError::Send(error.clone())),
            None => Ok(MessageId::new(format!("<mock-{attempt}@example.com>"))),
        }
    }

    async fn check_connection(&self) -> Result<(), DeliveryError> {
        match &self.connection_error {
            Some(error) => Err(DeliveryError::Send(error.clone())),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn email() -> EmailMessage {
        EmailMessage {
            to:        "owner@example.com".to_string(),
            subject:   "件名".to_string(),
            html_body: "<p>本文</p>".to_string(),
            text_body: "本文".to_string(),
        }
    }

    #[tokio::test]
    async fn 成功モックは連番のmessage_idを返す() {
        let sender = MockMailSender::new();

        let first = sender.send_email(&email()).await.unwrap();
        let second = sender.send_email(&email()).await.unwrap();

        assert_eq!(first.as_str(), "<mock-1@example.com>");
        assert_eq!(second.as_str(), "<mock-2@example.com>");
        assert_eq!(sender.attempt_count(), 2);
    }

    #[tokio::test]
    async fn 失敗モックも試行を記録する() {
        let sender = MockMailSender::failing("Connection refused");

        let result = sender.send_email(&email()).await;

        assert!(matches!(result, Err(DeliveryError::Send(msg)) if msg == "Connection refused"));
        assert_eq!(sender.sent_emails(), vec![email()]);
    }

    #[tokio::test]
    async fn cloneしたモックは記録を共有する() {
        let sender = MockMailSender::new();
        let observer = sender.clone();

        sender.send_email(&email()).await.unwrap();

        assert_eq!(observer.attempt_count(), 1);
    }
}
