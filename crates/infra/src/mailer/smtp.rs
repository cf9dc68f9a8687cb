//! SMTP メール送信実装
//!
//! lettre の `AsyncSmtpTransport` を使用してメールを送信する。
//! トランスポートは起動時に 1 度だけ構築され、全リクエストで共有される（変更されない）。

use std::{fmt, time::Duration};

use async_trait::async_trait;
use formrelay_domain::notification::{DeliveryError, EmailMessage, MessageId};
use lettre::{
    Address,
    AsyncSmtpTransport,
    AsyncTransport,
    Tokio1Executor,
    message::{Mailbox, Message, MultiPart, SinglePart, header::ContentType},
    transport::smtp::{
        authentication::{Credentials, Mechanism},
        client::{Tls, TlsParameters},
    },
};

use super::MailSender;

/// TLS の使い方
///
/// `SMTP_TLS` 環境変数の値に対応する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
pub enum SmtpTlsMode {
    /// 平文で接続し、サーバーが対応していれば STARTTLS に昇格する（587 番）
    #[strum(serialize = "starttls")]
    StartTls,
    /// 接続直後から TLS（465 番）
    #[strum(serialize = "tls")]
    Wrapper,
    /// TLS を使わない（ローカルの開発用リレー向け）
    #[strum(serialize = "none")]
    Plain,
}

/// SMTP リレーへの接続設定
///
/// プロセス起動時に 1 度だけ作られ、以後変更されない。
#[derive(Clone)]
pub struct SmtpSettings {
    /// リレーのホスト名
    pub host:                 String,
    /// リレーのポート番号
    pub port:                 u16,
    /// 認証ユーザー名
    pub username:             String,
    /// 認証パスワード
    pub password:             String,
    /// 送信元メールアドレス
    pub from_address:         String,
    /// 送信元の表示名
    pub from_name:            String,
    /// TLS の使い方
    pub tls:                  SmtpTlsMode,
    /// 証明書検証をスキップするか
    pub accept_invalid_certs: bool,
    /// 接続・コマンドのタイムアウト
    pub timeout:              Duration,
}

impl fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("from_address", &self.from_address)
            .field("from_name", &self.from_name)
            .field("tls", &self.tls)
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// SMTP メール送信
///
/// `lettre::AsyncSmtpTransport<Tokio1Executor>` をラップする。
/// 送信元（表示名 + アドレス）は固定で、送信ごとに `Message-ID` を採番する。
pub struct SmtpMailSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from:      Mailbox,
}

impl SmtpMailSender {
    /// 新しい SMTP 送信インスタンスを作成
    ///
    /// この時点ではリレーに接続しない。疎通確認は [`MailSender::check_connection`] で行う。
    pub fn new(settings: &SmtpSettings) -> Result<Self, DeliveryError> {
        let from_address: Address = settings.from_address.parse().map_err(|e| {
            DeliveryError::InvalidAddress(format!("{} ({e})", settings.from_address))
        })?;
        let from = Mailbox::new(Some(settings.from_name.clone()), from_address);

        let tls = match settings.tls {
            SmtpTlsMode::Plain => Tls::None,
            mode => {
                let parameters = TlsParameters::builder(settings.host.clone())
                    .dangerous_accept_invalid_certs(settings.accept_invalid_certs)
                    .build()
                    .map_err(|e| DeliveryError::Build(format!("TLS 設定の構築に失敗: {e}")))?;
                if mode == SmtpTlsMode::Wrapper {
                    Tls::Wrapper(parameters)
                } else {
                    Tls::Opportunistic(parameters)
                }
            }
        };

        // builder_dangerous は TLS なしの設定から始まるため、直後に tls() で上書きする
        let transport = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&settings.host)
            .port(settings.port)
            .tls(tls)
            .credentials(Credentials::new(
                settings.username.clone(),
                settings.password.clone(),
            ))
            .authentication(vec![Mechanism::Plain])
            .timeout(Some(settings.timeout))
            .build();

        Ok(Self { transport, from })
    }

    /// lettre の Message を組み立てる
    ///
    /// `Message-ID` は `<UUIDv7@送信元ドメイン>` 形式で採番する。
    fn build_message(&self, email: &EmailMessage) -> Result<(Message, MessageId), DeliveryError> {
        let to: Mailbox = email
            .to
            .parse()
            .map_err(|e| DeliveryError::InvalidAddress(format!("{} ({e})", email.to)))?;

        let message_id = MessageId::new(format!(
            "<{}@{}>",
            uuid::Uuid::now_v7(),
            self.from.email.domain()
        ));

        let message = Message::builder()
            .message_id(Some(message_id.to_string()))
            .from(self.from.clone())
            .to(to)
            .subject(&email.subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(email.text_body.clone()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(email.html_body.clone()),
                    ),
            )
            .map_err(|e| DeliveryError::Build(e.to_string()))?;

        Ok((message, message_id))
    }
}

#[async_trait]
impl MailSender for SmtpMailSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<MessageId, DeliveryError> {
        let (message, message_id) = self.build_message(email)?;

        let response = self
            .transport
            .send(message)
            .await
            .map_err(|e| DeliveryError::Send(e.to_string()))?;

        tracing::debug!(
            message_id = %message_id,
            smtp.code = %response.code(),
            "SMTP リレーがメッセージを受理"
        );

        Ok(message_id)
    }

    async fn check_connection(&self) -> Result<(), DeliveryError> {
        match self.transport.test_connection().await {
            Ok(true) => Ok(()),
            Ok(false) => Err(DeliveryError::Send(
                "SMTP server did not respond to NOOP".to_string(),
            )),
            Err(e) => Err(DeliveryError::Send(e.to_string())),
        }
    }
}
