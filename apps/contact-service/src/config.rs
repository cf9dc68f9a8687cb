//! # Contact Service 設定
//!
//! 環境変数から Contact Service サーバーとメール送信の設定を読み込む。
//! 起動時に 1 度だけ読み込み、以後変更しない。

use std::{env, str::FromStr, time::Duration};

use formrelay_infra::{MailBackend, SmtpSettings, SmtpTlsMode};
use thiserror::Error;

/// 設定読み込みエラー
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 必須の環境変数が未設定（または空）
    #[error("{0} が設定されていません（.env.example を参考に設定してください）")]
    Missing(&'static str),

    /// 値の形式が不正
    #[error("{name} の値が不正です: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Contact Service サーバーの設定
#[derive(Debug, Clone)]
pub struct ContactServiceConfig {
    /// バインドアドレス
    pub host:      String,
    /// ポート番号
    pub port:      u16,
    /// 送信バックエンド
    pub backend:   MailBackend,
    /// SMTP リレーの接続設定
    pub smtp:      SmtpSettings,
    /// お問い合わせの送信先（固定）
    pub recipient: String,
}

impl ContactServiceConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// 任意のルックアップ関数から設定を読み込む
    ///
    /// テストではプロセスの環境変数を汚さずに済むよう、`HashMap` などを渡す。
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let email_user = required(&lookup, "EMAIL_USER")?;

        let smtp = SmtpSettings {
            host:                 lookup("SMTP_HOST")
                .unwrap_or_else(|| "mail.privateemail.com".to_string()),
            port:                 parse_or(&lookup, "SMTP_PORT", 587)?,
            username:             email_user.clone(),
            password:             required(&lookup, "EMAIL_PASS")?,
            from_address:         email_user,
            from_name:            lookup("MAIL_FROM_NAME")
                .unwrap_or_else(|| "Website Contact".to_string()),
            tls:                  parse_or(&lookup, "SMTP_TLS", SmtpTlsMode::StartTls)?,
            accept_invalid_certs: parse_or(&lookup, "SMTP_ACCEPT_INVALID_CERTS", true)?,
            timeout:              Duration::from_secs(parse_or(&lookup, "SMTP_TIMEOUT_SECS", 30)?),
        };

        Ok(Self {
            host: lookup("CONTACT_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "CONTACT_PORT", 5000)?,
            backend: parse_or(&lookup, "MAIL_BACKEND", MailBackend::Smtp)?,
            smtp,
            recipient: required(&lookup, "RECIPIENT_EMAIL")?,
        })
    }
}

fn required(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<String, ConfigError> {
    lookup(name)
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(name))
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        None => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}
