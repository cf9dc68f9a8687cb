//! # Contact Service サーバー
//!
//! Web サイトのお問い合わせフォームを受け取り、固定の宛先へメールとして転送する。
//!
//! ## 処理の流れ
//!
//! ```text
//! ┌──────────┐  POST /api/contact  ┌─────────────────┐  SMTP  ┌────────────┐
//! │  Browser │ ──────────────────→ │ Contact Service │ ─────→ │ SMTP Relay │
//! └──────────┘   JSON              └─────────────────┘        └────────────┘
//! ```
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `CONTACT_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `CONTACT_PORT` | No | ポート番号（デフォルト: `5000`） |
//! | `MAIL_BACKEND` | No | `smtp` または `noop`（デフォルト: `smtp`） |
//! | `SMTP_HOST` | No | リレーのホスト（デフォルト: `mail.privateemail.com`） |
//! | `SMTP_PORT` | No | リレーのポート（デフォルト: `587`） |
//! | `SMTP_TLS` | No | `starttls` / `tls` / `none`（デフォルト: `starttls`） |
//! | `SMTP_ACCEPT_INVALID_CERTS` | No | 証明書検証のスキップ（デフォルト: `true`） |
//! | `SMTP_TIMEOUT_SECS` | No | 接続・コマンドのタイムアウト秒（デフォルト: `30`） |
//! | `EMAIL_USER` | **Yes** | SMTP ユーザー名 兼 送信元アドレス |
//! | `EMAIL_PASS` | **Yes** | SMTP パスワード |
//! | `RECIPIENT_EMAIL` | **Yes** | お問い合わせの送信先 |
//! | `MAIL_FROM_NAME` | No | 送信元の表示名（デフォルト: `Website Contact`） |
//! | `LOG_FORMAT` | No | `json` または `pretty` |
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境（送信せずログ出力のみ）
//! MAIL_BACKEND=noop cargo run -p formrelay-contact-service
//!
//! # 本番環境
//! EMAIL_USER=... EMAIL_PASS=... RECIPIENT_EMAIL=... \
//!   cargo run -p formrelay-contact-service --release
//! ```

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context as _;
use formrelay_contact_service::{
    build_app,
    config::ContactServiceConfig,
    handler::{ContactState, ReadinessState},
    usecase::{MailDispatcher, TemplateRenderer},
};
use formrelay_domain::clock::SystemClock;
use formrelay_infra::{MailBackend, MailSender, NoopMailSender, SmtpMailSender};
use formrelay_shared::{
    event_log::error,
    observability::{TracingConfig, init_tracing},
};
use tokio::net::TcpListener;
use tracing::Instrument as _;

/// Contact Service サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    // トレーシング初期化
    let tracing_config = TracingConfig::from_env("contact-service");
    init_tracing(&tracing_config);
    let _tracing_guard = tracing::info_span!("app", service = "contact-service").entered();

    // 設定読み込み
    let config = ContactServiceConfig::from_env().context("設定の読み込みに失敗しました")?;

    tracing::info!(
        "Contact Service サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    // 送信器を初期化（パスワードはログに出さない）
    let sender: Arc<dyn MailSender> = match config.backend {
        MailBackend::Smtp => {
            tracing::info!(
                smtp.host = %config.smtp.host,
                smtp.port = config.smtp.port,
                smtp.tls = %config.smtp.tls,
                smtp.user = %config.smtp.username,
                smtp.accept_invalid_certs = config.smtp.accept_invalid_certs,
                smtp.timeout_secs = config.smtp.timeout.as_secs(),
                "SMTP 送信器を初期化します"
            );
            Arc::new(
                SmtpMailSender::new(&config.smtp).context("SMTP 送信器の初期化に失敗しました")?,
            )
        }
        MailBackend::Noop => {
            tracing::warn!("MAIL_BACKEND=noop: メールは送信されません");
            Arc::new(NoopMailSender)
        }
    };

    // 起動時セルフチェック（失敗してもサービスは継続し、送信は試行する）
    let check_sender = sender.clone();
    tokio::spawn(
        async move {
            match check_sender.check_connection().await {
                Ok(()) => tracing::info!("SMTP リレーへの疎通を確認しました"),
                Err(e) => tracing::error!(
                    error.category = error::category::EXTERNAL_SERVICE,
                    error.kind = error::kind::RELAY_CONNECTION,
                    error = %e,
                    "SMTP リレーに接続できません（送信は引き続き試行します）"
                ),
            }
        }
        .in_current_span(),
    );

    // 依存コンポーネントを初期化
    let renderer = TemplateRenderer::new().context("テンプレートの読み込みに失敗しました")?;
    let dispatcher = MailDispatcher::new(
        sender.clone(),
        renderer,
        Arc::new(SystemClock),
        config.recipient.clone(),
    );
    tracing::info!(recipient = %dispatcher.recipient(), "お問い合わせの送信先を設定しました");

    let contact_state = Arc::new(ContactState {
        dispatcher: Arc::new(dispatcher),
    });
    let readiness_state = Arc::new(ReadinessState { sender });

    // ルーター構築
    let app = build_app(contact_state, readiness_state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("アドレスのパースに失敗しました")?;

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Contact Service サーバーが起動しました: {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
