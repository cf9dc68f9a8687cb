//! # ビジネスイベントログの構造化ヘルパー
//!
//! お問い合わせの受付・拒否・配送結果を `jq` で追いやすいよう、
//! ログフィールドの命名規約とヘルパーマクロを提供する。
//!
//! [`log_business_event!`] マクロで出力すると `event.kind = "business_event"` マーカーが
//! 自動付与され、`jq 'select(.["event.kind"] == "business_event")'` でフィルタできる。
//!
//! フィールド名はドット記法（`event.category`、`contact.missing_fields`）。
//! JSON 出力ではフラットなキーになる。

/// ビジネスイベントを構造化ログとして出力する。
///
/// `event.kind = "business_event"` マーカーを自動付与し、
/// `tracing::info!` レベルで出力する。呼び出し側のクレートは `tracing` に依存していること。
///
/// ## 必須フィールド（慣例）
///
/// - `event.category`: [`event::category`] の定数
/// - `event.action`: [`event::action`] の定数
/// - `event.result`: [`event::result`] の定数
#[macro_export]
macro_rules! log_business_event {
    ($($args:tt)*) => {
        ::tracing::info!(
            event.kind = "business_event",
            $($args)*
        )
    };
}

/// イベントフィールドの定数
pub mod event {
    /// イベントカテゴリ
    pub mod category {
        pub const CONTACT: &str = "contact";
    }

    /// イベントアクション
    pub mod action {
        pub const CONTACT_RECEIVED: &str = "contact.received";
        pub const CONTACT_REJECTED: &str = "contact.rejected";
        pub const MAIL_SENT: &str = "contact.mail_sent";
        pub const MAIL_FAILED: &str = "contact.mail_failed";
    }

    /// イベント結果
    pub mod result {
        pub const SUCCESS: &str = "success";
        pub const FAILURE: &str = "failure";
    }
}

/// エラーコンテキストフィールドの定数
///
/// `tracing::error!` に `error.category` + `error.kind` として付与する。
pub mod error {
    /// エラーカテゴリ
    pub mod category {
        /// 外部サービス呼び出し（SMTP リレー）
        pub const EXTERNAL_SERVICE: &str = "external_service";
        /// クライアント入力
        pub const CLIENT_INPUT: &str = "client_input";
    }

    /// エラー種別
    pub mod kind {
        pub const MAIL_DELIVERY: &str = "mail_delivery";
        pub const RELAY_CONNECTION: &str = "relay_connection";
        pub const TEMPLATE: &str = "template";
        pub const REQUEST_BODY: &str = "request_body";
    }
}
