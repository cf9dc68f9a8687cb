//! # Contact Service アプリケーション構築
//!
//! ルーターとミドルウェアの構築を担当する。
//! `main.rs` は設定読み込み・送信器の初期化・サーバー起動に集中する。

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use formrelay_shared::{
    canonical_log::CanonicalLogLineLayer,
    observability::{MakeRequestUuidV7, make_request_span},
};
use tower_http::{
    cors::CorsLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::handler::{
    ContactState,
    ReadinessState,
    health_check,
    readiness_check,
    send_contact,
};

/// ルーターを構築する
///
/// `/api/contact` と `/api/send-email` は同じハンドラを共有する。
pub fn build_app(contact_state: Arc<ContactState>, readiness_state: Arc<ReadinessState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(
            Router::new()
                .route("/health/ready", get(readiness_check))
                .with_state(readiness_state),
        )
        .route("/api/contact", post(send_contact))
        .route("/api/send-email", post(send_contact))
        .with_state(contact_state)
        // レイヤーは下から上の順に適用される（最後に追加したものが最外）
        // 1. CorsLayer（最外）: 全オリジンを許可し、プリフライトに応答
        // 2. SetRequestIdLayer: UUID v7 を生成（またはクライアント提供値を使用）
        // 3. TraceLayer: request_id を含むスパンを作り、全ログに自動注入
        // 4. CanonicalLogLineLayer: リクエスト完了時に 1 行サマリログを出力（スパン内）
        // 5. PropagateRequestIdLayer: レスポンスヘッダーに X-Request-Id をコピー
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(CanonicalLogLineLayer)
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(CorsLayer::permissive())
}
