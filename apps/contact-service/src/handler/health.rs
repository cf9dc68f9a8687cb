//! # ヘルスチェックハンドラ
//!
//! Contact Service の稼働状態を確認するためのエンドポイント。
//!
//! - `/health` — Liveness Check（常に `"healthy"` を返す）
//! - `/health/ready` — Readiness Check（SMTP リレーへの疎通を確認）
//!
//! レスポンス型は [`formrelay_shared::HealthResponse`] / [`formrelay_shared::ReadinessResponse`] を参照。

use std::{collections::BTreeMap, sync::Arc, time::Duration};

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use formrelay_infra::MailSender;
use formrelay_shared::{
    CheckStatus,
    HealthResponse,
    ReadinessResponse,
    ReadinessStatus,
    event_log::error,
};

/// リレー疎通確認のタイムアウト
const SMTP_CHECK_TIMEOUT: Duration = Duration::from_secs(10);

/// Contact Service のヘルスチェックエンドポイント
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy(env!("CARGO_PKG_VERSION")))
}

/// Readiness Check 用の State
pub struct ReadinessState {
    pub sender: Arc<dyn MailSender>,
}

/// Contact Service の Readiness Check エンドポイント
///
/// SMTP リレーに接続できれば 200、できなければ 503。
#[tracing::instrument(skip_all)]
pub async fn readiness_check(State(state): State<Arc<ReadinessState>>) -> impl IntoResponse {
    let smtp = check_smtp(state.sender.as_ref()).await;

    let response = ReadinessResponse::from_checks(BTreeMap::from([("smtp".to_string(), smtp)]));
    let http_status = match response.status {
        ReadinessStatus::Ready => StatusCode::OK,
        ReadinessStatus::NotReady => StatusCode::SERVICE_UNAVAILABLE,
    };

    (http_status, Json(response))
}

async fn check_smtp(sender: &dyn MailSender) -> CheckStatus {
    match tokio::time::timeout(SMTP_CHECK_TIMEOUT, sender.check_connection()).await {
        Ok(Ok(())) => CheckStatus::Ok,
        Ok(Err(e)) => {
            tracing::warn!(
                error.category = error::category::EXTERNAL_SERVICE,
                error.kind = error::kind::RELAY_CONNECTION,
                error = %e,
                "readiness check: SMTP リレーに接続できない"
            );
            CheckStatus::Error
        }
        Err(_) => {
            tracing::warn!(
                error.category = error::category::EXTERNAL_SERVICE,
                error.kind = error::kind::RELAY_CONNECTION,
                "readiness check: SMTP リレーの疎通確認がタイムアウト"
            );
            CheckStatus::Error
        }
    }
}
