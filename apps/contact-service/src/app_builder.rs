//! # アプリケーション構築
//!
//! ルーター定義とミドルウェアの組み立てを担当する。
//! `main.rs` は設定読み込みとサーバー起動に集中する。

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use contactrelay_shared::{
    canonical_log::CanonicalLogLineLayer,
    observability::{MakeRequestUuidV7, make_request_span},
};
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::handler::{ContactState, health_check, send_contact};

/// ルーターを構築する
///
/// レイヤーは下に書いたものが外側:
///
/// 1. SetRequestIdLayer（最外）: UUID v7 を生成（クライアント提供値があればそれを使用）
/// 2. TraceLayer: `request_id` を含むリクエストスパンを作成
/// 3. CanonicalLogLineLayer: リクエスト完了時に 1 行サマリログを出力（スパン内）
/// 4. PropagateRequestIdLayer: レスポンスヘッダーに `X-Request-Id` をコピー
pub fn build_app(contact_state: Arc<ContactState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/contact", post(send_contact))
        .with_state(contact_state)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(CanonicalLogLineLayer)
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}
