//! # 問い合わせハンドラ
//!
//! ## エンドポイント
//!
//! - `POST /contact` - 問い合わせを受け付け、通知メールを送信する
//!
//! JSON として解釈できないボディ（構文エラー、型違い、Content-Type 不一致）も
//! 400 の検証エラーとして返す。

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use contactrelay_domain::contact::ContactForm;
use contactrelay_shared::{event_log::event, log_business_event};
use serde::{Deserialize, Serialize};

use crate::{error::ContactError, usecase::ContactUseCase};

/// 問い合わせハンドラの共有状態
pub struct ContactState {
    pub usecase: Arc<dyn ContactUseCase>,
}

/// 問い合わせ受付レスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct ContactResponse {
    pub message: String,
}

/// POST /contact
#[tracing::instrument(skip_all)]
pub async fn send_contact(
    State(state): State<Arc<ContactState>>,
    payload: Result<Json<ContactForm>, JsonRejection>,
) -> Result<impl IntoResponse, ContactError> {
    let Json(form) = payload.map_err(|rejection| {
        log_business_event!(
            event.category = event::category::CONTACT,
            event.action = event::action::CONTACT_REJECTED,
            event.result = event::result::FAILURE,
            "リクエストボディを解釈できません: {}",
            rejection
        );
        ContactError::MalformedBody(rejection.body_text())
    })?;

    let delivered = state.usecase.submit_contact(form).await?;

    Ok((
        StatusCode::CREATED,
        Json(ContactResponse {
            message: delivered.message(),
        }),
    ))
}
