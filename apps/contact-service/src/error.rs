//! # Contact Service エラー定義
//!
//! 問い合わせ受付で発生するエラーと、HTTP レスポンスへの変換を定義する。
//!
//! | エラー | ステータス | problem type |
//! |--------|-----------|--------------|
//! | `Validation` / `MalformedBody` | 400 | `validation-error` |
//! | `Configuration` | 500 | `configuration-error` |
//! | `Delivery` | 502 | `delivery-failed` |
//!
//! 5xx の detail は固定文言またはプロバイダ名だけを含む汎用文言とし、
//! 原因はユースケース層でサーバーログに出力する。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use contactrelay_domain::{FieldErrors, notification::EmailProvider};
use contactrelay_infra::DeliveryError;
use contactrelay_shared::{ErrorResponse, InvalidParam};
use thiserror::Error;

use crate::config::ConfigurationError;

/// Contact Service で発生するエラー
#[derive(Debug, Error)]
pub enum ContactError {
    /// 入力値の検証エラー
    #[error("入力値が不正です: {0}")]
    Validation(FieldErrors),

    /// リクエストボディを JSON として解釈できない
    #[error("リクエストボディが不正です: {0}")]
    MalformedBody(String),

    /// 配送設定の不備
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// 送信失敗
    #[error("Failed to send email with {}", .provider.label())]
    Delivery {
        provider: EmailProvider,
        source:   DeliveryError,
    },
}

impl IntoResponse for ContactError {
    fn into_response(self) -> Response {
        let body = match &self {
            ContactError::Validation(errors) => {
                ErrorResponse::validation_error(format!(
                    "{} field(s) failed validation",
                    errors.len()
                ))
                .with_invalid_params(
                    errors
                        .iter()
                        .map(|e| InvalidParam::new(e.field, e.reason.clone())),
                )
            }
            ContactError::MalformedBody(detail) => ErrorResponse::validation_error(detail.clone()),
            ContactError::Configuration(_) => ErrorResponse::new(
                "configuration-error",
                "Configuration Error",
                500,
                "The email service is not configured correctly",
            ),
            ContactError::Delivery { .. } => {
                ErrorResponse::new("delivery-failed", "Bad Gateway", 502, self.to_string())
            }
        };

        let status =
            StatusCode::from_u16(body.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(body)).into_response()
    }
}
