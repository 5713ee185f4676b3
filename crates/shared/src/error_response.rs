//! # エラーレスポンス（RFC 9457 Problem Details）
//!
//! サービス共通のエラーレスポンス構造体を提供する。
//!
//! ## 設計
//!
//! - `ErrorResponse` は純粋なデータ構造（`Serialize` / `Deserialize` のみ）
//! - axum の `IntoResponse` 変換はサービス側の責務（shared に axum 依存を入れない）
//! - よく使うエラー種別は便利コンストラクタで提供し、URI のハードコードを排除
//! - フィールド単位の検証エラーは RFC 9457 の拡張メンバー `invalid_params` で返す

use serde::{Deserialize, Serialize};

/// error_type URI のベースパス
const ERROR_TYPE_BASE: &str = "https://contactrelay.example.com/errors";

/// エラーレスポンス（RFC 9457 Problem Details）
///
/// `type` フィールドは URI で問題の種類を識別する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(rename = "type")]
    pub error_type:     String,
    pub title:          String,
    pub status:         u16,
    pub detail:         String,
    /// 不正だったリクエストパラメータ（検証エラー時のみ）
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub invalid_params: Vec<InvalidParam>,
}

/// 不正なリクエストパラメータ 1 件分
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidParam {
    /// パラメータ名（JSON のフィールド名）
    pub name:   String,
    /// 利用者向けの理由
    pub reason: String,
}

impl InvalidParam {
    pub fn new(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name:   name.into(),
            reason: reason.into(),
        }
    }
}

impl ErrorResponse {
    /// 汎用コンストラクタ
    ///
    /// サービス固有のエラー種別を作成する場合に使用する。
    /// `error_type_suffix` はベース URI に付加される（例: `"delivery-failed"`）。
    pub fn new(
        error_type_suffix: &str,
        title: impl Into<String>,
        status: u16,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            error_type:     format!("{ERROR_TYPE_BASE}/{error_type_suffix}"),
            title:          title.into(),
            status,
            detail:         detail.into(),
            invalid_params: Vec::new(),
        }
    }

    /// 400 Validation Error
    pub fn validation_error(detail: impl Into<String>) -> Self {
        Self::new("validation-error", "Validation Error", 400, detail)
    }

    /// 不正なパラメータの一覧を付与する
    pub fn with_invalid_params(mut self, params: impl IntoIterator<Item = InvalidParam>) -> Self {
        self.invalid_params.extend(params);
        self
    }
}
