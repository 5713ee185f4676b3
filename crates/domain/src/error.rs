//! # ドメイン層エラー定義
//!
//! 入力値の検証失敗を表現するエラー型。
//!
//! ## 設計方針
//!
//! - **フィールド単位の報告**: どのフィールドが、なぜ不正なのかを呼び出し元に返す
//! - **thiserror 活用**: `#[error(...)]` マクロでエラーメッセージを自動生成
//! - **HTTP ステータスへのマッピング**: API 層で 400 Bad Request に変換する

use std::fmt;

use derive_more::Deref;
use serde::Serialize;
use strum::IntoStaticStr;
use thiserror::Error;

/// ドメイン層で発生するエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// 入力値が問い合わせフォームの制約に違反している場合に使用する。
    ///
    /// # 例
    ///
    /// - 必須フィールドが未入力（欠落または空文字列）
    /// - メールアドレスの形式が不正
    #[error("バリデーションエラー: {0}")]
    Validation(FieldErrors),
}

/// フィールドエラーの種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, IntoStaticStr, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FieldErrorKind {
    /// 値が存在しない、または空
    Missing,
    /// 値は存在するが形式が不正
    Malformed,
}

/// 単一フィールドの検証エラー
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// フィールド名（リクエスト JSON のキー）
    pub field:  &'static str,
    /// エラー種別
    pub kind:   FieldErrorKind,
    /// 呼び出し元に返す説明
    pub reason: String,
}

impl FieldError {
    pub fn missing(field: &'static str) -> Self {
        Self {
            field,
            kind: FieldErrorKind::Missing,
            reason: format!("{field} is required and must not be empty"),
        }
    }

    pub fn malformed(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            kind: FieldErrorKind::Malformed,
            reason: reason.into(),
        }
    }
}

/// 検証エラーの一覧
///
/// 少なくとも 1 件のエラーを含む。並び順はフォームのフィールド順。
#[derive(Debug, Clone, PartialEq, Eq, Deref)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self(errors)
    }

    /// 指定フィールドのエラーを返す
    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.0.iter().find(|e| e.field == field)
    }

    pub fn into_inner(self) -> Vec<FieldError> {
        self.0
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("{}({})", e.field, e.kind))
            .collect();
        write!(f, "{}", fields.join(", "))
    }
}
