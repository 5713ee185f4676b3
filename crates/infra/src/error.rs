//! # 配送エラー定義
//!
//! メール送信で発生するエラーを表現する。
//!
//! ## 設計方針
//!
//! - **原因はサーバー側に留める**: エラー種別とメッセージはログ用。呼び出し元には
//!   プロバイダ名だけの汎用メッセージを返す（変換は API 層の責務）
//! - **SpanTrace 自動捕捉**: convenience constructor でエラー生成時の呼び出し経路を記録する
//!
//! ## 構造
//!
//! `std::io::Error` と同じ struct + enum パターンを採用:
//! - [`DeliveryError`]: エラー種別（[`DeliveryErrorKind`]）と [`SpanTrace`] を保持するラッパー
//! - [`DeliveryErrorKind`]: エラーの具体的な種別

use std::fmt;

use derive_more::Display;
use thiserror::Error;
use tracing_error::SpanTrace;

/// メール送信で発生するエラー
///
/// エラー種別（[`DeliveryErrorKind`]）と [`SpanTrace`]（呼び出し経路）を保持する。
#[derive(Display)]
#[display("{kind}")]
pub struct DeliveryError {
    kind:       DeliveryErrorKind,
    span_trace: SpanTrace,
}

/// 配送エラーの種別
#[derive(Debug, Error)]
pub enum DeliveryErrorKind {
    /// メールアドレスの解釈に失敗
    ///
    /// 設定された送信元、または送信者のアドレスが送信手段で扱えない形式だった場合。
    #[error("メールアドレスが不正です: {0}")]
    InvalidAddress(String),

    /// メッセージの構築に失敗
    #[error("メッセージの構築に失敗しました: {0}")]
    MessageBuild(String),

    /// 送信先サービスが拒否した
    ///
    /// 認証失敗、宛先の拒否など、サービスから明示的なエラー応答があった場合。
    #[error("送信先サービスが拒否しました（status={status}）: {body}")]
    Rejected {
        /// HTTP ステータスまたは SMTP 応答コード
        status: u16,
        /// 応答本文
        body:   String,
    },

    /// 通信エラー
    ///
    /// 接続失敗、TLS ハンドシェイク失敗、タイムアウトなど。
    #[error("通信エラー: {0}")]
    Transport(String),
}

impl DeliveryError {
    /// エラー種別を取得する
    pub fn kind(&self) -> &DeliveryErrorKind {
        &self.kind
    }

    /// SpanTrace を取得する
    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }

    // ===== Convenience constructors =====

    pub fn invalid_address(msg: impl Into<String>) -> Self {
        Self::capture(DeliveryErrorKind::InvalidAddress(msg.into()))
    }

    pub fn message_build(msg: impl Into<String>) -> Self {
        Self::capture(DeliveryErrorKind::MessageBuild(msg.into()))
    }

    pub fn rejected(status: u16, body: impl Into<String>) -> Self {
        Self::capture(DeliveryErrorKind::Rejected {
            status,
            body: body.into(),
        })
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        Self::capture(DeliveryErrorKind::Transport(msg.into()))
    }

    fn capture(kind: DeliveryErrorKind) -> Self {
        Self {
            kind,
            span_trace: SpanTrace::capture(),
        }
    }
}

impl fmt::Debug for DeliveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeliveryError")
            .field("kind", &self.kind)
            .field("span_trace", &self.span_trace)
            .finish()
    }
}

impl std::error::Error for DeliveryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.kind.source()
    }
}
