//! # ビジネスイベントログとエラーコンテキストの構造化ヘルパー
//!
//! `jq` で調査しやすいよう、ログフィールドの命名規約とヘルパーマクロを提供する。
//!
//! ## ビジネスイベント
//!
//! [`log_business_event!`] マクロで出力する。`event.kind = "business_event"` マーカーが
//! 自動付与され、`jq 'select(.["event.kind"] == "business_event")'` でフィルタできる。
//!
//! ## エラーコンテキスト
//!
//! `tracing::error!` に `error.category` + `error.kind` フィールドを直接追加する。
//! 定数は [`error`] モジュールで提供。
//!
//! ## フィールド命名規約
//!
//! ドット記法（`event.category`、`error.kind`）を使用。JSON 出力でフラットなキーになる。

/// ビジネスイベントを構造化ログとして出力する。
///
/// `event.kind = "business_event"` マーカーを自動付与し、
/// `tracing::info!` レベルで出力する。
///
/// ## 必須フィールド（慣例）
///
/// - `event.category`: イベントカテゴリ（[`event::category`] の定数を使用）
/// - `event.action`: アクション名（[`event::action`] の定数を使用）
/// - `event.result`: 結果（[`event::result`] の定数を使用）
///
/// ## 推奨フィールド
///
/// - `event.provider`: 配送プロバイダ（`sendgrid` / `smtp`）
///
/// ```
/// use contactrelay_shared::{event_log::event, log_business_event};
///
/// log_business_event!(
///     event.category = event::category::CONTACT,
///     event.action = event::action::CONTACT_DELIVERED,
///     event.provider = "smtp",
///     event.result = event::result::SUCCESS,
///     "問い合わせを配送"
/// );
/// ```
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
        /// 配送サービスが受け付けた
        pub const CONTACT_DELIVERED: &str = "contact.delivered";
        /// 配送に失敗した（設定不備を含む）
        pub const CONTACT_FAILED: &str = "contact.failed";
        /// 入力検証で拒否した
        pub const CONTACT_REJECTED: &str = "contact.rejected";
    }

    /// イベント結果
    pub mod result {
        pub const SUCCESS: &str = "success";
        pub const FAILURE: &str = "failure";
    }
}

/// エラーコンテキストフィールドの定数
pub mod error {
    /// エラーカテゴリ
    pub mod category {
        /// サーバー設定の不備
        pub const CONFIGURATION: &str = "configuration";
        /// 外部サービス呼び出し（SendGrid、SMTP リレー）
        pub const EXTERNAL_SERVICE: &str = "external_service";
    }

    /// エラー種別
    pub mod kind {
        pub const EMAIL_DELIVERY: &str = "email_delivery";
        pub const EMAIL_PROVIDER: &str = "email_provider";
    }
}
