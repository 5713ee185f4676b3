//! # ContactRelay インフラ層
//!
//! 外部のメール配送サービスとの通信を担当するインフラストラクチャ層。
//!
//! ## 責務
//!
//! - **SendGrid**: Web API（`POST /v3/mail/send`）経由の送信
//! - **SMTP**: lettre によるリレーサーバー経由の送信
//!
//! ## 依存関係
//!
//! ```text
//! contact-service → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`error`] - 配送エラー定義
//! - [`notification`] - `NotificationSender` トレイトと各実装
//! - `mock` - テスト用の記録付き送信実装（`test-utils` feature）

pub mod error;
pub mod notification;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

pub use error::{DeliveryError, DeliveryErrorKind};
