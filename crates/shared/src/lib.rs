//! # ContactRelay 共有ユーティリティ
//!
//! このクレートは、ContactRelay
//! プロジェクト全体で使用される共通ユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - 他のすべてのクレート（domain, infra, contact-service）から依存できる
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - tracing / tower 系の依存は `observability` feature に閉じ込める

#[cfg(feature = "observability")]
pub mod canonical_log;
pub mod error_response;
pub mod event_log;
pub mod health;
pub mod observability;

pub use error_response::{ErrorResponse, InvalidParam};
pub use health::HealthResponse;
