//! # ContactRelay ドメイン層
//!
//! 問い合わせフォームの送信内容と、通知メールのドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **検証済みの値だけを流す**: [`ContactSubmission`](contact::ContactSubmission)
//!   は検証を通過した入力からしか作れない
//! - **I/O を持たない**: メール送信の具体的な手段はインフラ層が担当する
//!
//! ## 依存関係の方向
//!
//! ```text
//! contact-service → infra → domain
//!        ↘                    ↑
//!          ───────────────────
//! ```
//!
//! ## モジュール構成
//!
//! - [`contact`] - 問い合わせフォームの入力と検証
//! - [`error`] - ドメイン層で発生するエラーの定義
//! - [`notification`] - 通知メールと配送プロバイダ
//!
//! ## 使用例
//!
//! ```rust
//! use contactrelay_domain::contact::{ContactForm, ContactSubmission};
//!
//! let form = ContactForm {
//!     name:        Some("Ann".to_string()),
//!     email:       Some("ann@example.com".to_string()),
//!     phone:       Some("555".to_string()),
//!     description: Some("hi".to_string()),
//! };
//! let submission = ContactSubmission::try_from(form).unwrap();
//! assert_eq!(submission.name(), "Ann");
//! ```

pub mod contact;
pub mod error;
pub mod notification;

pub use error::{DomainError, FieldError, FieldErrorKind, FieldErrors};
