//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置し、親モジュールで re-export する
//! - ハンドラは薄く保ち、検証と配送は usecase 層に委譲
//!
//! ## ハンドラ一覧
//!
//! - `health`: ヘルスチェック
//! - `contact`: 問い合わせ受付

pub mod contact;
pub mod health;

pub use contact::{ContactResponse, ContactState, send_contact};
pub use health::health_check;
