//! # Contact Service ライブラリ
//!
//! 問い合わせフォームの受付 API を構成するモジュール群。
//! バイナリ（`main.rs`）と統合テストの両方から利用する。
//!
//! ## モジュール構成
//!
//! - [`config`] - 環境変数からの設定読み込み
//! - [`error`] - API エラーと RFC 9457 レスポンスへの変換
//! - [`handler`] - HTTP ハンドラ
//! - [`usecase`] - 検証と配送のオーケストレーション
//! - [`app_builder`] - ルーターとミドルウェアの組み立て

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod usecase;
