//! # 通知送信
//!
//! メール通知の送信を担当するインフラストラクチャモジュール。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: `NotificationSender` trait でメール送信を抽象化
//! - **2 つの実装**: SendGrid（Web API）、SMTP（リレーサーバー）
//! - **起動時に選択**: `EMAIL_PROVIDER` でどちらを使うかを決め、以降は変えない

mod sendgrid;
mod smtp;

use async_trait::async_trait;
use contactrelay_domain::notification::{DeliveryReceipt, EmailMessage};
pub use sendgrid::SendGridNotificationSender;
pub use smtp::{SmtpNotificationSender, SmtpSecurity, SmtpSettings};

use crate::DeliveryError;

/// メール送信トレイト
///
/// 配送の中核。メール送信の具体的な方法を抽象化する。
/// 1 回の呼び出しで 1 通だけ送信を試み、リトライはしない。
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// メールを送信する
    async fn send_email(&self, email: &EmailMessage) -> Result<DeliveryReceipt, DeliveryError>;
}
