//! SMTP 通知送信実装
//!
//! lettre の `AsyncSmtpTransport` を使用してメールを送信する。
//! 接続はリクエストごとに張り直し、リクエスト間で共有しない。

use std::fmt;

use async_trait::async_trait;
use contactrelay_domain::notification::{DeliveryReceipt, EmailMessage};
use lettre::{
    AsyncSmtpTransport,
    AsyncTransport,
    Tokio1Executor,
    message::{Mailbox, Message, header::ContentType},
    transport::smtp::{self, authentication::Credentials},
};

use super::NotificationSender;
use crate::DeliveryError;

/// SMTP 接続の暗号化方式
///
/// `SMTP_SECURITY` 環境変数の値と対応する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum SmtpSecurity {
    /// 暗号化なし
    #[default]
    None,
    /// 平文で接続後に STARTTLS で昇格
    StartTls,
    /// 接続時から TLS（SMTPS）
    Tls,
}

/// SMTP リレーの接続設定
#[derive(Clone)]
pub struct SmtpSettings {
    pub host:     String,
    pub port:     u16,
    pub username: String,
    pub password: String,
    pub security: SmtpSecurity,
}

impl fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("security", &self.security)
            .finish()
    }
}

/// SMTP 通知送信
///
/// 接続設定だけを保持し、送信のたびに
/// `lettre::AsyncSmtpTransport<Tokio1Executor>` を組み立てる。
pub struct SmtpNotificationSender {
    settings: SmtpSettings,
}

impl SmtpNotificationSender {
    /// 新しい SMTP 送信インスタンスを作成
    ///
    /// 暗号化なしで認証情報を送る設定の場合は警告ログを出す。
    pub fn new(settings: SmtpSettings) -> Self {
        if settings.security == SmtpSecurity::None {
            tracing::warn!(
                smtp.host = %settings.host,
                smtp.port = settings.port,
                "SMTP 認証情報を暗号化なしの接続で送信します（SMTP_SECURITY=starttls|tls を推奨）"
            );
        }

        Self { settings }
    }

    fn build_transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, DeliveryError> {
        let host = self.settings.host.as_str();
        let builder = match self.settings.security {
            // builder_dangerous: TLS なしで接続
            SmtpSecurity::None => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host),
            SmtpSecurity::StartTls => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
                .map_err(|e| DeliveryError::transport(format!("STARTTLS 設定失敗: {e}")))?,
            SmtpSecurity::Tls => AsyncSmtpTransport::<Tokio1Executor>::relay(host)
                .map_err(|e| DeliveryError::transport(format!("TLS 設定失敗: {e}")))?,
        };

        Ok(builder
            .port(self.settings.port)
            .credentials(Credentials::new(
                self.settings.username.clone(),
                self.settings.password.clone(),
            ))
            .build())
    }
}

#[async_trait]
impl NotificationSender for SmtpNotificationSender {
    #[tracing::instrument(skip_all, fields(smtp.host = %self.settings.host))]
    async fn send_email(&self, email: &EmailMessage) -> Result<DeliveryReceipt, DeliveryError> {
        let message = build_message(email)?;
        let transport = self.build_transport()?;

        let response = transport.send(message).await.map_err(from_smtp_error)?;

        Ok(DeliveryReceipt {
            message_id: response.first_line().map(str::to_string),
        })
    }
}

fn build_message(email: &EmailMessage) -> Result<Message, DeliveryError> {
    let from: Mailbox = email
        .from
        .parse()
        .map_err(|e| DeliveryError::invalid_address(format!("送信元アドレス不正: {e}")))?;
    let to: Mailbox = email
        .to
        .parse()
        .map_err(|e| DeliveryError::invalid_address(format!("宛先アドレス不正: {e}")))?;

    Message::builder()
        .from(from)
        .to(to)
        .subject(&email.subject)
        .header(ContentType::TEXT_PLAIN)
        .body(email.text_body.clone())
        .map_err(|e| DeliveryError::message_build(e.to_string()))
}

/// サーバーが応答コードを返したものは拒否、それ以外は通信エラーとして扱う
fn from_smtp_error(e: smtp::Error) -> DeliveryError {
    match e.status() {
        Some(code) if e.is_permanent() || e.is_transient() => {
            DeliveryError::rejected(code.to_string().parse().unwrap_or_default(), e.to_string())
        }
        _ => DeliveryError::transport(format!("SMTP 送信失敗: {e}")),
    }
}
