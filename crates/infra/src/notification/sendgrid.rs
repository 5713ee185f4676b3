//! SendGrid 通知送信実装
//!
//! SendGrid v3 Web API（`POST /v3/mail/send`）を使用してメールを送信する。
//! API キーは起動時に 1 度だけ設定し、以降は共有する。

use async_trait::async_trait;
use contactrelay_domain::notification::{DeliveryReceipt, EmailMessage};
use serde::Serialize;

use super::NotificationSender;
use crate::DeliveryError;

/// SendGrid API のベース URL
const SENDGRID_API_BASE_URL: &str = "https://api.sendgrid.com";

/// 受付時にレスポンスヘッダーで返されるメッセージ ID
const MESSAGE_ID_HEADER: &str = "x-message-id";

/// SendGrid 通知送信
///
/// `reqwest::Client` をラップする。クライアントはコネクションプールを持ち、
/// リクエスト間で共有しても状態を持ち越さない。
pub struct SendGridNotificationSender {
    client:   reqwest::Client,
    api_key:  String,
    base_url: String,
}

impl SendGridNotificationSender {
    /// 新しい SendGrid 送信インスタンスを作成
    ///
    /// # 引数
    ///
    /// - `api_key`: SendGrid API キー（`mail.send` 権限が必要）
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, SENDGRID_API_BASE_URL)
    }

    /// 送信先のベース URL を指定して作成（スタブサーバー向け）
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client:   reqwest::Client::new(),
            api_key:  api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

// --- リクエスト本文 ---

#[derive(Debug, Serialize)]
struct MailSendRequest<'a> {
    personalizations: [Personalization<'a>; 1],
    from:             Address<'a>,
    subject:          &'a str,
    content:          [Content<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Personalization<'a> {
    to: [Address<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Address<'a> {
    email: &'a str,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(rename = "type")]
    content_type: &'a str,
    value:        &'a str,
}

impl<'a> From<&'a EmailMessage> for MailSendRequest<'a> {
    fn from(email: &'a EmailMessage) -> Self {
        Self {
            personalizations: [Personalization {
                to: [Address { email: &email.to }],
            }],
            from:             Address { email: &email.from },
            subject:          &email.subject,
            content:          [Content {
                content_type: "text/plain",
                value:        &email.text_body,
            }],
        }
    }
}

#[async_trait]
impl NotificationSender for SendGridNotificationSender {
    #[tracing::instrument(skip_all)]
    async fn send_email(&self, email: &EmailMessage) -> Result<DeliveryReceipt, DeliveryError> {
        let response = self
            .client
            .post(format!("{}/v3/mail/send", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&MailSendRequest::from(email))
            .send()
            .await
            .map_err(|e| DeliveryError::transport(format!("SendGrid 送信失敗: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DeliveryError::rejected(status.as_u16(), body));
        }

        let message_id = response
            .headers()
            .get(MESSAGE_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        Ok(DeliveryReceipt { message_id })
    }
}
