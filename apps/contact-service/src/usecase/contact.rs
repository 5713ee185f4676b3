//! # 問い合わせユースケース
//!
//! 検証済みの問い合わせを、起動時に選択したプロバイダで配送する。
//!
//! ## 宛先の向き
//!
//! | プロバイダ | from | to |
//! |-----------|------|----|
//! | SendGrid | 送信者のアドレス | `SENDGRID_SENDER_EMAIL` |
//! | SMTP | `SMTP_FROM_EMAIL` | 送信者のアドレス |
//!
//! 1 回の呼び出しで送信は 1 通だけ。リトライや重複排除はしない。

use std::sync::Arc;

use contactrelay_domain::{
    DomainError,
    contact::{ContactForm, ContactSubmission},
    notification::{DeliveryReceipt, EmailMessage, EmailProvider},
};
use contactrelay_infra::notification::{
    NotificationSender,
    SendGridNotificationSender,
    SmtpNotificationSender,
};
use contactrelay_shared::{
    event_log::{error, event},
    log_business_event,
};

use crate::{
    config::{ConfigurationError, DeliveryConfig},
    error::ContactError,
};

/// 配送経路
///
/// 起動時に [`DeliveryConfig`] から 1 度だけ解決し、以降は変更しない。
/// 設定が不正な場合も起動は続け、リクエストごとに設定エラーを返す。
pub enum DeliveryRoute {
    SendGrid {
        sender:         Arc<dyn NotificationSender>,
        /// 通知の受信先
        notify_address: String,
    },
    Smtp {
        sender:       Arc<dyn NotificationSender>,
        /// 通知の送信元
        from_address: String,
    },
    Misconfigured(ConfigurationError),
}

impl DeliveryRoute {
    /// 配送設定から送信手段を組み立てる
    pub fn from_config(config: &DeliveryConfig) -> Self {
        match config {
            DeliveryConfig::SendGrid(sendgrid) => {
                tracing::info!(provider = "sendgrid", "SendGrid で配送します");
                Self::SendGrid {
                    sender:         Arc::new(SendGridNotificationSender::new(&sendgrid.api_key)),
                    notify_address: sendgrid.sender_email.clone(),
                }
            }
            DeliveryConfig::Smtp(smtp) => {
                tracing::info!(
                    provider = "smtp",
                    smtp.host = %smtp.settings.host,
                    smtp.port = smtp.settings.port,
                    smtp.security = %smtp.settings.security,
                    "SMTP で配送します"
                );
                Self::Smtp {
                    sender:       Arc::new(SmtpNotificationSender::new(smtp.settings.clone())),
                    from_address: smtp.from_email.clone(),
                }
            }
            DeliveryConfig::Invalid(err) => {
                tracing::warn!(
                    error.category = error::category::CONFIGURATION,
                    error.kind = error::kind::EMAIL_PROVIDER,
                    "配送設定が不正です。問い合わせはすべて設定エラーになります: {}",
                    err
                );
                Self::Misconfigured(err.clone())
            }
        }
    }

    /// 配送に使うプロバイダ（設定不正の場合は `None`）
    pub fn provider(&self) -> Option<EmailProvider> {
        match self {
            Self::SendGrid { .. } => Some(EmailProvider::SendGrid),
            Self::Smtp { .. } => Some(EmailProvider::Smtp),
            Self::Misconfigured(_) => None,
        }
    }
}

/// 配送結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDelivered {
    pub provider: EmailProvider,
    pub receipt:  DeliveryReceipt,
}

impl ContactDelivered {
    /// 呼び出し元に返す確認メッセージ
    pub fn message(&self) -> String {
        format!("Email sent successfully with {}!", self.provider.label())
    }
}

/// 問い合わせユースケースの実装
pub struct ContactUseCaseImpl {
    route: DeliveryRoute,
}

impl ContactUseCaseImpl {
    /// 新しいユースケースインスタンスを作成
    pub fn new(route: DeliveryRoute) -> Self {
        Self { route }
    }

    /// 問い合わせを検証し、配送する
    #[tracing::instrument(skip_all)]
    pub async fn submit_contact(&self, form: ContactForm) -> Result<ContactDelivered, ContactError> {
        let submission = ContactSubmission::try_from(form).map_err(|e| {
            let DomainError::Validation(errors) = e;
            log_business_event!(
                event.category = event::category::CONTACT,
                event.action = event::action::CONTACT_REJECTED,
                event.fields = %errors,
                event.result = event::result::FAILURE,
                "問い合わせの入力が不正です"
            );
            ContactError::Validation(errors)
        })?;

        self.deliver(&submission).await
    }

    /// 検証済みの問い合わせを配送する
    pub async fn deliver(
        &self,
        submission: &ContactSubmission,
    ) -> Result<ContactDelivered, ContactError> {
        let (provider, sender, email) = match &self.route {
            DeliveryRoute::SendGrid {
                sender,
                notify_address,
            } => (
                EmailProvider::SendGrid,
                sender,
                EmailMessage::contact_request(submission, submission.email(), notify_address),
            ),
            DeliveryRoute::Smtp {
                sender,
                from_address,
            } => (
                EmailProvider::Smtp,
                sender,
                EmailMessage::contact_request(submission, from_address, submission.email()),
            ),
            DeliveryRoute::Misconfigured(err) => {
                tracing::error!(
                    error.category = error::category::CONFIGURATION,
                    error.kind = error::kind::EMAIL_PROVIDER,
                    "配送設定が不正なため送信できません: {}",
                    err
                );
                log_business_event!(
                    event.category = event::category::CONTACT,
                    event.action = event::action::CONTACT_FAILED,
                    event.result = event::result::FAILURE,
                    "問い合わせを配送できませんでした"
                );
                return Err(ContactError::Configuration(err.clone()));
            }
        };

        match sender.send_email(&email).await {
            Ok(receipt) => {
                log_business_event!(
                    event.category = event::category::CONTACT,
                    event.action = event::action::CONTACT_DELIVERED,
                    event.provider = %provider,
                    event.message_id = receipt.message_id.as_deref().unwrap_or("-"),
                    event.result = event::result::SUCCESS,
                    "問い合わせを配送しました"
                );
                Ok(ContactDelivered { provider, receipt })
            }
            Err(e) => {
                tracing::error!(
                    error.category = error::category::EXTERNAL_SERVICE,
                    error.kind = error::kind::EMAIL_DELIVERY,
                    provider = %provider,
                    span_trace = %e.span_trace(),
                    "メール送信に失敗しました: {}",
                    e
                );
                log_business_event!(
                    event.category = event::category::CONTACT,
                    event.action = event::action::CONTACT_FAILED,
                    event.provider = %provider,
                    event.result = event::result::FAILURE,
                    "問い合わせを配送できませんでした"
                );
                Err(ContactError::Delivery {
                    provider,
                    source: e,
                })
            }
        }
    }
}
