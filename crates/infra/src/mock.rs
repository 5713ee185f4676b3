//! # テスト用モック送信
//!
//! ユースケーステスト・API テストで使用するインメモリの送信実装。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! contactrelay-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use contactrelay_domain::notification::{DeliveryReceipt, EmailMessage};

use crate::{DeliveryError, notification::NotificationSender};

/// 失敗モードで返す内部エラーの詳細
///
/// 呼び出し元のレスポンスに漏れていないことをテストで確認するために使う。
pub const MOCK_FAILURE_DETAIL: &str = "mock-relay: 421 internal queue exhausted";

// ===== MockNotificationSender =====

/// 送信したメールを記録するモック
///
/// `Clone` しても記録は共有されるため、テスト側でハンドルを保持したまま
/// ユースケースに渡せる。
#[derive(Clone, Default)]
pub struct MockNotificationSender {
    sent:    Arc<Mutex<Vec<EmailMessage>>>,
    failing: bool,
}

impl MockNotificationSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// 常に通信エラーを返すモックを作成する
    ///
    /// 送信を試みたメールは記録される。
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// 送信を試みたメールを取得する
    pub fn sent_emails(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationSender for MockNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<DeliveryReceipt, DeliveryError> {
        self.sent.lock().unwrap().push(email.clone());

        if self.failing {
            return Err(DeliveryError::transport(MOCK_FAILURE_DETAIL));
        }

        let count = self.sent.lock().unwrap().len();
        Ok(DeliveryReceipt {
            message_id: Some(format!("mock-{count}")),
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::DeliveryErrorKind;

    fn make_email(subject: &str) -> EmailMessage {
        EmailMessage {
            from:      "ann@x.com".to_string(),
            to:        "inbox@example.com".to_string(),
            subject:   subject.to_string(),
            text_body: "body".to_string(),
        }
    }

    #[tokio::test]
    async fn test_送信したメールが順に記録される() {
        let sender = MockNotificationSender::new();
        let handle = sender.clone();

        let first = sender.send_email(&make_email("first")).await.unwrap();
        let second = sender.send_email(&make_email("second")).await.unwrap();

        assert_eq!(first.message_id.as_deref(), Some("mock-1"));
        assert_eq!(second.message_id.as_deref(), Some("mock-2"));
        let subjects: Vec<_> = handle
            .sent_emails()
            .into_iter()
            .map(|e| e.subject)
            .collect();
        assert_eq!(subjects, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_失敗モードでは通信エラーを返す() {
        let sender = MockNotificationSender::failing();

        let err = sender.send_email(&make_email("first")).await.unwrap_err();

        assert!(matches!(
            err.kind(),
            DeliveryErrorKind::Transport(msg) if msg == MOCK_FAILURE_DETAIL
        ));
        assert_eq!(sender.sent_emails().len(), 1);
    }
}
