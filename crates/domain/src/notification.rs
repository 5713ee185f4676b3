//! # 通知
//!
//! 問い合わせを通知するメールと、その配送プロバイダを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 説明 |
//! |---|------------|------|
//! | [`EmailProvider`] | プロバイダ | 配送に使うバックエンド（SendGrid / SMTP） |
//! | [`EmailMessage`] | 通知メール | NotificationSender に渡される送信内容 |
//! | [`DeliveryReceipt`] | 配送受付 | 送信先サービスが返した受付情報 |
//!
//! ## 設計方針
//!
//! - **宛先の決定はユースケース側**: プロバイダごとに from / to の向きが異なるため、
//!   [`EmailMessage::contact_request`] は宛先を引数で受け取る
//! - **1 通 1 宛先**: 複数宛先・添付ファイルは扱わない

use strum::IntoStaticStr;

use crate::contact::ContactSubmission;

/// 配送プロバイダ
///
/// `EMAIL_PROVIDER` 環境変数の値（`sendgrid` / `smtp`）と対応する。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum EmailProvider {
    /// SendGrid Web API
    SendGrid,
    /// SMTP リレー
    Smtp,
}

impl EmailProvider {
    /// 利用者向けの表示名
    pub fn label(&self) -> &'static str {
        match self {
            Self::SendGrid => "SendGrid",
            Self::Smtp => "SMTP",
        }
    }
}

/// 通知メール
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// 送信元メールアドレス
    pub from:      String,
    /// 送信先メールアドレス
    pub to:        String,
    /// 件名
    pub subject:   String,
    /// プレーンテキスト本文
    pub text_body: String,
}

impl EmailMessage {
    /// 問い合わせから通知メールを組み立てる
    pub fn contact_request(
        submission: &ContactSubmission,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        Self {
            from:      from.into(),
            to:        to.into(),
            subject:   submission.subject(),
            text_body: submission.text_body(),
        }
    }
}

/// 配送受付
///
/// 送信先サービスが受け付けたことを示す。`message_id` はプロバイダが
/// 返した識別子（SendGrid の `X-Message-Id`、SMTP サーバーの応答）で、
/// 返されなかった場合は `None`。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryReceipt {
    pub message_id: Option<String>,
}
