//! # ユースケース層
//!
//! 問い合わせの検証と配送を実装する。
//!
//! ## 設計方針
//!
//! - **トレイトベースの設計**: ハンドラのテストでスタブに差し替えられるようトレイトを定義
//! - **依存性注入**: 送信手段は起動時に解決した [`DeliveryRoute`] として外から渡す
//! - **薄いハンドラ**: ハンドラは薄く保ち、ロジックはユースケースに集約

pub mod contact;

use async_trait::async_trait;
pub use contact::{ContactDelivered, ContactUseCaseImpl, DeliveryRoute};
use contactrelay_domain::contact::ContactForm;

use crate::error::ContactError;

/// 問い合わせユースケーストレイト
#[async_trait]
pub trait ContactUseCase: Send + Sync {
    /// 問い合わせを検証し、通知メールを 1 通送信する
    ///
    /// ## 戻り値
    ///
    /// - `Ok(ContactDelivered)`: 配送サービスが受け付けた
    /// - `Err(ContactError::Validation)`: 入力が不正（送信は試みない）
    /// - `Err(ContactError::Configuration)`: 配送設定が不正
    /// - `Err(ContactError::Delivery)`: 送信に失敗
    async fn submit_contact(&self, form: ContactForm) -> Result<ContactDelivered, ContactError>;
}

#[async_trait]
impl ContactUseCase for ContactUseCaseImpl {
    async fn submit_contact(&self, form: ContactForm) -> Result<ContactDelivered, ContactError> {
        self.submit_contact(form).await
    }
}
