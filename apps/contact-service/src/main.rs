//! # Contact Service サーバー
//!
//! 問い合わせフォームの送信を受け付け、通知メールとして中継する API サーバー。
//!
//! ## 役割
//!
//! - **入力検証**: name / email / phone / description を検証し、不正なら 400 を返す
//! - **配送**: `EMAIL_PROVIDER` で選んだ SendGrid または SMTP で 1 通送信する
//!
//! ```text
//! ┌──────────┐  POST /contact  ┌─────────────────┐      ┌──────────────────┐
//! │  Client  │────────────────→│ Contact Service │─────→│ SendGrid / SMTP  │
//! └──────────┘                 └─────────────────┘      └──────────────────┘
//! ```
//!
//! 環境変数の一覧は [`contactrelay_contact_service::config`] を参照。
//!
//! ## 起動方法
//!
//! ```bash
//! EMAIL_PROVIDER=smtp SMTP_HOST=localhost SMTP_PORT=1025 \
//!   SMTP_USERNAME=dev SMTP_PASSWORD=dev SMTP_FROM_EMAIL=noreply@example.com \
//!   cargo run -p contactrelay-contact-service
//! ```

use std::{net::SocketAddr, sync::Arc};

use contactrelay_contact_service::{
    app_builder::build_app,
    config::ContactConfig,
    handler::ContactState,
    usecase::{ContactUseCaseImpl, DeliveryRoute},
};
use contactrelay_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

/// Contact Service サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    // トレーシング初期化
    init_tracing(TracingConfig::from_env("contact-service"));
    let _tracing_guard = tracing::info_span!("app", service = "contact-service").entered();

    // 設定読み込み
    let config = ContactConfig::from_env()?;

    tracing::info!(
        "Contact Service サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    // 依存コンポーネントを初期化
    let route = DeliveryRoute::from_config(&config.delivery);
    let contact_state = Arc::new(ContactState {
        usecase: Arc::new(ContactUseCaseImpl::new(route)),
    });

    let app = build_app(contact_state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Contact Service サーバーが起動しました: {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
