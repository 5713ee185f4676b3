//! # Contact Service 設定
//!
//! 環境変数から Contact Service サーバーの設定を読み込む。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `CONTACT_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `CONTACT_PORT` | No | ポート番号（デフォルト: `3000`） |
//! | `EMAIL_PROVIDER` | **Yes** | `sendgrid` または `smtp` |
//! | `SENDGRID_API_KEY` | sendgrid | SendGrid API キー |
//! | `SENDGRID_SENDER_EMAIL` | sendgrid | 通知の受信先アドレス |
//! | `SMTP_HOST` | smtp | リレーサーバーのホスト |
//! | `SMTP_PORT` | No | リレーサーバーのポート（デフォルト: `tls` なら `465`、それ以外は `587`） |
//! | `SMTP_USERNAME` / `SMTP_PASSWORD` | smtp | リレーの認証情報 |
//! | `SMTP_FROM_EMAIL` | smtp | 送信元アドレス |
//! | `SMTP_SECURITY` | No | `none`（デフォルト）/ `starttls` / `tls` |
//!
//! ## 設計方針
//!
//! - **起動時に 1 度だけ読む**: 以降は不変で、再読み込みしない
//! - **配送設定の不備ではプロセスを落とさない**: [`DeliveryConfig::Invalid`] として保持し、
//!   リクエストごとに設定エラーを返す
//! - **テストで環境変数を書き換えない**: 読み込みはルックアップ関数経由で行う

use std::{env, fmt};

use contactrelay_domain::notification::EmailProvider;
use contactrelay_infra::notification::{SmtpSecurity, SmtpSettings};
use thiserror::Error;

/// SMTP ポートのデフォルト値（submission ポート）
const DEFAULT_SMTP_PORT: u16 = 587;

/// 暗黙的 TLS（`SMTP_SECURITY=tls`）の SMTP ポートのデフォルト値
const DEFAULT_SMTPS_PORT: u16 = 465;

/// 設定の不備
///
/// API の呼び出し元には詳細を返さず、サーバーログにだけ残す。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// `EMAIL_PROVIDER` が未設定、または対応していない値
    #[error(
        "Invalid EMAIL_PROVIDER: {}. Use \"sendgrid\" or \"smtp\".",
        .0.as_deref().unwrap_or("(unset)")
    )]
    InvalidProvider(Option<String>),

    /// 選択したプロバイダに必要な設定がない
    #[error("{key} is not set (required when EMAIL_PROVIDER={provider})")]
    MissingSetting {
        provider: EmailProvider,
        key:      &'static str,
    },

    /// 値が解釈できない
    #[error("{key} has an invalid value: {value:?}")]
    InvalidSetting { key: &'static str, value: String },
}

/// Contact Service サーバーの設定
#[derive(Debug, Clone)]
pub struct ContactConfig {
    /// バインドアドレス
    pub host:     String,
    /// ポート番号
    pub port:     u16,
    /// 配送設定
    pub delivery: DeliveryConfig,
}

impl ContactConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// ルックアップ関数から設定を読み込む
    ///
    /// サーバー自体の設定（ポート番号）が不正な場合のみエラーを返す。
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = non_empty(&lookup, "CONTACT_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_or(&lookup, "CONTACT_PORT", 3000)?;

        Ok(Self {
            host,
            port,
            delivery: DeliveryConfig::from_lookup(&lookup),
        })
    }
}

/// 配送設定
///
/// `EMAIL_PROVIDER` の値と、そのプロバイダに必要な設定の組。
#[derive(Debug, Clone)]
pub enum DeliveryConfig {
    SendGrid(SendGridConfig),
    Smtp(SmtpConfig),
    /// 配送できない設定（理由を保持する）
    Invalid(ConfigurationError),
}

impl DeliveryConfig {
    /// ルックアップ関数から配送設定を読み込む
    pub fn from_lookup<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw = non_empty(lookup, "EMAIL_PROVIDER");
        let Some(Ok(provider)) = raw.as_deref().map(str::parse::<EmailProvider>) else {
            return Self::Invalid(ConfigurationError::InvalidProvider(raw));
        };

        let resolved = match provider {
            EmailProvider::SendGrid => SendGridConfig::from_lookup(lookup).map(Self::SendGrid),
            EmailProvider::Smtp => SmtpConfig::from_lookup(lookup).map(Self::Smtp),
        };
        resolved.unwrap_or_else(Self::Invalid)
    }
}

/// SendGrid の設定
#[derive(Clone)]
pub struct SendGridConfig {
    /// API キー
    pub api_key:      String,
    /// 通知の受信先アドレス
    pub sender_email: String,
}

impl SendGridConfig {
    fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key| require(lookup, EmailProvider::SendGrid, key);
        Ok(Self {
            api_key:      required("SENDGRID_API_KEY")?,
            sender_email: required("SENDGRID_SENDER_EMAIL")?,
        })
    }
}

impl fmt::Debug for SendGridConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SendGridConfig")
            .field("api_key", &"[REDACTED]")
            .field("sender_email", &self.sender_email)
            .finish()
    }
}

/// SMTP の設定
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    /// 接続設定
    pub settings:   SmtpSettings,
    /// 送信元アドレス
    pub from_email: String,
}

impl SmtpConfig {
    fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key| require(lookup, EmailProvider::Smtp, key);
        let security = parse_or(lookup, "SMTP_SECURITY", SmtpSecurity::default())?;
        let default_port = match security {
            SmtpSecurity::Tls => DEFAULT_SMTPS_PORT,
            SmtpSecurity::None | SmtpSecurity::StartTls => DEFAULT_SMTP_PORT,
        };
        let settings = SmtpSettings {
            host:     required("SMTP_HOST")?,
            port:     parse_or(lookup, "SMTP_PORT", default_port)?,
            username: required("SMTP_USERNAME")?,
            password: required("SMTP_PASSWORD")?,
            security,
        };

        Ok(Self {
            settings,
            from_email: required("SMTP_FROM_EMAIL")?,
        })
    }
}

// --- ルックアップ補助 ---

/// 空文字列は未設定として扱う
fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).filter(|v| !v.is_empty())
}

fn require<F>(
    lookup: &F,
    provider: EmailProvider,
    key: &'static str,
) -> Result<String, ConfigurationError>
where
    F: Fn(&str) -> Option<String>,
{
    non_empty(lookup, key).ok_or(ConfigurationError::MissingSetting { provider, key })
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigurationError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match non_empty(lookup, key) {
        None => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| ConfigurationError::InvalidSetting { key, value }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const SMTP_ENV: [(&str, &str); 5] = [
        ("EMAIL_PROVIDER", "smtp"),
        ("SMTP_HOST", "smtp.example.com"),
        ("SMTP_USERNAME", "relay-user"),
        ("SMTP_PASSWORD", "relay-pass"),
        ("SMTP_FROM_EMAIL", "noreply@example.com"),
    ];

    #[test]
    fn test_サーバー設定のデフォルト値() {
        let config = ContactConfig::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_contact_portが不正な場合はエラーになる() {
        let err = ContactConfig::from_lookup(lookup_from(&[("CONTACT_PORT", "http")])).unwrap_err();

        assert_eq!(
            err,
            ConfigurationError::InvalidSetting {
                key:   "CONTACT_PORT",
                value: "http".to_string(),
            }
        );
    }

    #[test]
    fn test_sendgridの設定を読み込む() {
        let config = DeliveryConfig::from_lookup(&lookup_from(&[
            ("EMAIL_PROVIDER", "sendgrid"),
            ("SENDGRID_API_KEY", "SG.key"),
            ("SENDGRID_SENDER_EMAIL", "inbox@example.com"),
        ]));

        let DeliveryConfig::SendGrid(sendgrid) = config else {
            panic!("SendGrid 設定になること: {config:?}");
        };
        assert_eq!(sendgrid.api_key, "SG.key");
        assert_eq!(sendgrid.sender_email, "inbox@example.com");
    }

    #[test]
    fn test_sendgrid設定のdebug出力にapiキーを含まない() {
        let config = SendGridConfig {
            api_key:      "SG.secret".to_string(),
            sender_email: "inbox@example.com".to_string(),
        };

        let debug = format!("{config:?}");

        assert!(!debug.contains("SG.secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_smtpの設定をデフォルト値込みで読み込む() {
        let config = DeliveryConfig::from_lookup(&lookup_from(&SMTP_ENV));

        let DeliveryConfig::Smtp(smtp) = config else {
            panic!("SMTP 設定になること: {config:?}");
        };
        assert_eq!(smtp.settings.host, "smtp.example.com");
        assert_eq!(smtp.settings.port, 587);
        assert_eq!(smtp.settings.security, SmtpSecurity::None);
        assert_eq!(smtp.from_email, "noreply@example.com");
    }

    #[test]
    fn test_smtpのポートと暗号化方式を上書きできる() {
        let mut pairs = SMTP_ENV.to_vec();
        pairs.push(("SMTP_PORT", "465"));
        pairs.push(("SMTP_SECURITY", "tls"));

        let config = DeliveryConfig::from_lookup(&lookup_from(&pairs));

        let DeliveryConfig::Smtp(smtp) = config else {
            panic!("SMTP 設定になること: {config:?}");
        };
        assert_eq!(smtp.settings.port, 465);
        assert_eq!(smtp.settings.security, SmtpSecurity::Tls);
    }

    #[rstest]
    #[case::tls("tls", 465)]
    #[case::starttls("starttls", 587)]
    #[case::none("none", 587)]
    fn test_smtp_portが未設定なら暗号化方式に応じたポートを使う(
        #[case] security: &str,
        #[case] expected: u16,
    ) {
        let mut pairs = SMTP_ENV.to_vec();
        pairs.push(("SMTP_SECURITY", security));

        let config = DeliveryConfig::from_lookup(&lookup_from(&pairs));

        let DeliveryConfig::Smtp(smtp) = config else {
            panic!("SMTP 設定になること: {config:?}");
        };
        assert_eq!(smtp.settings.port, expected);
    }

    #[test]
    fn test_smtp_securityがtlsでもsmtp_portを明示すればそれを使う() {
        let mut pairs = SMTP_ENV.to_vec();
        pairs.push(("SMTP_SECURITY", "tls"));
        pairs.push(("SMTP_PORT", "2465"));

        let config = DeliveryConfig::from_lookup(&lookup_from(&pairs));

        let DeliveryConfig::Smtp(smtp) = config else {
            panic!("SMTP 設定になること: {config:?}");
        };
        assert_eq!(smtp.settings.port, 2465);
    }

    #[rstest]
    #[case(Some("unknown"), "Invalid EMAIL_PROVIDER: unknown. Use \"sendgrid\" or \"smtp\".")]
    #[case(Some("SendGrid"), "Invalid EMAIL_PROVIDER: SendGrid. Use \"sendgrid\" or \"smtp\".")]
    #[case(Some(""), "Invalid EMAIL_PROVIDER: (unset). Use \"sendgrid\" or \"smtp\".")]
    #[case(None, "Invalid EMAIL_PROVIDER: (unset). Use \"sendgrid\" or \"smtp\".")]
    fn test_不正なプロバイダは設定エラーとして保持される(
        #[case] provider: Option<&str>,
        #[case] expected: &str,
    ) {
        let pairs: Vec<_> = provider.map(|p| ("EMAIL_PROVIDER", p)).into_iter().collect();

        let config = DeliveryConfig::from_lookup(&lookup_from(&pairs));

        let DeliveryConfig::Invalid(err) = config else {
            panic!("設定エラーになること: {config:?}");
        };
        assert_eq!(err.to_string(), expected);
    }

    #[rstest]
    #[case("SMTP_HOST")]
    #[case("SMTP_USERNAME")]
    #[case("SMTP_PASSWORD")]
    #[case("SMTP_FROM_EMAIL")]
    fn test_smtpの必須設定が欠けるとキー名を含む設定エラーになる(#[case] missing: &str) {
        let pairs: Vec<_> = SMTP_ENV.iter().copied().filter(|(k, _)| *k != missing).collect();

        let config = DeliveryConfig::from_lookup(&lookup_from(&pairs));

        let DeliveryConfig::Invalid(err) = config else {
            panic!("設定エラーになること: {config:?}");
        };
        assert!(err.to_string().contains(missing), "{err}");
        assert!(matches!(err, ConfigurationError::MissingSetting { .. }));
    }

    #[test]
    fn test_sendgridの受信先が欠けると設定エラーになる() {
        let config = DeliveryConfig::from_lookup(&lookup_from(&[
            ("EMAIL_PROVIDER", "sendgrid"),
            ("SENDGRID_API_KEY", "SG.key"),
        ]));

        let DeliveryConfig::Invalid(err) = config else {
            panic!("設定エラーになること: {config:?}");
        };
        assert_eq!(
            err,
            ConfigurationError::MissingSetting {
                provider: EmailProvider::SendGrid,
                key:      "SENDGRID_SENDER_EMAIL",
            }
        );
        assert_eq!(
            err.to_string(),
            "SENDGRID_SENDER_EMAIL is not set (required when EMAIL_PROVIDER=sendgrid)"
        );
    }

    #[rstest]
    #[case("SMTP_PORT", "smtp")]
    #[case("SMTP_SECURITY", "ssl")]
    fn test_smtpの値が解釈できないと設定エラーになる(#[case] key: &str, #[case] value: &str) {
        let mut pairs = SMTP_ENV.to_vec();
        pairs.push((key, value));

        let config = DeliveryConfig::from_lookup(&lookup_from(&pairs));

        let DeliveryConfig::Invalid(ConfigurationError::InvalidSetting { key: k, value: v }) = config
        else {
            panic!("設定値エラーになること: {config:?}");
        };
        assert_eq!(k, key);
        assert_eq!(v, value);
    }
}
