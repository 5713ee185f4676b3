//! # 問い合わせ
//!
//! 問い合わせフォームの入力と、その検証ルールを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 説明 |
//! |---|------------|------|
//! | [`ContactForm`] | 問い合わせフォーム | HTTP から受け取った未検証の入力 |
//! | [`ContactSubmission`] | 問い合わせ | 検証済みの入力。配送処理に渡される |
//!
//! ## 検証ルール
//!
//! - `name` / `phone` / `description`: 必須、空文字列不可（形式は問わない）
//! - `email`: 必須、メールアドレスとして正しい形式。ドメインはドット区切りで、
//!   末尾が 2 文字以上の英字 TLD であること（`ann@localhost` や IP リテラルは不可）
//!
//! 検証は純粋な関数で、設定や外部サービスに依存しない。

use serde::Deserialize;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::{DomainError, FieldError, FieldErrors};

/// 値が欠落・空のときに付与するエラーコード
const CODE_MISSING: &str = "missing";

/// 形式不正のときに付与するエラーコード
const CODE_MALFORMED: &str = "malformed";

/// エラー報告時のフィールド順
const FIELDS: [&str; 4] = ["name", "email", "phone", "description"];

/// 問い合わせフォーム（未検証）
///
/// 欠落と空文字列を区別して扱えるよう、全フィールドを `Option` で受け取る。
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ContactForm {
    #[validate(required(code = "missing"), length(min = 1, code = "missing"))]
    pub name:        Option<String>,
    #[validate(
        required(code = "missing"),
        length(min = 1, code = "missing"),
        email(code = "malformed"),
        custom(function = validate_email_domain, code = "malformed")
    )]
    pub email:       Option<String>,
    #[validate(required(code = "missing"), length(min = 1, code = "missing"))]
    pub phone:       Option<String>,
    #[validate(required(code = "missing"), length(min = 1, code = "missing"))]
    pub description: Option<String>,
}

/// 問い合わせ（検証済み）
///
/// [`ContactForm`] から `TryFrom` でのみ生成できる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    name:        String,
    email:       String,
    phone:       String,
    description: String,
}

impl ContactSubmission {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// 通知メールの件名
    pub fn subject(&self) -> String {
        format!("New Contact Request from {}", self.name)
    }

    /// 通知メールのプレーンテキスト本文
    pub fn text_body(&self) -> String {
        format!(
            "Name: {}\nEmail: {}\nPhone: {}\nMessage: {}",
            self.name, self.email, self.phone, self.description
        )
    }
}

impl TryFrom<ContactForm> for ContactSubmission {
    type Error = DomainError;

    fn try_from(form: ContactForm) -> Result<Self, Self::Error> {
        form.validate()
            .map_err(|errors| DomainError::Validation(to_field_errors(&errors)))?;

        // validate() で required を検査済みのため、以降は全フィールドが Some
        Ok(Self {
            name:        form.name.unwrap_or_default(),
            email:       form.email.unwrap_or_default(),
            phone:       form.phone.unwrap_or_default(),
            description: form.description.unwrap_or_default(),
        })
    }
}

/// メールアドレスのドメイン部を検査する
///
/// validator の `email` はドメインに TLD を要求せず、`[127.0.0.1]` のような
/// IP リテラルも受け付けるため、公開ドメインの形であることを追加で求める。
fn validate_email_domain(email: &str) -> Result<(), ValidationError> {
    let malformed = || Err(ValidationError::new(CODE_MALFORMED));

    let Some((_, domain)) = email.rsplit_once('@') else {
        return malformed();
    };
    if domain.starts_with('[') {
        return malformed();
    }

    let labels: Vec<&str> = domain.split('.').collect();
    let Some(tld) = labels.last() else {
        return malformed();
    };
    if labels.len() < 2
        || labels.iter().any(|label| label.is_empty())
        || tld.len() < 2
        || !tld.chars().all(|c| c.is_ascii_alphabetic())
    {
        return malformed();
    }

    Ok(())
}

/// validator のエラーをフィールド順の [`FieldErrors`] に変換する
///
/// 1 フィールドに複数のエラーがある場合（空文字列の email など）は、
/// 欠落を優先して 1 件にまとめる。
fn to_field_errors(errors: &ValidationErrors) -> FieldErrors {
    let field_errors = errors.field_errors();

    let items = FIELDS
        .iter()
        .filter_map(|&field| {
            let errs = field_errors.get(field)?;
            if errs.iter().any(|e| e.code == CODE_MISSING) {
                Some(FieldError::missing(field))
            } else if errs.iter().any(|e| e.code == CODE_MALFORMED) {
                Some(FieldError::malformed(
                    field,
                    format!("{field} must be a valid email address"),
                ))
            } else {
                Some(FieldError::malformed(field, format!("{field} is invalid")))
            }
        })
        .collect();

    FieldErrors::new(items)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::FieldErrorKind;

    fn valid_form() -> ContactForm {
        ContactForm {
            name:        Some("Ann".to_string()),
            email:       Some("ann@x.com".to_string()),
            phone:       Some("555".to_string()),
            description: Some("hi".to_string()),
        }
    }

    fn validation_errors(form: ContactForm) -> FieldErrors {
        match ContactSubmission::try_from(form) {
            Err(DomainError::Validation(errors)) => errors,
            Ok(submission) => panic!("検証に失敗すること: {submission:?}"),
        }
    }

    #[test]
    fn test_正しい入力から問い合わせを生成できる() {
        let submission = ContactSubmission::try_from(valid_form()).unwrap();

        assert_eq!(submission.name(), "Ann");
        assert_eq!(submission.email(), "ann@x.com");
        assert_eq!(submission.phone(), "555");
        assert_eq!(submission.description(), "hi");
    }

    #[rstest]
    #[case::name("name")]
    #[case::email("email")]
    #[case::phone("phone")]
    #[case::description("description")]
    fn test_必須フィールドの欠落をmissingとして報告する(#[case] field: &str) {
        let mut form = valid_form();
        match field {
            "name" => form.name = None,
            "email" => form.email = None,
            "phone" => form.phone = None,
            _ => form.description = None,
        }

        let errors = validation_errors(form);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, field);
        assert_eq!(errors[0].kind, FieldErrorKind::Missing);
    }

    #[rstest]
    #[case::name("name")]
    #[case::email("email")]
    #[case::phone("phone")]
    #[case::description("description")]
    fn test_空文字列をmissingとして報告する(#[case] field: &str) {
        let mut form = valid_form();
        let empty = Some(String::new());
        match field {
            "name" => form.name = empty,
            "email" => form.email = empty,
            "phone" => form.phone = empty,
            _ => form.description = empty,
        }

        let errors = validation_errors(form);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, field);
        assert_eq!(errors[0].kind, FieldErrorKind::Missing);
    }

    #[rstest]
    #[case("not-an-email")]
    #[case("ann@")]
    #[case("@x.com")]
    #[case("ann x@x.com")]
    #[case::tldなし("ann@x")]
    #[case::ローカルホスト("ann@localhost")]
    #[case::ipリテラル("ann@[127.0.0.1]")]
    #[case::一文字のtld("a@b.c")]
    #[case::数字のtld("ann@x.123")]
    #[case::空のラベル("ann@x..com")]
    fn test_不正な形式のメールアドレスをmalformedとして報告する(#[case] email: &str) {
        let form = ContactForm {
            email: Some(email.to_string()),
            ..valid_form()
        };

        let errors = validation_errors(form);

        assert_eq!(errors.len(), 1);
        let error = errors.get("email").unwrap();
        assert_eq!(error.kind, FieldErrorKind::Malformed);
        assert_eq!(error.reason, "email must be a valid email address");
    }

    #[rstest]
    #[case("ann@x.com")]
    #[case("ann.lee+contact@mail.example.co.jp")]
    #[case("a@b.io")]
    fn test_tld付きドメインのメールアドレスは受け付ける(#[case] email: &str) {
        let form = ContactForm {
            email: Some(email.to_string()),
            ..valid_form()
        };

        let submission = ContactSubmission::try_from(form).unwrap();

        assert_eq!(submission.email(), email);
    }

    #[test]
    fn test_複数のエラーをフィールド順で全て報告する() {
        let form = ContactForm {
            name:        None,
            email:       Some("broken".to_string()),
            phone:       Some(String::new()),
            description: Some("hi".to_string()),
        };

        let errors = validation_errors(form);
        let fields: Vec<(&str, FieldErrorKind)> =
            errors.iter().map(|e| (e.field, e.kind)).collect();

        assert_eq!(
            fields,
            vec![
                ("name", FieldErrorKind::Missing),
                ("email", FieldErrorKind::Malformed),
                ("phone", FieldErrorKind::Missing),
            ]
        );
    }

    #[test]
    fn test_空のフォームは全フィールドが欠落として報告される() {
        let errors = validation_errors(ContactForm::default());

        assert_eq!(errors.len(), 4);
        assert!(errors.iter().all(|e| e.kind == FieldErrorKind::Missing));
    }

    #[test]
    fn test_電話番号の形式は検証しない() {
        let form = ContactForm {
            phone: Some("call me maybe".to_string()),
            ..valid_form()
        };

        assert!(ContactSubmission::try_from(form).is_ok());
    }

    #[test]
    fn test_件名に送信者名が含まれる() {
        let submission = ContactSubmission::try_from(valid_form()).unwrap();

        assert_eq!(submission.subject(), "New Contact Request from Ann");
    }

    #[test]
    fn test_本文は各フィールドを1行ずつ含む() {
        let submission = ContactSubmission::try_from(valid_form()).unwrap();

        assert_eq!(
            submission.text_body(),
            "Name: Ann\nEmail: ann@x.com\nPhone: 555\nMessage: hi"
        );
    }

    #[test]
    fn test_jsonの欠落フィールドはnoneとしてデシリアライズされる() {
        let form: ContactForm = serde_json::from_str(r#"{"name": "Ann"}"#).unwrap();

        assert_eq!(form.name.as_deref(), Some("Ann"));
        assert!(form.email.is_none());
        assert!(form.description.is_none());
    }
}
