//! # お問い合わせ
//!
//! お問い合わせフォームの送信内容と、その必須項目バリデーションを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 説明 |
//! |---|------------|------|
//! | [`ContactForm`] | 受信フォーム | HTTP で受け取った未検証の入力 |
//! | [`ContactSubmission`] | 送信内容 | 必須項目（名前・メール・本文）が揃った検証済みの入力 |
//!
//! ## 設計方針
//!
//! - **ガードであってパーサーではない**: 空でないことだけを確認し、値は変更しない
//!   （トリム・メール形式チェック・サニタイズは行わない）
//! - **空白のみは「入力あり」**: `"  "` は空文字列ではないため通過する
//! - **任意項目の空文字列は未入力扱い**: 本文のレンダリングで行を出さない

use thiserror::Error;

/// 必須項目が欠けているときのメッセージ（API レスポンスにそのまま載る）
pub const MISSING_REQUIRED_FIELDS_MESSAGE: &str = "Name, email, and message are required";

/// バリデーションエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// 必須項目の欠落
    ///
    /// 欠けていた項目名を保持する（ログ用）。表示メッセージは固定。
    #[error("Name, email, and message are required")]
    MissingRequiredFields(Vec<&'static str>),
}

impl ValidationError {
    /// 欠けていた項目名を返す
    pub fn missing_fields(&self) -> &[&'static str] {
        match self {
            Self::MissingRequiredFields(fields) => fields,
        }
    }
}

/// 受信フォーム（未検証）
///
/// すべての項目が任意。`validate()` で [`ContactSubmission`] に変換する。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name:     Option<String>,
    pub email:    Option<String>,
    pub message:  Option<String>,
    pub phone:    Option<String>,
    pub address:  Option<String>,
    pub quantity: Option<String>,
}

impl ContactForm {
    /// 必須項目を検証し、送信内容に変換する
    ///
    /// `name`, `email`, `message` のいずれかが未指定または空文字列の場合は
    /// [`ValidationError::MissingRequiredFields`] を返す。
    pub fn validate(self) -> Result<ContactSubmission, ValidationError> {
        let missing: Vec<&'static str> = [
            ("name", &self.name),
            ("email", &self.email),
            ("message", &self.message),
        ]
        .into_iter()
        .filter(|(_, value)| value.as_deref().is_none_or(str::is_empty))
        .map(|(field, _)| field)
        .collect();

        let (Some(name), Some(email), Some(message)) = (self.name, self.email, self.message)
        else {
            return Err(ValidationError::MissingRequiredFields(missing));
        };
        if !missing.is_empty() {
            return Err(ValidationError::MissingRequiredFields(missing));
        }

        Ok(ContactSubmission {
            name,
            email,
            message,
            phone: non_empty(self.phone),
            address: non_empty(self.address),
            quantity: non_empty(self.quantity),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// 送信内容（検証済み）
///
/// 必須項目は空でないことが保証される。リクエストごとに生成され、
/// 送信試行の完了後に破棄される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    name:     String,
    email:    String,
    message:  String,
    phone:    Option<String>,
    address:  Option<String>,
    quantity: Option<String>,
}

impl ContactSubmission {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn quantity(&self) -> Option<&str> {
        self.quantity.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn valid_form() -> ContactForm {
        ContactForm {
            name: Some("Ann".to_string()),
            email: Some("ann@x.com".to_string()),
            message: Some("Hi".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_必須項目が揃っていれば通過する() {
        let submission = valid_form().validate().unwrap();

        assert_eq!(submission.name(), "Ann");
        assert_eq!(submission.email(), "ann@x.com");
        assert_eq!(submission.message(), "Hi");
        assert_eq!(submission.phone(), None);
        assert_eq!(submission.address(), None);
        assert_eq!(submission.quantity(), None);
    }

    #[rstest]
    #[case::name_未指定(ContactForm { name: None, ..valid_form() }, vec!["name"])]
    #[case::name_空文字列(ContactForm { name: Some(String::new()), ..valid_form() }, vec!["name"])]
    #[case::email_未指定(ContactForm { email: None, ..valid_form() }, vec!["email"])]
    #[case::message_空文字列(ContactForm { message: Some(String::new()), ..valid_form() }, vec!["message"])]
    #[case::全項目未指定(ContactForm::default(), vec!["name", "email", "message"])]
    fn test_必須項目の欠落を拒否する(
        #[case] form: ContactForm,
        #[case] expected_missing: Vec<&'static str>,
    ) {
        let err = form.validate().unwrap_err();

        assert_eq!(err.missing_fields(), expected_missing.as_slice());
        assert_eq!(err.to_string(), MISSING_REQUIRED_FIELDS_MESSAGE);
    }

    #[test]
    fn test_値はトリムせずそのまま通過する() {
        let form = ContactForm {
            name: Some("  Ann  ".to_string()),
            message: Some("line1\nline2\n".to_string()),
            ..valid_form()
        };

        let submission = form.validate().unwrap();

        assert_eq!(submission.name(), "  Ann  ");
        assert_eq!(submission.message(), "line1\nline2\n");
    }

    #[test]
    fn test_空白のみの必須項目は入力ありとみなす() {
        let form = ContactForm {
            name: Some(" ".to_string()),
            ..valid_form()
        };

        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_任意項目の空文字列は未入力として扱う() {
        let form = ContactForm {
            phone: Some(String::new()),
            address: Some(String::new()),
            quantity: Some("3".to_string()),
            ..valid_form()
        };

        let submission = form.validate().unwrap();

        assert_eq!(submission.phone(), None);
        assert_eq!(submission.address(), None);
        assert_eq!(submission.quantity(), Some("3"));
    }
}
