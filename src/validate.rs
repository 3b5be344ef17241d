use std::sync::LazyLock;

use regex::Regex;

use crate::config::Messages;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

pub const MIN_NAME_CHARS: usize = 3;
pub const MIN_TITLE_CHARS: usize = 3;
pub const MIN_MESSAGE_CHARS: usize = 10;
pub const MIN_DESCRIPTION_CHARS: usize = 20;

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// First failing rule of a form, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    Missing,
    NameTooShort,
    TitleTooShort,
    MessageTooShort,
    InvalidEmail,
    TermsNotAccepted,
    NoPackage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Contact,
    Order,
}

impl FormKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormKind::Contact => "contact",
            FormKind::Order => "order",
        }
    }
}

impl ValidationError {
    /// Status text shown for this failure on `form`.
    pub fn message<'a>(&self, form: FormKind, m: &'a Messages) -> &'a str {
        match (form, self) {
            (FormKind::Contact, ValidationError::Missing) => &m.contact_required,
            (FormKind::Contact, ValidationError::NameTooShort) => &m.contact_name_short,
            (FormKind::Contact, ValidationError::InvalidEmail) => &m.contact_email,
            (FormKind::Contact, _) => &m.contact_message_short,
            (FormKind::Order, ValidationError::Missing) => &m.order_required,
            (FormKind::Order, ValidationError::NameTooShort) => &m.order_name_short,
            (FormKind::Order, ValidationError::TitleTooShort) => &m.order_title_short,
            (FormKind::Order, ValidationError::MessageTooShort) => &m.order_description_short,
            (FormKind::Order, ValidationError::InvalidEmail) => &m.order_email,
            (FormKind::Order, ValidationError::TermsNotAccepted) => &m.order_terms,
            (FormKind::Order, ValidationError::NoPackage) => &m.order_no_package,
        }
    }
}

/// Trimmed contact form fields.
#[derive(Debug, Clone, Default)]
pub struct ContactInput {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Trimmed order form fields.
#[derive(Debug, Clone, Default)]
pub struct OrderInput {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub title: String,
    pub description: String,
    pub agreed: bool,
    pub package_selected: bool,
}

fn chars(s: &str) -> usize {
    s.chars().count()
}

pub fn validate_contact(input: &ContactInput) -> Result<(), ValidationError> {
    if [&input.name, &input.email, &input.subject, &input.message]
        .iter()
        .any(|f| f.is_empty())
    {
        return Err(ValidationError::Missing);
    }
    if chars(&input.name) < MIN_NAME_CHARS {
        return Err(ValidationError::NameTooShort);
    }
    if chars(&input.message) < MIN_MESSAGE_CHARS {
        return Err(ValidationError::MessageTooShort);
    }
    if !is_valid_email(&input.email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

pub fn validate_order(input: &OrderInput) -> Result<(), ValidationError> {
    if [&input.name, &input.email, &input.title, &input.description]
        .iter()
        .any(|f| f.is_empty())
    {
        return Err(ValidationError::Missing);
    }
    if chars(&input.name) < MIN_NAME_CHARS {
        return Err(ValidationError::NameTooShort);
    }
    if chars(&input.title) < MIN_TITLE_CHARS {
        return Err(ValidationError::TitleTooShort);
    }
    if chars(&input.description) < MIN_DESCRIPTION_CHARS {
        return Err(ValidationError::MessageTooShort);
    }
    if !is_valid_email(&input.email) {
        return Err(ValidationError::InvalidEmail);
    }
    if !input.agreed {
        return Err(ValidationError::TermsNotAccepted);
    }
    if !input.package_selected {
        return Err(ValidationError::NoPackage);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact() -> ContactInput {
        ContactInput {
            name: "Ece".into(),
            email: "ece@example.com".into(),
            subject: "Merhaba".into(),
            message: "x".repeat(10),
        }
    }

    fn order() -> OrderInput {
        OrderInput {
            name: "Ece".into(),
            email: "ece@example.com".into(),
            phone: String::new(),
            title: "Web".into(),
            description: "d".repeat(20),
            agreed: true,
            package_selected: true,
        }
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last@sub.domain.org"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.d"));
        assert!(!is_valid_email("@c.d"));
        assert!(!is_valid_email("a@@c.d"));
    }

    #[test]
    fn contact_boundaries() {
        assert_eq!(validate_contact(&contact()), Ok(()));

        let mut c = contact();
        c.name = "Ec".into();
        assert_eq!(validate_contact(&c), Err(ValidationError::NameTooShort));

        let mut c = contact();
        c.message = "x".repeat(9);
        assert_eq!(validate_contact(&c), Err(ValidationError::MessageTooShort));

        let mut c = contact();
        c.subject.clear();
        assert_eq!(validate_contact(&c), Err(ValidationError::Missing));
    }

    #[test]
    fn order_boundaries_and_rule_order() {
        assert_eq!(validate_order(&order()), Ok(()));

        let mut o = order();
        o.name = "Al".into();
        o.email = "broken".into();
        // Length rules run before the email rule.
        assert_eq!(validate_order(&o), Err(ValidationError::NameTooShort));

        let mut o = order();
        o.description = "d".repeat(19);
        assert_eq!(validate_order(&o), Err(ValidationError::MessageTooShort));

        let mut o = order();
        o.agreed = false;
        o.package_selected = false;
        assert_eq!(validate_order(&o), Err(ValidationError::TermsNotAccepted));

        let mut o = order();
        o.package_selected = false;
        assert_eq!(validate_order(&o), Err(ValidationError::NoPackage));
    }

    #[test]
    fn lengths_count_characters_not_bytes() {
        let mut o = order();
        o.name = "Çağ".into();
        assert_eq!(validate_order(&o), Ok(()));
    }

    #[test]
    fn messages_follow_the_form() {
        let m = Messages::default();
        assert_eq!(
            ValidationError::InvalidEmail.message(FormKind::Contact, &m),
            m.contact_email
        );
        assert_eq!(
            ValidationError::InvalidEmail.message(FormKind::Order, &m),
            m.order_email
        );
    }
}
