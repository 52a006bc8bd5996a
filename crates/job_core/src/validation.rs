use std::sync::LazyLock;

use regex::Regex;

use crate::{error::ValidationError, model::ApplicationForm};

pub const NAME_MIN_CHARS: usize = 2;
pub const JUSTIFICATION_MIN_CHARS: usize = 20;
pub const JUSTIFICATION_MAX_CHARS: usize = 500;
pub const JUSTIFICATION_MIN_WORDS: usize = 5;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

// At least 10 of digit/space/hyphen/parenthesis after an optional leading '+'.
static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9\s()-]{10,}$").expect("phone pattern is valid"));

/// Checks the four application fields and stops at the first broken rule.
///
/// Lengths are counted in characters of the raw input; only the emptiness
/// checks trim surrounding whitespace.
pub fn validate(
    name: &str,
    email: &str,
    phone: &str,
    justification: &str,
) -> Result<(), ValidationError> {
    validate_name(name)?;
    validate_email(email)?;
    validate_phone(phone)?;
    validate_justification(justification)
}

pub fn validate_form(form: &ApplicationForm) -> Result<(), ValidationError> {
    validate(&form.name, &form.email, &form.phone, &form.justification)
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::NameEmpty);
    }
    if name.chars().count() < NAME_MIN_CHARS {
        return Err(ValidationError::NameTooShort);
    }
    if name.chars().any(|c| c.is_ascii_digit()) {
        return Err(ValidationError::NameContainsDigit);
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.trim().is_empty() {
        return Err(ValidationError::EmailEmpty);
    }
    if !EMAIL_PATTERN.is_match(email) {
        return Err(ValidationError::EmailInvalid);
    }
    Ok(())
}

fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if phone.trim().is_empty() {
        return Err(ValidationError::PhoneEmpty);
    }
    if !PHONE_PATTERN.is_match(phone) {
        return Err(ValidationError::PhoneInvalid);
    }
    Ok(())
}

fn validate_justification(text: &str) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        return Err(ValidationError::JustificationEmpty);
    }
    let chars = text.chars().count();
    if chars < JUSTIFICATION_MIN_CHARS {
        return Err(ValidationError::JustificationTooShort);
    }
    if chars > JUSTIFICATION_MAX_CHARS {
        return Err(ValidationError::JustificationTooLong);
    }
    if text.split_whitespace().count() < JUSTIFICATION_MIN_WORDS {
        return Err(ValidationError::JustificationTooFewWords);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMAIL: &str = "a@b.com";
    const PHONE: &str = "1234567890";
    const WHY: &str = "This is a fine justification text";

    fn check_name(name: &str) -> Result<(), ValidationError> {
        validate(name, EMAIL, PHONE, WHY)
    }

    fn check_why(text: &str) -> Result<(), ValidationError> {
        validate("Alice", EMAIL, PHONE, text)
    }

    /// Builds a text of exactly `len` characters made of `words` words.
    fn text_of(len: usize, words: usize) -> String {
        let mut parts: Vec<String> = (0..words).map(|_| "a".to_string()).collect();
        let used = words + words.saturating_sub(1);
        parts[0] = "a".repeat(len - used + 1);
        parts.join(" ")
    }

    #[test]
    fn accepts_two_character_name() {
        assert_eq!(validate("Al", EMAIL, PHONE, WHY), Ok(()));
        assert_eq!(check_name("Jo"), Ok(()));
    }

    #[test]
    fn rejects_blank_and_short_names() {
        assert_eq!(check_name(""), Err(ValidationError::NameEmpty));
        assert_eq!(check_name("   "), Err(ValidationError::NameEmpty));
        assert_eq!(check_name("J"), Err(ValidationError::NameTooShort));
    }

    #[test]
    fn rejects_names_with_digits() {
        assert_eq!(check_name("R2D2"), Err(ValidationError::NameContainsDigit));
    }

    #[test]
    fn email_rules() {
        let check = |email: &str| validate("Alice", email, PHONE, WHY);
        assert_eq!(check(" "), Err(ValidationError::EmailEmpty));
        assert_eq!(check("plainaddress"), Err(ValidationError::EmailInvalid));
        assert_eq!(check("a@b"), Err(ValidationError::EmailInvalid));
        assert_eq!(check("a b@c.com"), Err(ValidationError::EmailInvalid));
        assert_eq!(check("a@@b.com"), Err(ValidationError::EmailInvalid));
        assert_eq!(check("first.last@mail.example.org"), Ok(()));
    }

    #[test]
    fn phone_rules() {
        let check = |phone: &str| validate("Alice", EMAIL, phone, WHY);
        assert_eq!(check(""), Err(ValidationError::PhoneEmpty));
        assert_eq!(check("123456789"), Err(ValidationError::PhoneInvalid));
        assert_eq!(check("12345abcde"), Err(ValidationError::PhoneInvalid));
        assert_eq!(check("++1234567890"), Err(ValidationError::PhoneInvalid));
        assert_eq!(check("+1 (555) 123-4567"), Ok(()));
        assert_eq!(check("0123456789"), Ok(()));
    }

    #[test]
    fn justification_length_boundaries() {
        assert_eq!(check_why(&text_of(20, 5)), Ok(()));
        assert_eq!(
            check_why(&text_of(19, 5)),
            Err(ValidationError::JustificationTooShort)
        );
        assert_eq!(check_why(&text_of(500, 5)), Ok(()));
        assert_eq!(
            check_why(&text_of(501, 5)),
            Err(ValidationError::JustificationTooLong)
        );
    }

    #[test]
    fn justification_word_boundaries() {
        assert_eq!(check_why(&text_of(30, 5)), Ok(()));
        assert_eq!(
            check_why(&text_of(30, 4)),
            Err(ValidationError::JustificationTooFewWords)
        );
        assert_eq!(check_why("   "), Err(ValidationError::JustificationEmpty));
    }

    #[test]
    fn reports_first_failing_rule_only() {
        assert_eq!(
            validate("J", "", "", ""),
            Err(ValidationError::NameTooShort)
        );
        assert_eq!(
            validate("Alice", "bad", "", ""),
            Err(ValidationError::EmailInvalid)
        );
    }

    #[test]
    fn messages_are_human_readable() {
        let err = check_why(&text_of(30, 4)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Please provide a more detailed answer (at least 5 words)."
        );
        assert_eq!(err.field(), "justification");
    }
}
