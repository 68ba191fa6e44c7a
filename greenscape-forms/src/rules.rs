use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

/// Why a field failed validation. Display output is the user-facing reason.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("This field is required.")]
    Required,

    #[error("Must be at least {min} characters long.")]
    TooShort { min: usize },

    #[error("Must be less than {max} characters.")]
    TooLong { max: usize },

    #[error("Name can only contain letters, spaces, hyphens, and apostrophes.")]
    InvalidCharacters,

    #[error("Please enter a valid email address.")]
    InvalidEmail,

    #[error("Please enter a valid phone number.")]
    InvalidPhone,

    #[error("Please choose a number of participants.")]
    InvalidCount,

    #[error("Please choose a date from tomorrow onwards.")]
    DateNotBookable,
}

// Same shape the site used: something@something.tld, no whitespace.
// A sanity check, not full RFC 5321 grammar.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));

// Optional leading +, 1-16 digits, first digit non-zero.
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[1-9]\d{0,15}$").expect("phone regex"));

/// Name: trimmed length >= 2; letters, spaces, hyphens, apostrophes.
pub fn check_name(value: &str) -> Result<(), ValidationError> {
    let name = value.trim();
    if name.chars().count() < 2 {
        return Err(ValidationError::TooShort { min: 2 });
    }
    let ok = name
        .chars()
        .all(|c| c.is_alphabetic() || c == ' ' || c == '-' || c == '\'');
    if !ok {
        return Err(ValidationError::InvalidCharacters);
    }
    Ok(())
}

pub fn check_email(value: &str) -> Result<(), ValidationError> {
    let email = value.trim();
    if email.is_empty() {
        return Err(ValidationError::Required);
    }
    if !EMAIL_RE.is_match(email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

/// Free-text message: 10..=1000 characters after trimming.
pub fn check_message(value: &str) -> Result<(), ValidationError> {
    let message = value.trim();
    if message.chars().count() < 10 {
        return Err(ValidationError::TooShort { min: 10 });
    }
    if message.chars().count() > 1000 {
        return Err(ValidationError::TooLong { max: 1000 });
    }
    Ok(())
}

/// Phone: spaces, hyphens and parentheses are formatting, not content.
pub fn check_phone(value: &str) -> Result<(), ValidationError> {
    let stripped: String = value
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect();
    if !PHONE_RE.is_match(&stripped) {
        return Err(ValidationError::InvalidPhone);
    }
    Ok(())
}

/// Participant count: a positive integer.
pub fn check_participants(value: &str) -> Result<(), ValidationError> {
    match value.trim().parse::<i32>() {
        Ok(n) if n > 0 => Ok(()),
        _ => Err(ValidationError::InvalidCount),
    }
}

/// Booking date: `YYYY-MM-DD`, strictly after `today`. The site sets the
/// date input's minimum to tomorrow; same rule here.
pub fn check_booking_date(value: &str, today: NaiveDate) -> Result<(), ValidationError> {
    let date = NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::DateNotBookable)?;
    if date <= today {
        return Err(ValidationError::DateNotBookable);
    }
    Ok(())
}

/// US-style display grouping for a 10-digit number: `(123) 456-7890`.
/// Shorter inputs are grouped as far as they go; non-digits are dropped.
pub fn format_phone_display(value: &str) -> String {
    let digits: String = value.chars().filter(|c| c.is_ascii_digit()).collect();
    match digits.len() {
        0 => String::new(),
        1..=2 => digits,
        3..=6 => format!("({}) {}", &digits[..3], &digits[3..]),
        _ => {
            let tail = digits.len().min(10);
            format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..tail])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_rejects_single_char() {
        assert_eq!(check_name("A"), Err(ValidationError::TooShort { min: 2 }));
    }

    #[test]
    fn name_length_counts_characters_not_bytes() {
        // "É" is two bytes but one character
        assert_eq!(check_name("É"), Err(ValidationError::TooShort { min: 2 }));
        assert!(check_name("Éa").is_ok());
    }

    #[test]
    fn name_accepts_spaces_hyphens_apostrophes() {
        assert!(check_name("Jo Ann-Lee").is_ok());
        assert!(check_name("O'Brien").is_ok());
    }

    #[test]
    fn name_rejects_digits_and_symbols() {
        assert_eq!(check_name("R2D2"), Err(ValidationError::InvalidCharacters));
        assert_eq!(
            check_name("jo@example"),
            Err(ValidationError::InvalidCharacters)
        );
    }

    #[test]
    fn email_requires_tld() {
        assert_eq!(check_email("foo@bar"), Err(ValidationError::InvalidEmail));
        assert!(check_email("a@b.co").is_ok());
    }

    #[test]
    fn email_rejects_whitespace_and_empty() {
        assert_eq!(check_email(""), Err(ValidationError::Required));
        assert_eq!(
            check_email("a b@c.co"),
            Err(ValidationError::InvalidEmail)
        );
    }

    #[test]
    fn message_bounds_are_inclusive() {
        assert!(check_message(&"x".repeat(10)).is_ok());
        assert!(check_message(&"x".repeat(1000)).is_ok());
        assert_eq!(
            check_message("short"),
            Err(ValidationError::TooShort { min: 10 })
        );
        assert_eq!(
            check_message(&"x".repeat(1001)),
            Err(ValidationError::TooLong { max: 1000 })
        );
    }

    #[test]
    fn phone_strips_formatting() {
        assert!(check_phone("(254) 712-345678").is_ok());
        assert!(check_phone("+254 712 345 678").is_ok());
    }

    #[test]
    fn phone_rejects_leading_zero_and_letters() {
        assert_eq!(check_phone("0712345678"), Err(ValidationError::InvalidPhone));
        assert_eq!(check_phone("12ab34"), Err(ValidationError::InvalidPhone));
        // 17 digits is one too many
        assert_eq!(
            check_phone("12345678901234567"),
            Err(ValidationError::InvalidPhone)
        );
    }

    #[test]
    fn booking_date_must_be_after_today() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();
        assert!(check_booking_date("2026-08-31", today).is_ok());
        assert_eq!(
            check_booking_date("2026-08-30", today),
            Err(ValidationError::DateNotBookable)
        );
        assert_eq!(
            check_booking_date("2026-01-01", today),
            Err(ValidationError::DateNotBookable)
        );
        assert_eq!(
            check_booking_date("next tuesday", today),
            Err(ValidationError::DateNotBookable)
        );
    }

    #[test]
    fn phone_display_grouping() {
        assert_eq!(format_phone_display("1234567890"), "(123) 456-7890");
        assert_eq!(format_phone_display("1234"), "(123) 4");
        assert_eq!(format_phone_display("12"), "12");
        assert_eq!(format_phone_display(""), "");
    }
}
