//! Input validation for the HTTP surface. Formats are strict: requests are
//! rejected before any state is touched.

use lazy_regex::{lazy_regex, Lazy, Regex};

use crate::error::AppError;
use crate::errors::ErrorCode;

pub const MAX_GUESS_LEN: usize = 80;

static ID_RE: Lazy<Regex> = lazy_regex!(r"^[a-z0-9]{8,64}$");
static THEME_RE: Lazy<Regex> = lazy_regex!(r"^[A-Za-z0-9_-]{2,64}$");
static PHONE_RE: Lazy<Regex> = lazy_regex!(r"^\+[1-9]\d{4,14}$");

pub fn validate_phone(phone: &str) -> Result<(), AppError> {
    if PHONE_RE.is_match(phone) {
        Ok(())
    } else {
        Err(AppError::invalid(
            ErrorCode::InvalidPhone,
            "Invalid phone format. Use + followed by 5 to 15 digits.",
        ))
    }
}

pub fn validate_user_id(id: &str) -> Result<(), AppError> {
    if ID_RE.is_match(id) {
        Ok(())
    } else {
        Err(AppError::invalid(ErrorCode::InvalidUserId, "Invalid user_id"))
    }
}

pub fn validate_session_id(id: &str) -> Result<(), AppError> {
    if ID_RE.is_match(id) {
        Ok(())
    } else {
        Err(AppError::invalid(
            ErrorCode::InvalidSessionId,
            "Invalid session_id",
        ))
    }
}

pub fn validate_theme_id(id: &str) -> Result<(), AppError> {
    if THEME_RE.is_match(id) {
        Ok(())
    } else {
        Err(AppError::invalid(ErrorCode::InvalidThemeId, "Invalid theme_id"))
    }
}

pub fn validate_digit(digit: u8) -> Result<(), AppError> {
    if digit <= 9 {
        Ok(())
    } else {
        Err(AppError::invalid(
            ErrorCode::InvalidDigit,
            "digit must be between 0 and 9",
        ))
    }
}

/// Trim and collapse whitespace, then enforce the length cap. Returns the
/// cleaned text the matcher will see.
pub fn clean_guess(text: &str) -> Result<String, AppError> {
    let cleaned = text.split_whitespace().collect::<Vec<_>>().join(" ");
    // The cap is in characters, not bytes
    if cleaned.chars().count() > MAX_GUESS_LEN {
        return Err(AppError::invalid(
            ErrorCode::InvalidGuess,
            "Guess must be 80 characters or less",
        ));
    }
    Ok(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_must_be_e164() {
        assert!(validate_phone("+14155552671").is_ok());
        assert!(validate_phone("+919876543210").is_ok());
        assert!(validate_phone("14155552671").is_err());
        assert!(validate_phone("+0123456").is_err());
        assert!(validate_phone("+1234").is_err());
    }

    #[test]
    fn ids_are_lowercase_alphanumeric() {
        assert!(validate_user_id("01arz3ndektsv4rrffq69g5fav").is_ok());
        assert!(validate_user_id("UPPER000").is_err());
        assert!(validate_user_id("short").is_err());
        assert!(validate_session_id("abcdefgh").is_ok());
    }

    #[test]
    fn theme_ids_allow_mixed_case_and_dashes() {
        assert!(validate_theme_id("sports").is_ok());
        assert!(validate_theme_id("World-History_2").is_ok());
        assert!(validate_theme_id("a").is_err());
        assert!(validate_theme_id("bad theme").is_err());
    }

    #[test]
    fn digits_are_0_to_9() {
        assert!(validate_digit(0).is_ok());
        assert!(validate_digit(9).is_ok());
        assert!(validate_digit(10).is_err());
    }

    #[test]
    fn guesses_are_cleaned_and_capped() {
        assert_eq!(clean_guess("  virat   kohli ").unwrap(), "virat kohli");
        assert!(clean_guess(&"x".repeat(81)).is_err());
        assert!(clean_guess(&format!(" {} ", "x".repeat(80))).is_ok());
    }

    #[test]
    fn guess_cap_counts_characters_not_bytes() {
        assert_eq!(clean_guess("  José   Mourinho ").unwrap(), "José Mourinho");
        // 80 two-byte characters fit even though they exceed 80 bytes
        assert!(clean_guess(&"é".repeat(80)).is_ok());
        assert!(clean_guess(&"é".repeat(81)).is_err());
    }
}
