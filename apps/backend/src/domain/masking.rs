//! Phone masking for leaderboard rows.

/// Mask a phone number, keeping a short prefix and the last four characters.
/// Anything four characters or shorter is fully masked.
pub fn mask_phone(phone: &str) -> String {
    let chars: Vec<char> = phone.chars().collect();
    let len = chars.len();
    if len <= 4 {
        return "****".to_string();
    }
    let prefix_len = if chars[0] == '+' {
        3.min(len - 4)
    } else {
        2.min(len - 4)
    };
    let prefix: String = chars[..prefix_len].iter().collect();
    let suffix: String = chars[len - 4..].iter().collect();
    let stars = "*".repeat(len - prefix_len - 4);
    format!("{prefix}{stars}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_e164_numbers_keeping_country_code_and_last_four() {
        assert_eq!(mask_phone("+919876543210"), "+91******3210");
    }

    #[test]
    fn masks_bare_numbers_with_two_char_prefix() {
        assert_eq!(mask_phone("9876543210"), "98****3210");
    }

    #[test]
    fn short_values_are_fully_masked() {
        assert_eq!(mask_phone("1234"), "****");
        assert_eq!(mask_phone(""), "****");
    }

    #[test]
    fn prefix_shrinks_when_there_is_little_to_hide() {
        // 5 chars starting with '+': prefix is min(3, 1) = 1, nothing left to star out
        assert_eq!(mask_phone("+1234"), "+1234");
        assert_eq!(mask_phone("+1234567"), "+12*4567");
    }
}
