//! Persistence layer: free functions generic over `ConnectionTrait`,
//! returning `DomainError` via the central `DbErr` translation.

pub mod game_results;
pub mod game_sessions;
pub mod lobby_sessions;
pub mod personalities;
pub mod personality_attributes;
pub mod question_texts;
pub mod theme_attribute_configs;
pub mod themes;
pub mod users;

/// New row identifier: a lowercased ULID, 26 chars of `[a-z0-9]`.
pub fn new_id() -> String {
    ulid::Ulid::new().to_string().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_id_matches_id_shape() {
        let id = new_id();
        assert_eq!(id.len(), 26);
        assert!(id.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }
}
