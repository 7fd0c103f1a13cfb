pub mod ai_question_texts;
pub mod game_results;
pub mod game_sessions;
pub mod lobby_sessions;
pub mod personalities;
pub mod personality_aliases;
pub mod personality_attributes;
pub mod theme_attribute_configs;
pub mod themes;
pub mod users;

pub use theme_attribute_configs::AnswerType;
