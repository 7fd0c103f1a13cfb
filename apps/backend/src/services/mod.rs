pub mod game;
pub mod leaderboard;
pub mod lobby;
pub mod users;
