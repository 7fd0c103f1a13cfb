//! Error codes for the Genie backend API.
//!
//! This module defines all error codes used throughout the application.
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the Genie backend API.
///
/// This enum ensures type safety and prevents the use of ad-hoc error codes.
/// Each variant maps to a canonical SCREAMING_SNAKE_CASE string that appears
/// in HTTP responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request Validation
    /// Invalid phone number
    InvalidPhone,
    /// Invalid user ID provided
    InvalidUserId,
    /// Invalid session ID provided
    InvalidSessionId,
    /// Invalid theme ID provided
    InvalidThemeId,
    /// DTMF digit out of range or malformed
    InvalidDigit,
    /// Guess text malformed or too long
    InvalidGuess,
    /// Digit not legal in the session's current mode
    DigitNotAllowed,
    /// Action not legal in the session's current mode
    ModeViolation,
    /// Theme does not have enough personalities to be playable
    ThemeNotPlayable,
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,

    // Resource Not Found
    /// User not found
    UserNotFound,
    /// Session not found
    SessionNotFound,
    /// Theme not found
    ThemeNotFound,
    /// Personality not found
    PersonalityNotFound,
    /// General not found error
    NotFound,

    // Business Logic Conflicts
    /// Phone already registered to another user
    UniquePhone,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // System Errors
    /// Database error
    DbError,
    /// Database unavailable
    DbUnavailable,
    /// Database timeout
    DbTimeout,

    // Database Constraint Violations
    /// Unique constraint violation (SQLSTATE 23505; generic 409)
    UniqueViolation,
    /// Foreign key constraint violation (SQLSTATE 23503; generic 409)
    FkViolation,
    /// Check constraint violation (SQLSTATE 23514; generic 400)
    CheckViolation,
    /// Record not found (generic 404 for DB-driven not-found)
    RecordNotFound,

    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
    /// Data corruption detected
    DataCorruption,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    ///
    /// This is the exact string that appears in HTTP responses.
    pub const fn as_str(&self) -> &'static str {
        match self {
            // Request Validation
            Self::InvalidPhone => "INVALID_PHONE",
            Self::InvalidUserId => "INVALID_USER_ID",
            Self::InvalidSessionId => "INVALID_SESSION_ID",
            Self::InvalidThemeId => "INVALID_THEME_ID",
            Self::InvalidDigit => "INVALID_DIGIT",
            Self::InvalidGuess => "INVALID_GUESS",
            Self::DigitNotAllowed => "DIGIT_NOT_ALLOWED",
            Self::ModeViolation => "MODE_VIOLATION",
            Self::ThemeNotPlayable => "THEME_NOT_PLAYABLE",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            // Resource Not Found
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::SessionNotFound => "SESSION_NOT_FOUND",
            Self::ThemeNotFound => "THEME_NOT_FOUND",
            Self::PersonalityNotFound => "PERSONALITY_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            // Business Logic Conflicts
            Self::UniquePhone => "UNIQUE_PHONE",
            Self::Conflict => "CONFLICT",

            // System Errors
            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",

            // Database Constraint Violations
            Self::UniqueViolation => "UNIQUE_VIOLATION",
            Self::FkViolation => "FK_VIOLATION",
            Self::CheckViolation => "CHECK_VIOLATION",
            Self::RecordNotFound => "RECORD_NOT_FOUND",

            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
            Self::DataCorruption => "DATA_CORRUPTION",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
