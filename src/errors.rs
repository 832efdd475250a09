//! Unified error types for `AttendanceBuddy`.
//!
//! Repository and bot code return [`Result`]. The frequency engine in
//! [`crate::core::frequency`] never produces errors: malformed records are
//! skipped per counter and zero denominators become `None`.

use thiserror::Error;

/// Application-wide error type
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Any `SeaORM` failure
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// No member with this ID exists
    #[error("Member not found: {id}")]
    MemberNotFound {
        /// The requested member ID
        id: i64,
    },

    /// No meeting with this ID exists
    #[error("Meeting not found: {id}")]
    MeetingNotFound {
        /// The requested meeting ID
        id: i64,
    },

    /// A domain label (kind, weekday, rule, status) outside its closed set
    #[error("Invalid {field}: '{value}'")]
    InvalidLabel {
        /// Which label was being parsed
        field: &'static str,
        /// The rejected input
        value: String,
    },

    /// Date string in neither `YYYY-MM-DD` nor `DD/MM/YYYY`
    #[error("Invalid date '{value}': use YYYY-MM-DD or DD/MM/YYYY")]
    InvalidDate {
        /// The rejected input
        value: String,
    },

    /// Time string not in `HH:MM`
    #[error("Invalid time '{value}': use HH:MM")]
    InvalidTime {
        /// The rejected input
        value: String,
    },

    /// Meetings only happen on Thursdays, Saturdays and Sundays
    #[error("No meeting weekday for {date}: only Thursday, Saturday and Sunday are supported")]
    UnsupportedWeekday {
        /// The date whose weekday could not be mapped
        date: chrono::NaiveDate,
    },

    /// Input rejected by a repository operation
    #[error("Validation error: {message}")]
    Validation {
        /// What was wrong with the input
        message: String,
    },

    /// I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or malformed environment variable
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Writing a response into a `String` failed
    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    /// Serenity/Poise framework error
    #[error("Serenity/Poise framework error: {0}")]
    #[allow(clippy::enum_variant_names)]
    FrameworkError(Box<poise::serenity_prelude::Error>),
}

impl Error {
    /// Whether the error was caused by operator input rather than a failure.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::MemberNotFound { .. }
                | Self::MeetingNotFound { .. }
                | Self::InvalidLabel { .. }
                | Self::InvalidDate { .. }
                | Self::InvalidTime { .. }
                | Self::UnsupportedWeekday { .. }
                | Self::Validation { .. }
        )
    }
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::FrameworkError(Box::new(value))
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
