//! Shared test utilities for `AttendanceBuddy`.
//!
//! This module provides helpers for setting up test databases, inserting
//! entities with sensible defaults, and building plain models for the pure
//! aggregation code that never touches a database.
#![allow(clippy::unwrap_used)]

use crate::{
    core::{
        meeting::{create_meeting, parse_meeting_date},
        member::create_member,
        types::{EvaluationRule, MeetingKind},
    },
    entities,
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Parses a `YYYY-MM-DD` literal. Panics on malformed input.
#[must_use]
pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Builds a meeting model without a database.
///
/// `weekday` and `kind` are stored as given, so tests can use labels that the
/// typed enums would reject.
#[must_use]
pub fn meeting(id: i64, day: &str, weekday: &str, kind: &str) -> entities::MeetingModel {
    entities::MeetingModel {
        id,
        date: date(day),
        time: None,
        weekday: weekday.to_string(),
        kind: kind.to_string(),
    }
}

/// Builds a member model without a database.
#[must_use]
pub fn member(id: i64, name: &str, rule: &str) -> entities::MemberModel {
    entities::MemberModel {
        id,
        name: name.to_string(),
        evaluation_rule: rule.to_string(),
    }
}

/// Builds an attendance record without a database or justification.
#[must_use]
pub fn record(
    id: i64,
    member_id: i64,
    meeting_id: i64,
    status: &str,
) -> entities::AttendanceRecordModel {
    entities::AttendanceRecordModel {
        id,
        member_id,
        meeting_id,
        status: status.to_string(),
        justification_text: None,
    }
}

/// Creates a test member with sensible defaults.
///
/// # Defaults
/// * `evaluation_rule`: `AMBAS`
pub async fn create_test_member(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::MemberModel> {
    create_member(db, name.to_string(), EvaluationRule::Ambas).await
}

/// Creates a test member with the given rule label (`AMBAS`, `5A`, `SAB`).
pub async fn create_custom_member(
    db: &DatabaseConnection,
    name: &str,
    rule: &str,
) -> Result<entities::MemberModel> {
    create_member(db, name.to_string(), rule.parse()?).await
}

/// Creates a test meeting on `day` with sensible defaults.
///
/// # Defaults
/// * `time`: None
/// * `weekday`: derived from the date
/// * `kind`: `NORMAL`
pub async fn create_test_meeting(
    db: &DatabaseConnection,
    day: &str,
) -> Result<entities::MeetingModel> {
    create_meeting(db, parse_meeting_date(day)?, None, None, MeetingKind::Normal).await
}
