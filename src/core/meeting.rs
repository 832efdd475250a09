//! Meeting business logic - Handles the meeting calendar.
//!
//! Provides functions for creating, retrieving, updating, and deleting meetings,
//! plus the date/time parsing used by the bot. A meeting's weekday slot is
//! derived from its date when the operator does not pick one explicitly.

use crate::{
    core::types::{MeetingKind, Weekday},
    entities::{AttendanceRecord, Meeting, attendance_record, meeting},
    errors::{Error, Result},
};
use chrono::{Datelike, NaiveDate, NaiveTime};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};

/// Changes to apply to an existing meeting. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct MeetingChanges {
    /// New date
    pub date: Option<NaiveDate>,
    /// New time; `Some(None)` clears it
    pub time: Option<Option<String>>,
    /// New weekday slot
    pub weekday: Option<Weekday>,
    /// New kind
    pub kind: Option<MeetingKind>,
}

impl MeetingChanges {
    /// Whether no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.date.is_none() && self.time.is_none() && self.weekday.is_none() && self.kind.is_none()
    }
}

/// Retrieves every meeting, ordered by date and then time.
pub async fn get_all_meetings(db: &DatabaseConnection) -> Result<Vec<meeting::Model>> {
    Meeting::find()
        .order_by_asc(meeting::Column::Date)
        .order_by_asc(meeting::Column::Time)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a meeting by its unique ID.
pub async fn get_meeting_by_id(
    db: &DatabaseConnection,
    meeting_id: i64,
) -> Result<Option<meeting::Model>> {
    Meeting::find_by_id(meeting_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// The weekday slot for a calendar date: Thursday, Saturday or Sunday.
#[must_use]
pub fn weekday_from_date(date: NaiveDate) -> Option<Weekday> {
    Weekday::from_chrono(date.weekday())
}

/// Parses a meeting date written as `YYYY-MM-DD` or `DD/MM/YYYY`.
pub fn parse_meeting_date(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%d/%m/%Y"))
        .map_err(|_| Error::InvalidDate {
            value: input.to_string(),
        })
}

/// Normalizes an optional `HH:MM` time. Blank input means no time.
pub fn parse_meeting_time(input: Option<&str>) -> Result<Option<String>> {
    let Some(raw) = input.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    NaiveTime::parse_from_str(raw, "%H:%M")
        .map(|t| Some(t.format("%H:%M").to_string()))
        .map_err(|_| Error::InvalidTime {
            value: raw.to_string(),
        })
}

/// Creates a meeting.
///
/// When `weekday` is `None` it is derived from `date`; dates that fall on a day
/// without meetings are rejected with [`Error::UnsupportedWeekday`].
pub async fn create_meeting(
    db: &DatabaseConnection,
    date: NaiveDate,
    time: Option<String>,
    weekday: Option<Weekday>,
    kind: MeetingKind,
) -> Result<meeting::Model> {
    let weekday = match weekday {
        Some(w) => w,
        None => weekday_from_date(date).ok_or(Error::UnsupportedWeekday { date })?,
    };
    let time = parse_meeting_time(time.as_deref())?;

    let meeting = meeting::ActiveModel {
        date: Set(date),
        time: Set(time),
        weekday: Set(weekday.as_str().to_string()),
        kind: Set(kind.as_str().to_string()),
        ..Default::default()
    };

    let result = meeting.insert(db).await?;
    tracing::info!(
        meeting_id = result.id,
        date = %result.date,
        weekday = %result.weekday,
        kind = %result.kind,
        "Created meeting"
    );
    Ok(result)
}

/// Applies `changes` to an existing meeting.
///
/// Changing only the date does not re-derive the weekday: the stored weekday is
/// authoritative and operators change it explicitly.
pub async fn update_meeting(
    db: &DatabaseConnection,
    meeting_id: i64,
    changes: MeetingChanges,
) -> Result<meeting::Model> {
    let existing = get_meeting_by_id(db, meeting_id)
        .await?
        .ok_or(Error::MeetingNotFound { id: meeting_id })?;

    let mut active_model: meeting::ActiveModel = existing.into();
    if let Some(date) = changes.date {
        active_model.date = Set(date);
    }
    if let Some(time) = changes.time {
        active_model.time = Set(parse_meeting_time(time.as_deref())?);
    }
    if let Some(weekday) = changes.weekday {
        active_model.weekday = Set(weekday.as_str().to_string());
    }
    if let Some(kind) = changes.kind {
        active_model.kind = Set(kind.as_str().to_string());
    }

    active_model.update(db).await.map_err(Into::into)
}

/// Deletes a meeting together with its attendance records.
///
/// Returns the number of attendance records removed.
pub async fn delete_meeting(db: &DatabaseConnection, meeting_id: i64) -> Result<u64> {
    let txn = db.begin().await?;

    let meeting = Meeting::find_by_id(meeting_id)
        .one(&txn)
        .await?
        .ok_or(Error::MeetingNotFound { id: meeting_id })?;

    let removed = AttendanceRecord::delete_many()
        .filter(attendance_record::Column::MeetingId.eq(meeting_id))
        .exec(&txn)
        .await?
        .rows_affected;

    meeting.delete(&txn).await?;
    txn.commit().await?;

    tracing::info!(meeting_id, removed_records = removed, "Deleted meeting");
    Ok(removed)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{core::types::AttendanceStatus, test_utils::*};

    #[test]
    fn test_weekday_from_date() {
        assert_eq!(weekday_from_date(date("2024-01-04")), Some(Weekday::Quinta));
        assert_eq!(weekday_from_date(date("2024-01-06")), Some(Weekday::Sabado));
        assert_eq!(weekday_from_date(date("2024-01-07")), Some(Weekday::Domingo));
        assert_eq!(weekday_from_date(date("2024-01-08")), None);
    }

    #[test]
    fn test_parse_meeting_date_formats() {
        assert_eq!(parse_meeting_date("2024-01-04").unwrap(), date("2024-01-04"));
        assert_eq!(parse_meeting_date(" 04/01/2024 ").unwrap(), date("2024-01-04"));
        assert!(matches!(
            parse_meeting_date("2024-13-01").unwrap_err(),
            Error::InvalidDate { value: _ }
        ));
        assert!(parse_meeting_date("31/02/2024").is_err());
    }

    #[test]
    fn test_parse_meeting_time() {
        assert_eq!(parse_meeting_time(None).unwrap(), None);
        assert_eq!(parse_meeting_time(Some("  ")).unwrap(), None);
        assert_eq!(parse_meeting_time(Some("19:30")).unwrap(), Some("19:30".to_string()));
        assert_eq!(parse_meeting_time(Some("9:05")).unwrap(), Some("09:05".to_string()));
        assert!(matches!(
            parse_meeting_time(Some("25:00")).unwrap_err(),
            Error::InvalidTime { value: _ }
        ));
    }

    #[test]
    fn test_meeting_changes_is_empty() {
        assert!(MeetingChanges::default().is_empty());
        let changes = MeetingChanges {
            time: Some(None),
            ..Default::default()
        };
        assert!(!changes.is_empty());
    }

    #[tokio::test]
    async fn test_create_meeting_derives_weekday() -> Result<()> {
        let db = setup_test_db().await?;

        let meeting =
            create_meeting(&db, date("2024-01-06"), Some("10:00".to_string()), None, MeetingKind::Obrigacao)
                .await?;

        assert_eq!(meeting.weekday, "SAB");
        assert_eq!(meeting.kind, "OBRIGACAO");
        assert_eq!(meeting.time.as_deref(), Some("10:00"));
        Ok(())
    }

    #[tokio::test]
    async fn test_create_meeting_explicit_weekday_wins() -> Result<()> {
        let db = setup_test_db().await?;

        // A Monday filed under the Thursday slot
        let meeting = create_meeting(
            &db,
            date("2024-01-08"),
            None,
            Some(Weekday::Quinta),
            MeetingKind::Normal,
        )
        .await?;

        assert_eq!(meeting.weekday_kind(), Some(Weekday::Quinta));
        Ok(())
    }

    #[tokio::test]
    async fn test_create_meeting_unsupported_weekday() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_meeting(&db, date("2024-01-08"), None, None, MeetingKind::Normal).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::UnsupportedWeekday { date: _ }
        ));
        assert!(get_all_meetings(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_get_all_meetings_ordered_by_date() -> Result<()> {
        let db = setup_test_db().await?;

        create_test_meeting(&db, "2024-01-13").await?;
        create_test_meeting(&db, "2024-01-04").await?;
        create_test_meeting(&db, "2024-01-07").await?;

        let dates: Vec<NaiveDate> = get_all_meetings(&db)
            .await?
            .into_iter()
            .map(|m| m.date)
            .collect();
        assert_eq!(
            dates,
            vec![date("2024-01-04"), date("2024-01-07"), date("2024-01-13")]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_update_meeting() -> Result<()> {
        let db = setup_test_db().await?;
        let meeting =
            create_meeting(&db, date("2024-01-04"), Some("19:30".to_string()), None, MeetingKind::Normal)
                .await?;

        let updated = update_meeting(
            &db,
            meeting.id,
            MeetingChanges {
                date: Some(date("2024-01-11")),
                time: Some(None),
                kind: Some(MeetingKind::Desenvolvimento),
                ..Default::default()
            },
        )
        .await?;

        assert_eq!(updated.date, date("2024-01-11"));
        assert_eq!(updated.time, None);
        assert_eq!(updated.kind, "DESENVOLVIMENTO");
        assert_eq!(updated.weekday, "5A");
        Ok(())
    }

    #[tokio::test]
    async fn test_update_meeting_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let result = update_meeting(&db, 7, MeetingChanges::default()).await;
        assert!(matches!(result.unwrap_err(), Error::MeetingNotFound { id: 7 }));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_meeting_cascades_attendance() -> Result<()> {
        let db = setup_test_db().await?;
        let ana = create_test_member(&db, "Ana").await?;
        let first = create_test_meeting(&db, "2024-01-04").await?;
        let second = create_test_meeting(&db, "2024-01-06").await?;

        crate::core::attendance::upsert_attendance(&db, ana.id, first.id, AttendanceStatus::Ok, None)
            .await?;
        crate::core::attendance::upsert_attendance(
            &db,
            ana.id,
            second.id,
            AttendanceStatus::FaltaSem,
            None,
        )
        .await?;

        let removed = delete_meeting(&db, first.id).await?;
        assert_eq!(removed, 1);

        assert!(get_meeting_by_id(&db, first.id).await?.is_none());
        let remaining = crate::core::attendance::get_all_attendance(&db).await?;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].meeting_id, second.id);
        Ok(())
    }
}
