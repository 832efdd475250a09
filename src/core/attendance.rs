//! Attendance business logic - Records who was present at each meeting.
//!
//! Marking attendance is an upsert on the (member, meeting) pair, so the store
//! keeps at most one record per pair. A member without a record for a realized
//! meeting is treated as an unexcused absence by the frequency engine.

use crate::{
    core::types::AttendanceStatus,
    entities::{AttendanceRecord, Meeting, Member, attendance_record},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};

/// Retrieves every attendance record, in insertion order.
pub async fn get_all_attendance(db: &DatabaseConnection) -> Result<Vec<attendance_record::Model>> {
    AttendanceRecord::find()
        .order_by_asc(attendance_record::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the attendance records of a single meeting.
pub async fn get_attendance_for_meeting(
    db: &DatabaseConnection,
    meeting_id: i64,
) -> Result<Vec<attendance_record::Model>> {
    AttendanceRecord::find()
        .filter(attendance_record::Column::MeetingId.eq(meeting_id))
        .order_by_asc(attendance_record::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Records a member's status at a meeting, replacing any previous record.
///
/// The justification is only kept for [`AttendanceStatus::FaltaJust`]; blank
/// text is stored as `None`.
pub async fn upsert_attendance(
    db: &DatabaseConnection,
    member_id: i64,
    meeting_id: i64,
    status: AttendanceStatus,
    justification: Option<String>,
) -> Result<attendance_record::Model> {
    let justification = match status {
        AttendanceStatus::FaltaJust => justification
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty()),
        AttendanceStatus::Ok | AttendanceStatus::FaltaSem => None,
    };

    let txn = db.begin().await?;

    Member::find_by_id(member_id)
        .one(&txn)
        .await?
        .ok_or(Error::MemberNotFound { id: member_id })?;
    Meeting::find_by_id(meeting_id)
        .one(&txn)
        .await?
        .ok_or(Error::MeetingNotFound { id: meeting_id })?;

    let existing = AttendanceRecord::find()
        .filter(attendance_record::Column::MemberId.eq(member_id))
        .filter(attendance_record::Column::MeetingId.eq(meeting_id))
        .order_by_asc(attendance_record::Column::Id)
        .one(&txn)
        .await?;

    let record = if let Some(record) = existing {
        // Update existing record
        let mut active_model: attendance_record::ActiveModel = record.into();
        active_model.status = Set(status.as_str().to_string());
        active_model.justification_text = Set(justification);
        active_model.update(&txn).await?
    } else {
        // Insert new record
        let new_record = attendance_record::ActiveModel {
            member_id: Set(member_id),
            meeting_id: Set(meeting_id),
            status: Set(status.as_str().to_string()),
            justification_text: Set(justification),
            ..Default::default()
        };
        new_record.insert(&txn).await?
    };

    txn.commit().await?;

    tracing::debug!(
        member_id,
        meeting_id,
        status = %record.status,
        "Recorded attendance"
    );
    Ok(record)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_upsert_attendance_inserts_then_updates() -> Result<()> {
        let db = setup_test_db().await?;
        let member = create_test_member(&db, "Ana").await?;
        let meeting = create_test_meeting(&db, "2024-01-04").await?;

        let first =
            upsert_attendance(&db, member.id, meeting.id, AttendanceStatus::FaltaSem, None).await?;
        assert_eq!(first.status, "FALTA_SEM");

        let second = upsert_attendance(
            &db,
            member.id,
            meeting.id,
            AttendanceStatus::FaltaJust,
            Some("  Viagem a trabalho ".to_string()),
        )
        .await?;

        // Same row, new status
        assert_eq!(second.id, first.id);
        assert_eq!(second.attendance_status(), Some(AttendanceStatus::FaltaJust));
        assert_eq!(second.justification_text.as_deref(), Some("Viagem a trabalho"));

        let all = get_all_attendance(&db).await?;
        assert_eq!(all.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_upsert_attendance_drops_justification_unless_excused() -> Result<()> {
        let db = setup_test_db().await?;
        let member = create_test_member(&db, "Ana").await?;
        let meeting = create_test_meeting(&db, "2024-01-04").await?;

        let present = upsert_attendance(
            &db,
            member.id,
            meeting.id,
            AttendanceStatus::Ok,
            Some("ignored".to_string()),
        )
        .await?;
        assert_eq!(present.justification_text, None);

        let blank = upsert_attendance(
            &db,
            member.id,
            meeting.id,
            AttendanceStatus::FaltaJust,
            Some("   ".to_string()),
        )
        .await?;
        assert_eq!(blank.justification_text, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_upsert_attendance_requires_member_and_meeting() -> Result<()> {
        let db = setup_test_db().await?;
        let member = create_test_member(&db, "Ana").await?;
        let meeting = create_test_meeting(&db, "2024-01-04").await?;

        let result = upsert_attendance(&db, 999, meeting.id, AttendanceStatus::Ok, None).await;
        assert!(matches!(result.unwrap_err(), Error::MemberNotFound { id: 999 }));

        let result = upsert_attendance(&db, member.id, 888, AttendanceStatus::Ok, None).await;
        assert!(matches!(result.unwrap_err(), Error::MeetingNotFound { id: 888 }));

        assert!(get_all_attendance(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_get_attendance_for_meeting() -> Result<()> {
        let db = setup_test_db().await?;
        let ana = create_test_member(&db, "Ana").await?;
        let bia = create_test_member(&db, "Bia").await?;
        let first = create_test_meeting(&db, "2024-01-04").await?;
        let second = create_test_meeting(&db, "2024-01-06").await?;

        upsert_attendance(&db, ana.id, first.id, AttendanceStatus::Ok, None).await?;
        upsert_attendance(&db, bia.id, first.id, AttendanceStatus::FaltaSem, None).await?;
        upsert_attendance(&db, ana.id, second.id, AttendanceStatus::Ok, None).await?;

        let records = get_attendance_for_meeting(&db, first.id).await?;
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.meeting_id == first.id));
        Ok(())
    }
}
