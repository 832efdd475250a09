//! Attendance record entity - One member's recorded outcome for one meeting.
//!
//! Each record links a `member_id` and a `meeting_id` with a `status` label
//! (`OK`, `FALTA_SEM`, `FALTA_JUST`) and an optional free-text justification.
//! The repository keeps at most one record per (member, meeting) pair.
use crate::core::types::AttendanceStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Attendance record database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "attendance_records")]
pub struct Model {
    /// Unique identifier for the record
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the member this record belongs to
    pub member_id: i64,
    /// ID of the meeting this record belongs to
    pub meeting_id: i64,
    /// Status label: `"OK"`, `"FALTA_SEM"` or `"FALTA_JUST"`
    pub status: String,
    /// Optional justification, usually present for `FALTA_JUST`
    pub justification_text: Option<String>,
}

impl Model {
    /// The typed status, or `None` if the stored label is unknown.
    #[must_use]
    pub fn attendance_status(&self) -> Option<AttendanceStatus> {
        AttendanceStatus::from_label(&self.status)
    }
}

/// Defines relationships between AttendanceRecord and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each record belongs to one member
    #[sea_orm(
        belongs_to = "super::member::Entity",
        from = "Column::MemberId",
        to = "super::member::Column::Id"
    )]
    Member,
    /// Each record belongs to one meeting
    #[sea_orm(
        belongs_to = "super::meeting::Entity",
        from = "Column::MeetingId",
        to = "super::meeting::Column::Id"
    )]
    Meeting,
}

impl Related<super::member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Member.def()
    }
}

impl Related<super::meeting::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Meeting.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
