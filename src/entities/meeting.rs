//! Meeting entity - A scheduled or past gathering.
//!
//! `weekday` and `kind` are stored as text labels. The weekday is assigned when
//! the meeting is created and is authoritative for aggregation; nothing forces
//! it to match the calendar weekday of `date`.

use crate::core::types::{MeetingKind, Weekday};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Meeting database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "meetings")]
pub struct Model {
    /// Unique identifier for the meeting
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Calendar date of the meeting
    pub date: Date,
    /// Optional `HH:MM` start time, display only
    pub time: Option<String>,
    /// Weekday slot label: `"5A"`, `"SAB"` or `"DOM"`
    pub weekday: String,
    /// Kind label: `"NORMAL"`, `"OBRIGACAO"` or `"DESENVOLVIMENTO"`
    pub kind: String,
}

impl Model {
    /// The typed weekday slot, or `None` if the stored label is unknown.
    #[must_use]
    pub fn weekday_kind(&self) -> Option<Weekday> {
        Weekday::from_label(&self.weekday)
    }

    /// The typed meeting kind, or `None` if the stored label is unknown.
    #[must_use]
    pub fn meeting_kind(&self) -> Option<MeetingKind> {
        MeetingKind::from_label(&self.kind)
    }
}

/// Defines relationships between Meeting and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One meeting has many attendance records
    #[sea_orm(has_many = "super::attendance_record::Entity")]
    AttendanceRecords,
}

impl Related<super::attendance_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AttendanceRecords.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
