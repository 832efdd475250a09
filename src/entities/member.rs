//! Member entity - A person whose attendance is tracked.
//!
//! Each member has a display name and an evaluation rule that selects how their
//! weekday frequency is reported (`AMBAS`, `5A` or `SAB`).

use crate::core::types::EvaluationRule;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Member database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "members")]
pub struct Model {
    /// Unique identifier for the member
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name
    pub name: String,
    /// Evaluation rule label: `"AMBAS"`, `"5A"` or `"SAB"`
    pub evaluation_rule: String,
}

impl Model {
    /// The typed evaluation rule, or `None` if the stored label is unknown.
    #[must_use]
    pub fn rule(&self) -> Option<EvaluationRule> {
        EvaluationRule::from_label(&self.evaluation_rule)
    }
}

/// Defines relationships between Member and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One member has many attendance records
    #[sea_orm(has_many = "super::attendance_record::Entity")]
    AttendanceRecords,
}

impl Related<super::attendance_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AttendanceRecords.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
