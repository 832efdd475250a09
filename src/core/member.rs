//! Member business logic - Handles the roster of tracked members.
//!
//! Provides functions for creating, retrieving, updating, and deleting members.
//! Deleting a member also removes their attendance records so that reports never
//! see records pointing at a missing member.

use crate::{
    core::types::EvaluationRule,
    entities::{AttendanceRecord, Member, attendance_record, member},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};

/// Retrieves every member, ordered alphabetically by name.
pub async fn get_all_members(db: &DatabaseConnection) -> Result<Vec<member::Model>> {
    Member::find()
        .order_by_asc(member::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a member by its unique ID.
pub async fn get_member_by_id(
    db: &DatabaseConnection,
    member_id: i64,
) -> Result<Option<member::Model>> {
    Member::find_by_id(member_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a member by name, ignoring case and surrounding whitespace.
///
/// Used by bot commands, where operators type or autocomplete member names.
pub async fn get_member_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<member::Model>> {
    let wanted = name.trim().to_lowercase();
    Ok(get_all_members(db)
        .await?
        .into_iter()
        .find(|m| m.name.trim().to_lowercase() == wanted))
}

/// Filters members whose name contains `term`, case-insensitively.
///
/// An empty or whitespace-only term returns every member.
#[must_use]
pub fn search_members<'a>(members: &'a [member::Model], term: &str) -> Vec<&'a member::Model> {
    let term = term.trim().to_lowercase();
    members
        .iter()
        .filter(|m| term.is_empty() || m.name.to_lowercase().contains(&term))
        .collect()
}

/// Creates a new member after trimming and validating the name.
pub async fn create_member(
    db: &DatabaseConnection,
    name: String,
    rule: EvaluationRule,
) -> Result<member::Model> {
    let name = validate_name(&name)?;

    let member = member::ActiveModel {
        name: Set(name),
        evaluation_rule: Set(rule.as_str().to_string()),
        ..Default::default()
    };

    let result = member.insert(db).await?;
    tracing::info!(member_id = result.id, name = %result.name, "Created member");
    Ok(result)
}

/// Updates a member's name and/or evaluation rule. Fields left as `None` are kept.
pub async fn update_member(
    db: &DatabaseConnection,
    member_id: i64,
    name: Option<String>,
    rule: Option<EvaluationRule>,
) -> Result<member::Model> {
    let existing = get_member_by_id(db, member_id)
        .await?
        .ok_or(Error::MemberNotFound { id: member_id })?;

    let mut active_model: member::ActiveModel = existing.into();
    if let Some(name) = name {
        active_model.name = Set(validate_name(&name)?);
    }
    if let Some(rule) = rule {
        active_model.evaluation_rule = Set(rule.as_str().to_string());
    }

    active_model.update(db).await.map_err(Into::into)
}

/// Deletes a member together with all of their attendance records.
///
/// Returns the number of attendance records removed.
pub async fn delete_member(db: &DatabaseConnection, member_id: i64) -> Result<u64> {
    let txn = db.begin().await?;

    let member = Member::find_by_id(member_id)
        .one(&txn)
        .await?
        .ok_or(Error::MemberNotFound { id: member_id })?;

    let removed = AttendanceRecord::delete_many()
        .filter(attendance_record::Column::MemberId.eq(member_id))
        .exec(&txn)
        .await?
        .rows_affected;

    member.delete(&txn).await?;
    txn.commit().await?;

    tracing::info!(member_id, removed_records = removed, "Deleted member");
    Ok(removed)
}

fn validate_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation {
            message: "Member name cannot be empty".to_string(),
        });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{core::types::AttendanceStatus, test_utils::*};

    #[tokio::test]
    async fn test_create_member_validation() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_member(&db, "   ".to_string(), EvaluationRule::Ambas).await;
        assert!(matches!(result.unwrap_err(), Error::Validation { message: _ }));

        assert!(get_all_members(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_create_member_integration() -> Result<()> {
        let db = setup_test_db().await?;

        let member = create_member(&db, "  Maria  ".to_string(), EvaluationRule::Quinta).await?;

        assert_eq!(member.name, "Maria");
        assert_eq!(member.evaluation_rule, "5A");
        assert_eq!(member.rule(), Some(EvaluationRule::Quinta));

        let found = get_member_by_id(&db, member.id).await?;
        assert_eq!(found, Some(member));
        Ok(())
    }

    #[tokio::test]
    async fn test_get_all_members_ordered_by_name() -> Result<()> {
        let db = setup_test_db().await?;

        create_test_member(&db, "Carlos").await?;
        create_test_member(&db, "Ana").await?;
        create_test_member(&db, "Bruno").await?;

        let names: Vec<String> = get_all_members(&db)
            .await?
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(names, vec!["Ana", "Bruno", "Carlos"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_get_member_by_name_ignores_case() -> Result<()> {
        let db = setup_test_db().await?;

        let created = create_test_member(&db, "Maria Silva").await?;

        let found = get_member_by_name(&db, "  maria SILVA").await?;
        assert_eq!(found.map(|m| m.id), Some(created.id));

        assert!(get_member_by_name(&db, "Maria").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_update_member_partial() -> Result<()> {
        let db = setup_test_db().await?;
        let member = create_test_member(&db, "Ana").await?;

        let updated = update_member(&db, member.id, None, Some(EvaluationRule::Sabado)).await?;
        assert_eq!(updated.name, "Ana");
        assert_eq!(updated.evaluation_rule, "SAB");

        let renamed = update_member(&db, member.id, Some("Ana Paula".to_string()), None).await?;
        assert_eq!(renamed.name, "Ana Paula");
        assert_eq!(renamed.evaluation_rule, "SAB");
        Ok(())
    }

    #[tokio::test]
    async fn test_update_member_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let result = update_member(&db, 999, Some("X".to_string()), None).await;
        assert!(matches!(result.unwrap_err(), Error::MemberNotFound { id: 999 }));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_member_cascades_attendance() -> Result<()> {
        let db = setup_test_db().await?;
        let ana = create_test_member(&db, "Ana").await?;
        let bia = create_test_member(&db, "Bia").await?;
        let meeting = create_test_meeting(&db, "2024-01-04").await?;

        crate::core::attendance::upsert_attendance(&db, ana.id, meeting.id, AttendanceStatus::Ok, None)
            .await?;
        crate::core::attendance::upsert_attendance(&db, bia.id, meeting.id, AttendanceStatus::Ok, None)
            .await?;

        let removed = delete_member(&db, ana.id).await?;
        assert_eq!(removed, 1);

        assert!(get_member_by_id(&db, ana.id).await?.is_none());
        let remaining = crate::core::attendance::get_all_attendance(&db).await?;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].member_id, bia.id);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_member_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let result = delete_member(&db, 42).await;
        assert!(matches!(result.unwrap_err(), Error::MemberNotFound { id: 42 }));
        Ok(())
    }

    #[test]
    fn test_search_members() {
        let members = vec![
            member(1, "Maria Silva", "AMBAS"),
            member(2, "João Souza", "5A"),
            member(3, "Mariana Lima", "SAB"),
        ];

        let ids: Vec<i64> = search_members(&members, "MARI").iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 3]);

        assert_eq!(search_members(&members, "  ").len(), 3);
        assert!(search_members(&members, "Pedro").is_empty());
    }
}
