//! Autocomplete handlers for Discord slash command parameters.
//!
//! Member names come from the database. Meeting kinds, weekdays, evaluation
//! rules and attendance statuses come from the closed label sets in
//! [`crate::core::types`], so the suggestions always parse back.

use crate::{
    bot::BotData,
    core::{
        member,
        types::{AttendanceStatus, EvaluationRule, MeetingKind, Weekday},
    },
    errors::Error,
};

/// Discord accepts at most 25 autocomplete choices.
const MAX_CHOICES: usize = 25;

/// Provides autocomplete suggestions for member names.
///
/// Queries the roster and returns up to 25 names containing the user's partial
/// input, case-insensitively, in alphabetical order.
pub async fn autocomplete_member_name(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let db = &ctx.data().database;

    let Ok(members) = member::get_all_members(db).await else {
        return Vec::new();
    };

    member::search_members(&members, partial)
        .into_iter()
        .map(|m| m.name.clone())
        .take(MAX_CHOICES)
        .collect()
}

/// Suggests meeting kind labels.
pub async fn autocomplete_meeting_kind(
    _ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    matching_labels(MeetingKind::ALL.iter().map(|k| k.as_str()), partial)
}

/// Suggests weekday slot labels.
pub async fn autocomplete_weekday(
    _ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    matching_labels(Weekday::ALL.iter().map(|w| w.as_str()), partial)
}

/// Suggests evaluation rule labels.
pub async fn autocomplete_evaluation_rule(
    _ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    matching_labels(EvaluationRule::ALL.iter().map(|r| r.as_str()), partial)
}

/// Suggests attendance status labels.
pub async fn autocomplete_status(
    _ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    matching_labels(AttendanceStatus::ALL.iter().map(|s| s.as_str()), partial)
}

/// Labels containing `partial`, case-insensitively, in their declared order.
fn matching_labels<'a>(labels: impl Iterator<Item = &'a str>, partial: &str) -> Vec<String> {
    let partial_upper = partial.trim().to_uppercase();
    labels
        .filter(|label| label.contains(&partial_upper))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_labels() {
        let statuses = || AttendanceStatus::ALL.iter().map(|s| s.as_str());

        assert_eq!(
            matching_labels(statuses(), ""),
            vec!["OK", "FALTA_SEM", "FALTA_JUST"]
        );
        assert_eq!(
            matching_labels(statuses(), "falta"),
            vec!["FALTA_SEM", "FALTA_JUST"]
        );
        assert_eq!(matching_labels(statuses(), " just "), vec!["FALTA_JUST"]);
        assert!(matching_labels(statuses(), "present").is_empty());
    }

    #[test]
    fn test_matching_labels_weekdays() {
        let weekdays = Weekday::ALL.iter().map(|w| w.as_str());
        assert_eq!(matching_labels(weekdays, "5"), vec!["5A"]);
    }
}
