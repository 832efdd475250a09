//! Roster and calendar seed data loaded from config.toml
//!
//! The optional config file lists the members and meetings that should exist
//! when the bot starts. Seeding only adds what is missing, so it is safe to run
//! on every startup:
//!
//! ```toml
//! [[members]]
//! name = "Maria Silva"
//! evaluation_rule = "AMBAS"
//!
//! [[meetings]]
//! date = "2024-01-04"
//! time = "19:30"
//! kind = "NORMAL"
//! ```

use crate::{
    core::{
        meeting::{self as meetings, parse_meeting_date},
        member as members,
        types::{EvaluationRule, MeetingKind, Weekday},
    },
    errors::{Error, Result},
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use std::{collections::HashSet, path::Path};

/// Environment variable overriding the config file location
pub const CONFIG_PATH_VAR: &str = "ATTENDANCE_CONFIG";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Members to seed
    #[serde(default)]
    pub members: Vec<MemberConfig>,
    /// Meetings to seed
    #[serde(default)]
    pub meetings: Vec<MeetingConfig>,
}

/// Configuration for a single member
#[derive(Debug, Deserialize, Clone)]
pub struct MemberConfig {
    /// Display name
    pub name: String,
    /// `AMBAS`, `5A` or `SAB`
    pub evaluation_rule: EvaluationRule,
}

/// Configuration for a single meeting
#[derive(Debug, Deserialize, Clone)]
pub struct MeetingConfig {
    /// `YYYY-MM-DD` or `DD/MM/YYYY`, as a quoted string
    pub date: String,
    /// Optional `HH:MM`
    #[serde(default)]
    pub time: Option<String>,
    /// Derived from the date when absent
    #[serde(default)]
    pub weekday: Option<Weekday>,
    /// `NORMAL`, `OBRIGACAO` or `DESENVOLVIMENTO`
    pub kind: MeetingKind,
}

/// What a seeding run inserted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    /// Members created
    pub members_created: usize,
    /// Meetings created
    pub meetings_created: usize,
}

/// Loads seed configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - A label (rule, weekday, kind) is not recognised
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    tracing::debug!("Attempting to load configuration from: {:?}", path);

    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path.display()),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {}: {e}", path.display()),
    })
}

/// Loads the config from `$ATTENDANCE_CONFIG` or `./config.toml`.
///
/// A missing file is not an error: the bot runs without seed data.
pub fn load_default_config() -> Result<Option<Config>> {
    let path = std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| "config.toml".to_string());
    if !Path::new(&path).exists() {
        tracing::info!("No config file at {path}; skipping seed data");
        return Ok(None);
    }
    load_config(&path).map(Some)
}

/// Inserts the configured members and meetings that are not in the database yet.
///
/// Members match on name (case-insensitive); meetings match on (date, kind).
pub async fn seed_from_config(db: &DatabaseConnection, config: &Config) -> Result<SeedSummary> {
    let mut summary = SeedSummary::default();

    let mut known_names: HashSet<String> = members::get_all_members(db)
        .await?
        .into_iter()
        .map(|m| m.name.trim().to_lowercase())
        .collect();

    for entry in &config.members {
        if known_names.insert(entry.name.trim().to_lowercase()) {
            members::create_member(db, entry.name.clone(), entry.evaluation_rule).await?;
            summary.members_created += 1;
        }
    }

    let mut known_meetings: HashSet<(chrono::NaiveDate, String)> = meetings::get_all_meetings(db)
        .await?
        .into_iter()
        .map(|m| (m.date, m.kind))
        .collect();

    for entry in &config.meetings {
        let date = parse_meeting_date(&entry.date)?;
        if known_meetings.insert((date, entry.kind.as_str().to_string())) {
            meetings::create_meeting(db, date, entry.time.clone(), entry.weekday, entry.kind)
                .await?;
            summary.meetings_created += 1;
        }
    }

    tracing::info!(
        members_created = summary.members_created,
        meetings_created = summary.meetings_created,
        "Seed data applied"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::setup_test_db;

    const SAMPLE: &str = r#"
        [[members]]
        name = "Maria Silva"
        evaluation_rule = "AMBAS"

        [[members]]
        name = "João Souza"
        evaluation_rule = "5A"

        [[meetings]]
        date = "2024-01-04"
        time = "19:30"
        kind = "NORMAL"

        [[meetings]]
        date = "06/01/2024"
        weekday = "SAB"
        kind = "OBRIGACAO"
    "#;

    #[test]
    fn test_parse_seed_config() {
        let config: Config = toml::from_str(SAMPLE).unwrap();

        assert_eq!(config.members.len(), 2);
        assert_eq!(config.members[0].name, "Maria Silva");
        assert_eq!(config.members[0].evaluation_rule, EvaluationRule::Ambas);
        assert_eq!(config.members[1].evaluation_rule, EvaluationRule::Quinta);

        assert_eq!(config.meetings.len(), 2);
        assert_eq!(config.meetings[0].time.as_deref(), Some("19:30"));
        assert_eq!(config.meetings[0].weekday, None);
        assert_eq!(config.meetings[1].weekday, Some(Weekday::Sabado));
        assert_eq!(config.meetings[1].kind, MeetingKind::Obrigacao);
    }

    #[test]
    fn test_parse_rejects_unknown_label() {
        let result: std::result::Result<Config, _> = toml::from_str(
            r#"
            [[members]]
            name = "Maria"
            evaluation_rule = "TODOS"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.members.is_empty());
        assert!(config.meetings.is_empty());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("/nonexistent/attendance/config.toml");
        assert!(matches!(result.unwrap_err(), Error::Config { message: _ }));
    }

    #[tokio::test]
    async fn test_seed_from_config_only_adds_missing() -> Result<()> {
        let db = setup_test_db().await?;
        let config: Config = toml::from_str(SAMPLE).unwrap();

        let first = seed_from_config(&db, &config).await?;
        assert_eq!(
            first,
            SeedSummary {
                members_created: 2,
                meetings_created: 2,
            }
        );

        let second = seed_from_config(&db, &config).await?;
        assert_eq!(second, SeedSummary::default());

        let all_meetings = meetings::get_all_meetings(&db).await?;
        assert_eq!(all_meetings.len(), 2);
        assert_eq!(all_meetings[0].weekday, "5A");
        assert_eq!(all_meetings[1].weekday, "SAB");
        Ok(())
    }
}
