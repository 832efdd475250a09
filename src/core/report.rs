//! Report generation business logic.
//!
//! This module fetches meetings, members and attendance, runs the frequency
//! engine, and returns structured report data. It also provides the formatting
//! helpers shared by the bot layer (percentages, progress bars, colour bands).
//! All functions are framework-agnostic.

use crate::{
    core::{
        attendance,
        frequency::{MemberFrequency, compute_frequencies},
        meeting as meetings,
        member as members,
        tally::{Denominators, count_realized},
    },
    entities::{meeting, member},
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use serde::Serialize;

/// One member together with their computed statistics.
#[derive(Debug, Clone, Serialize)]
pub struct MemberReport {
    /// The member being reported on
    pub member: member::Model,
    /// Their statistics for this run
    pub frequency: MemberFrequency,
}

/// Full attendance report, the equivalent of the spreadsheet's summary tab.
#[derive(Debug, Clone, Serialize)]
pub struct FrequencyReport {
    /// Reference date used for the realized cutoff
    pub today: NaiveDate,
    /// Realized meeting totals
    pub totals: Denominators,
    /// One entry per member, ordered by member name
    pub members: Vec<MemberReport>,
}

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    /// Every meeting on the calendar
    pub total_meetings: usize,
    /// Meetings dated on or before the reference date
    pub realized_meetings: u32,
    /// Number of members on the roster
    pub member_count: usize,
    /// Average headline frequency across members, if any member has one
    pub average_frequency: Option<f64>,
    /// The next meeting on or after the reference date
    pub next_meeting: Option<meeting::Model>,
}

/// Colour band for a frequency ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrequencyBand {
    /// 90% or more
    Good,
    /// From 70% up to 90%
    Warning,
    /// Below 70%
    Poor,
    /// No ratio (zero denominator)
    Unavailable,
}

impl FrequencyBand {
    /// Classifies a ratio in `0.0..=1.0`.
    #[must_use]
    pub fn classify(value: Option<f64>) -> Self {
        match value {
            None => Self::Unavailable,
            Some(v) if v >= 0.9 => Self::Good,
            Some(v) if v >= 0.7 => Self::Warning,
            Some(_) => Self::Poor,
        }
    }

    /// Status indicator used in Discord messages.
    #[must_use]
    pub const fn emoji(self) -> &'static str {
        match self {
            Self::Good => "🟢",
            Self::Warning => "🟡",
            Self::Poor => "🔴",
            Self::Unavailable => "⚪",
        }
    }
}

/// Builds the full frequency report as of `today`.
pub async fn generate_frequency_report(
    db: &DatabaseConnection,
    today: NaiveDate,
) -> Result<FrequencyReport> {
    let all_meetings = meetings::get_all_meetings(db).await?;
    let all_members = members::get_all_members(db).await?;
    let records = attendance::get_all_attendance(db).await?;

    let totals = count_realized(&all_meetings, today);
    let frequencies = compute_frequencies(&all_members, &all_meetings, &records, today);

    Ok(FrequencyReport {
        today,
        totals,
        members: all_members
            .into_iter()
            .zip(frequencies)
            .map(|(member, frequency)| MemberReport { member, frequency })
            .collect(),
    })
}

/// Builds the dashboard summary as of `today`.
pub async fn generate_dashboard(
    db: &DatabaseConnection,
    today: NaiveDate,
) -> Result<DashboardSummary> {
    let all_meetings = meetings::get_all_meetings(db).await?;
    let all_members = members::get_all_members(db).await?;
    let records = attendance::get_all_attendance(db).await?;

    let totals = count_realized(&all_meetings, today);
    let frequencies = compute_frequencies(&all_members, &all_meetings, &records, today);

    Ok(DashboardSummary {
        total_meetings: all_meetings.len(),
        realized_meetings: totals.total_dias,
        member_count: all_members.len(),
        average_frequency: average_frequency(&frequencies),
        next_meeting: next_meeting(&all_meetings, today).cloned(),
    })
}

/// The weekday ratio a member is evaluated on: `AMBAS`, else `5A`, else `SAB`.
#[must_use]
pub fn headline_frequency(frequency: &MemberFrequency) -> Option<f64> {
    frequency
        .freq_ambas
        .or(frequency.freq_5a)
        .or(frequency.freq_sab)
}

/// Mean headline frequency over the members that have one.
#[must_use]
pub fn average_frequency(frequencies: &[MemberFrequency]) -> Option<f64> {
    let values: Vec<f64> = frequencies.iter().filter_map(headline_frequency).collect();
    if values.is_empty() {
        return None;
    }

    // Cast safety: member counts are far below 2^52
    #[allow(clippy::cast_precision_loss)]
    let count = values.len() as f64;
    Some(values.iter().sum::<f64>() / count)
}

/// The earliest meeting dated on or after `today`.
#[must_use]
pub fn next_meeting(meetings: &[meeting::Model], today: NaiveDate) -> Option<&meeting::Model> {
    meetings
        .iter()
        .filter(|m| m.date >= today)
        .min_by(|a, b| {
            a.date
                .cmp(&b.date)
                .then_with(|| a.time.cmp(&b.time))
                .then_with(|| a.id.cmp(&b.id))
        })
}

/// Formats a ratio as a percentage with one decimal, or `—` when absent.
#[must_use]
pub fn format_percent(value: Option<f64>) -> String {
    value.map_or_else(|| "—".to_string(), |v| format!("{:.1}%", v * 100.0))
}

/// Generates a progress bar string for a ratio.
///
/// Creates a text-based bar like: `[████████░░] 80.0%`. Absent ratios render
/// an empty bar followed by `—`.
#[must_use]
pub fn format_progress_bar(value: Option<f64>, bar_length: Option<usize>) -> String {
    let length = bar_length.unwrap_or(10);
    let clamped = value.unwrap_or(0.0).clamp(0.0, 1.0);

    // Cast safety: clamped ∈ [0, 1], length is small (10-20).
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let filled = (clamped * length as f64).round() as usize;
    let empty = length.saturating_sub(filled);

    format!(
        "[{}{}] {}",
        "█".repeat(filled),
        "░".repeat(empty),
        format_percent(value)
    )
}

/// One-line summary of the realized totals.
#[must_use]
pub fn format_totals(totals: &Denominators) -> String {
    format!(
        "NORMAL {} | OBRIGAÇÃO {} | DESENV. {} | 5ª {} | SAB {} | DOM {} | TOTAL {}",
        totals.total_normal,
        totals.total_obrigacao,
        totals.total_desenvolvimento,
        totals.total_5a,
        totals.total_sab,
        totals.total_dom,
        totals.total_dias
    )
}

/// Multi-line summary of one member's statistics for the report.
///
/// `AMBAS` members show their combined weekday ratio, everyone else shows the
/// Thursday and Saturday ratios separately.
#[must_use]
pub fn format_member_summary(row: &MemberReport) -> String {
    let f = &row.frequency;
    let mut lines = Vec::with_capacity(4);

    if f.freq_ambas.is_some() {
        lines.push(format!("**AMBAS:** {}", format_progress_bar(f.freq_ambas, Some(10))));
    } else {
        lines.push(format!("**5ª:** {}", format_progress_bar(f.freq_5a, Some(10))));
        lines.push(format!("**SAB:** {}", format_progress_bar(f.freq_sab, Some(10))));
    }
    lines.push(format!(
        "**NORMAL:** {} | **OBRIGAÇÃO:** {} | **DOM:** {}",
        format_percent(f.freq_normal),
        format_percent(f.freq_obrigacao),
        format_percent(f.freq_dom)
    ));
    lines.push(format!(
        "**Faltas:** {} (just. {} {} | sem {} {})",
        f.total_faltas,
        f.faltas_just,
        format_percent(f.perc_faltas_just),
        f.faltas_sem,
        format_percent(f.perc_faltas_sem)
    ));

    lines.join("\n")
}
