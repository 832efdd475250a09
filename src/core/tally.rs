//! Realized-meeting tally.
//!
//! Counts the meetings that have already happened by kind and by weekday. These
//! counts are the "realized" denominators used for weekday frequencies and
//! absence percentages. [`count_scheduled`] provides the other denominator
//! family, which ignores the reference date entirely.

use crate::{
    core::types::{MeetingKind, Weekday},
    entities::meeting,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Realized meeting counts by kind and weekday.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Denominators {
    /// Realized `NORMAL` meetings
    pub total_normal: u32,
    /// Realized `OBRIGACAO` meetings
    pub total_obrigacao: u32,
    /// Realized `DESENVOLVIMENTO` meetings
    pub total_desenvolvimento: u32,
    /// Sum of the three kind counters
    pub total_tipos: u32,
    /// Realized Thursday meetings
    pub total_5a: u32,
    /// Realized Sunday meetings
    pub total_dom: u32,
    /// Realized Saturday meetings
    pub total_sab: u32,
    /// Sum of the three weekday counters
    pub total_dias: u32,
}

/// Meeting counts over the whole calendar, regardless of date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTotals {
    /// All `NORMAL` meetings
    pub normal: u32,
    /// All `OBRIGACAO` meetings
    pub obrigacao: u32,
    /// All Sunday meetings
    pub dom: u32,
}

/// Whether a meeting has happened by `today`. A meeting dated `today` counts.
#[must_use]
pub fn is_realized(meeting: &meeting::Model, today: NaiveDate) -> bool {
    meeting.date <= today
}

/// Tallies realized meetings by kind and weekday.
///
/// Each realized meeting increments exactly one kind counter and one weekday
/// counter. A meeting with an unknown kind or weekday label is skipped on that
/// axis only.
#[must_use]
pub fn count_realized(meetings: &[meeting::Model], today: NaiveDate) -> Denominators {
    let mut totals = Denominators::default();

    for m in meetings.iter().filter(|m| is_realized(m, today)) {
        match m.meeting_kind() {
            Some(MeetingKind::Normal) => totals.total_normal += 1,
            Some(MeetingKind::Obrigacao) => totals.total_obrigacao += 1,
            Some(MeetingKind::Desenvolvimento) => totals.total_desenvolvimento += 1,
            None => {}
        }

        match m.weekday_kind() {
            Some(Weekday::Quinta) => totals.total_5a += 1,
            Some(Weekday::Domingo) => totals.total_dom += 1,
            Some(Weekday::Sabado) => totals.total_sab += 1,
            None => {}
        }
    }

    totals.total_tipos = totals.total_normal + totals.total_obrigacao + totals.total_desenvolvimento;
    totals.total_dias = totals.total_5a + totals.total_dom + totals.total_sab;

    tracing::debug!(
        realized = totals.total_dias,
        scheduled = meetings.len(),
        %today,
        "Tallied realized meetings"
    );

    totals
}

/// Counts meetings scheduled for the whole period, ignoring the reference date.
///
/// Mirrors the legacy spreadsheet: `NORMAL`, `OBRIGACAO` and Sunday frequencies
/// are divided by everything on the calendar, including meetings that have not
/// happened yet.
#[must_use]
pub fn count_scheduled(meetings: &[meeting::Model]) -> ScheduledTotals {
    meetings
        .iter()
        .fold(ScheduledTotals::default(), |mut totals, m| {
            match m.meeting_kind() {
                Some(MeetingKind::Normal) => totals.normal += 1,
                Some(MeetingKind::Obrigacao) => totals.obrigacao += 1,
                Some(MeetingKind::Desenvolvimento) | None => {}
            }
            if m.weekday_kind() == Some(Weekday::Domingo) {
                totals.dom += 1;
            }
            totals
        })
}
