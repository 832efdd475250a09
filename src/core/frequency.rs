//! Per-member frequency calculation.
//!
//! Turns meetings, members and attendance records into one [`MemberFrequency`]
//! per member. The calculation reproduces the legacy attendance spreadsheet,
//! including its two inconsistent denominator families:
//!
//! - `freq_normal`, `freq_obrigacao` and `freq_dom` divide presences at realized
//!   meetings by every meeting *scheduled* of that kind/weekday, past or future.
//! - `freq_5a`, `freq_sab`, `freq_ambas` and the absence percentages divide by
//!   *realized* meetings only (see [`count_realized`]).
//!
//! Keep both until the domain owners confirm otherwise.

use crate::{
    core::{
        tally::{count_realized, count_scheduled, is_realized},
        types::{AttendanceStatus, EvaluationRule, MeetingKind, Weekday},
    },
    entities::{attendance_record, meeting, member},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, hash_map::Entry};

/// Attendance statistics for one member.
///
/// Ratios are in `0.0..=1.0` (or above, for the scheduled denominators when the
/// calendar was edited) and `None` whenever their denominator is zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberFrequency {
    /// The member these statistics belong to
    pub member_id: i64,
    /// Presences at realized `NORMAL` meetings
    pub presencas_normal: u32,
    /// Presences at realized `OBRIGACAO` meetings
    pub presencas_obrigacao: u32,
    /// Presences at realized `DESENVOLVIMENTO` meetings
    pub presencas_desenvolvimento: u32,
    /// Presences at realized Thursday meetings
    pub presencas_5a: u32,
    /// Presences at realized Saturday meetings
    pub presencas_sab: u32,
    /// Presences at realized Sunday meetings
    pub presencas_dom: u32,
    /// Excused absences
    pub faltas_just: u32,
    /// Unexcused absences, including meetings with no record at all
    pub faltas_sem: u32,
    /// `NORMAL` presences over all scheduled `NORMAL` meetings
    pub freq_normal: Option<f64>,
    /// `OBRIGACAO` presences over all scheduled `OBRIGACAO` meetings
    pub freq_obrigacao: Option<f64>,
    /// Sunday presences over all scheduled Sunday meetings
    pub freq_dom: Option<f64>,
    /// Thursday presences over realized Thursday meetings (non-`AMBAS` only)
    pub freq_5a: Option<f64>,
    /// Saturday presences over realized Saturday meetings (non-`AMBAS` only)
    pub freq_sab: Option<f64>,
    /// Thursday + Saturday presences over both realized totals (`AMBAS` only)
    pub freq_ambas: Option<f64>,
    /// Excused absences over all realized meetings
    pub perc_faltas_just: Option<f64>,
    /// Unexcused absences over all realized meetings
    pub perc_faltas_sem: Option<f64>,
    /// `faltas_just + faltas_sem`
    pub total_faltas: u32,
}

/// Attendance records keyed by `(member_id, meeting_id)`.
///
/// When the store holds several records for the same pair, the first one in
/// input order wins and the rest are ignored.
#[derive(Debug, Default)]
pub struct AttendanceIndex<'a> {
    records: HashMap<(i64, i64), &'a attendance_record::Model>,
    duplicates: usize,
}

impl<'a> AttendanceIndex<'a> {
    /// Builds the index in one pass over `attendance`.
    #[must_use]
    pub fn build(attendance: &'a [attendance_record::Model]) -> Self {
        let mut index = Self::default();

        for record in attendance {
            match index.records.entry((record.member_id, record.meeting_id)) {
                Entry::Vacant(slot) => {
                    slot.insert(record);
                }
                Entry::Occupied(kept) => {
                    index.duplicates += 1;
                    tracing::warn!(
                        member_id = record.member_id,
                        meeting_id = record.meeting_id,
                        kept_record = kept.get().id,
                        ignored_record = record.id,
                        "Duplicate attendance record; keeping the first one"
                    );
                }
            }
        }

        index
    }

    /// The record for this member at this meeting, if any.
    #[must_use]
    pub fn get(&self, member_id: i64, meeting_id: i64) -> Option<&'a attendance_record::Model> {
        self.records.get(&(member_id, meeting_id)).copied()
    }

    /// Number of records ignored because their pair was already indexed.
    #[must_use]
    pub const fn duplicates(&self) -> usize {
        self.duplicates
    }
}

/// Raw counters accumulated over the realized meetings for one member.
#[derive(Debug, Default)]
struct Counts {
    normal: u32,
    obrigacao: u32,
    desenvolvimento: u32,
    quinta: u32,
    sabado: u32,
    domingo: u32,
    faltas_just: u32,
    faltas_sem: u32,
}

impl Counts {
    fn record(&mut self, meeting: &meeting::Model, status: Option<AttendanceStatus>) {
        match status {
            Some(AttendanceStatus::Ok) => {
                match meeting.meeting_kind() {
                    Some(MeetingKind::Normal) => self.normal += 1,
                    Some(MeetingKind::Obrigacao) => self.obrigacao += 1,
                    Some(MeetingKind::Desenvolvimento) => self.desenvolvimento += 1,
                    None => {}
                }
                match meeting.weekday_kind() {
                    Some(Weekday::Quinta) => self.quinta += 1,
                    Some(Weekday::Sabado) => self.sabado += 1,
                    Some(Weekday::Domingo) => self.domingo += 1,
                    None => {}
                }
            }
            Some(AttendanceStatus::FaltaJust) => self.faltas_just += 1,
            // No record, FALTA_SEM or an unreadable status: unexcused absence
            Some(AttendanceStatus::FaltaSem) | None => self.faltas_sem += 1,
        }
    }
}

/// `numerator / denominator`, or `None` when the denominator is zero.
#[must_use]
pub fn ratio(numerator: u32, denominator: u32) -> Option<f64> {
    (denominator > 0).then(|| f64::from(numerator) / f64::from(denominator))
}

/// Computes attendance statistics for every member, in input order.
///
/// Only meetings dated on or before `today` are scanned. A realized meeting with
/// no record for the member counts as an unexcused absence. Unknown labels never
/// abort the computation; they are left out of the counter they would feed.
#[must_use]
pub fn compute_frequencies(
    members: &[member::Model],
    meetings: &[meeting::Model],
    attendance: &[attendance_record::Model],
    today: NaiveDate,
) -> Vec<MemberFrequency> {
    let realized = count_realized(meetings, today);
    let scheduled = count_scheduled(meetings);
    let index = AttendanceIndex::build(attendance);

    let realized_meetings: Vec<&meeting::Model> =
        meetings.iter().filter(|m| is_realized(m, today)).collect();

    tracing::debug!(
        members = members.len(),
        realized_meetings = realized_meetings.len(),
        records = attendance.len(),
        duplicates = index.duplicates(),
        "Computing member frequencies"
    );

    members
        .iter()
        .map(|member| {
            let mut counts = Counts::default();
            for meeting in &realized_meetings {
                let status = index
                    .get(member.id, meeting.id)
                    .and_then(attendance_record::Model::attendance_status);
                counts.record(meeting, status);
            }

            let ambas = member.rule() == Some(EvaluationRule::Ambas);
            let freq_5a = ratio(counts.quinta, realized.total_5a);
            let freq_sab = ratio(counts.sabado, realized.total_sab);
            let freq_ambas = ratio(
                counts.quinta + counts.sabado,
                realized.total_5a + realized.total_sab,
            );

            MemberFrequency {
                member_id: member.id,
                presencas_normal: counts.normal,
                presencas_obrigacao: counts.obrigacao,
                presencas_desenvolvimento: counts.desenvolvimento,
                presencas_5a: counts.quinta,
                presencas_sab: counts.sabado,
                presencas_dom: counts.domingo,
                faltas_just: counts.faltas_just,
                faltas_sem: counts.faltas_sem,
                freq_normal: ratio(counts.normal, scheduled.normal),
                freq_obrigacao: ratio(counts.obrigacao, scheduled.obrigacao),
                freq_dom: ratio(counts.domingo, scheduled.dom),
                freq_5a: if ambas { None } else { freq_5a },
                freq_sab: if ambas { None } else { freq_sab },
                freq_ambas: if ambas { freq_ambas } else { None },
                perc_faltas_just: ratio(counts.faltas_just, realized.total_dias),
                perc_faltas_sem: ratio(counts.faltas_sem, realized.total_dias),
                total_faltas: counts.faltas_just + counts.faltas_sem,
            }
        })
        .collect()
}
