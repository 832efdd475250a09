//! Attendance Discord commands - `/mark` and `/attendance`.
//!
//! Marking is an upsert: marking the same member at the same meeting again
//! replaces the previous status.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, handlers::autocomplete, say_chunked},
        core::{
            attendance as attendance_records, meeting as meetings, member as members,
            types::AttendanceStatus,
        },
        errors::{Error, Result},
    };
    use std::{collections::HashMap, fmt::Write};

    fn status_emoji(status: Option<AttendanceStatus>) -> &'static str {
        match status {
            Some(AttendanceStatus::Ok) => "✅",
            Some(AttendanceStatus::FaltaJust) => "📝",
            Some(AttendanceStatus::FaltaSem) => "❌",
            None => "❔",
        }
    }

    /// Records a member's attendance at a meeting.
    ///
    /// The justification is only stored for FALTA_JUST.
    #[poise::command(slash_command, prefix_command)]
    pub async fn mark(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Meeting ID (see /meeting list)"] meeting_id: i64,
        #[description = "Member name"]
        #[autocomplete = "autocomplete::autocomplete_member_name"]
        member: String,
        #[description = "OK, FALTA_SEM or FALTA_JUST"]
        #[autocomplete = "autocomplete::autocomplete_status"]
        status: String,
        #[description = "Reason for an excused absence"] justification: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let status: AttendanceStatus = status.parse()?;

        let Some(found) = members::get_member_by_name(db, &member).await? else {
            ctx.say(format!(
                "❌ Member '{member}' not found. Use `/member list` to see the roster."
            ))
            .await?;
            return Ok(());
        };

        let record = attendance_records::upsert_attendance(
            db,
            found.id,
            meeting_id,
            status,
            justification,
        )
        .await?;

        let mut response = format!(
            "{} Marked **{}** as {} at meeting #{meeting_id}",
            status_emoji(Some(status)),
            found.name,
            record.status
        );
        if let Some(text) = &record.justification_text {
            write!(&mut response, " ({text})")?;
        }

        ctx.say(response).await?;
        Ok(())
    }

    /// Lists the attendance recorded for one meeting.
    ///
    /// Members without a record are listed separately; once the meeting is
    /// past they count as FALTA_SEM in reports.
    #[poise::command(slash_command, prefix_command)]
    pub async fn attendance(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Meeting ID (see /meeting list)"] meeting_id: i64,
    ) -> Result<()> {
        let db = &ctx.data().database;

        let meeting = meetings::get_meeting_by_id(db, meeting_id)
            .await?
            .ok_or(Error::MeetingNotFound { id: meeting_id })?;
        let records = attendance_records::get_attendance_for_meeting(db, meeting_id).await?;
        let roster = members::get_all_members(db).await?;

        // First record per member wins
        let by_member: HashMap<i64, _> = records
            .iter()
            .rev()
            .map(|r| (r.member_id, r))
            .collect();

        let mut response = format!(
            "📋 **Meeting #{} - {} {} {}**\n\n",
            meeting.id,
            meeting.date.format("%Y-%m-%d"),
            meeting.weekday,
            meeting.kind
        );

        let mut unmarked = Vec::new();
        for member in &roster {
            match by_member.get(&member.id) {
                Some(record) => {
                    write!(
                        &mut response,
                        "{} **{}** - {}",
                        status_emoji(record.attendance_status()),
                        member.name,
                        record.status
                    )?;
                    if let Some(text) = &record.justification_text {
                        write!(&mut response, " ({text})")?;
                    }
                    writeln!(&mut response)?;
                }
                None => unmarked.push(member.name.as_str()),
            }
        }

        if !unmarked.is_empty() {
            writeln!(&mut response, "\n_Not marked:_ {}", unmarked.join(", "))?;
        }

        say_chunked(ctx, &response).await
    }
}

pub use inner::*;
