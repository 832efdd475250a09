//! Meeting Discord commands - `/meeting add|list|edit|delete`.
//!
//! Calendar management. Meetings are referenced by their numeric ID, which
//! `/meeting list` shows. Malformed dates, times and labels are rejected by the
//! core parsers and reported back by the framework error handler.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, handlers::autocomplete, say_chunked},
        core::{
            meeting::{self as meetings, MeetingChanges},
            types::{MeetingKind, Weekday},
        },
        entities::meeting,
        errors::{Error, Result},
    };
    use std::fmt::Write;

    /// One list line: `#12 2024-01-04 19:30 5A NORMAL`.
    fn describe(meeting: &meeting::Model) -> String {
        format!(
            "#{} {} {} {} {}",
            meeting.id,
            meeting.date.format("%Y-%m-%d"),
            meeting.time.as_deref().unwrap_or("--:--"),
            meeting.weekday,
            meeting.kind
        )
    }

    /// Parent command for managing the meeting calendar.
    #[poise::command(
        slash_command,
        rename = "meeting",
        subcommands("meeting_add", "meeting_list", "meeting_edit", "meeting_delete")
    )]
    pub async fn meeting_manage(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Meeting management command. Available subcommands:\n\
            `/meeting add` - Schedule a meeting\n\
            `/meeting list` - List the calendar\n\
            `/meeting edit` - Change a meeting's date, time, weekday or kind\n\
            `/meeting delete` - Delete a meeting and its attendance records";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Schedules a meeting. The weekday is derived from the date unless given.
    #[poise::command(slash_command, rename = "add")]
    pub async fn meeting_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Date (YYYY-MM-DD or DD/MM/YYYY)"] date: String,
        #[description = "Kind: NORMAL, OBRIGACAO or DESENVOLVIMENTO"]
        #[autocomplete = "autocomplete::autocomplete_meeting_kind"]
        kind: String,
        #[description = "Start time HH:MM (optional)"] time: Option<String>,
        #[description = "Weekday slot 5A, SAB or DOM (default: from the date)"]
        #[autocomplete = "autocomplete::autocomplete_weekday"]
        weekday: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;

        let date = meetings::parse_meeting_date(&date)?;
        let kind: MeetingKind = kind.parse()?;
        let weekday = weekday.as_deref().map(str::parse::<Weekday>).transpose()?;

        let created = meetings::create_meeting(db, date, time, weekday, kind).await?;

        ctx.say(format!("✅ Scheduled meeting **{}**", describe(&created)))
            .await?;
        Ok(())
    }

    /// Lists the meeting calendar.
    #[poise::command(slash_command, rename = "list")]
    pub async fn meeting_list(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Only show meetings from today on (default: false)"] upcoming: Option<
            bool,
        >,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let today = chrono::Local::now().date_naive();

        let all_meetings = meetings::get_all_meetings(db).await?;
        let shown: Vec<&meeting::Model> = all_meetings
            .iter()
            .filter(|m| !upcoming.unwrap_or(false) || m.date >= today)
            .collect();

        if shown.is_empty() {
            ctx.say("📅 No meetings found. Schedule one with `/meeting add`.")
                .await?;
            return Ok(());
        }

        let mut response = format!("📅 **Meetings ({})**\n\n", shown.len());
        for m in shown {
            let marker = if m.date <= today { "✔️" } else { "🕒" };
            writeln!(&mut response, "{marker} `{}`", describe(m))?;
        }

        say_chunked(ctx, &response).await
    }

    /// Changes a meeting's date, time, weekday slot or kind.
    ///
    /// Changing only the date keeps the stored weekday slot.
    #[poise::command(slash_command, rename = "edit")]
    pub async fn meeting_edit(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Meeting ID (see /meeting list)"] meeting_id: i64,
        #[description = "New date (YYYY-MM-DD or DD/MM/YYYY)"] date: Option<String>,
        #[description = "New start time HH:MM"] time: Option<String>,
        #[description = "Remove the start time"] clear_time: Option<bool>,
        #[description = "New weekday slot"]
        #[autocomplete = "autocomplete::autocomplete_weekday"]
        weekday: Option<String>,
        #[description = "New kind"]
        #[autocomplete = "autocomplete::autocomplete_meeting_kind"]
        kind: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;

        let time = if clear_time.unwrap_or(false) {
            Some(None)
        } else {
            time.map(Some)
        };

        let changes = MeetingChanges {
            date: date.as_deref().map(meetings::parse_meeting_date).transpose()?,
            time,
            weekday: weekday.as_deref().map(str::parse::<Weekday>).transpose()?,
            kind: kind.as_deref().map(str::parse::<MeetingKind>).transpose()?,
        };

        if changes.is_empty() {
            ctx.say("❌ Please specify at least one field to update (date, time, weekday or kind).")
                .await?;
            return Ok(());
        }

        let updated = meetings::update_meeting(db, meeting_id, changes).await?;
        ctx.say(format!("✅ Updated meeting **{}**", describe(&updated)))
            .await?;
        Ok(())
    }

    /// Deletes a meeting together with its attendance records.
    #[poise::command(slash_command, rename = "delete")]
    pub async fn meeting_delete(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Meeting ID (see /meeting list)"] meeting_id: i64,
    ) -> Result<()> {
        let db = &ctx.data().database;

        let removed = meetings::delete_meeting(db, meeting_id).await?;
        ctx.say(format!(
            "✅ Deleted meeting #{meeting_id} and {removed} attendance record{}.",
            if removed == 1 { "" } else { "s" }
        ))
        .await?;
        Ok(())
    }
}

pub use inner::*;
