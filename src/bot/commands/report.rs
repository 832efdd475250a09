//! Report Discord commands - `/report` and `/dashboard`.
//!
//! Both recompute everything from a fresh fetch, using the local date as the
//! cutoff between realized and future meetings.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, EmbedField, paginate_embed_fields},
        core::report::{self, FrequencyBand},
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;

    /// Room kept for the footer text.
    const FOOTER_ALLOWANCE: usize = 80;

    /// Shows the frequency of every member.
    ///
    /// The report lists the realized meeting totals, then one field per member
    /// with their weekday ratio, per-kind ratios and absences. Members are
    /// spread over as many embeds as Discord's size limits require.
    #[poise::command(slash_command, prefix_command)]
    pub async fn report(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let db = &ctx.data().database;
        let today = chrono::Local::now().date_naive();

        ctx.defer().await?;

        let full_report = report::generate_frequency_report(db, today).await?;

        if full_report.members.is_empty() {
            ctx.say("📊 No members found. Add one with `/member add` to get started!")
                .await?;
            return Ok(());
        }

        let fields: Vec<EmbedField> = full_report
            .members
            .iter()
            .map(|row| {
                let band =
                    FrequencyBand::classify(report::headline_frequency(&row.frequency));
                let name = format!(
                    "{} {} ({})",
                    band.emoji(),
                    row.member.name,
                    row.member.evaluation_rule
                );
                (name, report::format_member_summary(row), false)
            })
            .collect();

        let title = "📊 Frequency Report";
        let description = format!(
            "As of: {}\n{}",
            full_report.today.format("%Y-%m-%d"),
            report::format_totals(&full_report.totals)
        );
        let member_count = full_report.members.len();
        let plural = if member_count == 1 { "" } else { "s" };

        let reserved = title.chars().count() + description.chars().count() + FOOTER_ALLOWANCE;
        let pages = paginate_embed_fields(fields, reserved);
        let page_count = pages.len();

        for (page, chunk) in pages.into_iter().enumerate() {
            let embed = serenity::CreateEmbed::default()
                .title(title)
                .description(description.clone())
                .color(0x0034_98DB) // Blue color
                .fields(chunk)
                .footer(serenity::CreateEmbedFooter::new(format!(
                    "AttendanceBuddy | {member_count} member{plural} | page {}/{page_count}",
                    page + 1
                )));

            ctx.send(poise::CreateReply::default().embed(embed)).await?;
        }

        Ok(())
    }

    /// Shows the headline numbers: meetings, members, average frequency and
    /// the next meeting.
    #[poise::command(slash_command, prefix_command)]
    pub async fn dashboard(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let db = &ctx.data().database;
        let today = chrono::Local::now().date_naive();

        let summary = report::generate_dashboard(db, today).await?;

        let band = FrequencyBand::classify(summary.average_frequency);
        let next = summary.next_meeting.as_ref().map_or_else(
            || "_None scheduled_".to_string(),
            |m| {
                format!(
                    "#{} {} {} {} {}",
                    m.id,
                    m.date.format("%Y-%m-%d"),
                    m.time.as_deref().unwrap_or(""),
                    m.weekday,
                    m.kind
                )
            },
        );

        let embed = serenity::CreateEmbed::default()
            .title("📈 Dashboard")
            .description(format!("As of: {}", today.format("%Y-%m-%d")))
            .color(0x0058_65F2) // Discord purple
            .field("Meetings", summary.total_meetings.to_string(), true)
            .field("Realized", summary.realized_meetings.to_string(), true)
            .field("Members", summary.member_count.to_string(), true)
            .field(
                format!("{} Average frequency", band.emoji()),
                report::format_progress_bar(summary.average_frequency, Some(15)),
                false,
            )
            .field("Next meeting", next, false);

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }
}

pub use inner::*;
