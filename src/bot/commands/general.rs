//! General Discord commands - ping, help, and other utility commands.
//! This module contains simple commands that don't require database operations
//! and provide basic bot functionality and user assistance.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "**AttendanceBuddy Help**\n\
        Here is a summary of all available commands for AttendanceBuddy.\n\n\
        **Attendance**\n\
        • `/mark <meeting_id> <member> <status> [justification]` - Records OK, FALTA_SEM or FALTA_JUST.\n\
        • `/attendance <meeting_id>` - Lists who was marked at a meeting.\n\n\
        **Reports**\n\
        • `/report` - Frequency of every member, with the realized meeting totals.\n\
        • `/dashboard` - Headline numbers and the next meeting.\n\n\
        **Management Commands**\n\
        • `/member <subcommand>` - Manage members (add, list, edit, delete).\n\
        • `/meeting <subcommand>` - Manage meetings (add, list, edit, delete).\n\n\
        **Utility Commands**\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.\n\n\
        Members missing from a past meeting count as FALTA_SEM.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
