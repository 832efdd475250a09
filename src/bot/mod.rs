//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for the AttendanceBuddy
//! application, including all slash commands, autocomplete handlers, bot
//! context management and the framework setup.

/// Discord command implementations (member, meeting, attendance, report, general)
pub mod commands;
/// Discord interaction handlers (autocomplete, etc.)
pub mod handlers;

use crate::errors::{Error, Result};
use poise::serenity_prelude as serenity;
use sea_orm::DatabaseConnection;
use tracing::{error, info, warn};

/// Discord rejects messages longer than this many characters.
pub const MESSAGE_LIMIT: usize = 2000;
/// Maximum number of fields in one embed.
pub const EMBED_FIELD_LIMIT: usize = 25;
/// Maximum total characters across an embed's title, description, fields and footer.
pub const EMBED_CHAR_LIMIT: usize = 6000;
/// Maximum characters in an embed field name.
pub const FIELD_NAME_LIMIT: usize = 256;
/// Maximum characters in an embed field value.
pub const FIELD_VALUE_LIMIT: usize = 1024;

/// An embed field: name, value, inline.
pub type EmbedField = (String, String, bool);

/// Shared data available to all bot commands.
/// This structure holds the database connection and any other global state
/// that commands need to access.
pub struct BotData {
    /// Database connection for all database operations
    pub database: DatabaseConnection,
}

impl BotData {
    /// Creates a new `BotData` instance with the given database connection.
    #[must_use]
    pub const fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }
}

pub use commands::*;
pub use handlers::*;

/// Splits `text` into messages of at most `limit` characters, breaking on
/// line boundaries. A single line longer than `limit` is split mid-line.
#[must_use]
pub fn split_message(text: &str, limit: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for line in text.lines() {
        let mut line = line;
        while line.chars().count() > limit {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
            }
            let split_at = line
                .char_indices()
                .nth(limit)
                .map_or(line.len(), |(i, _)| i);
            chunks.push(line[..split_at].to_string());
            line = &line[split_at..];
        }

        let needed =
            current.chars().count() + line.chars().count() + usize::from(!current.is_empty());
        if needed > limit && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push('\n');
        }
        current.push_str(line);
    }

    if !current.trim().is_empty() {
        chunks.push(current);
    }
    chunks
}

/// Shortens `text` to at most `limit` characters, ending with `…` when cut.
#[must_use]
pub fn truncate_chars(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let mut shortened: String = text.chars().take(limit.saturating_sub(1)).collect();
    shortened.push('…');
    shortened
}

/// Groups fields into embed pages.
///
/// Names and values are truncated to Discord's per-field limits. A page holds
/// at most [`EMBED_FIELD_LIMIT`] fields, and its fields plus `reserved`
/// characters (title, description, footer) stay within [`EMBED_CHAR_LIMIT`].
#[must_use]
pub fn paginate_embed_fields(fields: Vec<EmbedField>, reserved: usize) -> Vec<Vec<EmbedField>> {
    let budget = EMBED_CHAR_LIMIT.saturating_sub(reserved);
    let mut pages = Vec::new();
    let mut current: Vec<EmbedField> = Vec::new();
    let mut used = 0;

    for (name, value, inline) in fields {
        let name = truncate_chars(&name, FIELD_NAME_LIMIT);
        let value = truncate_chars(&value, FIELD_VALUE_LIMIT);
        let size = name.chars().count() + value.chars().count();

        if !current.is_empty() && (current.len() == EMBED_FIELD_LIMIT || used + size > budget) {
            pages.push(std::mem::take(&mut current));
            used = 0;
        }
        used += size;
        current.push((name, value, inline));
    }

    if !current.is_empty() {
        pages.push(current);
    }
    pages
}

/// Sends `text`, split over several messages when it exceeds Discord's limit.
pub async fn say_chunked(ctx: poise::Context<'_, BotData, Error>, text: &str) -> Result<()> {
    for chunk in split_message(text, MESSAGE_LIMIT) {
        ctx.say(chunk).await?;
    }
    Ok(())
}

/// Every command the bot registers.
#[must_use]
pub fn all_commands() -> Vec<poise::Command<BotData, Error>> {
    vec![
        ping(),
        help(),
        member_manage(),
        meeting_manage(),
        mark(),
        attendance(),
        report(),
        dashboard(),
    ]
}

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            if error.is_user_error() {
                warn!("Rejected input in command `{}`: {}", ctx.command().name, error);
            } else {
                error!("Error in command `{}`: {:?}", ctx.command().name, error);
            }
            if let Err(e) = ctx.say(format!("❌ {error}")).await {
                error!("Failed to send error message: {}", e);
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}

/// Builds the poise framework and runs the Discord client until it stops.
pub async fn run_bot(token: String, database: DatabaseConnection) -> Result<()> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: all_commands(),
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(BotData::new(database))
            })
        })
        .build();

    let intents = serenity::GatewayIntents::non_privileged();

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await
        .inspect_err(|e| error!("Error creating client: {:?}", e))?;

    info!("Starting bot client...");
    client
        .start()
        .await
        .inspect_err(|e| error!("Client error: {:?}", e))?;
    Ok(())
}
