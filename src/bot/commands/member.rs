//! Member Discord commands - `/member add|list|edit|delete`.
//!
//! Roster management. Members are referenced by name; autocomplete offers the
//! existing names and the evaluation rule labels.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, handlers::autocomplete, say_chunked},
        core::{member as members, types::EvaluationRule},
        errors::{Error, Result},
    };
    use std::fmt::Write;

    /// Parent command for managing the member roster.
    #[poise::command(
        slash_command,
        rename = "member",
        subcommands("member_add", "member_list", "member_edit", "member_delete")
    )]
    pub async fn member_manage(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Member management command. Available subcommands:\n\
            `/member add` - Add a member\n\
            `/member list` - List all members\n\
            `/member edit` - Rename a member or change their evaluation rule\n\
            `/member delete` - Delete a member and their attendance records";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Adds a member to the roster.
    #[poise::command(slash_command, rename = "add")]
    pub async fn member_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Member name"] name: String,
        #[description = "Evaluation rule: AMBAS, 5A or SAB (default: AMBAS)"]
        #[autocomplete = "autocomplete::autocomplete_evaluation_rule"]
        evaluation_rule: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;

        let rule = match evaluation_rule.as_deref().map(str::parse::<EvaluationRule>) {
            None => EvaluationRule::Ambas,
            Some(Ok(rule)) => rule,
            Some(Err(e)) => {
                ctx.say(format!("❌ {e}. Use AMBAS, 5A or SAB.")).await?;
                return Ok(());
            }
        };

        if members::get_member_by_name(db, &name).await?.is_some() {
            ctx.say(format!("❌ A member named '{}' already exists.", name.trim()))
                .await?;
            return Ok(());
        }

        match members::create_member(db, name, rule).await {
            Ok(member) => {
                ctx.say(format!(
                    "✅ Added member **{}** (#{}) evaluated on {}.",
                    member.name, member.id, member.evaluation_rule
                ))
                .await?;
            }
            Err(e @ Error::Validation { .. }) => {
                ctx.say(format!("❌ {e}")).await?;
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    /// Lists every member with their evaluation rule.
    #[poise::command(slash_command, rename = "list")]
    pub async fn member_list(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let db = &ctx.data().database;

        let all_members = members::get_all_members(db).await?;
        if all_members.is_empty() {
            ctx.say("👥 No members yet. Add one with `/member add`.")
                .await?;
            return Ok(());
        }

        let mut response = format!("👥 **Members ({})**\n\n", all_members.len());
        for member in &all_members {
            writeln!(
                &mut response,
                "• **{}** (#{}) - {}",
                member.name, member.id, member.evaluation_rule
            )?;
        }

        say_chunked(ctx, &response).await
    }

    /// Renames a member or changes their evaluation rule.
    #[poise::command(slash_command, rename = "edit")]
    pub async fn member_edit(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Member to edit"]
        #[autocomplete = "autocomplete::autocomplete_member_name"]
        name: String,
        #[description = "New name (optional)"] new_name: Option<String>,
        #[description = "New evaluation rule (optional)"]
        #[autocomplete = "autocomplete::autocomplete_evaluation_rule"]
        evaluation_rule: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;

        if new_name.is_none() && evaluation_rule.is_none() {
            ctx.say("❌ Please specify at least one field to update (new_name or evaluation_rule).")
                .await?;
            return Ok(());
        }

        let rule = match evaluation_rule.as_deref().map(str::parse::<EvaluationRule>) {
            None => None,
            Some(Ok(rule)) => Some(rule),
            Some(Err(e)) => {
                ctx.say(format!("❌ {e}. Use AMBAS, 5A or SAB.")).await?;
                return Ok(());
            }
        };

        let Some(member) = members::get_member_by_name(db, &name).await? else {
            ctx.say(format!("❌ Member '{name}' not found.")).await?;
            return Ok(());
        };

        match members::update_member(db, member.id, new_name, rule).await {
            Ok(updated) => {
                ctx.say(format!(
                    "✅ Updated member **{}**: evaluated on {}.",
                    updated.name, updated.evaluation_rule
                ))
                .await?;
            }
            Err(e @ Error::Validation { .. }) => {
                ctx.say(format!("❌ {e}")).await?;
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    /// Deletes a member together with their attendance records.
    #[poise::command(slash_command, rename = "delete")]
    pub async fn member_delete(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Member to delete"]
        #[autocomplete = "autocomplete::autocomplete_member_name"]
        name: String,
    ) -> Result<()> {
        let db = &ctx.data().database;

        let Some(member) = members::get_member_by_name(db, &name).await? else {
            ctx.say(format!("❌ Member '{name}' not found.")).await?;
            return Ok(());
        };

        let removed = members::delete_member(db, member.id).await?;
        ctx.say(format!(
            "✅ Deleted member **{}** and {removed} attendance record{}.",
            member.name,
            if removed == 1 { "" } else { "s" }
        ))
        .await?;
        Ok(())
    }
}

pub use inner::*;
