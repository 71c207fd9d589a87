//! General Discord commands - ping, help, and session control.
//! This module contains simple commands that don't read any records.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        core::records::OwnerId,
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
        let help_text = "**PaintDesk Help**\n\
        Here is a summary of all available commands for PaintDesk.\n\n\
        **Overview**\n\
        • `/dashboard` - Shows order, customer, painter and stock counters.\n\
        • `/report <kind> [from] [to] [search]` - Generates a report, optionally for a date range.\n\n\
        **Lists** (all take an optional `search`)\n\
        • `/orders`, `/customers`, `/painters`, `/stock`, `/mixes`\n\n\
        **Adding Records**\n\
        • `/order_add <order_id> <date> <customer> <painter> <amount> <status>`\n\
        • `/customer_add <name> <contact> <mobile>`\n\
        • `/painter_add <name> <contact>`\n\
        • `/stock_add <product> <color> <quantity>`\n\
        • `/mix_add <name> <hex> <base_colors> <ratios> <quantity>`\n\
        Run an add command without arguments to see its fields.\n\n\
        **Utility Commands**\n\
        • `/signout` - Stops live updates for your records until your next command.\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Closes your live workspace.
    #[poise::command(slash_command, prefix_command)]
    pub async fn signout(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let owner = OwnerId::new(ctx.author().id.to_string())?;
        if ctx.data().end_session(&owner).await {
            ctx.say("👋 Signed out. Your records stay saved.").await?;
        } else {
            ctx.say("ℹ️ You have no open session.").await?;
        }
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
