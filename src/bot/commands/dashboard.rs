//! Dashboard Discord command - the six overview cards as one embed.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, author_workspace, render},
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;

    /// Shows the shop's dashboard counters.
    #[poise::command(slash_command, prefix_command)]
    pub async fn dashboard(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let workspace = author_workspace(ctx).await?;
        let stats = workspace.with_snapshot(|snapshot| snapshot.stats);

        let fields: Vec<(String, String, bool)> =
            stats.cards().iter().map(render::card_field).collect();

        let embed = serenity::CreateEmbed::default()
            .title("🎨 Dashboard")
            .description("Live overview of your paint shop")
            .color(0x0034_98DB) // Blue color
            .fields(fields)
            .footer(serenity::CreateEmbedFooter::new(render::rules_footer(
                &workspace.rules(),
            )));

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }
}

pub use inner::*;
