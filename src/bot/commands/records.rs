//! Record Discord commands - one list and one add command per record type.
//!
//! List commands render the matching screen over the caller's latest
//! snapshot. Add commands fill the matching create form from the command
//! arguments and submit it; nothing is saved unless every required field is
//! present and the record converts cleanly.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, author_workspace, handlers::autocomplete, render, reply_table},
        core::{
            form::{CreateForm, FromForm},
            records::{ColorMixing, Customer, Document, Order, Painter, Stock},
            screens,
        },
        errors::{Error, Result},
    };
    use std::sync::Arc;
    use tracing::warn;

    /// Fills `form` from command arguments and saves the record it describes.
    async fn submit<R: Document + FromForm>(
        ctx: poise::Context<'_, BotData, Error>,
        mut form: CreateForm,
        args: Vec<(&str, Option<String>)>,
    ) -> Result<()> {
        if args.iter().all(|(_, value)| value.is_none()) {
            ctx.say(render::form_usage(&form)).await?;
            return Ok(());
        }

        let workspace = author_workspace(ctx).await?;
        ctx.defer().await?;
        form.open();
        for (name, value) in args {
            if let Some(value) = value {
                form.set(name, value);
            }
        }

        let target = Arc::clone(&workspace);
        let outcome = form
            .submit(move |values| async move {
                let record = R::from_form(&values)?;
                target.add(record).await
            })
            .await;

        match outcome {
            Ok(saved) => {
                ctx.say(format!(
                    "✅ Saved to **{}** (ID: {})",
                    R::COLLECTION,
                    saved.id
                ))
                .await?;
            }
            Err(Error::Validation(errors)) => {
                ctx.say(render::validation_message(form.title(), &errors))
                    .await?;
            }
            Err(e) => {
                warn!(collection = %R::COLLECTION, "Save failed: {e}");
                ctx.say(format!(
                    "❌ Could not save to **{}**: {e}. Nothing was lost; try the command again.",
                    R::COLLECTION
                ))
                .await?;
            }
        }
        Ok(())
    }

    /// Lists orders, optionally filtered.
    #[poise::command(slash_command, prefix_command)]
    pub async fn orders(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Search by order ID, date, customer, painter or status"] search: Option<
            String,
        >,
    ) -> Result<()> {
        let workspace = author_workspace(ctx).await?;
        let screen = screens::orders_screen();
        let table = workspace
            .with_snapshot(|s| screen.view(&s.orders, search.as_deref().unwrap_or_default()));
        let footer = screen.add_action.as_ref().map(render::add_hint);
        reply_table(ctx, screen.title, &table, footer).await
    }

    /// Lists customers, optionally filtered.
    #[poise::command(slash_command, prefix_command)]
    pub async fn customers(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Search by name, contact or mobile number"] search: Option<String>,
    ) -> Result<()> {
        let workspace = author_workspace(ctx).await?;
        let screen = screens::customers_screen();
        let table = workspace
            .with_snapshot(|s| screen.view(&s.customers, search.as_deref().unwrap_or_default()));
        let footer = screen.add_action.as_ref().map(render::add_hint);
        reply_table(ctx, screen.title, &table, footer).await
    }

    /// Lists painters with their commissions, optionally filtered.
    #[poise::command(slash_command, prefix_command)]
    pub async fn painters(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Search by name or contact"] search: Option<String>,
    ) -> Result<()> {
        let workspace = author_workspace(ctx).await?;
        let screen = screens::painters_screen();
        let table = workspace.with_snapshot(|s| {
            screen.view(&s.painter_rows, search.as_deref().unwrap_or_default())
        });
        let footer = screen.add_action.as_ref().map(render::add_hint);
        reply_table(ctx, screen.title, &table, footer).await
    }

    /// Lists stock with its status, optionally filtered.
    #[poise::command(slash_command, prefix_command)]
    pub async fn stock(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Search by product, color or status"] search: Option<String>,
    ) -> Result<()> {
        let workspace = author_workspace(ctx).await?;
        let screen = screens::stock_screen();
        let table = workspace
            .with_snapshot(|s| screen.view(&s.stock_rows, search.as_deref().unwrap_or_default()));
        let footer = screen.add_action.as_ref().map(render::add_hint);
        reply_table(ctx, screen.title, &table, footer).await
    }

    /// Lists logged color mixes, optionally filtered.
    #[poise::command(slash_command, prefix_command)]
    pub async fn mixes(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Search by mix name, hex code or base color"] search: Option<String>,
    ) -> Result<()> {
        let workspace = author_workspace(ctx).await?;
        let screen = screens::mixing_screen();
        let table = workspace
            .with_snapshot(|s| screen.view(&s.mixing, search.as_deref().unwrap_or_default()));
        let footer = screen.add_action.as_ref().map(render::add_hint);
        reply_table(ctx, screen.title, &table, footer).await
    }

    /// Adds a customer order.
    #[poise::command(slash_command, prefix_command)]
    pub async fn order_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Order reference, e.g. ORD-2024-001"] order_id: Option<String>,
        #[description = "Order date as YYYY-MM-DD"] date: Option<String>,
        #[description = "Customer name"] customer: Option<String>,
        #[description = "Painter credited with the order"]
        #[autocomplete = "autocomplete::autocomplete_painter_name"]
        painter: Option<String>,
        #[description = "Order amount in dollars"] amount: Option<String>,
        #[description = "Pending, Mixing or Completed"]
        #[autocomplete = "autocomplete::autocomplete_order_status"]
        status: Option<String>,
    ) -> Result<()> {
        let workspace = author_workspace(ctx).await?;
        let form = workspace.with_snapshot(|s| screens::order_form(&s.painters));
        submit::<Order>(
            ctx,
            form,
            vec![
                ("orderId", order_id),
                ("date", date),
                ("customerName", customer),
                ("painterName", painter),
                ("amount", amount),
                ("status", status),
            ],
        )
        .await
    }

    /// Adds a customer.
    #[poise::command(slash_command, prefix_command)]
    pub async fn customer_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Full name"] name: Option<String>,
        #[description = "Email or phone"] contact: Option<String>,
        #[description = "Mobile number"] mobile: Option<String>,
    ) -> Result<()> {
        submit::<Customer>(
            ctx,
            screens::customer_form(),
            vec![("name", name), ("contact", contact), ("mobileNo", mobile)],
        )
        .await
    }

    /// Adds a painter.
    #[poise::command(slash_command, prefix_command)]
    pub async fn painter_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Full name"] name: Option<String>,
        #[description = "Phone or email"] contact: Option<String>,
    ) -> Result<()> {
        submit::<Painter>(
            ctx,
            screens::painter_form(),
            vec![("name", name), ("contact", contact)],
        )
        .await
    }

    /// Adds a stock item.
    #[poise::command(slash_command, prefix_command)]
    pub async fn stock_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Product name"] product: Option<String>,
        #[description = "Color"] color: Option<String>,
        #[description = "Units on the shelf"] quantity: Option<String>,
    ) -> Result<()> {
        submit::<Stock>(
            ctx,
            screens::stock_form(),
            vec![
                ("productName", product),
                ("color", color),
                ("quantity", quantity),
            ],
        )
        .await
    }

    /// Logs a custom color mix.
    #[poise::command(slash_command, prefix_command)]
    pub async fn mix_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Mix name"] name: Option<String>,
        #[description = "Preview color, e.g. #000080"] hex: Option<String>,
        #[description = "Comma-separated base colors"] base_colors: Option<String>,
        #[description = "Comma-separated ratios, e.g. 50, 40, 10"] ratios: Option<String>,
        #[description = "Liters mixed"] quantity: Option<String>,
    ) -> Result<()> {
        submit::<ColorMixing>(
            ctx,
            screens::mixing_form(),
            vec![
                ("mixName", name),
                ("hexCode", hex),
                ("baseColors", base_colors),
                ("ratios", ratios),
                ("quantity", quantity),
            ],
        )
        .await
    }
}

pub use inner::*;
