//! Autocomplete handlers for Discord slash command parameters.
//!
//! Suggestions come from the caller's live snapshot, so they reflect records
//! added moments ago without another database round trip.

use crate::{
    bot::{BotData, author_workspace},
    core::records::{OrderStatus, Painter, Stored},
    errors::Error,
};

/// Discord's autocomplete limit.
const MAX_SUGGESTIONS: usize = 25;

/// Painter names containing `partial`, case-insensitive, sorted and deduplicated.
#[must_use]
pub fn matching_painter_names(painters: &[Stored<Painter>], partial: &str) -> Vec<String> {
    let partial_lower = partial.to_lowercase();
    let mut names: Vec<String> = painters
        .iter()
        .filter(|p| p.name.to_lowercase().contains(&partial_lower))
        .map(|p| p.name.clone())
        .collect();
    names.sort();
    names.dedup();
    names.truncate(MAX_SUGGESTIONS);
    names
}

/// Provides autocomplete suggestions for painter names.
pub async fn autocomplete_painter_name(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let Ok(workspace) = author_workspace(ctx).await else {
        return Vec::new();
    };
    workspace.with_snapshot(|snapshot| matching_painter_names(&snapshot.painters, partial))
}

/// Provides autocomplete suggestions for order statuses.
pub async fn autocomplete_order_status(
    _ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let partial_lower = partial.to_lowercase();
    OrderStatus::ALL
        .iter()
        .map(|status| status.as_str())
        .filter(|label| label.to_lowercase().starts_with(&partial_lower))
        .map(ToString::to_string)
        .collect()
}
