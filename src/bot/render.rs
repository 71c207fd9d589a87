//! Text rendering of tables, cards and form feedback for Discord messages.
//!
//! Discord has no table widget, so a [`TableView`] is laid out as aligned
//! columns inside a code block and cut off at the message size limit.

use crate::{
    config::BusinessRules,
    core::{
        dashboard::{CardTone, StatCard},
        form::CreateForm,
        screens::AddAction,
        table::{BadgeVariant, Cell, EMPTY_MESSAGE, TableView},
    },
    errors::ValidationErrors,
};
use std::fmt::Write;

/// Discord's message length limit.
pub const MESSAGE_LIMIT: usize = 2000;

// Room kept for the closing fence and the "more rows" footer.
const FOOTER_RESERVE: usize = 48;

/// Marker shown in front of a badge label.
#[must_use]
pub const fn badge_marker(variant: BadgeVariant) -> &'static str {
    match variant {
        BadgeVariant::Default => "🟢",
        BadgeVariant::Secondary => "🟡",
        BadgeVariant::Destructive => "🔴",
        BadgeVariant::Outline => "⚪",
    }
}

/// The text of one cell.
#[must_use]
pub fn cell_text(cell: &Cell) -> String {
    match cell {
        Cell::Badge { variant, label } => format!("{} {label}", badge_marker(*variant)),
        Cell::Swatch { hex } => format!("🎨 {hex}"),
        other => other.to_string(),
    }
}

fn line(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect();
    padded.join(" | ").trim_end().to_string()
}

/// Lays a table out as a code block no longer than `limit` bytes.
///
/// Rows that do not fit are dropped and counted in a footer line.
#[must_use]
pub fn render_table(view: &TableView, limit: usize) -> String {
    if view.is_empty() {
        return format!("*{EMPTY_MESSAGE}*");
    }

    let headers: Vec<String> = view.headers.iter().map(ToString::to_string).collect();
    let rows: Vec<Vec<String>> = view
        .rows
        .iter()
        .map(|row| row.iter().map(cell_text).collect())
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();

    let mut out = String::from("```\n");
    out.push_str(&line(&headers, &widths));
    out.push('\n');
    out.push_str(&separator.join("-+-"));
    out.push('\n');

    let budget = limit.saturating_sub(FOOTER_RESERVE);
    let mut shown = 0;
    for row in &rows {
        let text = line(row, &widths);
        if out.len() + text.len() + 1 > budget {
            break;
        }
        out.push_str(&text);
        out.push('\n');
        shown += 1;
    }
    out.push_str("```");

    let hidden = rows.len() - shown;
    if hidden > 0 {
        let _ = write!(out, "\n…and {hidden} more row{}", if hidden == 1 { "" } else { "s" });
    }
    out
}

/// Marker for a dashboard card's tone.
#[must_use]
pub const fn tone_marker(tone: CardTone) -> &'static str {
    match tone {
        CardTone::Neutral => "📦",
        CardTone::Warning => "⚠️",
        CardTone::Success => "✅",
    }
}

/// Embed field `(name, value, inline)` for a dashboard card.
#[must_use]
pub fn card_field(card: &StatCard) -> (String, String, bool) {
    (
        format!("{} {}", tone_marker(card.tone), card.title),
        card.value.to_string(),
        true,
    )
}

/// Dashboard footer naming the rules the counters were computed with.
#[must_use]
pub fn rules_footer(rules: &BusinessRules) -> String {
    format!(
        "Commission {}% on completed orders · low stock at {} units or fewer",
        (rules.commission_rate * 10_000.0).round() / 100.0,
        rules.low_stock_threshold
    )
}

/// One bullet per rejected field.
#[must_use]
pub fn validation_message(title: &str, errors: &ValidationErrors) -> String {
    let mut out = format!("❌ **{title}** was not saved:\n");
    for (_, message) in errors.iter() {
        let _ = writeln!(out, "• {message}");
    }
    out
}

/// Footer pointing at the command behind a list's add action.
#[must_use]
pub fn add_hint(action: &AddAction) -> String {
    format!("➕ {}: `/{}`", action.label, action.command)
}

/// Field reference for a form, one line per field.
#[must_use]
pub fn form_usage(form: &CreateForm) -> String {
    let mut out = format!("**{}**\n", form.title());
    for field in form.fields() {
        let _ = write!(out, "• `{}` {}", field.name, field.label);
        if field.required {
            out.push_str(" (required)");
        }
        if let Some(placeholder) = field.placeholder {
            let _ = write!(out, " - {placeholder}");
        }
        if let Some(hint) = field.hint() {
            let _ = write!(out, " ({hint})");
        }
        out.push('\n');
    }
    out
}
