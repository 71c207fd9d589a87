//! Report Discord command - orders, mixing, commission and inventory reports.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, author_workspace, reply_table},
        core::{
            report::{DateWindow, ReportKind, build_report},
            screens::DATE_FORMAT,
        },
        errors::{Error, Result},
    };
    use chrono::NaiveDate;

    #[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
    pub enum ReportChoice {
        #[name = "Customer Orders"]
        Orders,
        #[name = "Color Mixing"]
        Mixing,
        #[name = "Painter Commissions"]
        Painters,
        #[name = "Inventory"]
        Inventory,
    }

    impl From<ReportChoice> for ReportKind {
        fn from(choice: ReportChoice) -> Self {
            match choice {
                ReportChoice::Orders => Self::Orders,
                ReportChoice::Mixing => Self::Mixing,
                ReportChoice::Painters => Self::Painters,
                ReportChoice::Inventory => Self::Inventory,
            }
        }
    }

    fn parse_date(raw: Option<&str>) -> std::result::Result<Option<NaiveDate>, String> {
        raw.map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                NaiveDate::parse_from_str(s, DATE_FORMAT)
                    .map_err(|_| format!("❌ `{s}` is not a date; use YYYY-MM-DD."))
            })
            .transpose()
    }

    /// Generates a report, optionally limited to a date range.
    #[poise::command(slash_command, prefix_command)]
    pub async fn report(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Which report to generate"] kind: ReportChoice,
        #[description = "First day to include (YYYY-MM-DD)"] from: Option<String>,
        #[description = "Last day to include (YYYY-MM-DD)"] to: Option<String>,
        #[description = "Filter the report rows"] search: Option<String>,
    ) -> Result<()> {
        let window = match (parse_date(from.as_deref()), parse_date(to.as_deref())) {
            (Ok(start), Ok(end)) => DateWindow::new(start, end),
            (Err(message), _) | (_, Err(message)) => {
                ctx.say(message).await?;
                return Ok(());
            }
        };

        let workspace = author_workspace(ctx).await?;
        let kind = ReportKind::from(kind);
        let report = workspace.with_snapshot(|snapshot| {
            build_report(kind, snapshot, &window, search.as_deref().unwrap_or_default())
        });

        let title = match (report.window.start, report.window.end) {
            (None, None) => report.kind.title().to_string(),
            (start, end) => format!(
                "{} ({} to {})",
                report.kind.title(),
                start.map_or_else(|| "earliest".to_string(), |d| d.format(DATE_FORMAT).to_string()),
                end.map_or_else(|| "latest".to_string(), |d| d.format(DATE_FORMAT).to_string()),
            ),
        };
        reply_table(
            ctx,
            &format!("{title}\n{}", report.kind.description()),
            &report.table,
            None,
        )
        .await
    }
}

pub use inner::*;
