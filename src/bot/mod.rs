//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for `PaintDesk`: the slash
//! commands, autocomplete handlers, and the shared bot context. Each Discord
//! user is an owner with a live workspace over their own records.

/// Discord command implementations (dashboard, records, reports, general)
pub mod commands;
/// Discord interaction handlers (autocomplete, etc.)
pub mod handlers;
/// Text rendering of tables and cards
pub mod render;

use crate::{
    config::Settings,
    core::{records::OwnerId, table::TableView, workspace::Workspace},
    errors::{Error, Result},
    store::SeaOrmStore,
};
use poise::serenity_prelude as serenity;
use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::Mutex;
use tracing::{error, info, instrument, warn};

/// A user's live workspace over the database-backed store.
pub type UserWorkspace = Workspace<SeaOrmStore>;

struct Session {
    workspace: Arc<UserWorkspace>,
    last_used: Instant,
}

/// Shared data available to all bot commands.
/// This structure holds the record store, the settings, and one live
/// workspace per recently active user.
pub struct BotData {
    /// Database-backed record store shared by all workspaces
    pub store: Arc<SeaOrmStore>,
    /// Application settings, including the business rules
    pub settings: Settings,
    idle_timeout: Duration,
    sessions: Mutex<HashMap<OwnerId, Session>>,
}

impl BotData {
    /// Creates a new `BotData` instance with no open workspaces.
    #[must_use]
    pub fn new(store: Arc<SeaOrmStore>, settings: Settings) -> Self {
        Self {
            store,
            idle_timeout: settings.session_idle(),
            settings,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the owner's workspace, opening it on first use.
    ///
    /// Other owners' workspaces unused for longer than the idle timeout are
    /// closed on the way.
    pub async fn workspace(&self, owner: OwnerId) -> Result<Arc<UserWorkspace>> {
        let mut sessions = self.sessions.lock().await;
        let now = Instant::now();
        sessions.retain(|id, session| {
            let keep = *id == owner || now.duration_since(session.last_used) < self.idle_timeout;
            if !keep {
                session.workspace.close();
                info!(owner = %id, "Idle session closed");
            }
            keep
        });

        if let Some(session) = sessions.get_mut(&owner) {
            session.last_used = now;
            return Ok(Arc::clone(&session.workspace));
        }

        let workspace = Arc::new(
            Workspace::open(
                Arc::clone(&self.store),
                Some(owner.clone()),
                self.settings.business,
            )
            .await?,
        );
        sessions.insert(
            owner,
            Session {
                workspace: Arc::clone(&workspace),
                last_used: Instant::now(),
            },
        );
        Ok(workspace)
    }

    /// Number of open workspaces.
    pub async fn session_count(&self) -> usize {
        self.sessions.lock().await.len()
    }

    /// Closes and forgets the owner's workspace. Returns whether one was open.
    pub async fn end_session(&self, owner: &OwnerId) -> bool {
        let Some(session) = self.sessions.lock().await.remove(owner) else {
            return false;
        };
        session.workspace.close();
        info!(%owner, "Session ended");
        true
    }
}

/// The workspace of the user who invoked the command.
pub async fn author_workspace(ctx: poise::Context<'_, BotData, Error>) -> Result<Arc<UserWorkspace>> {
    let owner = OwnerId::new(ctx.author().id.to_string())?;
    ctx.data().workspace(owner).await
}

/// Replies with a titled table and an optional footer line.
pub async fn reply_table(
    ctx: poise::Context<'_, BotData, Error>,
    title: &str,
    table: &TableView,
    footer: Option<String>,
) -> Result<()> {
    let footer = footer.map(|line| format!("\n{line}")).unwrap_or_default();
    let limit = render::MESSAGE_LIMIT.saturating_sub(title.len() + footer.len() + 8);
    let body = render::render_table(table, limit);
    ctx.say(format!("**{title}**\n{body}{footer}")).await?;
    Ok(())
}

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {:?}", error);
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            let reply = match &error {
                Error::Validation(errors) => format!("❌ {errors}"),
                Error::Unauthenticated => "❌ You need to be signed in to do that.".to_string(),
                Error::StoreUnavailable { .. } | Error::Database(_) => {
                    "❌ The shop records could not be reached. Please try again.".to_string()
                }
                other => format!("An error occurred: {other}"),
            };
            warn!("Error in command `{}`: {:?}", ctx.command().name, error);
            if let Err(e) = ctx.say(reply).await {
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
#[instrument(skip(token, store, settings))]
pub async fn run_bot(token: String, store: Arc<SeaOrmStore>, settings: Settings) -> Result<()> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::ping(),
                commands::help(),
                commands::dashboard(),
                commands::orders(),
                commands::customers(),
                commands::painters(),
                commands::stock(),
                commands::mixes(),
                commands::order_add(),
                commands::customer_add(),
                commands::painter_add(),
                commands::stock_add(),
                commands::mix_add(),
                commands::report(),
                commands::signout(),
            ],
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(BotData::new(store, settings))
            })
        })
        .build();

    let intents = serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::DIRECT_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT;

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::Client::builder(&token, intents)
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
