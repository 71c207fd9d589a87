use dotenvy::dotenv;
use paint_desk::{
    bot, config,
    errors::{Error, Result},
    store::SeaOrmStore,
};
use std::{env, sync::Arc};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load settings (app id and business rules)
    let settings = config::settings::load_default_config()
        .inspect_err(|e| error!("Failed to load settings: {}", e))?;

    // 4. Connect to the database and make sure the documents table exists
    let db = config::database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    config::database::create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {}", e))?;

    let store = Arc::new(SeaOrmStore::new(db, settings.app_id.clone()));

    // 5. Run the bot
    // DISCORD_BOT_TOKEN is read directly before use, never stored in settings
    let token = env::var("DISCORD_BOT_TOKEN")
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {}", e))
        .map_err(Error::EnvVar)?;

    bot::run_bot(token, store, settings).await
}
