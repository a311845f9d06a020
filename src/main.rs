//! ShedLog Telegram Bot
//!
//! Main application entry point

use std::sync::Arc;
use std::time::Duration;
use teloxide::{prelude::*, types::{CallbackQuery, Update}};
use teloxide::dispatching::UpdateHandler;
use teloxide::utils::command::BotCommands;
use tracing::{info, warn, error};

use ShedLog::{
    config::Settings,
    utils::{logging, helpers::offset_from_hours, SystemClock, ShedLogError},
    services::ServiceFactory,
    state::{DialogueEngine, StateStorage, StateStorageManager},
    handlers::{handle_callback_query, handle_command, handle_message, Command},
};

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging; the guard flushes the log file on exit
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", ShedLog::info());

    // Initialize bot
    let mut bot = Bot::new(&settings.bot.token);
    if let Some(api_url) = &settings.bot.api_url {
        bot = bot.set_api_url(url::Url::parse(api_url)?);
    }

    // Initialize services
    info!("Initializing services...");
    let services = ServiceFactory::new(bot.clone(), &settings)?;

    // Initialize state management
    let ttl = settings.dialogue.ttl_seconds.map(Duration::from_secs);
    let state_storage = StateStorage::new(ttl);
    let mut storage_manager = StateStorageManager::new(
        state_storage.clone(),
        Duration::from_secs(settings.dialogue.cleanup_interval_seconds),
    );
    if ttl.is_some() {
        storage_manager.start_cleanup();
    }

    let offset = offset_from_hours(settings.dialogue.utc_offset_hours).ok_or_else(|| {
        ShedLogError::Config(format!("Invalid UTC offset: {}", settings.dialogue.utc_offset_hours))
    })?;
    let engine = DialogueEngine::new(
        state_storage,
        services.event_store(),
        Arc::new(SystemClock::new(offset)),
        settings.dialogue.clone(),
    );

    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        warn!(error = %e, "Failed to register bot commands");
    }

    info!("Setting up bot handlers...");

    let handler = create_handler();

    let mut dispatcher = Dispatcher::builder(bot.clone(), handler)
        .dependencies(dptree::deps![engine])
        .default_handler(|upd| async move {
            warn!("Unhandled update: {:?}", upd);
        })
        .enable_ctrlc_handler()
        .build();

    info!("ShedLog bot is ready, starting polling...");

    dispatcher.dispatch().await;

    storage_manager.stop_cleanup();
    info!("ShedLog bot has been shut down.");

    Ok(())
}

/// Create the main update handler
fn create_handler() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    use teloxide::dispatching::UpdateFilterExt;

    dptree::entry()
        .branch(
            Update::filter_message()
                .branch(
                    // Handle commands
                    dptree::entry()
                        .filter_command::<Command>()
                        .endpoint(handle_commands),
                )
                .branch(
                    // Handle free-text answers
                    dptree::endpoint(handle_messages),
                ),
        )
        .branch(
            // Handle inline button presses
            Update::filter_callback_query().endpoint(handle_callbacks),
        )
}

/// Handle bot commands
async fn handle_commands(bot: Bot, msg: Message, cmd: Command, engine: DialogueEngine) -> HandlerResult {
    if let Err(e) = handle_command(bot, msg, cmd, engine).await {
        error!(error = %e, severity = %e.severity(), recoverable = e.is_recoverable(), "Error handling command");
        return Err(e.into());
    }

    Ok(())
}

/// Handle regular messages
async fn handle_messages(bot: Bot, msg: Message, engine: DialogueEngine) -> HandlerResult {
    if let Err(e) = handle_message(bot, msg, engine).await {
        error!(error = %e, severity = %e.severity(), recoverable = e.is_recoverable(), "Error handling message");
        return Err(e.into());
    }

    Ok(())
}

/// Handle callback queries
async fn handle_callbacks(bot: Bot, query: CallbackQuery, engine: DialogueEngine) -> HandlerResult {
    let user_id = query.from.id.0 as i64;

    if let Err(e) = handle_callback_query(bot, query, engine).await {
        error!(user_id = user_id, error = %e, severity = %e.severity(), "Error handling callback query");
        return Err(e.into());
    }

    Ok(())
}
