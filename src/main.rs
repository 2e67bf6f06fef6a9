use serenity::async_trait;
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::prelude::*;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn, error, debug};
use tracing_subscriber::EnvFilter;

mod api;
mod commands;
mod config;
mod models;
mod services;
mod utils;

use api::ledger::LedgerClient;
use config::AppConfig;
use services::session_service::SessionStore;

struct Handler;

struct BotData;

impl TypeMapKey for BotData {
    type Value = Instant;
}

/// Card screens and the shared ledger client
struct Bank;

impl TypeMapKey for Bank {
    type Value = Arc<SessionStore<LedgerClient>>;
}

struct Settings;

impl TypeMapKey for Settings {
    type Value = Arc<AppConfig>;
}

#[async_trait]
impl EventHandler for Handler {
    async fn message(&self, ctx: Context, msg: Message) {
        commands::handle_message(&ctx, &msg).await;
    }

    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("{} is connected!", ready.user.name);

        debug!("Checking Discord rate limit status...");
        match ctx.http.get_current_user().await {
            Ok(_) => {
                info!("No rate limit detected - Bot is fully ready!");
            }
            Err(e) => {
                let error_msg = e.to_string();
                if error_msg.contains("429") || error_msg.contains("rate limit") || error_msg.contains("Ratelimited") {
                    warn!("Bot is being rate limited by Discord! Error: {}", error_msg);
                } else {
                    warn!("Failed to check rate limit status: {}", error_msg);
                }
            }
        }
    }
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let mut filter = EnvFilter::from_default_env();
    for directive in ["futurepay=debug", "serenity=warn"] {
        match directive.parse() {
            Ok(d) => filter = filter.add_directive(d),
            Err(e) => eprintln!("Invalid log directive {}: {}", directive, e),
        }
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("💳 Starting FuturePay bot...");

    let config = match AppConfig::from_env() {
        Ok(c) => Arc::new(c),
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return;
        }
    };
    info!(
        "Ledger endpoint {} for card {} (history limit {}, timeout {:?})",
        config.api_url, config.card_number, config.history_limit, config.http_timeout
    );

    let ledger = match LedgerClient::with_timeout(config.api_url.clone(), config.http_timeout) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            error!("Failed to create ledger client: {}", e);
            return;
        }
    };
    let store = Arc::new(SessionStore::new(
        ledger,
        config.card_number.clone(),
        config.history_limit,
    ));

    let intents = GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT
        | GatewayIntents::GUILD_MESSAGES;

    let mut client = match Client::builder(&config.discord_token, intents)
        .event_handler(Handler)
        .await
    {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to create client: {}", e);
            return;
        }
    };

    {
        let mut data = client.data.write().await;
        data.insert::<BotData>(Instant::now());
        data.insert::<Bank>(store);
        data.insert::<Settings>(config);
    }

    if let Err(e) = client.start().await {
        error!("Client error: {}", e);
    }
}
