pub mod card;
pub mod form;
pub mod help;
pub mod history;
pub mod ping;
pub mod topup;
pub mod transfer;

use std::sync::Arc;

use serenity::builder::{CreateEmbed, CreateMessage};
use serenity::model::channel::Message;
use serenity::prelude::Context;
use tracing::{debug, error};

use crate::api::ledger::LedgerClient;
use crate::config::AppConfig;
use crate::models::notification::Notification;
use crate::services::card_service;
use crate::services::session_service::{CardSession, SessionStore};
use crate::utils::check_cooldown;

const PREFIX: char = '$';

pub async fn handle_message(ctx: &Context, msg: &Message) {
    if msg.author.bot || !msg.content.starts_with(PREFIX) {
        return;
    }

    let parts: Vec<&str> = msg.content.split_whitespace().collect();
    if parts.is_empty() {
        return;
    }

    let command = parts[0].to_lowercase();
    let args = &parts[1..];

    let Some(command) = canonical_command(&command) else {
        return;
    };

    if let Err(remaining) = check_cooldown(msg.author.id, command).await {
        let embed = CreateEmbed::default()
            .title("Command Cooldown")
            .description(format!("⏳ Подождите {} с. перед повторной командой.", remaining))
            .color(0xffa500);
        let _ = msg
            .channel_id
            .send_message(ctx, CreateMessage::default().embed(embed))
            .await;
        return;
    }

    debug!("{} from user {}", command, msg.author.id);

    let result = match command {
        "$help" => help::execute(ctx, msg).await,
        "$ping" => ping::execute(ctx, msg).await,
        "$card" => card::execute(ctx, msg).await,
        "$history" => history::execute(ctx, msg, args).await,
        "$transfer" => transfer::execute(ctx, msg, args).await,
        "$topup" => topup::execute(ctx, msg, args).await,
        "$form" => form::execute(ctx, msg, args).await,
        _ => return,
    };

    if let Err(e) = result {
        error!("Error executing command {}: {}", command, e);

        let user_message = if e.contains("429") || e.to_lowercase().contains("rate limit") {
            "⚠️ **Rate Limited**: Discord is rate limiting us. Please try again in a moment.".to_string()
        } else if e.contains("HTTP request") {
            "⚠️ **Network Error**: Having trouble connecting to Discord. Please try again.".to_string()
        } else if !e.is_empty() {
            format!("❌ {}", e)
        } else {
            "❌ An error occurred while executing the command.".to_string()
        };

        let embed = CreateEmbed::default()
            .title("Command Error")
            .description(user_message)
            .color(0xff0000);

        let _ = msg
            .channel_id
            .send_message(ctx, CreateMessage::default().embed(embed))
            .await;
    }
}

/// Command name with aliases folded, so they share one cooldown; `None` for unknown commands
pub fn canonical_command(command: &str) -> Option<&'static str> {
    let canonical = match command {
        "$help" => "$help",
        "$ping" => "$ping",
        "$card" | "$balance" | "$bal" => "$card",
        "$history" | "$tr" => "$history",
        "$transfer" | "$send" => "$transfer",
        "$topup" | "$add" => "$topup",
        "$form" => "$form",
        _ => return None,
    };
    Some(canonical)
}

/// Configuration stored in the client data
pub async fn app_config(ctx: &Context) -> Result<Arc<AppConfig>, String> {
    let data = ctx.data.read().await;
    data.get::<crate::Settings>()
        .cloned()
        .ok_or("Configuration not initialized".to_string())
}

pub async fn session_store(ctx: &Context) -> Result<Arc<SessionStore<LedgerClient>>, String> {
    let data = ctx.data.read().await;
    data.get::<crate::Bank>()
        .cloned()
        .ok_or("Ledger not initialized".to_string())
}

/// Card screen of the message author
pub async fn author_session(
    ctx: &Context,
    msg: &Message,
) -> Result<Arc<CardSession<LedgerClient>>, String> {
    let store = session_store(ctx).await?;
    Ok(store.session(msg.author.id.get()).await)
}

pub async fn send_embed(ctx: &Context, msg: &Message, embed: CreateEmbed) -> Result<(), String> {
    msg.channel_id
        .send_message(ctx, CreateMessage::default().embed(embed))
        .await
        .map_err(|e| e.to_string())?;
    Ok(())
}

/// Send notifications as one message, one embed each
pub async fn send_notifications(
    ctx: &Context,
    msg: &Message,
    notes: &[Notification],
) -> Result<(), String> {
    if notes.is_empty() {
        return Ok(());
    }

    let embeds: Vec<CreateEmbed> = notes.iter().map(Notification::to_embed).collect();
    msg.channel_id
        .send_message(ctx, CreateMessage::default().embeds(embeds))
        .await
        .map_err(|e| e.to_string())?;
    Ok(())
}

/// Notifications of a write, then the re-read card when the write went through
pub async fn send_write_outcome(
    ctx: &Context,
    msg: &Message,
    session: &CardSession<LedgerClient>,
    notes: &[Notification],
) -> Result<(), String> {
    send_notifications(ctx, msg, notes).await?;

    if notes.first().is_some_and(Notification::is_success) {
        let config = app_config(ctx).await?;
        let screen = session.snapshot().await;
        send_embed(ctx, msg, card_service::create_card_embed(&screen, config.show_card_secrets)).await?;
    }
    Ok(())
}
