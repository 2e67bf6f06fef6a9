use serenity::model::channel::Message;
use serenity::prelude::Context;
use crate::commands::{app_config, author_session, send_embed, send_notifications};
use crate::services::card_service;

/// Re-read balance and history, then show the card
pub async fn execute(ctx: &Context, msg: &Message) -> Result<(), String> {
    let config = app_config(ctx).await?;
    let session = author_session(ctx, msg).await?;

    let failures = session.refresh().await;
    let screen = session.snapshot().await;

    send_embed(ctx, msg, card_service::create_card_embed(&screen, config.show_card_secrets)).await?;
    send_notifications(ctx, msg, &failures).await
}
