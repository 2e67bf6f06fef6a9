use serenity::model::channel::Message;
use serenity::prelude::Context;
use std::time::Instant;
use crate::commands::session_store;
use crate::services::ping_service;

pub async fn execute(ctx: &Context, msg: &Message) -> Result<(), String> {
    let start_time = Instant::now();

    // Send initial message to measure roundtrip
    let response = msg
        .channel_id
        .send_message(ctx, serenity::builder::CreateMessage::default()
            .content("📊 Calculating metrics..."))
        .await
        .map_err(|e| e.to_string())?;
    let response_roundtrip = start_time.elapsed().as_millis() as u64;

    let store = session_store(ctx).await?;
    let ledger_latency =
        ping_service::measure_ledger(store.ledger().as_ref(), store.card_number()).await;

    let metrics = ping_service::get_ping_metrics(ctx, response_roundtrip, ledger_latency).await;
    let embed = ping_service::create_ping_embed(&metrics);

    response.delete(ctx).await
        .map_err(|e| e.to_string())?;

    msg.channel_id
        .send_message(ctx, serenity::builder::CreateMessage::default().embed(embed))
        .await
        .map_err(|e| e.to_string())?;

    Ok(())
}
