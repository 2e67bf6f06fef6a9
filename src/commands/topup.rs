use serenity::model::channel::Message;
use serenity::prelude::Context;
use crate::commands::{author_session, send_embed, send_notifications, send_write_outcome};
use crate::models::notification::Notification;
use crate::models::screen::FormField;

pub async fn execute(ctx: &Context, msg: &Message, args: &[&str]) -> Result<(), String> {
    if args.first().is_some_and(|a| a.eq_ignore_ascii_case("help")) {
        let help_embed = serenity::builder::CreateEmbed::default()
            .title("➕ Пополнение")
            .description("Пополнить счёт карты")
            .field("Usage", "`$topup <сумма>` or `$add <сумма>`\n`$topup` (сумма из формы)", false)
            .field("Examples", "`$topup 1000`\n`$add 250,50`", false)
            .color(0x00ff00);

        return send_embed(ctx, msg, help_embed).await;
    }

    let session = author_session(ctx, msg).await?;

    if !args.is_empty() {
        if let Err(e) = session.edit(FormField::TopUpAmount, &args.join(" ")).await {
            return send_notifications(ctx, msg, &[Notification::error(e.to_string())]).await;
        }
    }

    let notes = session.submit_top_up().await;
    send_write_outcome(ctx, msg, &session, &notes).await
}
