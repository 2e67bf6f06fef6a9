use serenity::builder::CreateEmbed;
use serenity::model::channel::Message;
use serenity::prelude::Context;

pub async fn execute(ctx: &Context, msg: &Message) -> Result<(), String> {
    let embed = CreateEmbed::default()
        .title("📖 FuturePay")
        .description("**FuturePay** - Банк будущего\nБаланс карты, переводы, пополнение и история операций.")
        .color(0x00b0f4)
        .field(
            "💳 Карта",
            "`$card` - Баланс и данные карты (`$balance`, `$bal`)\n`$history [n|all] [p2]` - История операций по 20 на страницу (`$tr`)",
            false,
        )
        .field(
            "💸 Перевод",
            "`$transfer <получатель> <сумма>` - Перевести (`$send`), сумма одним словом\n`$transfer` - Отправить форму как есть",
            false,
        )
        .field(
            "➕ Пополнение",
            "`$topup <сумма>` - Пополнить счёт (`$add`)",
            false,
        )
        .field(
            "📝 Форма",
            "`$form` - Показать форму\n`$form recipient <текст>` · `$form amount <сумма>` · `$form topup <сумма>` · `$form clear`",
            false,
        )
        .field(
            "🎯 General",
            "`$ping` - Check bot and ledger latency\n`$help` - Show this help message",
            false,
        )
        .field(
            "⚡ Rate Limiting",
            "3-second cooldown per command per user",
            false,
        );

    msg.channel_id
        .send_message(ctx, serenity::builder::CreateMessage::default().embed(embed))
        .await
        .map_err(|e| format!("Failed to send help message: {}", e))?;

    Ok(())
}
