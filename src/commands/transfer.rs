use serenity::model::channel::Message;
use serenity::prelude::Context;
use crate::commands::{author_session, send_embed, send_notifications, send_write_outcome};
use crate::models::notification::Notification;
use crate::models::screen::FormField;
use crate::services::card_service::QUICK_AMOUNTS;

/// Form edits implied by the arguments of `$transfer`
#[derive(Debug, PartialEq, Eq)]
pub struct TransferArgs {
    pub recipient: Option<String>,
    pub amount: Option<String>,
}

/// `<recipient...> <amount>`: the last word is the amount, everything before it the recipient.
/// A single word is an amount; no words submit the form unchanged.
///
/// Recipients may contain spaces (`2200 1234 5678 9010`, `+7 999 123 45 67`), so the amount
/// has to be one word: `10000`, not `10 000`. `$form amount 10 000` takes the spaced form.
pub fn parse_args(args: &[&str]) -> TransferArgs {
    match args.split_last() {
        None => TransferArgs {
            recipient: None,
            amount: None,
        },
        Some((amount, [])) => TransferArgs {
            recipient: None,
            amount: Some(amount.to_string()),
        },
        Some((amount, recipient)) => TransferArgs {
            recipient: Some(recipient.join(" ")),
            amount: Some(amount.to_string()),
        },
    }
}

pub async fn execute(ctx: &Context, msg: &Message, args: &[&str]) -> Result<(), String> {
    if args.first().is_some_and(|a| a.eq_ignore_ascii_case("help")) {
        let quick = QUICK_AMOUNTS
            .iter()
            .map(|a| a.to_string())
            .collect::<Vec<_>>()
            .join(" / ");

        let help_embed = serenity::builder::CreateEmbed::default()
            .title("💸 Перевод")
            .description("Перевод с карты по номеру телефона или карты")
            .field("Usage",
                "`$transfer <получатель> <сумма>`\n\
                 `$transfer <сумма>` (получатель из формы)\n\
                 `$transfer` (отправить форму как есть)",
                false)
            .field("Examples",
                "`$transfer +79991234567 500`\n\
                 `$transfer 2200 1234 5678 9010 1500,50`",
                false)
            .field("Notes",
                format!("• Комиссия 0 ₽\n\
                 • Сумма не может превышать баланс\n\
                 • Сумма пишется одним словом: `10000`, не `10 000`\n\
                 • Быстрые суммы: {}", quick),
                false)
            .color(0x00ff00);

        return send_embed(ctx, msg, help_embed).await;
    }

    let session = author_session(ctx, msg).await?;
    let parsed = parse_args(args);

    let mut edits = Vec::new();
    if let Some(recipient) = &parsed.recipient {
        edits.push((FormField::Recipient, recipient.as_str()));
    }
    if let Some(amount) = &parsed.amount {
        edits.push((FormField::TransferAmount, amount.as_str()));
    }
    for (field, value) in edits {
        if let Err(e) = session.edit(field, value).await {
            return send_notifications(ctx, msg, &[Notification::error(e.to_string())]).await;
        }
    }

    let notes = session.submit_transfer().await;
    send_write_outcome(ctx, msg, &session, &notes).await
}
