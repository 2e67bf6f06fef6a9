use serenity::model::channel::Message;
use serenity::prelude::Context;
use crate::commands::{author_session, send_embed, send_notifications};
use crate::models::notification::Notification;
use crate::models::screen::FormField;
use crate::services::card_service;

/// What `$form ...` asks for
#[derive(Debug, PartialEq, Eq)]
pub enum FormAction {
    Show,
    Set(FormField, String),
    Clear,
}

pub fn parse_action(args: &[&str]) -> Result<FormAction, String> {
    let Some((sub, rest)) = args.split_first() else {
        return Ok(FormAction::Show);
    };

    let field = match sub.to_lowercase().as_str() {
        "clear" => return Ok(FormAction::Clear),
        "recipient" | "to" => FormField::Recipient,
        "amount" | "sum" => FormField::TransferAmount,
        "topup" | "add" => FormField::TopUpAmount,
        _ => {
            return Err(
                "Usage: `$form [recipient <text> | amount <n> | topup <n> | clear]`".to_string(),
            )
        }
    };

    Ok(FormAction::Set(field, rest.join(" ")))
}

pub async fn execute(ctx: &Context, msg: &Message, args: &[&str]) -> Result<(), String> {
    let action = parse_action(args)?;
    let session = author_session(ctx, msg).await?;

    let edited = match action {
        FormAction::Show => Ok(()),
        FormAction::Set(field, value) => session.edit(field, &value).await,
        FormAction::Clear => session.clear_form().await,
    };

    if let Err(e) = edited {
        return send_notifications(ctx, msg, &[Notification::error(e.to_string())]).await;
    }

    let screen = session.snapshot().await;
    send_embed(ctx, msg, card_service::create_form_embed(&screen)).await
}
