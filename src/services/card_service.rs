use serenity::builder::{CreateEmbed, CreateEmbedFooter};

use crate::api::ledger::Card;
use crate::models::screen::{FormState, ScreenState};
use crate::utils::money::{format_rub, parse_amount};

/// Amounts offered as one-tap presets on the transfer form
pub const QUICK_AMOUNTS: [u32; 3] = [1000, 5000, 10000];

/// Text lines of the card block, shared by the embed and the tests
pub fn card_lines(card: &Card, show_secrets: bool) -> Vec<(String, String)> {
    let number = if show_secrets {
        card.number.clone()
    } else {
        card.masked_number()
    };

    let mut lines = vec![
        (card.kind.label().to_string(), format!("`{}`", number)),
        ("Доступно".to_string(), format!("**{}**", format_rub(card.balance))),
    ];
    if let Some(expiry) = &card.expiry {
        lines.push(("Срок действия".to_string(), expiry.clone()));
    }
    if show_secrets {
        if let Some(cvv) = &card.cvv {
            lines.push(("CVV".to_string(), cvv.clone()));
        }
    }
    lines
}

pub fn create_card_embed(screen: &ScreenState, show_secrets: bool) -> CreateEmbed {
    let mut embed = CreateEmbed::default()
        .title("💳 FuturePay · Мои карты")
        .color(0x7c3aed);

    match &screen.card {
        Some(card) => {
            for (name, value) in card_lines(card, show_secrets) {
                embed = embed.field(name, value, true);
            }
        }
        None => {
            embed = embed.description("Данные карты пока не загружены");
        }
    }

    if screen.form.loading {
        embed = embed.field("Статус", "⏳ Операция выполняется", false);
    }

    if let Some(at) = screen.refreshed_at {
        embed = embed.footer(CreateEmbedFooter::new(format!(
            "Обновлено {} UTC",
            at.format("%H:%M:%S")
        )));
    }

    embed
}

/// "Итого к списанию": the typed amount plus a zero commission, or `0 ₽` when nothing valid is typed
pub fn transfer_total(form: &FormState) -> String {
    match parse_amount(&form.transfer_amount) {
        Some(amount) => format_rub(amount),
        None => "0 ₽".to_string(),
    }
}

pub fn create_form_embed(screen: &ScreenState) -> CreateEmbed {
    let form = &screen.form;
    let or_dash = |value: &str| {
        if value.is_empty() {
            "—".to_string()
        } else {
            value.to_string()
        }
    };

    let quick = QUICK_AMOUNTS
        .iter()
        .map(|a| format!("`$form amount {}`", a))
        .collect::<Vec<_>>()
        .join(" ");

    let mut embed = CreateEmbed::default()
        .title("📝 Перевод и пополнение")
        .field("Получатель", or_dash(&form.recipient), true)
        .field("Сумма перевода", or_dash(&form.transfer_amount), true)
        .field("Комиссия", "0 ₽", true)
        .field("Итого к списанию", transfer_total(form), true)
        .field("Сумма пополнения", or_dash(&form.top_up_amount), true)
        .field("Быстрые суммы", quick, false)
        .color(0x00b0f4);

    if form.loading {
        embed = embed.field("Статус", "⏳ Операция выполняется, поля недоступны", false);
    }

    embed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ledger::CardType;
    use rust_decimal_macros::dec;

    fn card() -> Card {
        Card {
            id: 1,
            number: "2202 2032 4554 4491".to_string(),
            balance: dec!(125840.50),
            kind: CardType::Debit,
            expiry: Some("11/26".to_string()),
            cvv: Some("648".to_string()),
        }
    }

    #[test]
    fn test_card_lines_hide_secrets_by_default() {
        let lines = card_lines(&card(), false);

        assert_eq!(lines[0], ("Дебетовая".to_string(), "`•••• •••• •••• 4491`".to_string()));
        assert_eq!(lines[1].1, "**125\u{a0}840,5 ₽**");
        assert!(lines.iter().all(|(name, _)| name != "CVV"));
    }

    #[test]
    fn test_card_lines_with_secrets() {
        let lines = card_lines(&card(), true);

        assert_eq!(lines[0].1, "`2202 2032 4554 4491`");
        assert!(lines.contains(&("CVV".to_string(), "648".to_string())));
    }

    #[test]
    fn test_transfer_total() {
        let mut form = FormState::default();
        assert_eq!(transfer_total(&form), "0 ₽");

        form.transfer_amount = "5000".to_string();
        assert_eq!(transfer_total(&form), "5\u{a0}000 ₽");

        form.transfer_amount = "five".to_string();
        assert_eq!(transfer_total(&form), "0 ₽");
    }
}
