use serenity::builder::{CreateEmbed, CreateEmbedFooter};

use crate::api::ledger::Transaction;
use crate::utils::date::localize_date;
use crate::utils::money::format_amount;
use crate::utils::table::{truncate, Align, Table};

const DESCRIPTION_WIDTH: usize = 22;
const CATEGORY_WIDTH: usize = 12;

/// `+45 000 ₽` for income, `−1 250 ₽` for expenses
pub fn signed_amount(tx: &Transaction) -> String {
    format!("{}{} ₽", tx.direction.sign(), format_amount(tx.amount))
}

/// History rendered as a code-block table, newest first as the ledger sends it
pub fn history_table(transactions: &[Transaction]) -> String {
    let mut table = Table::new(vec!["Дата", "Операция", "Категория", "Сумма"]).align(3, Align::Right);

    for tx in transactions {
        let description = match (&tx.description, &tx.recipient) {
            (Some(description), _) => description.clone(),
            (None, Some(recipient)) => format!("→ {}", recipient),
            (None, None) => "—".to_string(),
        };

        table.add_row(vec![
            localize_date(&tx.date),
            truncate(&description, DESCRIPTION_WIDTH),
            truncate(tx.category.as_deref().unwrap_or("—"), CATEGORY_WIDTH),
            signed_amount(tx),
        ]);
    }

    table.render()
}

/// Rows per history embed; keeps the table well under Discord's description limit
pub const TRANSACTIONS_PER_PAGE: usize = 20;

pub fn total_pages(count: usize) -> usize {
    count.div_ceil(TRANSACTIONS_PER_PAGE).max(1)
}

/// Rows of `page` (1-based), or an error naming the page count
pub fn page_rows(transactions: &[Transaction], page: usize) -> Result<&[Transaction], String> {
    let pages = total_pages(transactions.len());
    if page == 0 || page > pages {
        return Err(format!("Нет такой страницы. Всего страниц: {}", pages));
    }

    let start = (page - 1) * TRANSACTIONS_PER_PAGE;
    let end = (start + TRANSACTIONS_PER_PAGE).min(transactions.len());
    Ok(&transactions[start..end])
}

fn page_footer(shown: usize, limit: u32, page: usize, pages: usize) -> String {
    let mut footer = format!("Показано {} (лимит {})", shown, limit);
    if pages > 1 {
        footer.push_str(&format!(" · Страница {}/{} · $history {} p{}", page, pages, limit, page % pages + 1));
    } else {
        footer.push_str(" · $history all, чтобы показать все операции");
    }
    footer
}

pub fn create_history_embed(
    transactions: &[Transaction],
    limit: u32,
    page: usize,
) -> Result<CreateEmbed, String> {
    if transactions.is_empty() {
        return Ok(CreateEmbed::default()
            .title("📋 История операций")
            .description("Операций пока нет")
            .color(0xffa500));
    }

    let rows = page_rows(transactions, page)?;
    let pages = total_pages(transactions.len());

    Ok(CreateEmbed::default()
        .title("📋 История операций")
        .description(history_table(rows))
        .footer(CreateEmbedFooter::new(page_footer(transactions.len(), limit, page, pages)))
        .color(0x00ff00))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ledger::Direction;
    use crate::config::MAX_HISTORY_LIMIT;
    use rust_decimal_macros::dec;

    fn tx(direction: Direction, amount: rust_decimal::Decimal, description: &str) -> Transaction {
        Transaction {
            id: 1,
            direction,
            amount,
            description: Some(description.to_string()),
            date: "17 Nov 14:23".to_string(),
            category: Some("Покупки".to_string()),
            recipient: None,
        }
    }

    #[test]
    fn test_signed_amount() {
        assert_eq!(
            signed_amount(&tx(Direction::Income, dec!(45000), "Зачисление зарплаты")),
            "+45\u{a0}000 ₽"
        );
        assert_eq!(
            signed_amount(&tx(Direction::Expense, dec!(1250), "Продуктовый магазин")),
            "−1\u{a0}250 ₽"
        );
    }

    #[test]
    fn test_history_table_rows() {
        let mut transfer = tx(Direction::Expense, dec!(500), "");
        transfer.description = None;
        transfer.recipient = Some("+79991234567".to_string());

        let rendered = history_table(&[tx(Direction::Expense, dec!(3200), "Кафе \"Звездное\""), transfer]);

        assert!(rendered.contains("17 нояб. 14:23"));
        assert!(rendered.contains("Кафе \"Звездное\""));
        assert!(rendered.contains("→ +79991234567"));
        assert!(rendered.contains("−3\u{a0}200 ₽"));
    }

    fn long_row(i: usize) -> Transaction {
        Transaction {
            id: i as i64,
            direction: Direction::Expense,
            amount: dec!(1234567.89),
            description: Some("Перевод по номеру телефона клиенту банка".to_string()),
            date: "17 Sep 14:23".to_string(),
            category: Some("Переводы между счетами".to_string()),
            recipient: Some("+79991234567".to_string()),
        }
    }

    #[test]
    fn test_full_history_fits_discord_limits() {
        let history: Vec<Transaction> = (0..MAX_HISTORY_LIMIT as usize).map(long_row).collect();
        let pages = total_pages(history.len());
        assert_eq!(pages, 5);

        for page in 1..=pages {
            let rows = page_rows(&history, page).unwrap();
            let table = history_table(rows);
            let footer = page_footer(history.len(), MAX_HISTORY_LIMIT, page, pages);

            assert!(table.chars().count() <= 4096, "page {}: {} chars", page, table.chars().count());
            assert!(table.chars().count() + footer.chars().count() + 32 <= 6000);
            assert!(create_history_embed(&history, MAX_HISTORY_LIMIT, page).is_ok());
        }
    }

    #[test]
    fn test_page_rows() {
        let history: Vec<Transaction> = (0..45).map(long_row).collect();

        assert_eq!(total_pages(history.len()), 3);
        assert_eq!(page_rows(&history, 1).unwrap().len(), 20);
        assert_eq!(page_rows(&history, 3).unwrap().len(), 5);
        assert_eq!(page_rows(&history, 3).unwrap()[0].id, 40);
        assert!(page_rows(&history, 0).is_err());
        assert_eq!(
            page_rows(&history, 4).unwrap_err(),
            "Нет такой страницы. Всего страниц: 3"
        );
    }

    #[test]
    fn test_empty_history_has_one_page() {
        assert_eq!(total_pages(0), 1);
        assert!(create_history_embed(&[], 10, 1).is_ok());
    }

    #[test]
    fn test_footer_points_to_next_page() {
        assert!(page_footer(45, 100, 1, 3).ends_with("Страница 1/3 · $history 100 p2"));
        assert!(page_footer(45, 100, 3, 3).ends_with("$history 100 p1"));
        assert!(page_footer(5, 10, 1, 1).ends_with("$history all, чтобы показать все операции"));
    }
}
