use rust_decimal::Decimal;
use std::str::FromStr;

const GROUP_SEPARATOR: char = '\u{a0}';

/// Parse an amount typed by a user.
///
/// Accepts `,` as the decimal separator and ignores spaces used as digit grouping
/// (`"10 000,50"`). Returns `None` for anything that is not a plain decimal number.
pub fn parse_amount(input: &str) -> Option<Decimal> {
    let normalized: String = input
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    if normalized.is_empty() {
        return None;
    }

    Decimal::from_str(&normalized).ok()
}

/// Format an amount the way `ru-RU` locale does: `125 840,5`.
///
/// At most two fraction digits, trailing zeros dropped, groups of three joined by a
/// non-breaking space.
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp(2).normalize();
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = rounded.abs().to_string();

    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (digits.as_str(), None),
    };

    let mut grouped = String::new();
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(GROUP_SEPARATOR);
        }
        grouped.push(c);
    }

    let mut output = String::new();
    if negative {
        output.push('−');
    }
    output.push_str(&grouped);
    if let Some(frac_part) = frac_part {
        output.push(',');
        output.push_str(frac_part);
    }
    output
}

/// `format_amount` with the ruble sign
pub fn format_rub(amount: Decimal) -> String {
    format!("{} ₽", format_amount(amount))
}
