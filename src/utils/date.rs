/// Short Russian month names, as `Intl.DateTimeFormat('ru-RU', {month: 'short'})` prints them
const MONTHS: [(&str, &str); 12] = [
    ("Jan", "янв."),
    ("Feb", "февр."),
    ("Mar", "мар."),
    ("Apr", "апр."),
    ("May", "мая"),
    ("Jun", "июн."),
    ("Jul", "июл."),
    ("Aug", "авг."),
    ("Sep", "сент."),
    ("Oct", "окт."),
    ("Nov", "нояб."),
    ("Dec", "дек."),
];

/// Translate the month of a ledger date (`17 Nov 14:23`) to Russian (`17 нояб. 14:23`).
/// Anything that does not look like that is returned untouched.
pub fn localize_date(date: &str) -> String {
    date.split(' ')
        .map(|word| {
            MONTHS
                .iter()
                .find(|(en, _)| en.eq_ignore_ascii_case(word))
                .map(|(_, ru)| *ru)
                .unwrap_or(word)
        })
        .collect::<Vec<_>>()
        .join(" ")
}
