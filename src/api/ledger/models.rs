use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Card category as reported by the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    Debit,
    Credit,
}

impl CardType {
    pub fn label(&self) -> &'static str {
        match self {
            CardType::Debit => "Дебетовая",
            CardType::Credit => "Кредитная",
        }
    }
}

/// Response from GET ?action=balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: i64,
    #[serde(rename = "card_number")]
    pub number: String,
    pub balance: Decimal,
    #[serde(rename = "card_type")]
    pub kind: CardType,
    #[serde(default)]
    pub expiry: Option<String>,
    #[serde(default)]
    pub cvv: Option<String>,
}

impl Card {
    /// Card number with every group but the last one hidden.
    ///
    /// `2202 2032 4554 4491` becomes `•••• •••• •••• 4491`.
    pub fn masked_number(&self) -> String {
        let groups: Vec<&str> = self.number.split_whitespace().collect();
        match groups.split_last() {
            Some((last, rest)) => {
                let mut masked: Vec<&str> = rest.iter().map(|_| "••••").collect();
                masked.push(last);
                masked.join(" ")
            }
            None => String::new(),
        }
    }
}

/// Direction of a ledger entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Income,
    Expense,
}

impl Direction {
    pub fn sign(&self) -> &'static str {
        match self {
            Direction::Income => "+",
            Direction::Expense => "−",
        }
    }
}

/// One entry of GET ?action=transactions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    #[serde(rename = "transaction_type")]
    pub direction: Direction,
    pub amount: Decimal,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub recipient: Option<String>,
}

/// Discriminator of the POST body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteAction {
    Transfer,
    AddMoney,
}

/// Request body for POST (transfer and top-up)
#[derive(Debug, Clone, Serialize)]
pub struct WriteRequest<'a> {
    pub action: WriteAction,
    pub card_number: &'a str,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient: Option<&'a str>,
}

/// Raw POST response, before it is folded into `Result<WriteReceipt, ApiError>`
#[derive(Debug, Clone, Deserialize)]
pub struct WriteResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub new_balance: Option<Decimal>,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub recipient: Option<String>,
}

/// What a successful write reports back. Only logged: the screen re-reads the balance instead.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WriteReceipt {
    pub new_balance: Option<Decimal>,
    pub amount: Option<Decimal>,
    pub recipient: Option<String>,
}

/// Error body returned with non-2xx statuses
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub error: Option<String>,
}

/// Comprehensive error type for ledger operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// 400 Bad Request
    #[error("Bad Request: {0}")]
    BadRequest(String),
    /// 404 Not Found
    #[error("Not Found: {0}")]
    NotFound(String),
    /// 2xx write answered with `success: false`
    #[error("Rejected: {}", .0.as_deref().unwrap_or("no reason given"))]
    Rejected(Option<String>),
    /// 5xx Server Error
    #[error("Server Error ({0}): {1}")]
    ServerError(u16, String),
    /// Other HTTP errors
    #[error("HTTP Error ({0}): {1}")]
    HttpError(u16, String),
    /// Network/request error
    #[error("Request Error: {0}")]
    RequestError(String),
    /// Deserialization error
    #[error("Deserialization Error: {0}")]
    DeserializationError(String),
}

impl ApiError {
    /// Message the ledger meant for the user, if any. Shown verbatim; blank counts as none.
    pub fn server_message(&self) -> Option<&str> {
        let message = match self {
            ApiError::BadRequest(msg) | ApiError::NotFound(msg) => Some(msg.as_str()),
            ApiError::Rejected(msg) => msg.as_deref(),
            _ => None,
        };
        message.filter(|m| !m.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_card_from_server_fields() {
        let body = r#"{"id": 1, "card_number": "2202 2032 4554 4491", "balance": 125840.5,
                       "card_type": "debit", "expiry": "11/26", "cvv": null}"#;
        let card: Card = serde_json::from_str(body).unwrap();

        assert_eq!(card.number, "2202 2032 4554 4491");
        assert_eq!(card.balance, dec!(125840.5));
        assert_eq!(card.kind, CardType::Debit);
        assert_eq!(card.expiry.as_deref(), Some("11/26"));
        assert_eq!(card.cvv, None);
    }

    #[test]
    fn test_transaction_with_null_recipient() {
        let body = r#"{"id": 7, "transaction_type": "income", "amount": 1000,
                       "recipient": null, "description": "Пополнение счета",
                       "category": "Доход", "date": "17 Nov 14:23"}"#;
        let tx: Transaction = serde_json::from_str(body).unwrap();

        assert_eq!(tx.direction, Direction::Income);
        assert_eq!(tx.amount, dec!(1000));
        assert_eq!(tx.recipient, None);
        assert_eq!(tx.category.as_deref(), Some("Доход"));
    }

    #[test]
    fn test_write_request_body() {
        let transfer = WriteRequest {
            action: WriteAction::Transfer,
            card_number: "2202 2032 4554 4491",
            amount: dec!(500),
            recipient: Some("+79991234567"),
        };
        let value = serde_json::to_value(&transfer).unwrap();
        assert_eq!(value["action"], "transfer");
        assert_eq!(value["recipient"], "+79991234567");
        assert!(value["amount"].is_number());
        assert_eq!(value["amount"].as_f64(), Some(500.0));

        let top_up = WriteRequest {
            action: WriteAction::AddMoney,
            card_number: "2202 2032 4554 4491",
            amount: dec!(1000),
            recipient: None,
        };
        let value = serde_json::to_value(&top_up).unwrap();
        assert_eq!(value["action"], "add_money");
        assert!(value.get("recipient").is_none());
    }

    #[test]
    fn test_write_request_fractional_amount_is_a_json_number() {
        let request = WriteRequest {
            action: WriteAction::Transfer,
            card_number: "2202 2032 4554 4491",
            amount: dec!(1500.50),
            recipient: Some("+79991234567"),
        };
        let body = serde_json::to_string(&request).unwrap();

        assert!(body.contains(r#""amount":1500.5"#), "{}", body);
        assert!(!body.contains(r#""amount":""#));
    }

    #[test]
    fn test_masked_number() {
        let card = Card {
            id: 1,
            number: "2202 2032 4554 4491".to_string(),
            balance: dec!(0),
            kind: CardType::Credit,
            expiry: None,
            cvv: None,
        };
        assert_eq!(card.masked_number(), "•••• •••• •••• 4491");
    }

    #[test]
    fn test_server_message_only_for_ledger_answers() {
        assert_eq!(
            ApiError::Rejected(Some("Card blocked".to_string())).server_message(),
            Some("Card blocked")
        );
        assert_eq!(
            ApiError::BadRequest("Insufficient funds".to_string()).server_message(),
            Some("Insufficient funds")
        );
        assert_eq!(ApiError::Rejected(Some("  ".to_string())).server_message(), None);
        assert_eq!(
            ApiError::NotFound(" Карта не найдена\n".to_string()).server_message(),
            Some(" Карта не найдена\n")
        );
        assert_eq!(
            ApiError::ServerError(500, "boom".to_string()).server_message(),
            None
        );
        assert_eq!(
            ApiError::RequestError("timeout".to_string()).server_message(),
            None
        );
    }
}
