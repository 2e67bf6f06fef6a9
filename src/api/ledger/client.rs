use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client as HttpClient, StatusCode};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::models::{
    ApiError, Card, ErrorResponse, Transaction, WriteAction, WriteReceipt, WriteRequest,
    WriteResponse,
};

/// Reads and writes against the remote banking function.
///
/// The card number is an argument of every call so one client can serve any card.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Ledger: Send + Sync {
    async fn get_balance(&self, card_number: &str) -> Result<Card, ApiError>;

    async fn get_transactions(
        &self,
        card_number: &str,
        limit: u32,
    ) -> Result<Vec<Transaction>, ApiError>;

    async fn submit_transfer(
        &self,
        card_number: &str,
        amount: Decimal,
        recipient: &str,
    ) -> Result<WriteReceipt, ApiError>;

    async fn submit_top_up(&self, card_number: &str, amount: Decimal)
        -> Result<WriteReceipt, ApiError>;
}

/// HTTP client for the FuturePay banking endpoint
pub struct LedgerClient {
    http_client: HttpClient,
    base_url: String,
}

impl LedgerClient {
    /// Create a client, optionally bounding every request by `timeout`
    pub fn with_timeout(base_url: String, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let mut builder = HttpClient::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| ApiError::RequestError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url,
        })
    }

    fn create_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    /// Map a non-2xx answer to an error, keeping the ledger's `error` text when it sent one
    fn error_from_status(status: StatusCode, body: &str) -> ApiError {
        let message = serde_json::from_str::<ErrorResponse>(body)
            .ok()
            .and_then(|e| e.error)
            .unwrap_or_else(|| body.trim().to_string());
        let status_code = status.as_u16();

        match status_code {
            400 => ApiError::BadRequest(message),
            404 => ApiError::NotFound(message),
            500..=599 => {
                warn!("Ledger server error {}: {}", status_code, message);
                ApiError::ServerError(status_code, message)
            }
            _ => ApiError::HttpError(status_code, message),
        }
    }

    /// Decode a read response body
    fn decode_read<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T, ApiError> {
        if !status.is_success() {
            return Err(Self::error_from_status(status, body));
        }

        serde_json::from_str::<T>(body)
            .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))
    }

    /// Decode a POST response: non-2xx and `success != true` are both failures
    fn decode_write(status: StatusCode, body: &str) -> Result<WriteReceipt, ApiError> {
        if !status.is_success() {
            return Err(Self::error_from_status(status, body));
        }

        let response = serde_json::from_str::<WriteResponse>(body)
            .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))?;

        if response.success != Some(true) {
            return Err(ApiError::Rejected(response.error));
        }

        Ok(WriteReceipt {
            new_balance: response.new_balance,
            amount: response.amount,
            recipient: response.recipient,
        })
    }

    async fn read_body(response: reqwest::Response) -> Result<(StatusCode, String), ApiError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::RequestError(format!("Failed to read response: {}", e)))?;
        Ok((status, body))
    }

    async fn post(&self, request: &WriteRequest<'_>) -> Result<WriteReceipt, ApiError> {
        let response = self
            .http_client
            .post(&self.base_url)
            .headers(Self::create_headers())
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;

        let (status, body) = Self::read_body(response).await?;
        debug!("POST {:?} -> {}", request.action, status);
        Self::decode_write(status, &body)
    }
}

#[async_trait]
impl Ledger for LedgerClient {
    /// GET ?action=balance&card_number=...
    async fn get_balance(&self, card_number: &str) -> Result<Card, ApiError> {
        let response = self
            .http_client
            .get(&self.base_url)
            .headers(Self::create_headers())
            .query(&[("action", "balance"), ("card_number", card_number)])
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;

        let (status, body) = Self::read_body(response).await?;
        debug!("GET balance -> {}", status);
        Self::decode_read(status, &body)
    }

    /// GET ?action=transactions&card_number=...&limit=...
    ///
    /// An empty array is a valid answer.
    async fn get_transactions(
        &self,
        card_number: &str,
        limit: u32,
    ) -> Result<Vec<Transaction>, ApiError> {
        let limit = limit.to_string();
        let response = self
            .http_client
            .get(&self.base_url)
            .headers(Self::create_headers())
            .query(&[
                ("action", "transactions"),
                ("card_number", card_number),
                ("limit", limit.as_str()),
            ])
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;

        let (status, body) = Self::read_body(response).await?;
        debug!("GET transactions (limit {}) -> {}", limit, status);
        Self::decode_read(status, &body)
    }

    /// POST {action: "transfer", card_number, amount, recipient}
    async fn submit_transfer(
        &self,
        card_number: &str,
        amount: Decimal,
        recipient: &str,
    ) -> Result<WriteReceipt, ApiError> {
        self.post(&WriteRequest {
            action: WriteAction::Transfer,
            card_number,
            amount,
            recipient: Some(recipient),
        })
        .await
    }

    /// POST {action: "add_money", card_number, amount}
    async fn submit_top_up(
        &self,
        card_number: &str,
        amount: Decimal,
    ) -> Result<WriteReceipt, ApiError> {
        self.post(&WriteRequest {
            action: WriteAction::AddMoney,
            card_number,
            amount,
            recipient: None,
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_decode_balance() {
        let body = r#"{"id": 1, "card_number": "2202 2032 4554 4491", "balance": 1000,
                       "card_type": "credit"}"#;
        let card: Card = LedgerClient::decode_read(StatusCode::OK, body).unwrap();
        assert_eq!(card.balance, dec!(1000));
    }

    #[test]
    fn test_decode_empty_history_is_not_an_error() {
        let history: Vec<Transaction> = LedgerClient::decode_read(StatusCode::OK, "[]").unwrap();
        assert!(history.is_empty());
    }

    #[test]
    fn test_decode_unparseable_body() {
        let result: Result<Card, _> = LedgerClient::decode_read(StatusCode::OK, "<html>");
        assert!(matches!(result, Err(ApiError::DeserializationError(_))));
    }

    #[test]
    fn test_decode_not_found_keeps_ledger_message() {
        let result: Result<Card, _> =
            LedgerClient::decode_read(StatusCode::NOT_FOUND, r#"{"error": "Card not found"}"#);
        assert_eq!(result, Err(ApiError::NotFound("Card not found".to_string())));
    }

    #[test]
    fn test_decode_write_success() {
        let body = r#"{"success": true, "new_balance": 500.0, "amount": 500.0,
                       "recipient": "+79991234567"}"#;
        let receipt = LedgerClient::decode_write(StatusCode::OK, body).unwrap();
        assert_eq!(receipt.new_balance, Some(dec!(500)));
        assert_eq!(receipt.recipient.as_deref(), Some("+79991234567"));
    }

    #[test]
    fn test_decode_write_logical_failure() {
        let body = r#"{"success": false, "error": "Card blocked"}"#;
        let result = LedgerClient::decode_write(StatusCode::OK, body);
        assert_eq!(result, Err(ApiError::Rejected(Some("Card blocked".to_string()))));
    }

    #[test]
    fn test_decode_write_missing_success_flag() {
        let result = LedgerClient::decode_write(StatusCode::OK, "{}");
        assert_eq!(result, Err(ApiError::Rejected(None)));
    }

    #[test]
    fn test_decode_write_bad_request() {
        let body = r#"{"error": "Insufficient funds"}"#;
        let result = LedgerClient::decode_write(StatusCode::BAD_REQUEST, body);
        assert_eq!(result, Err(ApiError::BadRequest("Insufficient funds".to_string())));
    }

    #[test]
    fn test_decode_write_server_error_without_json() {
        let result = LedgerClient::decode_write(StatusCode::BAD_GATEWAY, "upstream down\n");
        assert_eq!(
            result,
            Err(ApiError::ServerError(502, "upstream down".to_string()))
        );
    }

    #[test]
    fn test_decode_unexpected_status() {
        let result = LedgerClient::decode_write(StatusCode::METHOD_NOT_ALLOWED, r#"{"error": "Method not allowed"}"#);
        assert_eq!(
            result,
            Err(ApiError::HttpError(405, "Method not allowed".to_string()))
        );
    }
}
