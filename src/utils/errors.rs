use thiserror::Error;

/// Reasons a form submission or edit is refused before any request is made.
///
/// The `Display` text is what the user sees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Заполните все поля")]
    MissingFields,
    #[error("Введите сумму пополнения")]
    MissingTopUpAmount,
    #[error("Введите корректную сумму")]
    InvalidAmount,
    #[error("Недостаточно средств")]
    InsufficientFunds,
    #[error("Операция уже выполняется, дождитесь её завершения")]
    InFlight,
}

/// Shown when a write fails and the ledger gave no message of its own
pub const GENERIC_WRITE_ERROR: &str = "Не удалось выполнить операцию. Попробуйте позже";
