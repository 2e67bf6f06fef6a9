//! State behind one user's card screen

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::api::ledger::{Card, Transaction};

/// Editable fields of the transfer and top-up forms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Recipient,
    TransferAmount,
    TopUpAmount,
}

/// Raw form inputs, kept exactly as typed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub recipient: String,
    pub transfer_amount: String,
    pub top_up_amount: String,
    pub loading: bool,
}

/// A validated transfer, ready to be sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferDraft {
    pub amount: Decimal,
    /// The amount as the user typed it, echoed back in the success message
    pub amount_text: String,
    pub recipient: String,
}

/// A validated top-up, ready to be sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopUpDraft {
    pub amount: Decimal,
    pub amount_text: String,
}

/// Everything one screen displays. Card and history are replaced wholesale on fetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScreenState {
    pub card: Option<Card>,
    pub transactions: Vec<Transaction>,
    pub form: FormState,
    pub refreshed_at: Option<DateTime<Utc>>,
}
