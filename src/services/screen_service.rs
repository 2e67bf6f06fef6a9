//! Synchronous transitions of a card screen.
//!
//! Nothing here touches the network: the session service calls `begin_*`, performs the
//! request without holding the screen lock, then calls `finish_*` with the outcome.

use chrono::Utc;
use rust_decimal::Decimal;

use crate::api::ledger::{ApiError, Card, Transaction, WriteReceipt};
use crate::models::notification::Notification;
use crate::models::screen::{FormField, ScreenState, TopUpDraft, TransferDraft};
use crate::utils::errors::{FormError, GENERIC_WRITE_ERROR};
use crate::utils::money::parse_amount;

impl ScreenState {
    /// Last known balance, if a balance fetch ever succeeded
    pub fn balance(&self) -> Option<Decimal> {
        self.card.as_ref().map(|card| card.balance)
    }

    /// Set one form field. Inputs are read-only while a write is in flight.
    pub fn edit(&mut self, field: FormField, value: &str) -> Result<(), FormError> {
        if self.form.loading {
            return Err(FormError::InFlight);
        }

        let slot = match field {
            FormField::Recipient => &mut self.form.recipient,
            FormField::TransferAmount => &mut self.form.transfer_amount,
            FormField::TopUpAmount => &mut self.form.top_up_amount,
        };
        *slot = value.trim().to_string();
        Ok(())
    }

    pub fn clear_form(&mut self) -> Result<(), FormError> {
        if self.form.loading {
            return Err(FormError::InFlight);
        }

        self.form.recipient.clear();
        self.form.transfer_amount.clear();
        self.form.top_up_amount.clear();
        Ok(())
    }

    /// Validate the transfer form and enter the submitting state.
    ///
    /// The balance check uses the last fetched card only; the ledger has the final word.
    pub fn begin_transfer(&mut self) -> Result<TransferDraft, FormError> {
        if self.form.loading {
            return Err(FormError::InFlight);
        }

        let amount_text = self.form.transfer_amount.trim().to_string();
        let recipient = self.form.recipient.trim().to_string();
        if amount_text.is_empty() || recipient.is_empty() {
            return Err(FormError::MissingFields);
        }

        let amount = positive_amount(&amount_text)?;

        if let Some(balance) = self.balance() {
            if amount > balance {
                return Err(FormError::InsufficientFunds);
            }
        }

        self.form.loading = true;
        Ok(TransferDraft {
            amount,
            amount_text,
            recipient,
        })
    }

    /// Validate the top-up form and enter the submitting state
    pub fn begin_top_up(&mut self) -> Result<TopUpDraft, FormError> {
        if self.form.loading {
            return Err(FormError::InFlight);
        }

        let amount_text = self.form.top_up_amount.trim().to_string();
        if amount_text.is_empty() {
            return Err(FormError::MissingTopUpAmount);
        }

        let amount = positive_amount(&amount_text)?;

        self.form.loading = true;
        Ok(TopUpDraft {
            amount,
            amount_text,
        })
    }

    /// Leave the submitting state after a transfer.
    ///
    /// Fields are cleared only on success. The displayed balance is never touched here.
    pub fn finish_transfer(
        &mut self,
        draft: &TransferDraft,
        outcome: &Result<WriteReceipt, ApiError>,
    ) -> Notification {
        self.form.loading = false;

        match outcome {
            Ok(_) => {
                self.form.transfer_amount.clear();
                self.form.recipient.clear();
                Notification::success(
                    "Перевод выполнен",
                    format!("{} ₽ → {}", draft.amount_text, draft.recipient),
                )
            }
            Err(e) => Notification::error(write_failure_message(e)),
        }
    }

    /// Leave the submitting state after a top-up
    pub fn finish_top_up(
        &mut self,
        draft: &TopUpDraft,
        outcome: &Result<WriteReceipt, ApiError>,
    ) -> Notification {
        self.form.loading = false;

        match outcome {
            Ok(_) => {
                self.form.top_up_amount.clear();
                Notification::success("Счёт пополнен", format!("+{} ₽", draft.amount_text))
            }
            Err(e) => Notification::error(write_failure_message(e)),
        }
    }

    pub fn apply_card(&mut self, card: Card) {
        self.card = Some(card);
        self.refreshed_at = Some(Utc::now());
    }

    pub fn apply_transactions(&mut self, transactions: Vec<Transaction>) {
        self.transactions = transactions;
        self.refreshed_at = Some(Utc::now());
    }
}

fn positive_amount(text: &str) -> Result<Decimal, FormError> {
    match parse_amount(text) {
        Some(amount) if amount > Decimal::ZERO => Ok(amount),
        _ => Err(FormError::InvalidAmount),
    }
}

/// The ledger's own message when it sent one, a generic text otherwise
pub fn write_failure_message(error: &ApiError) -> String {
    error
        .server_message()
        .map(str::to_string)
        .unwrap_or_else(|| GENERIC_WRITE_ERROR.to_string())
}
