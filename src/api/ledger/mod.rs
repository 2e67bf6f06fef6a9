pub mod client;
pub mod models;

pub use client::{Ledger, LedgerClient};
pub use models::{ApiError, Card, CardType, Direction, Transaction, WriteReceipt};
