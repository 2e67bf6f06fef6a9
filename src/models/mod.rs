//! Data models for the card screen
//!
//! Wire types (`Card`, `Transaction`) live with the ledger client; these are the
//! screen-side state and the notifications produced by screen actions.

pub mod notification;
pub mod screen;
