//! Per-user card screens and the requests behind them

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::api::ledger::Ledger;
use crate::models::notification::Notification;
use crate::models::screen::{FormField, ScreenState};
use crate::utils::errors::FormError;

/// One user's screen over the configured card.
///
/// The screen lock is only held for state transitions, never across a request, so a
/// second submit while one is outstanding is refused by the in-flight flag.
pub struct CardSession<L: Ledger> {
    ledger: Arc<L>,
    card_number: String,
    history_limit: u32,
    screen: Mutex<ScreenState>,
}

impl<L: Ledger> CardSession<L> {
    pub fn new(ledger: Arc<L>, card_number: String, history_limit: u32) -> Self {
        Self {
            ledger,
            card_number,
            history_limit,
            screen: Mutex::new(ScreenState::default()),
        }
    }

    /// Copy of the screen for rendering
    pub async fn snapshot(&self) -> ScreenState {
        self.screen.lock().await.clone()
    }

    pub async fn edit(&self, field: FormField, value: &str) -> Result<(), FormError> {
        self.screen.lock().await.edit(field, value)
    }

    pub async fn clear_form(&self) -> Result<(), FormError> {
        self.screen.lock().await.clear_form()
    }

    /// Re-read the card. On failure the previous card stays on screen.
    pub async fn refresh_balance(&self) -> Result<(), Notification> {
        match self.ledger.get_balance(&self.card_number).await {
            Ok(card) => {
                debug!("Balance for card {} refreshed", self.card_number);
                self.screen.lock().await.apply_card(card);
                Ok(())
            }
            Err(e) => {
                warn!("Failed to fetch balance for card {}: {}", self.card_number, e);
                Err(Notification::error("Не удалось загрузить баланс карты"))
            }
        }
    }

    /// Re-read the history, `limit` overriding the configured one.
    /// On failure the previous list stays on screen.
    pub async fn refresh_transactions(&self, limit: Option<u32>) -> Result<(), Notification> {
        let limit = limit.unwrap_or(self.history_limit);
        match self.ledger.get_transactions(&self.card_number, limit).await {
            Ok(transactions) => {
                debug!(
                    "History for card {} refreshed: {} entries",
                    self.card_number,
                    transactions.len()
                );
                self.screen.lock().await.apply_transactions(transactions);
                Ok(())
            }
            Err(e) => {
                warn!("Failed to fetch transactions for card {}: {}", self.card_number, e);
                Err(Notification::error("Не удалось загрузить историю операций"))
            }
        }
    }

    /// Balance, then history, one after the other. Returns a notification per failed read.
    pub async fn refresh(&self) -> Vec<Notification> {
        let mut failures = Vec::new();
        if let Err(note) = self.refresh_balance().await {
            failures.push(note);
        }
        if let Err(note) = self.refresh_transactions(None).await {
            failures.push(note);
        }
        failures
    }

    /// Submit the transfer form.
    ///
    /// Returns the outcome notification first, followed by any refresh failures.
    pub async fn submit_transfer(&self) -> Vec<Notification> {
        let draft = self.screen.lock().await.begin_transfer();
        let draft = match draft {
            Ok(draft) => draft,
            Err(e) => return vec![Notification::error(e.to_string())],
        };

        let op_id = Uuid::new_v4();
        info!(%op_id, "Transfer of {} to {} from card {}", draft.amount, draft.recipient, self.card_number);

        let outcome = self
            .ledger
            .submit_transfer(&self.card_number, draft.amount, &draft.recipient)
            .await;

        match &outcome {
            Ok(receipt) => info!(%op_id, "Transfer accepted, ledger reports balance {:?}", receipt.new_balance),
            Err(e) => warn!(%op_id, "Transfer failed: {}", e),
        }

        let note = self.screen.lock().await.finish_transfer(&draft, &outcome);
        self.settle(note, outcome.is_ok()).await
    }

    /// Submit the top-up form
    pub async fn submit_top_up(&self) -> Vec<Notification> {
        let draft = self.screen.lock().await.begin_top_up();
        let draft = match draft {
            Ok(draft) => draft,
            Err(e) => return vec![Notification::error(e.to_string())],
        };

        let op_id = Uuid::new_v4();
        info!(%op_id, "Top-up of {} to card {}", draft.amount, self.card_number);

        let outcome = self
            .ledger
            .submit_top_up(&self.card_number, draft.amount)
            .await;

        match &outcome {
            Ok(receipt) => info!(%op_id, "Top-up accepted, ledger reports balance {:?}", receipt.new_balance),
            Err(e) => warn!(%op_id, "Top-up failed: {}", e),
        }

        let note = self.screen.lock().await.finish_top_up(&draft, &outcome);
        self.settle(note, outcome.is_ok()).await
    }

    /// After a successful write the screen is re-read from the ledger, never patched locally
    async fn settle(&self, note: Notification, succeeded: bool) -> Vec<Notification> {
        let mut notes = vec![note];
        if succeeded {
            notes.extend(self.refresh().await);
        }
        notes
    }
}

/// All open screens, one per Discord user, sharing one ledger client
pub struct SessionStore<L: Ledger> {
    ledger: Arc<L>,
    card_number: String,
    history_limit: u32,
    sessions: Mutex<HashMap<u64, Arc<CardSession<L>>>>,
}

impl<L: Ledger> SessionStore<L> {
    pub fn new(ledger: Arc<L>, card_number: String, history_limit: u32) -> Self {
        Self {
            ledger,
            card_number,
            history_limit,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    pub fn ledger(&self) -> &Arc<L> {
        &self.ledger
    }

    pub fn card_number(&self) -> &str {
        &self.card_number
    }

    /// Screen of `user_id`, opened on first use
    pub async fn session(&self, user_id: u64) -> Arc<CardSession<L>> {
        let mut sessions = self.sessions.lock().await;
        sessions
            .entry(user_id)
            .or_insert_with(|| {
                debug!("Opening card screen for user {}", user_id);
                Arc::new(CardSession::new(
                    Arc::clone(&self.ledger),
                    self.card_number.clone(),
                    self.history_limit,
                ))
            })
            .clone()
    }
}
