use std::collections::HashMap;
use std::time::{Duration, Instant};
use lazy_static::lazy_static;
use serenity::model::id::UserId;
use tokio::sync::Mutex;

const COOLDOWN_SECONDS: u64 = 3;

lazy_static! {
    static ref COMMAND_COOLDOWNS: Mutex<Cooldowns> =
        Mutex::new(Cooldowns::new(Duration::from_secs(COOLDOWN_SECONDS)));
}

/// Last use of each (user, command) pair
pub struct Cooldowns {
    window: Duration,
    last_used: HashMap<(u64, String), Instant>,
}

impl Cooldowns {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_used: HashMap::new(),
        }
    }

    /// Record a use at `now`, or return how long the user still has to wait.
    /// A refused attempt does not restart the window.
    pub fn check(&mut self, user_id: u64, command: &str, now: Instant) -> Result<(), Duration> {
        let key = (user_id, command.to_string());

        if let Some(&last) = self.last_used.get(&key) {
            let elapsed = now.saturating_duration_since(last);
            if elapsed < self.window {
                return Err(self.window - elapsed);
            }
        }

        self.last_used.insert(key, now);
        Ok(())
    }

    /// Drop entries whose window has passed
    pub fn prune(&mut self, now: Instant) {
        let window = self.window;
        self.last_used
            .retain(|_, last| now.saturating_duration_since(*last) < window);
    }
}

/// Check if a user can run `command` now.
/// Returns `Err(remaining_seconds)` while the cooldown is active.
pub async fn check_cooldown(user_id: UserId, command: &str) -> Result<(), u64> {
    let now = Instant::now();
    let mut cooldowns = COMMAND_COOLDOWNS.lock().await;
    cooldowns.prune(now);
    cooldowns
        .check(user_id.get(), command, now)
        .map_err(|remaining| remaining.as_secs().max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cooldown_per_user_and_command() {
        let mut cooldowns = Cooldowns::new(Duration::from_secs(3));
        let start = Instant::now();

        assert!(cooldowns.check(1, "$transfer", start).is_ok());
        assert!(cooldowns.check(1, "$card", start).is_ok());
        assert!(cooldowns.check(2, "$transfer", start).is_ok());

        let remaining = cooldowns
            .check(1, "$transfer", start + Duration::from_secs(1))
            .unwrap_err();
        assert_eq!(remaining, Duration::from_secs(2));
    }

    #[test]
    fn test_cooldown_expires() {
        let mut cooldowns = Cooldowns::new(Duration::from_secs(3));
        let start = Instant::now();

        cooldowns.check(1, "$topup", start).unwrap();
        assert!(cooldowns.check(1, "$topup", start + Duration::from_secs(2)).is_err());
        assert!(cooldowns.check(1, "$topup", start + Duration::from_secs(3)).is_ok());
    }

    #[test]
    fn test_prune_drops_expired_entries() {
        let mut cooldowns = Cooldowns::new(Duration::from_secs(3));
        let start = Instant::now();
        cooldowns.check(1, "$card", start).unwrap();

        cooldowns.prune(start + Duration::from_secs(10));

        assert!(cooldowns.last_used.is_empty());
    }
}
