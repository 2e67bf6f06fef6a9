use serenity::prelude::*;
use std::time::Instant;

use crate::api::ledger::Ledger;

pub struct PingMetrics {
    pub response_roundtrip: u64,
    /// `None` when the balance read failed
    pub ledger_latency: Option<u64>,
    pub uptime: String,
}

/// Time one balance read against the ledger
pub async fn measure_ledger<L: Ledger>(ledger: &L, card_number: &str) -> Option<u64> {
    let start = Instant::now();
    match ledger.get_balance(card_number).await {
        Ok(_) => Some(start.elapsed().as_millis() as u64),
        Err(e) => {
            tracing::warn!("Ledger ping failed: {}", e);
            None
        }
    }
}

pub fn format_uptime(secs: u64) -> String {
    format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
}

pub async fn get_ping_metrics(
    ctx: &Context,
    response_roundtrip: u64,
    ledger_latency: Option<u64>,
) -> PingMetrics {
    let uptime = {
        let data = ctx.data.read().await;
        match data.get::<crate::BotData>() {
            Some(bot_start_time) => format_uptime(bot_start_time.elapsed().as_secs()),
            None => "Unknown".to_string(),
        }
    };

    PingMetrics {
        response_roundtrip,
        ledger_latency,
        uptime,
    }
}

pub fn create_ping_embed(metrics: &PingMetrics) -> serenity::builder::CreateEmbed {
    let ledger = match metrics.ledger_latency {
        Some(ms) => format!("{}ms", ms),
        None => "недоступен".to_string(),
    };

    serenity::builder::CreateEmbed::default()
        .title("Pong! 🏓")
        .field("Discord Roundtrip", format!("{}ms", metrics.response_roundtrip), true)
        .field("Ledger", ledger, true)
        .field("Uptime", &metrics.uptime, false)
        .color(0x00b0f4)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(0), "0h 0m 0s");
        assert_eq!(format_uptime(3 * 3600 + 25 * 60 + 7), "3h 25m 7s");
    }
}
