use serenity::model::channel::Message;
use serenity::prelude::Context;
use crate::commands::{app_config, author_session, send_embed, send_notifications};
use crate::config::MAX_HISTORY_LIMIT;
use crate::services::history_service;

const USAGE: &str = "Usage: `$history [n|all] [p2]`, where n is a positive number";

#[derive(Debug, PartialEq, Eq)]
pub struct HistoryArgs {
    pub limit: u32,
    pub page: usize,
}

/// `$history`, `$history 25`, `$history all`, `$history all p2`, `$history p3`
pub fn parse_args(args: &[&str], default: u32) -> Result<HistoryArgs, String> {
    let mut limit = None;
    let mut page = None;

    for arg in args {
        let arg = arg.to_lowercase();
        if let Some(page_str) = arg.strip_prefix('p') {
            if page.is_some() {
                return Err(USAGE.to_string());
            }
            page = match page_str.parse::<usize>() {
                Ok(n) if n > 0 => Some(n),
                _ => return Err(USAGE.to_string()),
            };
        } else if limit.is_some() {
            return Err(USAGE.to_string());
        } else if arg == "all" {
            limit = Some(MAX_HISTORY_LIMIT);
        } else {
            limit = match arg.parse::<u32>() {
                Ok(n) if n > 0 => Some(n.min(MAX_HISTORY_LIMIT)),
                _ => return Err(USAGE.to_string()),
            };
        }
    }

    Ok(HistoryArgs {
        limit: limit.unwrap_or(default),
        page: page.unwrap_or(1),
    })
}

pub async fn execute(ctx: &Context, msg: &Message, args: &[&str]) -> Result<(), String> {
    let config = app_config(ctx).await?;
    let HistoryArgs { limit, page } = parse_args(args, config.history_limit)?;
    let session = author_session(ctx, msg).await?;

    // A failed read leaves the previous list in place; show it along with the error
    let refreshed = session.refresh_transactions(Some(limit)).await;
    let screen = session.snapshot().await;

    let embed = history_service::create_history_embed(&screen.transactions, limit, page)?;
    send_embed(ctx, msg, embed).await?;
    if let Err(note) = refreshed {
        send_notifications(ctx, msg, &[note]).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(limit: u32, page: usize) -> Result<HistoryArgs, String> {
        Ok(HistoryArgs { limit, page })
    }

    #[test]
    fn test_parse_limit() {
        assert_eq!(parse_args(&[], 10), args(10, 1));
        assert_eq!(parse_args(&["25"], 10), args(25, 1));
        assert_eq!(parse_args(&["ALL"], 10), args(MAX_HISTORY_LIMIT, 1));
        assert_eq!(parse_args(&["5000"], 10), args(MAX_HISTORY_LIMIT, 1));
        assert!(parse_args(&["0"], 10).is_err());
        assert!(parse_args(&["many"], 10).is_err());
    }

    #[test]
    fn test_parse_page() {
        assert_eq!(parse_args(&["all", "p2"], 10), args(MAX_HISTORY_LIMIT, 2));
        assert_eq!(parse_args(&["P3"], 10), args(10, 3));
        assert_eq!(parse_args(&["p2", "50"], 10), args(50, 2));
        assert!(parse_args(&["all", "p0"], 10).is_err());
        assert!(parse_args(&["p1", "p2"], 10).is_err());
        assert!(parse_args(&["10", "20"], 10).is_err());
    }
}
