use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_CARD_NUMBER: &str = "2202 2032 4554 4491";
pub const DEFAULT_HISTORY_LIMIT: u32 = 10;
/// Upper bound for `$history` and for `FUTUREPAY_HISTORY_LIMIT`
pub const MAX_HISTORY_LIMIT: u32 = 100;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} not set")]
    Missing(&'static str),
    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Settings read from the environment (after `.env` has been loaded)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub discord_token: String,
    pub api_url: String,
    pub card_number: String,
    pub history_limit: u32,
    pub http_timeout: Option<Duration>,
    pub show_card_secrets: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the config from any variable source; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let discord_token = get("DISCORD_TOKEN").ok_or(ConfigError::Missing("DISCORD_TOKEN"))?;
        let api_url = get("FUTUREPAY_API_URL").ok_or(ConfigError::Missing("FUTUREPAY_API_URL"))?;
        let card_number =
            get("FUTUREPAY_CARD_NUMBER").unwrap_or_else(|| DEFAULT_CARD_NUMBER.to_string());

        let history_limit = match get("FUTUREPAY_HISTORY_LIMIT") {
            Some(value) => match value.parse::<u32>() {
                Ok(limit) if (1..=MAX_HISTORY_LIMIT).contains(&limit) => limit,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "FUTUREPAY_HISTORY_LIMIT",
                        value,
                    })
                }
            },
            None => DEFAULT_HISTORY_LIMIT,
        };

        let http_timeout = match get("FUTUREPAY_HTTP_TIMEOUT_SECS") {
            Some(value) => match value.parse::<u64>() {
                Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "FUTUREPAY_HTTP_TIMEOUT_SECS",
                        value,
                    })
                }
            },
            None => None,
        };

        let show_card_secrets = match get("FUTUREPAY_SHOW_CARD_SECRETS") {
            Some(value) => match value.to_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "FUTUREPAY_SHOW_CARD_SECRETS",
                        value,
                    })
                }
            },
            None => false,
        };

        Ok(Self {
            discord_token,
            api_url,
            card_number,
            history_limit,
            http_timeout,
            show_card_secrets,
        })
    }
}
