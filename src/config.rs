use std::time::Duration;

use crate::constants::*;

/// Runtime configuration, read from the environment (after `.env`).
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub data_path: String,
    pub frontend_origin: String,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub advice_api_url: String,
    pub exchange_rate_url: String,
    pub rate_poll_interval: Duration,
    pub http_timeout: Duration,
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn env_seconds(name: &str, default: u64) -> Result<Duration, String> {
    let seconds = match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|_| format!("{} must be a whole number of seconds", name))?,
        Err(_) => default,
    };
    if seconds == 0 {
        return Err(format!("{} must be greater than 0", name));
    }
    Ok(Duration::from_secs(seconds))
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| format!("Invalid PORT '{}'", raw))?,
            Err(_) => DEFAULT_PORT,
        };

        let gemini_api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        Ok(Self {
            host: env_or("HOST", DEFAULT_HOST),
            port,
            data_path: env_or("DATA_PATH", DEFAULT_DATA_PATH),
            frontend_origin: env_or("FRONTEND_ORIGIN", DEFAULT_FRONTEND_ORIGIN),
            gemini_api_key,
            gemini_model: env_or("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
            advice_api_url: env_or("ADVICE_API_URL", DEFAULT_ADVICE_API_URL),
            exchange_rate_url: env_or("EXCHANGE_RATE_URL", DEFAULT_EXCHANGE_RATE_URL),
            rate_poll_interval: env_seconds("RATE_POLL_SECONDS", DEFAULT_RATE_POLL_SECONDS)?,
            http_timeout: env_seconds("HTTP_TIMEOUT_SECONDS", DEFAULT_HTTP_TIMEOUT_SECONDS)?,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            data_path: DEFAULT_DATA_PATH.to_string(),
            frontend_origin: DEFAULT_FRONTEND_ORIGIN.to_string(),
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            advice_api_url: DEFAULT_ADVICE_API_URL.to_string(),
            exchange_rate_url: DEFAULT_EXCHANGE_RATE_URL.to_string(),
            rate_poll_interval: Duration::from_secs(DEFAULT_RATE_POLL_SECONDS),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECONDS),
        }
    }
}
