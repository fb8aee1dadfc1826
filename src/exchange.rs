use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::constants::{EXCHANGE_RATE_PAIR_KEY, RATE_PLACEHOLDER};
use crate::ledger::format_brl;
use crate::models::{ExchangeRate, ExchangeRateResponse};

#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub bid: f64,
    pub fetched_at: String,
}

/// Last known USD→BRL quote. Empty until the first successful fetch.
#[derive(Clone, Default)]
pub struct RateCache {
    latest: Arc<RwLock<Option<Quote>>>,
}

impl RateCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn latest(&self) -> Option<Quote> {
        self.latest.read().await.clone()
    }

    pub async fn store(&self, quote: Quote) {
        *self.latest.write().await = Some(quote);
    }

    pub async fn to_response(&self) -> ExchangeRateResponse {
        match self.latest().await {
            Some(quote) => ExchangeRateResponse {
                bid: Some(quote.bid),
                display: format_brl(quote.bid),
                fetched_at: Some(quote.fetched_at),
            },
            None => ExchangeRateResponse {
                bid: None,
                display: RATE_PLACEHOLDER.to_string(),
                fetched_at: None,
            },
        }
    }
}

/// Pulls the USD→BRL entry out of the API body and parses its bid.
pub fn parse_rate_body(body: &HashMap<String, ExchangeRate>) -> Result<f64, String> {
    let rate = body
        .get(EXCHANGE_RATE_PAIR_KEY)
        .ok_or_else(|| format!("Exchange rate response missing {}", EXCHANGE_RATE_PAIR_KEY))?;

    let bid: f64 = rate
        .bid
        .trim()
        .parse()
        .map_err(|_| format!("Invalid bid value: {}", rate.bid))?;

    if !bid.is_finite() {
        return Err(format!("Invalid bid value: {}", rate.bid));
    }
    Ok(bid)
}

pub async fn fetch_exchange_rate(http: &Client, url: &str) -> Result<f64, String> {
    let response = http
        .get(url)
        .send()
        .await
        .map_err(|_| "Failed to contact exchange rate API".to_string())?;

    if !response.status().is_success() {
        return Err(format!("Exchange rate API error: {}", response.status()));
    }

    let body: HashMap<String, ExchangeRate> = response
        .json()
        .await
        .map_err(|_| "Failed to parse exchange rate response".to_string())?;

    parse_rate_body(&body)
}

/// One fetch; on failure the cache keeps whatever it had.
pub async fn refresh_rate(http: &Client, url: &str, cache: &RateCache) {
    match fetch_exchange_rate(http, url).await {
        Ok(bid) => {
            let fetched_at = OffsetDateTime::now_utc()
                .format(&Rfc3339)
                .unwrap_or_default();
            debug!("Exchange rate updated: {}", bid);
            cache.store(Quote { bid, fetched_at }).await;
        }
        Err(e) => warn!("Could not fetch exchange rate: {}", e),
    }
}

pub fn spawn_rate_poller(
    http: Client,
    url: String,
    cache: RateCache,
    period: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            refresh_rate(&http, &url, &cache).await;
        }
    })
}
