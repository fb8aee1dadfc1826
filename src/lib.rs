pub mod advice;
pub mod backup;
pub mod config;
pub mod constants;
pub mod database;
pub mod exchange;
pub mod ledger;
pub mod migration;
pub mod models;
pub mod routes;
pub mod store;
pub mod utils;
pub mod wallet;

use reqwest::Client;

// Re-export types at crate root for convenient importing
pub use crate::advice::AdviceService;
pub use crate::config::Config;
pub use crate::database::Db;
pub use crate::exchange::RateCache;
pub use crate::store::WalletStore;

/// Application state shared across all request handlers
#[derive(Clone)]
pub struct AppState {
    /// Owner of the persisted wallet document
    pub store: WalletStore,
    /// Shared HTTP client for the exchange-rate and advice APIs
    pub http: Client,
    /// Last known USD→BRL quote
    pub rates: RateCache,
    /// Advice client and the advice currently on display
    pub advice: AdviceService,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config, db: Db) -> anyhow::Result<Self> {
        let http = Client::builder().timeout(config.http_timeout).build()?;
        let advice = AdviceService::new(
            http.clone(),
            config.advice_api_url.clone(),
            config.gemini_api_key.clone(),
            config.gemini_model.clone(),
        );

        Ok(Self {
            store: WalletStore::new(db),
            http,
            rates: RateCache::new(),
            advice,
            config,
        })
    }
}
