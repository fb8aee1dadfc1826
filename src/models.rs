use serde::{Deserialize, Serialize};

use crate::constants::{CURRENT_SCHEMA_VERSION, DEFAULT_CURRENCY, DEFAULT_PROSPERITY_GOAL};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: String,
    pub amount: f64,
    pub description: String,
    pub date: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TithePayment {
    pub id: String,
    pub amount: f64,
    pub date: String,
}

/// The whole persisted wallet. Every mutation rewrites this document.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WalletData {
    pub schema_version: u32,
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub tithe_payments: Vec<TithePayment>,
    #[serde(default)]
    pub dark_mode: bool,
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prosperity_goal: Option<f64>,
}

impl Default for WalletData {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            transactions: Vec::new(),
            tithe_payments: Vec::new(),
            dark_mode: false,
            currency: DEFAULT_CURRENCY.to_string(),
            prosperity_goal: Some(DEFAULT_PROSPERITY_GOAL),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CreateTransactionPayload {
    pub amount: f64,
    pub description: String,
    pub date: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CreateTithePaymentPayload {
    pub amount: f64,
    pub date: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UpdateGoalPayload {
    pub goal: f64,
}

#[derive(Deserialize, Debug, Default)]
pub struct ConfirmQuery {
    pub confirm: Option<bool>,
}

impl ConfirmQuery {
    pub fn is_confirmed(&self) -> bool {
        self.confirm.unwrap_or(false)
    }
}

/// One month bucket of the ledger.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    pub month_key: String,
    pub month: String,
    pub total: f64,
    pub tithe: f64,
    pub net: f64,
    pub is_paid: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSummary {
    pub gross_total: f64,
    pub suggested_tithe: f64,
    pub net_balance: f64,
    pub monthly: Vec<MonthlySummary>,
    pub prosperity_goal: Option<f64>,
    pub goal_progress: f64,
    pub goal_remaining: f64,
    pub projection: f64,
    pub transaction_count: usize,
    pub recent_transactions: Vec<Transaction>,
}

/// Quote as returned by the currency API. All fields arrive as strings.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct ExchangeRate {
    pub code: String,
    pub codein: String,
    pub name: String,
    pub high: String,
    pub low: String,
    pub bid: String,
    pub ask: String,
    pub timestamp: String,
    pub create_date: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ExchangeRateResponse {
    pub bid: Option<f64>,
    pub display: String,
    pub fetched_at: Option<String>,
}

#[derive(Serialize, Debug, Clone)]
pub struct AdviceResponse {
    pub advice: String,
    pub loading: bool,
}
