use std::sync::Arc;

use reqwest::Client;
use serde_json::json;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::constants::{
    ADVICE_EMPTY_REPLY, ADVICE_FALLBACK, ADVICE_LOADING, ADVICE_NO_TRANSACTIONS,
    ADVICE_RECENT_TRANSACTIONS, TITHE_RATE,
};
use crate::ledger::{gross_total, recent_transactions};
use crate::models::{AdviceResponse, Transaction};

struct AdviceState {
    text: String,
    /// Refreshes started but not yet finished.
    in_flight: usize,
}

/// Client for the generative-language API plus the last advice shown.
#[derive(Clone)]
pub struct AdviceService {
    http: Client,
    api_url: String,
    api_key: Option<String>,
    model: String,
    state: Arc<RwLock<AdviceState>>,
}

pub fn build_prompt(transactions: &[Transaction]) -> String {
    let total = gross_total(transactions);
    let recent = recent_transactions(transactions, ADVICE_RECENT_TRANSACTIONS)
        .iter()
        .map(|t| format!("{}: R${:.2}", t.description, t.amount))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Você é um consultor financeiro experiente e acolhedor.\n\
         Transações recentes do usuário: {}.\n\
         Total bruto recebido até agora: R${:.2}.\n\
         O usuário reserva {}% de cada entrada para o dízimo.\n\
         Escreva uma dica curta, criativa e motivadora (no máximo 3 frases), em português, \
         sobre prosperidade ou organização financeira.",
        recent,
        total,
        (TITHE_RATE * 100.0).round()
    )
}

/// Concatenates the text parts of the first candidate.
pub fn extract_advice_text(value: &serde_json::Value) -> Result<String, String> {
    let parts = value
        .get("candidates")
        .and_then(|candidates| candidates.as_array())
        .and_then(|candidates| candidates.first())
        .and_then(|candidate| candidate.get("content"))
        .and_then(|content| content.get("parts"))
        .and_then(|parts| parts.as_array())
        .ok_or_else(|| "Advice response missing candidates".to_string())?;

    let text = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(|text| text.as_str()))
        .collect::<Vec<_>>()
        .join("");

    Ok(text.trim().to_string())
}

impl AdviceService {
    pub fn new(http: Client, api_url: String, api_key: Option<String>, model: String) -> Self {
        Self {
            http,
            api_url,
            api_key,
            model,
            state: Arc::new(RwLock::new(AdviceState {
                text: ADVICE_LOADING.to_string(),
                in_flight: 0,
            })),
        }
    }

    pub async fn current(&self) -> AdviceResponse {
        let state = self.state.read().await;
        AdviceResponse {
            advice: state.text.clone(),
            loading: state.in_flight > 0,
        }
    }

    /// Always produces displayable text; failures turn into the fallback.
    pub async fn get_financial_advice(&self, transactions: &[Transaction]) -> String {
        if transactions.is_empty() {
            return ADVICE_NO_TRANSACTIONS.to_string();
        }

        let Some(api_key) = self.api_key.as_deref() else {
            debug!("No advice API key configured, using fallback advice");
            return ADVICE_FALLBACK.to_string();
        };

        match self.send_generate_request(api_key, &build_prompt(transactions)).await {
            Ok(text) if text.is_empty() => ADVICE_EMPTY_REPLY.to_string(),
            Ok(text) => text,
            Err(e) => {
                warn!("Advice request failed: {}", e);
                ADVICE_FALLBACK.to_string()
            }
        }
    }

    /// Loading stays set until every overlapping refresh has finished.
    pub async fn refresh(&self, transactions: &[Transaction]) -> String {
        self.state.write().await.in_flight += 1;
        let text = self.get_financial_advice(transactions).await;

        let mut state = self.state.write().await;
        state.text = text.clone();
        state.in_flight = state.in_flight.saturating_sub(1);
        text
    }

    /// Fire-and-forget refresh; whichever request completes last is shown.
    pub fn spawn_refresh(&self, transactions: Vec<Transaction>) -> JoinHandle<()> {
        let service = self.clone();
        tokio::spawn(async move {
            service.refresh(&transactions).await;
        })
    }

    async fn send_generate_request(&self, api_key: &str, prompt: &str) -> Result<String, String> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.api_url.trim_end_matches('/'),
            self.model
        );
        let body = json!({
            "contents": [
                { "parts": [ { "text": prompt } ] }
            ]
        });

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|_| "Failed to contact advice API".to_string())?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(format!("Advice API error: {} {}", status, text));
        }

        let value: serde_json::Value = response
            .json()
            .await
            .map_err(|_| "Failed to parse advice response".to_string())?;

        extract_advice_text(&value)
    }
}
