use axum::{
    Json,
    body::Bytes,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::AppState;
use crate::backup::{backup_file_name, decode_wallet_document, export_document};
use crate::constants::*;
use crate::exchange::refresh_rate;
use crate::ledger::summarize;
use crate::models::{
    AdviceResponse, ConfirmQuery, CreateTithePaymentPayload, CreateTransactionPayload,
    ExchangeRateResponse, LedgerSummary, TithePayment, Transaction, UpdateGoalPayload, WalletData,
};
use crate::store::{StoreError, WalletStore};
use crate::utils::{
    confirmation_required, db_error, today_date, validate_date, validate_goal,
    validate_positive_amount, validate_string_length,
};

fn store_error(e: StoreError) -> (StatusCode, String) {
    match e {
        StoreError::NotFound(message) => (StatusCode::NOT_FOUND, message.to_string()),
        other => {
            error!("Wallet store failure: {}", other);
            db_error()
        }
    }
}

pub fn validate_description(description: &str) -> Result<(), (StatusCode, String)> {
    validate_string_length(description, "Description", MAX_DESCRIPTION_LENGTH)
}

/// Reloads the wallet and asks for fresh advice in the background.
async fn schedule_advice_refresh(state: &AppState) {
    match state.store.load().await {
        Ok(data) => {
            state.advice.spawn_refresh(data.transactions);
        }
        Err(e) => error!("Could not load wallet for advice refresh: {}", e),
    }
}

pub async fn create_transaction_for_wallet(
    store: &WalletStore,
    payload: CreateTransactionPayload,
) -> Result<Transaction, (StatusCode, String)> {
    validate_positive_amount(payload.amount, "Amount")?;
    validate_description(&payload.description)?;
    validate_date(&payload.date)?;

    let transaction = Transaction {
        id: Uuid::new_v4().to_string(),
        amount: payload.amount,
        description: payload.description.trim().to_string(),
        date: payload.date.trim().to_string(),
    };

    store.add_transaction(transaction).await.map_err(store_error)
}

pub async fn create_tithe_payment_for_wallet(
    store: &WalletStore,
    payload: CreateTithePaymentPayload,
) -> Result<TithePayment, (StatusCode, String)> {
    validate_positive_amount(payload.amount, "Amount")?;
    validate_date(&payload.date)?;

    let payment = TithePayment {
        id: Uuid::new_v4().to_string(),
        amount: payload.amount,
        date: payload.date.trim().to_string(),
    };

    store.add_tithe_payment(payment).await.map_err(store_error)
}

pub async fn get_wallet(
    State(app_state): State<AppState>,
) -> Result<Json<WalletData>, (StatusCode, String)> {
    let data = app_state.store.load().await.map_err(store_error)?;
    Ok(Json(data))
}

pub async fn get_summary(
    State(app_state): State<AppState>,
) -> Result<Json<LedgerSummary>, (StatusCode, String)> {
    let data = app_state.store.load().await.map_err(store_error)?;
    Ok(Json(summarize(&data, RECENT_ACTIVITY_LIMIT)))
}

pub async fn create_transaction(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateTransactionPayload>,
) -> Result<(StatusCode, Json<Transaction>), (StatusCode, String)> {
    let transaction = create_transaction_for_wallet(&app_state.store, payload).await?;
    info!("Added transaction {} ({})", transaction.id, transaction.date);

    schedule_advice_refresh(&app_state).await;

    Ok((StatusCode::CREATED, Json(transaction)))
}

pub async fn delete_transaction(
    State(app_state): State<AppState>,
    Path(transaction_id): Path<String>,
    Query(confirm): Query<ConfirmQuery>,
) -> Result<StatusCode, (StatusCode, String)> {
    if !confirm.is_confirmed() {
        return Err(confirmation_required());
    }

    app_state
        .store
        .delete_transaction(&transaction_id)
        .await
        .map_err(store_error)?;
    info!("Deleted transaction {}", transaction_id);

    schedule_advice_refresh(&app_state).await;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn create_tithe_payment(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateTithePaymentPayload>,
) -> Result<(StatusCode, Json<TithePayment>), (StatusCode, String)> {
    let payment = create_tithe_payment_for_wallet(&app_state.store, payload).await?;
    info!("Recorded tithe payment {} ({})", payment.id, payment.date);
    Ok((StatusCode::CREATED, Json(payment)))
}

pub async fn delete_tithe_payment(
    State(app_state): State<AppState>,
    Path(payment_id): Path<String>,
    Query(confirm): Query<ConfirmQuery>,
) -> Result<StatusCode, (StatusCode, String)> {
    if !confirm.is_confirmed() {
        return Err(confirmation_required());
    }

    app_state
        .store
        .delete_tithe_payment(&payment_id)
        .await
        .map_err(store_error)?;
    info!("Deleted tithe payment {}", payment_id);

    Ok(StatusCode::NO_CONTENT)
}

pub async fn update_goal(
    State(app_state): State<AppState>,
    Json(payload): Json<UpdateGoalPayload>,
) -> Result<Json<WalletData>, (StatusCode, String)> {
    validate_goal(payload.goal)?;

    let data = app_state
        .store
        .set_goal(payload.goal)
        .await
        .map_err(store_error)?;
    Ok(Json(data))
}

pub async fn toggle_dark_mode(
    State(app_state): State<AppState>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    let dark_mode = app_state
        .store
        .toggle_dark_mode()
        .await
        .map_err(store_error)?;
    Ok(Json(json!({ "darkMode": dark_mode })))
}

pub async fn clear_wallet(
    State(app_state): State<AppState>,
    Query(confirm): Query<ConfirmQuery>,
) -> Result<Json<WalletData>, (StatusCode, String)> {
    if !confirm.is_confirmed() {
        return Err(confirmation_required());
    }

    let data = app_state.store.reset().await.map_err(store_error)?;
    info!("Wallet cleared");

    app_state.advice.spawn_refresh(Vec::new());

    Ok(Json(data))
}

pub async fn get_exchange_rate(State(app_state): State<AppState>) -> Json<ExchangeRateResponse> {
    Json(app_state.rates.to_response().await)
}

pub async fn refresh_exchange_rate(
    State(app_state): State<AppState>,
) -> Json<ExchangeRateResponse> {
    refresh_rate(
        &app_state.http,
        &app_state.config.exchange_rate_url,
        &app_state.rates,
    )
    .await;
    Json(app_state.rates.to_response().await)
}

pub async fn get_advice(State(app_state): State<AppState>) -> Json<AdviceResponse> {
    Json(app_state.advice.current().await)
}

pub async fn refresh_advice(State(app_state): State<AppState>) -> StatusCode {
    schedule_advice_refresh(&app_state).await;
    StatusCode::ACCEPTED
}

pub async fn export_backup(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let data = app_state.store.load().await.map_err(store_error)?;
    let body = export_document(&data).map_err(|e| store_error(StoreError::from(e)))?;
    let disposition = format!(
        "attachment; filename=\"{}\"",
        backup_file_name(&today_date())
    );

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}

pub async fn import_backup(
    State(app_state): State<AppState>,
    body: Bytes,
) -> Result<Json<WalletData>, (StatusCode, String)> {
    let raw = std::str::from_utf8(&body).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            "Backup file must be UTF-8 text".to_string(),
        )
    })?;

    let data = decode_wallet_document(raw).map_err(|e| {
        info!("Rejected backup import: {}", e);
        (StatusCode::BAD_REQUEST, e.to_string())
    })?;

    app_state
        .store
        .replace(data.clone())
        .await
        .map_err(store_error)?;
    info!(
        "Imported backup with {} transactions",
        data.transactions.len()
    );

    schedule_advice_refresh(&app_state).await;

    Ok(Json(data))
}
