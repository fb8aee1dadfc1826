use axum::{
    Router,
    response::Html,
    routing::{delete, get, post, put},
};

use crate::{AppState, wallet};

pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/wallet", get(wallet::get_wallet))
        .route("/wallet/clear", post(wallet::clear_wallet))
        .route("/summary", get(wallet::get_summary))
        .route("/transactions", post(wallet::create_transaction))
        .route("/transactions/{id}", delete(wallet::delete_transaction))
        .route("/tithe-payments", post(wallet::create_tithe_payment))
        .route("/tithe-payments/{id}", delete(wallet::delete_tithe_payment))
        .route("/goal", put(wallet::update_goal))
        .route("/dark-mode/toggle", post(wallet::toggle_dark_mode))
        .route("/exchange-rate", get(wallet::get_exchange_rate))
        .route("/exchange-rate/refresh", post(wallet::refresh_exchange_rate))
        .route("/advice", get(wallet::get_advice))
        .route("/advice/refresh", post(wallet::refresh_advice))
        .route("/backup/export", get(wallet::export_backup))
        .route("/backup/import", post(wallet::import_backup))
        .with_state(app_state)
}

async fn root() -> Html<&'static str> {
    Html("<h1>Tithe Wallet</h1><p>API Ready</p>")
}
