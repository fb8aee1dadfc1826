use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tithe_wallet::{AppState, config::Config, database, exchange, routes};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load and validate configuration
    let config = Config::from_env().map_err(|e| format!("Configuration error: {}", e))?;

    let db = database::init_wallet_db(&config.data_path)
        .await
        .map_err(|e| format!("Failed to initialize wallet database: {}", e))?;

    let app_state = AppState::new(config.clone(), db)
        .map_err(|e| format!("Failed to build HTTP client: {}", e))?;

    // Background work: exchange-rate polling and the first advice load
    exchange::spawn_rate_poller(
        app_state.http.clone(),
        config.exchange_rate_url.clone(),
        app_state.rates.clone(),
        config.rate_poll_interval,
    );
    let wallet = app_state
        .store
        .load()
        .await
        .map_err(|e| format!("Failed to load wallet: {}", e))?;
    app_state.advice.spawn_refresh(wallet.transactions);

    let frontend_origin_header = config
        .frontend_origin
        .parse::<axum::http::HeaderValue>()
        .map_err(|e| format!("Invalid FRONTEND_ORIGIN '{}': {}", config.frontend_origin, e))?;

    let cors = CorsLayer::new()
        .allow_origin(frontend_origin_header)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::DELETE,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ]);

    let app = routes::build_router(app_state).layer(cors);

    let bind_address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .map_err(|e| format!("Failed to bind to {}: {}", bind_address, e))?;

    info!("Tithe wallet running on http://{}", bind_address);

    axum::serve(listener, app)
        .await
        .map_err(|e| format!("Server error: {}", e))?;

    Ok(())
}
