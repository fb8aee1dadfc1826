use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use tithe_wallet::{AppState, config::Config, database, routes};
use tower::util::ServiceExt;

#[derive(Clone)]
pub struct TestConfig {
    pub temp_dir_path: String,
}

impl TestConfig {
    pub fn new() -> anyhow::Result<Self> {
        let temp_dir = tempfile::tempdir()?;
        let temp_dir_path = temp_dir.path().to_string_lossy().to_string();
        std::mem::forget(temp_dir);
        Ok(Self { temp_dir_path })
    }

    pub fn data_path(&self) -> String {
        self.temp_dir_path.clone()
    }

    /// Both external services point at a closed local port.
    pub fn app_config(&self) -> Config {
        Config {
            data_path: self.data_path(),
            gemini_api_key: None,
            advice_api_url: "http://127.0.0.1:9".to_string(),
            exchange_rate_url: "http://127.0.0.1:9/json/last/USD-BRL".to_string(),
            http_timeout: Duration::from_secs(2),
            ..Config::default()
        }
    }
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

#[allow(dead_code)]
pub async fn setup_test_app() -> anyhow::Result<TestApp> {
    let test_config = TestConfig::new()?;
    let config = test_config.app_config();

    let db = database::init_wallet_db(&config.data_path)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to initialize wallet database: {}", e))?;

    let app_state = AppState::new(config, db)?;
    let router = routes::build_router(app_state.clone());

    Ok(TestApp {
        router,
        state: app_state,
    })
}

#[allow(dead_code)]
pub async fn request(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<String>,
) -> anyhow::Result<(StatusCode, String)> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.map(Body::from).unwrap_or_else(Body::empty))
        .map_err(|e| anyhow::anyhow!("Failed to build request: {}", e))?;

    let response = app
        .clone()
        .oneshot(request)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to execute request: {}", e))?;

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read response body: {}", e))?;
    let body_str = String::from_utf8(body.to_vec())?;

    Ok((status, body_str))
}

#[allow(dead_code)]
pub async fn add_transaction(
    app: &Router,
    amount: f64,
    description: &str,
    date: &str,
) -> anyhow::Result<serde_json::Value> {
    let payload = serde_json::json!({
        "amount": amount,
        "description": description,
        "date": date,
    });
    let (status, body) = request(app, "POST", "/transactions", Some(payload.to_string())).await?;
    anyhow::ensure!(
        status == StatusCode::CREATED,
        "unexpected status {}: {}",
        status,
        body
    );
    Ok(serde_json::from_str(&body)?)
}
