// Server configuration
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DATA_PATH: &str = "data";
pub const DEFAULT_FRONTEND_ORIGIN: &str = "http://localhost:8080";
pub const DATABASE_FILE_NAME: &str = "wallet.db";

// External services
pub const DEFAULT_EXCHANGE_RATE_URL: &str =
    "https://economia.awesomeapi.com.br/json/last/USD-BRL,EUR-BRL";
pub const EXCHANGE_RATE_PAIR_KEY: &str = "USDBRL";
pub const DEFAULT_RATE_POLL_SECONDS: u64 = 60;
pub const DEFAULT_ADVICE_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 10;

// Persisted document
pub const STORAGE_KEY: &str = "creative_wallet_data_v2";
pub const CURRENT_SCHEMA_VERSION: u32 = 2;
pub const LEGACY_SCHEMA_VERSION: u32 = 1;
pub const DEFAULT_CURRENCY: &str = "BRL";
pub const DEFAULT_PROSPERITY_GOAL: f64 = 5000.0;
pub const BACKUP_FILE_PREFIX: &str = "carteira-prosperidade-backup";

// Ledger arithmetic
pub const TITHE_RATE: f64 = 0.10;
pub const PROJECTION_MONTHS: f64 = 12.0;
pub const MAX_GOAL_PROGRESS: f64 = 100.0;
pub const INVALID_MONTH_KEY: &str = "invalid";
pub const INVALID_MONTH_LABEL: &str = "???";

// Dashboard
pub const RECENT_ACTIVITY_LIMIT: usize = 5;

// Validation limits
pub const MAX_DESCRIPTION_LENGTH: usize = 255;

// Advice
pub const ADVICE_RECENT_TRANSACTIONS: usize = 5;
pub const ADVICE_LOADING: &str = "Buscando sabedoria financeira...";
pub const ADVICE_NO_TRANSACTIONS: &str =
    "Adicione algumas transações para receber conselhos financeiros personalizados!";
pub const ADVICE_EMPTY_REPLY: &str = "Continue focado nos seus objetivos financeiros!";
pub const ADVICE_FALLBACK: &str = "Mantenha a consistência em seus lançamentos para prosperar!";

// Display
pub const RATE_PLACEHOLDER: &str = "---";

// Error messages
pub const ERR_DATABASE_OPERATION: &str = "Database operation failed";
pub const ERR_CONFIRMATION_REQUIRED: &str = "Confirmation required";
pub const ERR_TRANSACTION_NOT_FOUND: &str = "Transaction not found";
pub const ERR_PAYMENT_NOT_FOUND: &str = "Tithe payment not found";
