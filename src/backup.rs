//! Backup files: the wallet document exported as JSON and read back in.
//!
//! Imports go through the same decoding as stored documents: parse, migrate
//! to the current schema, then check every field before anything replaces
//! the wallet.

use std::collections::HashSet;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::constants::BACKUP_FILE_PREFIX;
use crate::migration::{MigrationError, migrate_document};
use crate::models::WalletData;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Backup file is not valid JSON: {0}")]
    Parse(String),
    #[error(transparent)]
    Migration(#[from] MigrationError),
    #[error("Missing field: {0}")]
    MissingField(String),
    #[error("Invalid field {field}: {reason}")]
    InvalidField { field: String, reason: String },
    #[error("Duplicate id in {list}: {id}")]
    DuplicateId { list: String, id: String },
}

fn invalid(field: impl Into<String>, reason: &str) -> ImportError {
    ImportError::InvalidField {
        field: field.into(),
        reason: reason.to_string(),
    }
}

pub fn backup_file_name(date: &str) -> String {
    format!("{}-{}.json", BACKUP_FILE_PREFIX, date)
}

pub fn export_document(data: &WalletData) -> serde_json::Result<String> {
    serde_json::to_string(data)
}

/// Parses, migrates and validates a wallet document.
pub fn decode_wallet_document(raw: &str) -> Result<WalletData, ImportError> {
    // Some editors save JSON with a byte-order mark.
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let value: Value = serde_json::from_str(raw).map_err(|e| ImportError::Parse(e.to_string()))?;

    match value.get("transactions") {
        Some(Value::Array(_)) => {}
        Some(_) => return Err(invalid("transactions", "must be a list")),
        None => return Err(ImportError::MissingField("transactions".to_string())),
    }

    let migrated = migrate_document(value)?;
    validate_document(&migrated)?;

    serde_json::from_value(migrated).map_err(|e| ImportError::Parse(e.to_string()))
}

/// Structural check of a current-schema document.
pub fn validate_document(document: &Value) -> Result<(), ImportError> {
    let map = document.as_object().ok_or(MigrationError::NotAnObject)?;

    let transactions = required_array(map, "transactions")?;
    let mut seen = HashSet::new();
    for (index, item) in transactions.iter().enumerate() {
        let path = format!("transactions[{}]", index);
        let entry = item
            .as_object()
            .ok_or_else(|| invalid(path.as_str(), "must be an object"))?;
        let id = required_string(entry, &path, "id")?;
        required_amount(entry, &path)?;
        required_string(entry, &path, "description")?;
        required_string(entry, &path, "date")?;
        if !seen.insert(id) {
            return Err(ImportError::DuplicateId {
                list: "transactions".to_string(),
                id: id.to_string(),
            });
        }
    }

    let payments = required_array(map, "tithePayments")?;
    let mut seen = HashSet::new();
    for (index, item) in payments.iter().enumerate() {
        let path = format!("tithePayments[{}]", index);
        let entry = item
            .as_object()
            .ok_or_else(|| invalid(path.as_str(), "must be an object"))?;
        let id = required_string(entry, &path, "id")?;
        required_amount(entry, &path)?;
        required_string(entry, &path, "date")?;
        if !seen.insert(id) {
            return Err(ImportError::DuplicateId {
                list: "tithePayments".to_string(),
                id: id.to_string(),
            });
        }
    }

    match map.get("darkMode") {
        Some(Value::Bool(_)) => {}
        Some(_) => return Err(invalid("darkMode", "must be a boolean")),
        None => return Err(ImportError::MissingField("darkMode".to_string())),
    }

    match map.get("currency") {
        Some(Value::String(_)) => {}
        Some(_) => return Err(invalid("currency", "must be a string")),
        None => return Err(ImportError::MissingField("currency".to_string())),
    }

    match map.get("prosperityGoal") {
        None | Some(Value::Null) => {}
        Some(value) => match value.as_f64() {
            Some(goal) if goal.is_finite() => {}
            _ => return Err(invalid("prosperityGoal", "must be a number")),
        },
    }

    Ok(())
}

fn required_array<'a>(map: &'a Map<String, Value>, field: &str) -> Result<&'a Vec<Value>, ImportError> {
    match map.get(field) {
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(invalid(field, "must be a list")),
        None => Err(ImportError::MissingField(field.to_string())),
    }
}

fn required_string<'a>(
    entry: &'a Map<String, Value>,
    path: &str,
    field: &str,
) -> Result<&'a str, ImportError> {
    match entry.get(field) {
        Some(Value::String(value)) => Ok(value),
        Some(_) => Err(invalid(format!("{}.{}", path, field), "must be a string")),
        None => Err(ImportError::MissingField(format!("{}.{}", path, field))),
    }
}

fn required_amount(entry: &Map<String, Value>, path: &str) -> Result<f64, ImportError> {
    let field = format!("{}.amount", path);
    match entry.get("amount") {
        Some(value) => match value.as_f64() {
            Some(amount) if amount.is_finite() => Ok(amount),
            _ => Err(invalid(field, "must be a number")),
        },
        None => Err(ImportError::MissingField(field)),
    }
}
