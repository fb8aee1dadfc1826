//! Upgrades stored or imported wallet documents to the current schema.
//!
//! Version 1 documents predate tithe payments: they carry no `schemaVersion`,
//! may lack `tithePayments`, and their transactions still hold the old
//! `type` and `isTithePaid` fields.

use serde_json::{Map, Value, json};
use thiserror::Error;

use crate::constants::{
    CURRENT_SCHEMA_VERSION, DEFAULT_CURRENCY, DEFAULT_PROSPERITY_GOAL, LEGACY_SCHEMA_VERSION,
};

const LEGACY_TRANSACTION_FIELDS: [&str; 2] = ["type", "isTithePaid"];

#[derive(Debug, Error, PartialEq)]
pub enum MigrationError {
    #[error("Wallet document must be a JSON object")]
    NotAnObject,
    #[error("Invalid schema version")]
    InvalidVersion,
    #[error("Unsupported schema version {0}")]
    UnsupportedVersion(u64),
}

pub fn document_version(document: &Map<String, Value>) -> Result<u64, MigrationError> {
    match document.get("schemaVersion") {
        None | Some(Value::Null) => Ok(u64::from(LEGACY_SCHEMA_VERSION)),
        Some(value) => value.as_u64().ok_or(MigrationError::InvalidVersion),
    }
}

/// Brings `document` up to the current schema version. Fields that already
/// exist are never overwritten.
pub fn migrate_document(document: Value) -> Result<Value, MigrationError> {
    let Value::Object(mut map) = document else {
        return Err(MigrationError::NotAnObject);
    };

    let mut version = document_version(&map)?;
    if version == 0 || version > u64::from(CURRENT_SCHEMA_VERSION) {
        return Err(MigrationError::UnsupportedVersion(version));
    }

    while version < u64::from(CURRENT_SCHEMA_VERSION) {
        match version {
            1 => upgrade_v1_to_v2(&mut map),
            _ => return Err(MigrationError::UnsupportedVersion(version)),
        }
        version += 1;
    }

    map.insert("schemaVersion".to_string(), json!(CURRENT_SCHEMA_VERSION));
    Ok(Value::Object(map))
}

fn upgrade_v1_to_v2(map: &mut Map<String, Value>) {
    map.entry("tithePayments").or_insert_with(|| json!([]));
    map.entry("darkMode").or_insert(Value::Bool(false));
    map.entry("currency").or_insert_with(|| json!(DEFAULT_CURRENCY));
    map.entry("prosperityGoal")
        .or_insert_with(|| json!(DEFAULT_PROSPERITY_GOAL));

    if let Some(Value::Array(transactions)) = map.get_mut("transactions") {
        for transaction in transactions.iter_mut() {
            if let Value::Object(fields) = transaction {
                for legacy in LEGACY_TRANSACTION_FIELDS {
                    fields.remove(legacy);
                }
            }
        }
    }
}
