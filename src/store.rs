use libsql::Connection;
use thiserror::Error;
use tracing::{debug, warn};

use crate::backup::decode_wallet_document;
use crate::constants::{ERR_PAYMENT_NOT_FOUND, ERR_TRANSACTION_NOT_FOUND, STORAGE_KEY};
use crate::database::{Db, kv_get, kv_remove, kv_set};
use crate::models::{TithePayment, Transaction, WalletData};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
    #[error("failed to serialize wallet: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("{0}")]
    NotFound(&'static str),
}

/// Single owner of the persisted wallet document.
///
/// Every mutation runs load, apply, save under the connection's write lock,
/// so two mutations never interleave and the last one to finish wins.
#[derive(Clone)]
pub struct WalletStore {
    db: Db,
}

impl WalletStore {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// Reads the wallet; a missing or unreadable document yields the default.
    pub async fn load(&self) -> Result<WalletData, StoreError> {
        let conn = self.db.read().await;
        read_document(&conn).await
    }

    pub async fn save(&self, data: &WalletData) -> Result<(), StoreError> {
        let conn = self.db.write().await;
        write_document(&conn, data).await
    }

    async fn update<T, F>(&self, apply: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut WalletData) -> Result<T, StoreError>,
    {
        let conn = self.db.write().await;
        let mut data = read_document(&conn).await?;
        let result = apply(&mut data)?;
        write_document(&conn, &data).await?;
        Ok(result)
    }

    pub async fn add_transaction(&self, transaction: Transaction) -> Result<Transaction, StoreError> {
        self.update(|data| {
            data.transactions.push(transaction.clone());
            Ok(transaction)
        })
        .await
    }

    pub async fn delete_transaction(&self, id: &str) -> Result<Transaction, StoreError> {
        self.update(|data| {
            let index = data
                .transactions
                .iter()
                .position(|t| t.id == id)
                .ok_or(StoreError::NotFound(ERR_TRANSACTION_NOT_FOUND))?;
            Ok(data.transactions.remove(index))
        })
        .await
    }

    pub async fn add_tithe_payment(&self, payment: TithePayment) -> Result<TithePayment, StoreError> {
        self.update(|data| {
            data.tithe_payments.push(payment.clone());
            Ok(payment)
        })
        .await
    }

    pub async fn delete_tithe_payment(&self, id: &str) -> Result<TithePayment, StoreError> {
        self.update(|data| {
            let index = data
                .tithe_payments
                .iter()
                .position(|p| p.id == id)
                .ok_or(StoreError::NotFound(ERR_PAYMENT_NOT_FOUND))?;
            Ok(data.tithe_payments.remove(index))
        })
        .await
    }

    pub async fn set_goal(&self, goal: f64) -> Result<WalletData, StoreError> {
        self.update(|data| {
            data.prosperity_goal = Some(goal);
            Ok(data.clone())
        })
        .await
    }

    /// Returns the new dark-mode flag.
    pub async fn toggle_dark_mode(&self) -> Result<bool, StoreError> {
        self.update(|data| {
            data.dark_mode = !data.dark_mode;
            Ok(data.dark_mode)
        })
        .await
    }

    /// Wholesale replacement, used by backup import.
    pub async fn replace(&self, data: WalletData) -> Result<(), StoreError> {
        self.save(&data).await
    }

    /// Drops the stored document; the next load starts from defaults.
    pub async fn reset(&self) -> Result<WalletData, StoreError> {
        let conn = self.db.write().await;
        kv_remove(&conn, STORAGE_KEY).await?;
        Ok(WalletData::default())
    }
}

async fn read_document(conn: &Connection) -> Result<WalletData, StoreError> {
    let Some(raw) = kv_get(conn, STORAGE_KEY).await? else {
        debug!("No stored wallet under {}, starting empty", STORAGE_KEY);
        return Ok(WalletData::default());
    };

    match decode_wallet_document(&raw) {
        Ok(data) => Ok(data),
        Err(e) => {
            warn!("Stored wallet is unreadable, falling back to defaults: {}", e);
            Ok(WalletData::default())
        }
    }
}

async fn write_document(conn: &Connection, data: &WalletData) -> Result<(), StoreError> {
    let raw = serde_json::to_string(data)?;
    kv_set(conn, STORAGE_KEY, &raw).await?;
    Ok(())
}
