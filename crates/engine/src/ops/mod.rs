use std::{future::Future, pin::Pin};

use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};

use crate::{EngineError, ResultEngine};

mod accounts;
mod balances;
mod transfers;

/// Boxed body of a transactional operation, borrowing the open transaction.
pub(crate) type TxFuture<'c, T> = Pin<Box<dyn Future<Output = ResultEngine<T>> + Send + 'c>>;

#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
    max_retries: u32,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// Run `body` inside a DB transaction, committing on success and rolling
    /// back on error.
    ///
    /// Every store call of `body` must use the handle it receives. When the
    /// body fails with [`EngineError::Conflict`] the transaction is discarded
    /// and the body runs again on a fresh one, at most `max_retries` times.
    /// Dropping the returned future drops the open transaction, which rolls
    /// it back.
    pub(crate) async fn with_tx<T, F>(&self, operation: &'static str, body: F) -> ResultEngine<T>
    where
        T: Send,
        F: for<'c> Fn(&'c DatabaseTransaction) -> TxFuture<'c, T>,
    {
        let mut retries = 0;
        loop {
            let db_tx = self.database.begin().await?;
            let result = body(&db_tx).await;
            match result {
                Ok(value) => {
                    db_tx.commit().await?;
                    return Ok(value);
                }
                Err(EngineError::Conflict(reason)) if retries < self.max_retries => {
                    retries += 1;
                    tracing::debug!(operation, retries, "retrying after conflict: {reason}");
                    discard(db_tx, operation).await;
                }
                Err(err) => {
                    discard(db_tx, operation).await;
                    return Err(err);
                }
            }
        }
    }
}

/// Roll back a failed body. The caller keeps the body's error: a rollback
/// failure is only logged, and the dropped handle still discards the writes.
async fn discard(db_tx: DatabaseTransaction, operation: &'static str) {
    if let Err(err) = db_tx.rollback().await {
        tracing::error!(operation, "rollback failed: {err}");
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
    max_retries: Option<u32>,
}

impl EngineBuilder {
    pub const DEFAULT_MAX_RETRIES: u32 = 3;

    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// How many times a mutation is replayed after losing a concurrent
    /// update. Defaults to [`EngineBuilder::DEFAULT_MAX_RETRIES`].
    pub fn max_retries(mut self, retries: u32) -> EngineBuilder {
        self.max_retries = Some(retries);
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        Ok(Engine {
            database: self.database,
            max_retries: self.max_retries.unwrap_or(Self::DEFAULT_MAX_RETRIES),
        })
    }
}
