use crate::{
    EngineError, Money, ResultEngine, users,
    util::ensure_positive_amount,
};

use super::Engine;

pub(super) fn overflow() -> EngineError {
    EngineError::InvalidAmount("balance overflow".to_string())
}

impl Engine {
    /// Add `amount` to the balance of `account_id`.
    ///
    /// Returns the number of updated rows.
    pub async fn deposit(&self, account_id: i64, amount: Money) -> ResultEngine<u64> {
        ensure_positive_amount(amount)?;

        let rows = self
            .with_tx::<u64, _>("deposit", move |db_tx| {
                Box::pin(async move {
                    let account = users::find_account(db_tx, account_id, true).await?;
                    let balance = account.balance.checked_add(amount).ok_or_else(overflow)?;
                    users::set_balance(db_tx, account_id, balance, Some(account.balance)).await
                })
            })
            .await?;

        tracing::info!(account_id, %amount, "deposit committed");
        Ok(rows)
    }

    /// Remove `amount` from the balance of `account_id`.
    ///
    /// Fails with [`EngineError::InsufficientFunds`] and writes nothing when
    /// the balance would become negative.
    pub async fn withdraw(&self, account_id: i64, amount: Money) -> ResultEngine<u64> {
        ensure_positive_amount(amount)?;

        let rows = self
            .with_tx::<u64, _>("withdraw", move |db_tx| {
                Box::pin(async move {
                    let account = users::find_account(db_tx, account_id, true).await?;
                    let balance = account.balance.checked_sub(amount).ok_or_else(overflow)?;
                    if balance.is_negative() {
                        return Err(EngineError::InsufficientFunds(format!(
                            "not enough money on balance, available only {}",
                            account.balance
                        )));
                    }
                    users::set_balance(db_tx, account_id, balance, Some(account.balance)).await
                })
            })
            .await?;

        tracing::info!(account_id, %amount, "withdraw committed");
        Ok(rows)
    }
}
