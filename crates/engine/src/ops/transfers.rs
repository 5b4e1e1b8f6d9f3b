use crate::{
    EngineError, Money, Page, ResultEngine, Transfer, transfers, users,
    util::ensure_positive_amount,
};

use super::{Engine, balances::overflow};

impl Engine {
    /// Move `amount` from one account to another and record the transfer.
    ///
    /// Both balance updates and the transfer record commit together or not
    /// at all.
    pub async fn transfer(
        &self,
        from_user_id: i64,
        to_user_id: i64,
        amount: Money,
    ) -> ResultEngine<Transfer> {
        ensure_positive_amount(amount)?;
        if from_user_id == to_user_id {
            return Err(EngineError::InvalidArgument(
                "from_user_id and to_user_id must differ".to_string(),
            ));
        }

        let transfer = self
            .with_tx::<Transfer, _>("transfer", move |db_tx| {
                Box::pin(async move {
                    // Lock rows in id order so two opposite transfers cannot
                    // wait on each other.
                    let (sender, receiver) = if from_user_id < to_user_id {
                        let sender = users::find_account(db_tx, from_user_id, true).await?;
                        let receiver = users::find_account(db_tx, to_user_id, true).await?;
                        (sender, receiver)
                    } else {
                        let receiver = users::find_account(db_tx, to_user_id, true).await?;
                        let sender = users::find_account(db_tx, from_user_id, true).await?;
                        (sender, receiver)
                    };

                    let sender_balance = sender.balance.checked_sub(amount).ok_or_else(overflow)?;
                    if sender_balance.is_negative() {
                        return Err(EngineError::InsufficientFunds(format!(
                            "not enough money on balance, available only {}",
                            sender.balance
                        )));
                    }
                    let receiver_balance =
                        receiver.balance.checked_add(amount).ok_or_else(overflow)?;

                    users::set_balance(db_tx, sender.id, sender_balance, Some(sender.balance))
                        .await?;
                    users::set_balance(
                        db_tx,
                        receiver.id,
                        receiver_balance,
                        Some(receiver.balance),
                    )
                    .await?;
                    transfers::create_transfer(db_tx, sender.id, receiver.id, amount).await
                })
            })
            .await?;

        tracing::info!(
            transfer_id = transfer.id,
            from_user_id,
            to_user_id,
            %amount,
            "transfer committed"
        );
        Ok(transfer)
    }

    pub async fn transfer_by_id(&self, id: i64) -> ResultEngine<Transfer> {
        transfers::get_transfer(&self.database, id).await
    }

    pub async fn inbound_transfers(
        &self,
        to_user_id: i64,
        page: Page,
    ) -> ResultEngine<Vec<Transfer>> {
        transfers::list_inbound(&self.database, to_user_id, page).await
    }

    pub async fn outbound_transfers(
        &self,
        from_user_id: i64,
        page: Page,
    ) -> ResultEngine<Vec<Transfer>> {
        transfers::list_outbound(&self.database, from_user_id, page).await
    }

    pub async fn transfers_between(
        &self,
        from_user_id: i64,
        to_user_id: i64,
        page: Page,
    ) -> ResultEngine<Vec<Transfer>> {
        transfers::list_between(&self.database, from_user_id, to_user_id, page).await
    }
}
