use crate::{Account, Money, NewAccount, ResultEngine, users};

use super::Engine;

impl Engine {
    /// Create an account. Whatever the caller wants, the balance starts at zero.
    pub async fn create_user(&self, account: NewAccount) -> ResultEngine<Account> {
        let account = users::create_account(&self.database, account).await?;
        tracing::info!(account_id = account.id, "account created");
        Ok(account)
    }

    pub async fn balance(&self, account_id: i64) -> ResultEngine<Money> {
        users::get_balance(&self.database, account_id).await
    }
}
