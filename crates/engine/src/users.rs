//! Ledger store: accounts and their balances.
//!
//! Every function takes the connection it runs on, so the protocol can pass
//! the open `DatabaseTransaction` of one logical operation while plain reads
//! use the pooled `DatabaseConnection`.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveValue, ConnectionTrait, QueryFilter, QuerySelect, entity::prelude::*, sea_query::Expr,
};

use crate::{
    EngineError, Money, ResultEngine,
    util::{model_money, normalize_required_text},
};

/// An account holding a non-negative balance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub balance: Money,
    pub created_at: DateTime<Utc>,
}

/// Profile fields of an account to create. The balance always starts at zero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub email: String,
    pub balance: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Account {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            balance: model_money(&model.balance, "balance")?,
            id: model.id,
            name: model.name,
            email: model.email,
            created_at: model.created_at,
        })
    }
}

fn not_found(account_id: i64) -> EngineError {
    EngineError::KeyNotFound(format!("user {account_id}"))
}

/// Load an account.
///
/// With `for_update` the row is locked until the surrounding transaction
/// ends (`SELECT ... FOR UPDATE`). Backends without row locks, such as
/// SQLite, ignore the clause; `set_balance` with an expected value still
/// catches a lost update there.
pub async fn find_account<C: ConnectionTrait>(
    conn: &C,
    account_id: i64,
    for_update: bool,
) -> ResultEngine<Account> {
    let mut query = Entity::find_by_id(account_id);
    if for_update {
        query = query.lock_exclusive();
    }
    let model = query.one(conn).await?.ok_or_else(|| not_found(account_id))?;
    Account::try_from(model)
}

pub async fn get_balance<C: ConnectionTrait>(conn: &C, account_id: i64) -> ResultEngine<Money> {
    find_account(conn, account_id, false)
        .await
        .map(|account| account.balance)
}

/// Overwrite the balance of an account and return the number of updated rows.
///
/// This is a point update, not an increment: callers read, compute and then
/// write. When `expected` is set the row only changes if its stored balance
/// still equals it; otherwise [`EngineError::Conflict`] is returned.
pub async fn set_balance<C: ConnectionTrait>(
    conn: &C,
    account_id: i64,
    balance: Money,
    expected: Option<Money>,
) -> ResultEngine<u64> {
    if balance.is_negative() {
        return Err(EngineError::InvalidAmount(format!(
            "balance must not be negative, got {balance}"
        )));
    }

    let mut update = Entity::update_many()
        .col_expr(Column::Balance, Expr::value(balance.to_db_string()))
        .filter(Column::Id.eq(account_id));
    if let Some(expected) = expected {
        update = update.filter(Column::Balance.eq(expected.to_db_string()));
    }
    let result = update.exec(conn).await?;

    if result.rows_affected == 0 {
        let exists = Entity::find_by_id(account_id).one(conn).await?.is_some();
        return Err(match (exists, expected) {
            (true, Some(expected)) => EngineError::Conflict(format!(
                "balance of user {account_id} is no longer {expected}"
            )),
            _ => not_found(account_id),
        });
    }

    Ok(result.rows_affected)
}

/// Insert a new account with a zero balance.
pub async fn create_account<C: ConnectionTrait>(
    conn: &C,
    account: NewAccount,
) -> ResultEngine<Account> {
    let model = ActiveModel {
        id: ActiveValue::NotSet,
        name: ActiveValue::Set(normalize_required_text(&account.name, "name")?),
        email: ActiveValue::Set(normalize_required_text(&account.email, "email")?),
        balance: ActiveValue::Set(Money::ZERO.to_db_string()),
        created_at: ActiveValue::Set(Utc::now()),
    }
    .insert(conn)
    .await?;

    Account::try_from(model)
}
