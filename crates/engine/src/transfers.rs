//! Transfer store: the append-only record of completed transfers.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveValue, Condition, ConnectionTrait, QueryFilter, QueryOrder, QuerySelect,
    entity::prelude::*,
};

use crate::{
    EngineError, Money, ResultEngine,
    util::{ensure_positive_amount, model_money},
};

/// Immutable record of a balance move between two accounts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transfer {
    pub id: i64,
    pub from_user_id: i64,
    pub to_user_id: i64,
    pub amount: Money,
    pub created_at: DateTime<Utc>,
}

/// Cursor pagination over transfer ids.
///
/// `cursor` is the last id the caller has seen (exclusive lower bound).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Page {
    pub cursor: i64,
    pub limit: u64,
}

impl Page {
    pub const DEFAULT_LIMIT: u64 = 10;

    pub fn new(cursor: i64, limit: u64) -> Self {
        Self { cursor, limit }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(0, Self::DEFAULT_LIMIT)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "transfers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub from_user_id: i64,
    pub to_user_id: i64,
    pub amount: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::FromUserId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Sender,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::ToUserId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Receiver,
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Transfer {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            amount: model_money(&model.amount, "amount")?,
            id: model.id,
            from_user_id: model.from_user_id,
            to_user_id: model.to_user_id,
            created_at: model.created_at,
        })
    }
}

/// Append a transfer record. The balances are not touched here.
pub async fn create_transfer<C: ConnectionTrait>(
    conn: &C,
    from_user_id: i64,
    to_user_id: i64,
    amount: Money,
) -> ResultEngine<Transfer> {
    ensure_positive_amount(amount)?;

    let model = ActiveModel {
        id: ActiveValue::NotSet,
        from_user_id: ActiveValue::Set(from_user_id),
        to_user_id: ActiveValue::Set(to_user_id),
        amount: ActiveValue::Set(amount.to_db_string()),
        created_at: ActiveValue::Set(Utc::now()),
    }
    .insert(conn)
    .await?;

    Transfer::try_from(model)
}

pub async fn get_transfer<C: ConnectionTrait>(conn: &C, id: i64) -> ResultEngine<Transfer> {
    let model = Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| EngineError::KeyNotFound(format!("transfer {id}")))?;
    Transfer::try_from(model)
}

/// Transfers received by `to_user_id`, oldest first.
pub async fn list_inbound<C: ConnectionTrait>(
    conn: &C,
    to_user_id: i64,
    page: Page,
) -> ResultEngine<Vec<Transfer>> {
    list_page(conn, Condition::all().add(Column::ToUserId.eq(to_user_id)), page).await
}

/// Transfers sent by `from_user_id`, oldest first.
pub async fn list_outbound<C: ConnectionTrait>(
    conn: &C,
    from_user_id: i64,
    page: Page,
) -> ResultEngine<Vec<Transfer>> {
    list_page(
        conn,
        Condition::all().add(Column::FromUserId.eq(from_user_id)),
        page,
    )
    .await
}

/// Transfers sent by `from_user_id` to `to_user_id`, oldest first.
pub async fn list_between<C: ConnectionTrait>(
    conn: &C,
    from_user_id: i64,
    to_user_id: i64,
    page: Page,
) -> ResultEngine<Vec<Transfer>> {
    list_page(
        conn,
        Condition::all()
            .add(Column::FromUserId.eq(from_user_id))
            .add(Column::ToUserId.eq(to_user_id)),
        page,
    )
    .await
}

async fn list_page<C: ConnectionTrait>(
    conn: &C,
    condition: Condition,
    page: Page,
) -> ResultEngine<Vec<Transfer>> {
    Entity::find()
        .filter(condition)
        .filter(Column::Id.gt(page.cursor))
        .order_by_asc(Column::Id)
        .limit(page.limit)
        .all(conn)
        .await?
        .into_iter()
        .map(Transfer::try_from)
        .collect()
}
