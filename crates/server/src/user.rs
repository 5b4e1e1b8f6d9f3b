//! User API endpoints: account creation, balance and money movements.

use api_types::{
    transfer::{Transfer, TransferNew},
    user::{Balance, BalanceUpdate, User, UserNew},
};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use engine::{Money, NewAccount};

use crate::{ServerError, server::ServerState, transfer::map_transfer};

/// Unwrap a JSON body, turning a decode failure into a `400`.
pub(crate) fn decode<T>(
    payload: Result<Json<T>, JsonRejection>,
    target: &str,
) -> Result<T, ServerError> {
    payload.map(|Json(value)| value).map_err(|err| {
        ServerError::Generic(format!(
            "invalid request body, can't decode it to {target}: {err}"
        ))
    })
}

/// Parse a numeric path segment.
pub(crate) fn parse_id(raw: &str, label: &str) -> Result<i64, ServerError> {
    raw.trim()
        .parse()
        .map_err(|_| ServerError::Generic(format!("invalid {label} id: {raw}")))
}

fn map_user(account: engine::Account) -> User {
    User {
        id: account.id,
        name: account.name,
        email: account.email,
        balance: account.balance.amount().normalize(),
        created_at: account.created_at,
    }
}

/// `POST /user`
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<UserNew>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), ServerError> {
    let payload = decode(payload, "user")?;
    let account = state
        .engine
        .create_user(NewAccount {
            name: payload.name,
            email: payload.email,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(map_user(account))))
}

/// `GET /user/{id}`
pub async fn balance(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Balance>, ServerError> {
    let id = parse_id(&id, "user")?;
    let balance = state.engine.balance(id).await?;

    Ok(Json(Balance {
        balance: balance.amount().normalize(),
    }))
}

/// `PUT /user/deposit`
pub async fn deposit(
    State(state): State<ServerState>,
    payload: Result<Json<BalanceUpdate>, JsonRejection>,
) -> Result<Json<u64>, ServerError> {
    let payload = decode(payload, "balance")?;
    let rows = state
        .engine
        .deposit(payload.id, Money::new(payload.balance))
        .await?;

    Ok(Json(rows))
}

/// `PUT /user/withdraw`
pub async fn withdraw(
    State(state): State<ServerState>,
    payload: Result<Json<BalanceUpdate>, JsonRejection>,
) -> Result<Json<u64>, ServerError> {
    let payload = decode(payload, "balance")?;
    let rows = state
        .engine
        .withdraw(payload.id, Money::new(payload.balance))
        .await?;

    Ok(Json(rows))
}

/// `PUT /user/transfer`
pub async fn transfer(
    State(state): State<ServerState>,
    payload: Result<Json<TransferNew>, JsonRejection>,
) -> Result<Json<Transfer>, ServerError> {
    let payload = decode(payload, "transfer")?;
    let transfer = state
        .engine
        .transfer(
            payload.from_user_id,
            payload.to_user_id,
            Money::new(payload.amount),
        )
        .await?;

    Ok(Json(map_transfer(transfer)))
}
