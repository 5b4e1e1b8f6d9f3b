//! Transfer history endpoints.

use api_types::transfer::{PageQuery, Transfer};
use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
};

use crate::{ServerError, server::ServerState, user::parse_id};

pub(crate) fn map_transfer(transfer: engine::Transfer) -> Transfer {
    Transfer {
        id: transfer.id,
        from_user_id: transfer.from_user_id,
        to_user_id: transfer.to_user_id,
        amount: transfer.amount.amount().normalize(),
        created_at: transfer.created_at,
    }
}

/// Unwrap the pagination query. A query string that does not even decode
/// (duplicate keys, broken encoding) gets the defaults like any other
/// malformed value.
fn page_query(query: Result<Query<PageQuery>, QueryRejection>) -> PageQuery {
    query.map(|Query(query)| query).unwrap_or_else(|err| {
        tracing::debug!("ignoring pagination query: {err}");
        PageQuery::default()
    })
}

fn page_response(
    state: &ServerState,
    transfers: Vec<engine::Transfer>,
    empty: impl FnOnce() -> String,
) -> Result<Json<Vec<Transfer>>, ServerError> {
    if transfers.is_empty() && state.config.pagination.empty_page_is_error {
        return Err(ServerError::EmptyPage(empty()));
    }
    Ok(Json(transfers.into_iter().map(map_transfer).collect()))
}

/// `GET /transfer/{id}`
pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Transfer>, ServerError> {
    let id = parse_id(&id, "transfer")?;
    let transfer = state.engine.transfer_by_id(id).await?;

    Ok(Json(map_transfer(transfer)))
}

/// `GET /transfer/{user_id}/inbound?limit=&cursor=`
pub async fn inbound(
    State(state): State<ServerState>,
    Path(user_id): Path<String>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<Vec<Transfer>>, ServerError> {
    let user_id = parse_id(&user_id, "user")?;
    let page = state.config.pagination.page(&page_query(query));
    let transfers = state.engine.inbound_transfers(user_id, page).await?;

    page_response(&state, transfers, || {
        format!("no inbound transfers were found for user {user_id}")
    })
}

/// `GET /transfer/{user_id}/outbound?limit=&cursor=`
pub async fn outbound(
    State(state): State<ServerState>,
    Path(user_id): Path<String>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<Vec<Transfer>>, ServerError> {
    let user_id = parse_id(&user_id, "user")?;
    let page = state.config.pagination.page(&page_query(query));
    let transfers = state.engine.outbound_transfers(user_id, page).await?;

    page_response(&state, transfers, || {
        format!("no outbound transfers were found for user {user_id}")
    })
}

/// `GET /transfer/{from_uid}/to/{to_uid}?limit=&cursor=`
pub async fn between(
    State(state): State<ServerState>,
    Path((from_user_id, to_user_id)): Path<(String, String)>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<Vec<Transfer>>, ServerError> {
    let from_user_id = parse_id(&from_user_id, "from user")?;
    let to_user_id = parse_id(&to_user_id, "to user")?;
    let page = state.config.pagination.page(&page_query(query));
    let transfers = state
        .engine
        .transfers_between(from_user_id, to_user_id, page)
        .await?;

    page_response(&state, transfers, || {
        format!("no transfers were found between user {from_user_id} and user {to_user_id}")
    })
}
