use axum::{
    Json, Router,
    extract::{Request, State},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use sea_orm::DatabaseConnection;

use std::{sync::Arc, time::Duration};

use crate::{PaginationSettings, ServerError, transfer, user};
use api_types::Health;
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    pub db: DatabaseConnection,
    pub config: ServerConfig,
}

/// Runtime knobs of the HTTP surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    /// A request still running after this is dropped, rolling back any open
    /// transaction.
    pub request_timeout: Duration,
    pub pagination: PaginationSettings,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(10),
            pagination: PaginationSettings::default(),
        }
    }
}

async fn timeout(State(state): State<ServerState>, request: Request, next: Next) -> Response {
    let limit = state.config.request_timeout;
    let path = request.uri().path().to_string();
    match tokio::time::timeout(limit, next.run(request)).await {
        Ok(response) => response,
        Err(_) => {
            tracing::warn!("request to {path} timed out after {limit:?}");
            ServerError::Timeout.into_response()
        }
    }
}

async fn health(State(state): State<ServerState>) -> Result<Json<Health>, ServerError> {
    state
        .db
        .ping()
        .await
        .map_err(|err| ServerError::Engine(err.into()))?;
    Ok(Json(Health {
        status: "ok".to_string(),
    }))
}

fn router(state: ServerState) -> Router {
    let api = Router::new()
        .route("/user", post(user::create))
        .route("/user/{id}", get(user::balance))
        .route("/user/deposit", put(user::deposit))
        .route("/user/withdraw", put(user::withdraw))
        .route("/user/transfer", put(user::transfer))
        .route("/transfer/{id}", get(transfer::get))
        .route("/transfer/{id}/inbound", get(transfer::inbound))
        .route("/transfer/{id}/outbound", get(transfer::outbound))
        .route("/transfer/{id}/to/{to_id}", get(transfer::between));

    Router::new()
        .nest("/api/v1", api)
        .route("/health", get(health))
        .layer(middleware::from_fn_with_state(state.clone(), timeout))
        .with_state(state)
}

/// Build the application router.
pub fn app(engine: Engine, db: DatabaseConnection, config: ServerConfig) -> Router {
    router(ServerState {
        engine: Arc::new(engine),
        db,
        config,
    })
}

pub async fn run_with_listener(
    engine: Engine,
    db: DatabaseConnection,
    config: ServerConfig,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app(engine, db, config)).await
}
