//! Transactions API endpoints.

use api_types::transaction::{
    TransactionCreate, TransactionListResponse, TransactionUpdate, TransactionView,
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{TransactionDraft, TransactionPatch};
use uuid::Uuid;

use crate::{
    ServerError,
    categories::{domain_kind, wire_kind},
    server::ServerState,
    user,
};

fn map_transaction(tx: engine::Transaction) -> TransactionView {
    TransactionView {
        id: tx.id,
        amount_minor: tx.amount_minor,
        kind: wire_kind(tx.kind),
        category_id: tx.category_id,
        occurred_on: tx.occurred_on,
        note: tx.note,
        location: tx.location,
    }
}

pub async fn list(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<TransactionListResponse>, ServerError> {
    let transactions = state
        .engine
        .list_transactions(&user.username)
        .await?
        .into_iter()
        .map(map_transaction)
        .collect();

    Ok(Json(TransactionListResponse { transactions }))
}

pub async fn create(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<TransactionCreate>,
) -> Result<(StatusCode, Json<TransactionView>), ServerError> {
    let tx = state
        .engine
        .create_transaction(
            &user.username,
            TransactionDraft {
                category_id: payload.category_id,
                kind: domain_kind(payload.kind),
                amount_minor: payload.amount_minor,
                occurred_on: payload.occurred_on,
                note: payload.note,
                location: payload.location,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(map_transaction(tx))))
}

pub async fn update(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(transaction_id): Path<Uuid>,
    Json(payload): Json<TransactionUpdate>,
) -> Result<Json<TransactionView>, ServerError> {
    let tx = state
        .engine
        .update_transaction(
            &user.username,
            transaction_id,
            TransactionPatch {
                category_id: payload.category_id,
                kind: payload.kind.map(domain_kind),
                amount_minor: payload.amount_minor,
                occurred_on: payload.occurred_on,
                note: payload.note,
                location: payload.location,
            },
        )
        .await?;
    Ok(Json(map_transaction(tx)))
}

pub async fn remove(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(transaction_id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state
        .engine
        .delete_transaction(&user.username, transaction_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
