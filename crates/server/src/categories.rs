//! Categories API endpoints.

use api_types::category::{CategoryCreate, CategoryListResponse, CategoryUpdate, CategoryView};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{ServerError, server::ServerState, user};

fn map_category(category: engine::Category) -> CategoryView {
    CategoryView {
        id: category.id,
        name: category.name,
        kind: wire_kind(category.kind),
    }
}

pub(crate) fn wire_kind(kind: engine::EntryKind) -> api_types::EntryKind {
    match kind {
        engine::EntryKind::Income => api_types::EntryKind::Income,
        engine::EntryKind::Expense => api_types::EntryKind::Expense,
    }
}

pub(crate) fn domain_kind(kind: api_types::EntryKind) -> engine::EntryKind {
    match kind {
        api_types::EntryKind::Income => engine::EntryKind::Income,
        api_types::EntryKind::Expense => engine::EntryKind::Expense,
    }
}

pub async fn list(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<CategoryListResponse>, ServerError> {
    let categories = state
        .engine
        .list_categories(&user.username)
        .await?
        .into_iter()
        .map(map_category)
        .collect();

    Ok(Json(CategoryListResponse { categories }))
}

pub async fn create(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<CategoryCreate>,
) -> Result<(StatusCode, Json<CategoryView>), ServerError> {
    let category = state
        .engine
        .create_category(&user.username, &payload.name, domain_kind(payload.kind))
        .await?;
    Ok((StatusCode::CREATED, Json(map_category(category))))
}

pub async fn update(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(category_id): Path<Uuid>,
    Json(payload): Json<CategoryUpdate>,
) -> Result<Json<CategoryView>, ServerError> {
    if payload.name.is_none() && payload.kind.is_none() {
        return Err(ServerError::Generic(
            "provide at least one of name or kind".to_string(),
        ));
    }

    let category = state
        .engine
        .update_category(
            &user.username,
            category_id,
            payload.name.as_deref(),
            payload.kind.map(domain_kind),
        )
        .await?;
    Ok(Json(map_category(category)))
}

pub async fn remove(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(category_id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state
        .engine
        .delete_category(&user.username, category_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
