//! Budgets API endpoints.

use api_types::budget::{BudgetCreate, BudgetListResponse, BudgetUpdate, BudgetView};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{BudgetDraft, BudgetPatch};
use uuid::Uuid;

use crate::{ServerError, server::ServerState, user};

fn map_budget(budget: engine::Budget) -> BudgetView {
    BudgetView {
        id: budget.id,
        category_id: budget.category_id,
        limit_minor: budget.limit_minor,
        spent_minor: budget.spent_minor,
        month: budget.month,
        year: budget.year,
    }
}

pub async fn list(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<BudgetListResponse>, ServerError> {
    let budgets = state
        .engine
        .list_budgets(&user.username)
        .await?
        .into_iter()
        .map(map_budget)
        .collect();

    Ok(Json(BudgetListResponse { budgets }))
}

pub async fn create(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<BudgetCreate>,
) -> Result<(StatusCode, Json<BudgetView>), ServerError> {
    let budget = state
        .engine
        .create_budget(
            &user.username,
            BudgetDraft {
                category_id: payload.category_id,
                limit_minor: payload.limit_minor,
                month: payload.month,
                year: payload.year,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(map_budget(budget))))
}

pub async fn update(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(budget_id): Path<Uuid>,
    Json(payload): Json<BudgetUpdate>,
) -> Result<Json<BudgetView>, ServerError> {
    let budget = state
        .engine
        .update_budget(
            &user.username,
            budget_id,
            BudgetPatch {
                category_id: payload.category_id,
                limit_minor: payload.limit_minor,
                month: payload.month,
                year: payload.year,
            },
        )
        .await?;
    Ok(Json(map_budget(budget)))
}

pub async fn remove(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(budget_id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_budget(&user.username, budget_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
