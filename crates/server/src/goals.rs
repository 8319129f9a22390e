//! Goals API endpoints.

use api_types::goal::{GoalCreate, GoalListResponse, GoalUpdate, GoalView};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{GoalDraft, GoalPatch};
use uuid::Uuid;

use crate::{ServerError, server::ServerState, user};

fn map_goal(goal: engine::Goal) -> GoalView {
    GoalView {
        id: goal.id,
        name: goal.name,
        target_minor: goal.target_minor,
        saved_minor: goal.saved_minor,
        deadline: goal.deadline,
        description: goal.description,
    }
}

pub async fn list(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<GoalListResponse>, ServerError> {
    let goals = state
        .engine
        .list_goals(&user.username)
        .await?
        .into_iter()
        .map(map_goal)
        .collect();

    Ok(Json(GoalListResponse { goals }))
}

pub async fn create(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<GoalCreate>,
) -> Result<(StatusCode, Json<GoalView>), ServerError> {
    let goal = state
        .engine
        .create_goal(
            &user.username,
            GoalDraft {
                name: payload.name,
                target_minor: payload.target_minor,
                saved_minor: payload.saved_minor.unwrap_or(0),
                deadline: payload.deadline,
                description: payload.description,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(map_goal(goal))))
}

pub async fn update(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(goal_id): Path<Uuid>,
    Json(payload): Json<GoalUpdate>,
) -> Result<Json<GoalView>, ServerError> {
    let goal = state
        .engine
        .update_goal(
            &user.username,
            goal_id,
            GoalPatch {
                name: payload.name,
                target_minor: payload.target_minor,
                saved_minor: payload.saved_minor,
                deadline: payload.deadline,
                description: payload.description,
            },
        )
        .await?;
    Ok(Json(map_goal(goal)))
}

pub async fn remove(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(goal_id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_goal(&user.username, goal_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
