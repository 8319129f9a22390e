//! The module contains the definition of a user and the session echo.

use api_types::session::SessionView;
use axum::{Extension, Json};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub username: String,
    pub password: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Identity echo. Reaching this handler at all means the credentials passed
/// the auth middleware, so the client uses it to validate a login.
pub async fn session(Extension(user): Extension<Model>) -> Json<SessionView> {
    Json(SessionView {
        username: user.username,
    })
}
