//! Named savings targets.

use chrono::NaiveDate;
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::EngineError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub id: Uuid,
    pub owner: String,
    pub name: String,
    pub target_minor: i64,
    pub saved_minor: i64,
    pub deadline: Option<NaiveDate>,
    pub description: Option<String>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "goals")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub owner: String,
    pub name: String,
    pub target_minor: i64,
    pub saved_minor: i64,
    pub deadline: Option<Date>,
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Goal> for ActiveModel {
    fn from(goal: &Goal) -> Self {
        Self {
            id: ActiveValue::Set(goal.id),
            owner: ActiveValue::Set(goal.owner.clone()),
            name: ActiveValue::Set(goal.name.clone()),
            target_minor: ActiveValue::Set(goal.target_minor),
            saved_minor: ActiveValue::Set(goal.saved_minor),
            deadline: ActiveValue::Set(goal.deadline),
            description: ActiveValue::Set(goal.description.clone()),
        }
    }
}

impl TryFrom<Model> for Goal {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            owner: model.owner,
            name: model.name,
            target_minor: model.target_minor,
            saved_minor: model.saved_minor,
            deadline: model.deadline,
            description: model.description,
        })
    }
}
