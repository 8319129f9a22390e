//! Per-category monthly spending limits.

use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::EngineError;

/// A budget scopes one expense category to one (year, month) bucket.
///
/// `spent_minor` is a cached counter kept for wire compatibility; progress
/// calculations always re-derive the actual spend from transactions
/// ([`crate::stats::budget_progress`]).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    pub id: Uuid,
    pub owner: String,
    pub category_id: Uuid,
    pub limit_minor: i64,
    pub spent_minor: i64,
    pub month: u32,
    pub year: i32,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "budgets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub owner: String,
    pub category_id: Uuid,
    pub limit_minor: i64,
    pub spent_minor: i64,
    pub month: i32,
    pub year: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Budget> for ActiveModel {
    fn from(budget: &Budget) -> Self {
        Self {
            id: ActiveValue::Set(budget.id),
            owner: ActiveValue::Set(budget.owner.clone()),
            category_id: ActiveValue::Set(budget.category_id),
            limit_minor: ActiveValue::Set(budget.limit_minor),
            spent_minor: ActiveValue::Set(budget.spent_minor),
            month: ActiveValue::Set(budget.month as i32),
            year: ActiveValue::Set(budget.year),
        }
    }
}

impl TryFrom<Model> for Budget {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let month = u32::try_from(model.month)
            .map_err(|_| EngineError::InvalidDate(format!("invalid month: {}", model.month)))?;
        Ok(Self {
            id: model.id,
            owner: model.owner,
            category_id: model.category_id,
            limit_minor: model.limit_minor,
            spent_minor: model.spent_minor,
            month,
            year: model.year,
        })
    }
}
