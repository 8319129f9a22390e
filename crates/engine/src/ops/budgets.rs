use sea_orm::{ActiveValue, ConnectionTrait, QueryFilter, QueryOrder, prelude::*};
use uuid::Uuid;

use crate::{
    Engine, EngineError, EntryKind, ResultEngine, budgets,
    util::{ensure_month, ensure_positive_amount},
};

use super::with_tx;

/// Fields for a new budget.
#[derive(Clone, Debug)]
pub struct BudgetDraft {
    pub category_id: Uuid,
    pub limit_minor: i64,
    pub month: u32,
    pub year: i32,
}

/// Partial update; `None` leaves the field untouched.
#[derive(Clone, Debug, Default)]
pub struct BudgetPatch {
    pub category_id: Option<Uuid>,
    pub limit_minor: Option<i64>,
    pub month: Option<u32>,
    pub year: Option<i32>,
}

impl Engine {
    /// List the owner's budgets, most recent period first.
    pub async fn list_budgets(&self, owner: &str) -> ResultEngine<Vec<budgets::Budget>> {
        budgets::Entity::find()
            .filter(budgets::Column::Owner.eq(owner))
            .order_by_desc(budgets::Column::Year)
            .order_by_desc(budgets::Column::Month)
            .all(&self.database)
            .await?
            .into_iter()
            .map(budgets::Budget::try_from)
            .collect()
    }

    /// Create a budget. The referenced category must exist for the owner and
    /// be an expense category; budgets over income make no sense.
    pub async fn create_budget(
        &self,
        owner: &str,
        draft: BudgetDraft,
    ) -> ResultEngine<budgets::Budget> {
        ensure_positive_amount(draft.limit_minor, "monthly limit")?;
        ensure_month(draft.month)?;

        with_tx!(self, |db_tx| {
            self.ensure_expense_category(&db_tx, owner, draft.category_id)
                .await?;

            let budget = budgets::Budget {
                id: Uuid::new_v4(),
                owner: owner.to_string(),
                category_id: draft.category_id,
                limit_minor: draft.limit_minor,
                spent_minor: 0,
                month: draft.month,
                year: draft.year,
            };
            budgets::ActiveModel::from(&budget).insert(&db_tx).await?;
            Ok(budget)
        })
    }

    pub async fn update_budget(
        &self,
        owner: &str,
        id: Uuid,
        patch: BudgetPatch,
    ) -> ResultEngine<budgets::Budget> {
        if let Some(limit_minor) = patch.limit_minor {
            ensure_positive_amount(limit_minor, "monthly limit")?;
        }
        if let Some(month) = patch.month {
            ensure_month(month)?;
        }

        with_tx!(self, |db_tx| {
            let model = self.budget_model(&db_tx, owner, id).await?;

            if let Some(category_id) = patch.category_id {
                self.ensure_expense_category(&db_tx, owner, category_id)
                    .await?;
            }

            let mut active: budgets::ActiveModel = model.into();
            if let Some(category_id) = patch.category_id {
                active.category_id = ActiveValue::Set(category_id);
            }
            if let Some(limit_minor) = patch.limit_minor {
                active.limit_minor = ActiveValue::Set(limit_minor);
            }
            if let Some(month) = patch.month {
                active.month = ActiveValue::Set(month as i32);
            }
            if let Some(year) = patch.year {
                active.year = ActiveValue::Set(year);
            }

            let updated = active.update(&db_tx).await?;
            budgets::Budget::try_from(updated)
        })
    }

    pub async fn delete_budget(&self, owner: &str, id: Uuid) -> ResultEngine<()> {
        let model = self.budget_model(&self.database, owner, id).await?;
        budgets::Entity::delete_by_id(model.id)
            .exec(&self.database)
            .await?;
        Ok(())
    }

    async fn budget_model<C: ConnectionTrait>(
        &self,
        conn: &C,
        owner: &str,
        id: Uuid,
    ) -> ResultEngine<budgets::Model> {
        budgets::Entity::find_by_id(id)
            .filter(budgets::Column::Owner.eq(owner))
            .one(conn)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("budget not exists".to_string()))
    }

    async fn ensure_expense_category<C: ConnectionTrait>(
        &self,
        conn: &C,
        owner: &str,
        category_id: Uuid,
    ) -> ResultEngine<()> {
        let model = self.ensure_category_ref(conn, owner, category_id).await?;
        if EntryKind::try_from(model.kind.as_str())? != EntryKind::Expense {
            return Err(EngineError::InvalidReference(format!(
                "category {category_id} is not an expense category"
            )));
        }
        Ok(())
    }
}
