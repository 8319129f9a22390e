use chrono::NaiveDate;
use sea_orm::{ActiveValue, ConnectionTrait, QueryFilter, QueryOrder, prelude::*};
use uuid::Uuid;

use crate::{
    Engine, EngineError, ResultEngine, goals,
    util::{ensure_positive_amount, normalize_name_display},
};

/// Fields for a new goal.
#[derive(Clone, Debug)]
pub struct GoalDraft {
    pub name: String,
    pub target_minor: i64,
    pub saved_minor: i64,
    pub deadline: Option<NaiveDate>,
    pub description: Option<String>,
}

/// Partial update; `None` leaves the field untouched. Bumping `saved_minor`
/// manually is the normal way to record progress.
#[derive(Clone, Debug, Default)]
pub struct GoalPatch {
    pub name: Option<String>,
    pub target_minor: Option<i64>,
    pub saved_minor: Option<i64>,
    pub deadline: Option<NaiveDate>,
    pub description: Option<String>,
}

impl Engine {
    /// List the owner's goals, ordered by name.
    pub async fn list_goals(&self, owner: &str) -> ResultEngine<Vec<goals::Goal>> {
        goals::Entity::find()
            .filter(goals::Column::Owner.eq(owner))
            .order_by_asc(goals::Column::Name)
            .all(&self.database)
            .await?
            .into_iter()
            .map(goals::Goal::try_from)
            .collect()
    }

    pub async fn create_goal(&self, owner: &str, draft: GoalDraft) -> ResultEngine<goals::Goal> {
        let name = normalize_name_display(&draft.name)?;
        ensure_positive_amount(draft.target_minor, "target amount")?;
        ensure_saved_amount(draft.saved_minor)?;

        let goal = goals::Goal {
            id: Uuid::new_v4(),
            owner: owner.to_string(),
            name,
            target_minor: draft.target_minor,
            saved_minor: draft.saved_minor,
            deadline: draft.deadline,
            description: draft.description,
        };
        goals::ActiveModel::from(&goal).insert(&self.database).await?;
        Ok(goal)
    }

    pub async fn update_goal(
        &self,
        owner: &str,
        id: Uuid,
        patch: GoalPatch,
    ) -> ResultEngine<goals::Goal> {
        if let Some(target_minor) = patch.target_minor {
            ensure_positive_amount(target_minor, "target amount")?;
        }
        if let Some(saved_minor) = patch.saved_minor {
            ensure_saved_amount(saved_minor)?;
        }

        let model = self.goal_model(&self.database, owner, id).await?;

        let mut active: goals::ActiveModel = model.into();
        if let Some(name) = patch.name {
            active.name = ActiveValue::Set(normalize_name_display(&name)?);
        }
        if let Some(target_minor) = patch.target_minor {
            active.target_minor = ActiveValue::Set(target_minor);
        }
        if let Some(saved_minor) = patch.saved_minor {
            active.saved_minor = ActiveValue::Set(saved_minor);
        }
        if let Some(deadline) = patch.deadline {
            active.deadline = ActiveValue::Set(Some(deadline));
        }
        if let Some(description) = patch.description {
            active.description = ActiveValue::Set(Some(description));
        }

        let updated = active.update(&self.database).await?;
        goals::Goal::try_from(updated)
    }

    pub async fn delete_goal(&self, owner: &str, id: Uuid) -> ResultEngine<()> {
        let model = self.goal_model(&self.database, owner, id).await?;
        goals::Entity::delete_by_id(model.id)
            .exec(&self.database)
            .await?;
        Ok(())
    }

    async fn goal_model<C: ConnectionTrait>(
        &self,
        conn: &C,
        owner: &str,
        id: Uuid,
    ) -> ResultEngine<goals::Model> {
        goals::Entity::find_by_id(id)
            .filter(goals::Column::Owner.eq(owner))
            .one(conn)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("goal not exists".to_string()))
    }
}

fn ensure_saved_amount(saved_minor: i64) -> ResultEngine<()> {
    if saved_minor < 0 {
        return Err(EngineError::InvalidAmount(format!(
            "saved amount must be >= 0, got {saved_minor}"
        )));
    }
    Ok(())
}
