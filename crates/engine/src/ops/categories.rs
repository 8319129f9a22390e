use sea_orm::{ActiveValue, ConnectionTrait, QueryFilter, QueryOrder, prelude::*};
use uuid::Uuid;

use crate::{
    Engine, EngineError, EntryKind, ResultEngine, categories,
    util::{normalize_name_display, normalize_name_key},
};

use super::with_tx;

impl Engine {
    /// List the owner's categories, ordered by name.
    pub async fn list_categories(&self, owner: &str) -> ResultEngine<Vec<categories::Category>> {
        categories::Entity::find()
            .filter(categories::Column::Owner.eq(owner))
            .order_by_asc(categories::Column::Name)
            .all(&self.database)
            .await?
            .into_iter()
            .map(categories::Category::try_from)
            .collect()
    }

    pub async fn create_category(
        &self,
        owner: &str,
        name: &str,
        kind: EntryKind,
    ) -> ResultEngine<categories::Category> {
        let display_name = normalize_name_display(name)?;
        let normalized = normalize_name_key(&display_name);

        with_tx!(self, |db_tx| {
            // Owner+name uniqueness is a soft invariant: duplicates are
            // logged, not rejected, to stay compatible with existing data.
            let duplicate = categories::Entity::find()
                .filter(categories::Column::Owner.eq(owner))
                .filter(categories::Column::NameNorm.eq(normalized.clone()))
                .one(&db_tx)
                .await?;
            if duplicate.is_some() {
                tracing::warn!(owner, name = %display_name, "creating duplicate category name");
            }

            let category = categories::Category {
                id: Uuid::new_v4(),
                owner: owner.to_string(),
                name: display_name,
                kind,
            };
            categories::ActiveModel::from(&category).insert(&db_tx).await?;
            Ok(category)
        })
    }

    pub async fn update_category(
        &self,
        owner: &str,
        id: Uuid,
        name: Option<&str>,
        kind: Option<EntryKind>,
    ) -> ResultEngine<categories::Category> {
        let model = self.category_model(&self.database, owner, id).await?;

        let mut active: categories::ActiveModel = model.into();
        if let Some(name) = name {
            let display = normalize_name_display(name)?;
            active.name_norm = ActiveValue::Set(normalize_name_key(&display));
            active.name = ActiveValue::Set(display);
        }
        if let Some(kind) = kind {
            active.kind = ActiveValue::Set(kind.as_str().to_string());
        }

        let updated = active.update(&self.database).await?;
        categories::Category::try_from(updated)
    }

    /// Delete a category. Referencing transactions and budgets are left with
    /// a dangling `category_id`; readers fall back to an "unknown category"
    /// label instead of failing.
    pub async fn delete_category(&self, owner: &str, id: Uuid) -> ResultEngine<()> {
        let model = self.category_model(&self.database, owner, id).await?;
        categories::Entity::delete_by_id(model.id)
            .exec(&self.database)
            .await?;
        Ok(())
    }

    pub(super) async fn category_model<C: ConnectionTrait>(
        &self,
        conn: &C,
        owner: &str,
        id: Uuid,
    ) -> ResultEngine<categories::Model> {
        categories::Entity::find_by_id(id)
            .filter(categories::Column::Owner.eq(owner))
            .one(conn)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("category not exists".to_string()))
    }
}
