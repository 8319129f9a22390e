use chrono::NaiveDate;
use sea_orm::{ActiveValue, ConnectionTrait, QueryFilter, QueryOrder, prelude::*};
use uuid::Uuid;

use crate::{
    Engine, EngineError, EntryKind, ResultEngine, transactions, util::ensure_positive_amount,
};

use super::with_tx;

/// Fields for a new transaction.
#[derive(Clone, Debug)]
pub struct TransactionDraft {
    pub category_id: Uuid,
    pub kind: EntryKind,
    pub amount_minor: i64,
    pub occurred_on: NaiveDate,
    pub note: Option<String>,
    pub location: Option<String>,
}

/// Partial update; `None` leaves the field untouched.
#[derive(Clone, Debug, Default)]
pub struct TransactionPatch {
    pub category_id: Option<Uuid>,
    pub kind: Option<EntryKind>,
    pub amount_minor: Option<i64>,
    pub occurred_on: Option<NaiveDate>,
    pub note: Option<String>,
    pub location: Option<String>,
}

impl Engine {
    /// List the owner's transactions, newest first (id tiebreak so repeated
    /// calls return identical orderings).
    pub async fn list_transactions(
        &self,
        owner: &str,
    ) -> ResultEngine<Vec<transactions::Transaction>> {
        transactions::Entity::find()
            .filter(transactions::Column::Owner.eq(owner))
            .order_by_desc(transactions::Column::OccurredOn)
            .order_by_desc(transactions::Column::Id)
            .all(&self.database)
            .await?
            .into_iter()
            .map(transactions::Transaction::try_from)
            .collect()
    }

    /// Create a transaction. The category reference must resolve to one of
    /// the owner's categories at write time; only pre-existing references are
    /// allowed to dangle.
    pub async fn create_transaction(
        &self,
        owner: &str,
        draft: TransactionDraft,
    ) -> ResultEngine<transactions::Transaction> {
        ensure_positive_amount(draft.amount_minor, "amount")?;

        with_tx!(self, |db_tx| {
            self.ensure_category_ref(&db_tx, owner, draft.category_id)
                .await?;

            let tx = transactions::Transaction::new(
                owner.to_string(),
                draft.category_id,
                draft.kind,
                draft.amount_minor,
                draft.occurred_on,
                draft.note,
                draft.location,
            )?;
            transactions::ActiveModel::from(&tx).insert(&db_tx).await?;
            Ok(tx)
        })
    }

    pub async fn update_transaction(
        &self,
        owner: &str,
        id: Uuid,
        patch: TransactionPatch,
    ) -> ResultEngine<transactions::Transaction> {
        if let Some(amount_minor) = patch.amount_minor {
            ensure_positive_amount(amount_minor, "amount")?;
        }

        with_tx!(self, |db_tx| {
            let model = self.transaction_model(&db_tx, owner, id).await?;

            if let Some(category_id) = patch.category_id {
                self.ensure_category_ref(&db_tx, owner, category_id).await?;
            }

            let mut active: transactions::ActiveModel = model.into();
            if let Some(category_id) = patch.category_id {
                active.category_id = ActiveValue::Set(category_id);
            }
            if let Some(kind) = patch.kind {
                active.kind = ActiveValue::Set(kind.as_str().to_string());
            }
            if let Some(amount_minor) = patch.amount_minor {
                active.amount_minor = ActiveValue::Set(amount_minor);
            }
            if let Some(occurred_on) = patch.occurred_on {
                active.occurred_on = ActiveValue::Set(occurred_on);
            }
            if let Some(note) = patch.note {
                active.note = ActiveValue::Set(Some(note));
            }
            if let Some(location) = patch.location {
                active.location = ActiveValue::Set(Some(location));
            }

            let updated = active.update(&db_tx).await?;
            transactions::Transaction::try_from(updated)
        })
    }

    pub async fn delete_transaction(&self, owner: &str, id: Uuid) -> ResultEngine<()> {
        let model = self.transaction_model(&self.database, owner, id).await?;
        transactions::Entity::delete_by_id(model.id)
            .exec(&self.database)
            .await?;
        Ok(())
    }

    async fn transaction_model<C: ConnectionTrait>(
        &self,
        conn: &C,
        owner: &str,
        id: Uuid,
    ) -> ResultEngine<transactions::Model> {
        transactions::Entity::find_by_id(id)
            .filter(transactions::Column::Owner.eq(owner))
            .one(conn)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("transaction not exists".to_string()))
    }

    pub(super) async fn ensure_category_ref<C: ConnectionTrait>(
        &self,
        conn: &C,
        owner: &str,
        category_id: Uuid,
    ) -> ResultEngine<crate::categories::Model> {
        self.category_model(conn, owner, category_id)
            .await
            .map_err(|err| match err {
                EngineError::KeyNotFound(_) => EngineError::InvalidReference(format!(
                    "category {category_id} not found for owner"
                )),
                other => other,
            })
    }
}
