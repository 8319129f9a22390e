use api_types::budget::{BudgetCreate, BudgetUpdate, BudgetView};
use tokio::sync::watch;
use uuid::Uuid;

use crate::{
    client::Client,
    error::{AppError, Result},
    session::SessionHandle,
    stores::{ListSnapshot, ListState, ensure_positive},
};

fn ensure_month(month: u32) -> Result<()> {
    if !(1..=12).contains(&month) {
        return Err(AppError::Validation(format!(
            "month must be between 1 and 12, got {month}"
        )));
    }
    Ok(())
}

pub struct BudgetStore {
    client: Client,
    session: SessionHandle,
    state: ListState<BudgetView>,
}

impl BudgetStore {
    pub fn new(client: Client, session: SessionHandle) -> Self {
        Self {
            client,
            session,
            state: ListState::new(),
        }
    }

    pub fn snapshot(&self) -> ListSnapshot<BudgetView> {
        self.state.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.state.subscribe()
    }

    pub async fn refresh(&self) -> Result<()> {
        let session = self.session.get()?;
        let generation = self.state.begin();
        let fetched = self.client.list_budgets(&session).await;
        self.state.finish(generation, fetched)
    }

    pub async fn add(&self, draft: BudgetCreate) -> Result<BudgetView> {
        ensure_positive(draft.limit_minor, "monthly limit")?;
        ensure_month(draft.month)?;
        let session = self.session.get()?;
        let created = self.client.create_budget(&session, &draft).await?;
        self.refresh().await?;
        Ok(created)
    }

    pub async fn update(&self, id: Uuid, patch: BudgetUpdate) -> Result<BudgetView> {
        if let Some(limit_minor) = patch.limit_minor {
            ensure_positive(limit_minor, "monthly limit")?;
        }
        if let Some(month) = patch.month {
            ensure_month(month)?;
        }
        let session = self.session.get()?;
        let updated = self.client.update_budget(&session, id, &patch).await?;
        self.refresh().await?;
        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let session = self.session.get()?;
        self.client.delete_budget(&session, id).await?;
        self.refresh().await?;
        Ok(())
    }
}
