use api_types::EntryKind;
use api_types::category::{CategoryCreate, CategoryUpdate, CategoryView};
use tokio::sync::watch;
use uuid::Uuid;

use crate::{
    client::Client,
    error::Result,
    session::SessionHandle,
    stores::{ListSnapshot, ListState, ensure_name},
};

pub struct CategoryStore {
    client: Client,
    session: SessionHandle,
    state: ListState<CategoryView>,
}

impl CategoryStore {
    pub fn new(client: Client, session: SessionHandle) -> Self {
        Self {
            client,
            session,
            state: ListState::new(),
        }
    }

    pub fn snapshot(&self) -> ListSnapshot<CategoryView> {
        self.state.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.state.subscribe()
    }

    /// Replace the whole list with the backend's current view.
    pub async fn refresh(&self) -> Result<()> {
        let session = self.session.get()?;
        let generation = self.state.begin();
        let fetched = self.client.list_categories(&session).await;
        self.state.finish(generation, fetched)
    }

    pub async fn add(&self, name: &str, kind: EntryKind) -> Result<CategoryView> {
        let name = ensure_name(name)?;
        let session = self.session.get()?;
        let created = self
            .client
            .create_category(&session, &CategoryCreate { name, kind })
            .await?;
        self.refresh().await?;
        Ok(created)
    }

    pub async fn update(&self, id: Uuid, patch: CategoryUpdate) -> Result<CategoryView> {
        let patch = CategoryUpdate {
            name: patch.name.as_deref().map(ensure_name).transpose()?,
            kind: patch.kind,
        };
        let session = self.session.get()?;
        let updated = self.client.update_category(&session, id, &patch).await?;
        self.refresh().await?;
        Ok(updated)
    }

    /// Transactions and budgets referencing the deleted category keep their
    /// dangling id; readers fall back to an unknown-category label.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let session = self.session.get()?;
        self.client.delete_category(&session, id).await?;
        self.refresh().await?;
        Ok(())
    }
}
