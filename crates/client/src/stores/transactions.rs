use api_types::transaction::{TransactionCreate, TransactionUpdate, TransactionView};
use tokio::sync::watch;
use uuid::Uuid;

use crate::{
    client::Client,
    error::Result,
    session::SessionHandle,
    stores::{ListSnapshot, ListState, ensure_positive},
};

pub struct TransactionStore {
    client: Client,
    session: SessionHandle,
    state: ListState<TransactionView>,
}

impl TransactionStore {
    pub fn new(client: Client, session: SessionHandle) -> Self {
        Self {
            client,
            session,
            state: ListState::new(),
        }
    }

    pub fn snapshot(&self) -> ListSnapshot<TransactionView> {
        self.state.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.state.subscribe()
    }

    /// Replace the whole list, newest first.
    pub async fn refresh(&self) -> Result<()> {
        let session = self.session.get()?;
        let generation = self.state.begin();
        let fetched = self.client.list_transactions(&session).await;
        self.state.finish(generation, fetched)
    }

    pub async fn add(&self, draft: TransactionCreate) -> Result<TransactionView> {
        ensure_positive(draft.amount_minor, "amount")?;
        let session = self.session.get()?;
        let created = self.client.create_transaction(&session, &draft).await?;
        self.refresh().await?;
        Ok(created)
    }

    pub async fn update(&self, id: Uuid, patch: TransactionUpdate) -> Result<TransactionView> {
        if let Some(amount_minor) = patch.amount_minor {
            ensure_positive(amount_minor, "amount")?;
        }
        let session = self.session.get()?;
        let updated = self.client.update_transaction(&session, id, &patch).await?;
        self.refresh().await?;
        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let session = self.session.get()?;
        self.client.delete_transaction(&session, id).await?;
        self.refresh().await?;
        Ok(())
    }
}
