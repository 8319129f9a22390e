use api_types::goal::{GoalCreate, GoalUpdate, GoalView};
use tokio::sync::watch;
use uuid::Uuid;

use crate::{
    client::Client,
    error::{AppError, Result},
    session::SessionHandle,
    stores::{ListSnapshot, ListState, ensure_name, ensure_positive},
};

fn ensure_saved(saved_minor: i64) -> Result<()> {
    if saved_minor < 0 {
        return Err(AppError::Validation(
            "saved amount must not be negative".to_string(),
        ));
    }
    Ok(())
}

pub struct GoalStore {
    client: Client,
    session: SessionHandle,
    state: ListState<GoalView>,
}

impl GoalStore {
    pub fn new(client: Client, session: SessionHandle) -> Self {
        Self {
            client,
            session,
            state: ListState::new(),
        }
    }

    pub fn snapshot(&self) -> ListSnapshot<GoalView> {
        self.state.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.state.subscribe()
    }

    pub async fn refresh(&self) -> Result<()> {
        let session = self.session.get()?;
        let generation = self.state.begin();
        let fetched = self.client.list_goals(&session).await;
        self.state.finish(generation, fetched)
    }

    pub async fn add(&self, draft: GoalCreate) -> Result<GoalView> {
        let draft = GoalCreate {
            name: ensure_name(&draft.name)?,
            ..draft
        };
        ensure_positive(draft.target_minor, "target")?;
        if let Some(saved_minor) = draft.saved_minor {
            ensure_saved(saved_minor)?;
        }
        let session = self.session.get()?;
        let created = self.client.create_goal(&session, &draft).await?;
        self.refresh().await?;
        Ok(created)
    }

    pub async fn update(&self, id: Uuid, patch: GoalUpdate) -> Result<GoalView> {
        let patch = GoalUpdate {
            name: patch.name.as_deref().map(ensure_name).transpose()?,
            ..patch
        };
        if let Some(target_minor) = patch.target_minor {
            ensure_positive(target_minor, "target")?;
        }
        if let Some(saved_minor) = patch.saved_minor {
            ensure_saved(saved_minor)?;
        }
        let session = self.session.get()?;
        let updated = self.client.update_goal(&session, id, &patch).await?;
        self.refresh().await?;
        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let session = self.session.get()?;
        self.client.delete_goal(&session, id).await?;
        self.refresh().await?;
        Ok(())
    }
}
