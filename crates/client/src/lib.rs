//! Client core for the Masruf personal-finance tracker.
//!
//! Wraps the backend's HTTP API in per-entity stores with explicit
//! `idle → loading → ready | error` phases, last-known-good retention and
//! change notification. Rendering is out of scope; a frontend consumes the
//! store snapshots and subscribes to their change counters.

pub mod analytics;
pub mod client;
pub mod config;
pub mod error;
pub mod local_state;
pub mod notify;
pub mod quick_add;
pub mod routes;
pub mod session;
pub mod stores;

pub use client::Client;
pub use config::AppConfig;
pub use error::{AppError, Result};
pub use local_state::LocalSnapshot;
pub use notify::{Notice, NoticeLevel};
pub use quick_add::QuickAddParsed;
pub use routes::Route;
pub use session::{Session, SessionHandle};
pub use stores::{BudgetStore, CategoryStore, GoalStore, Phase, TransactionStore};

/// The full set of service objects, constructed once at process start and
/// passed by reference to consumers.
pub struct Stores {
    pub session: SessionHandle,
    pub categories: CategoryStore,
    pub transactions: TransactionStore,
    pub budgets: BudgetStore,
    pub goals: GoalStore,
}

impl Stores {
    pub fn new(settings: &AppConfig) -> Result<Self> {
        settings.validate()?;
        let client = Client::new(&settings.base_url, &settings.api_key)?;
        Ok(Self::with_client(client))
    }

    pub fn with_client(client: Client) -> Self {
        let session = SessionHandle::default();
        Self {
            categories: CategoryStore::new(client.clone(), session.clone()),
            transactions: TransactionStore::new(client.clone(), session.clone()),
            budgets: BudgetStore::new(client.clone(), session.clone()),
            goals: GoalStore::new(client, session.clone()),
            session,
        }
    }

    /// Fetch every table once, typically right after login.
    pub async fn refresh_all(&self) -> Result<()> {
        self.categories.refresh().await?;
        self.transactions.refresh().await?;
        self.budgets.refresh().await?;
        self.goals.refresh().await?;
        Ok(())
    }
}
