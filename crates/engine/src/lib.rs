//! Domain core for the Masruf personal-finance tracker.
//!
//! The [`Engine`] owns the database connection and exposes owner-scoped CRUD
//! over the four entity tables. Every read and write filters by owner so no
//! query can leak another user's rows, even though the HTTP layer already
//! authenticates. The pure aggregation functions live in [`stats`] and take
//! in-memory entity slices, never the database.

pub use budgets::Budget;
pub use categories::Category;
pub use error::EngineError;
pub use goals::Goal;
pub use money::Money;
pub use ops::{BudgetDraft, BudgetPatch, GoalDraft, GoalPatch, TransactionDraft, TransactionPatch};
pub use transactions::{EntryKind, Transaction};

use sea_orm::DatabaseConnection;

pub mod budgets;
pub mod categories;
mod error;
pub mod goals;
mod money;
mod ops;
pub mod stats;
pub mod transactions;
mod util;

type ResultEngine<T> = Result<T, EngineError>;

#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

#[derive(Debug, Default)]
pub struct EngineBuilder {
    database: Option<DatabaseConnection>,
}

impl EngineBuilder {
    pub fn database(mut self, database: DatabaseConnection) -> Self {
        self.database = Some(database);
        self
    }

    pub async fn build(self) -> ResultEngine<Engine> {
        let database = self
            .database
            .ok_or_else(|| EngineError::KeyNotFound("database connection".to_string()))?;
        database.ping().await?;
        Ok(Engine { database })
    }
}
