mod budgets;
mod categories;
mod goals;
mod transactions;

pub use budgets::{BudgetDraft, BudgetPatch};
pub use goals::{GoalDraft, GoalPatch};
pub use transactions::{TransactionDraft, TransactionPatch};

/// Run a block inside a DB transaction, committing on success and rolling
/// back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        use sea_orm::TransactionTrait;
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;
