//! Bridges store snapshots to the engine's aggregation functions.
//!
//! The backend already serves the common aggregates, but consumers holding
//! store snapshots can recompute them locally without another round-trip,
//! for example after a change notification.

use api_types::budget::BudgetView;
use api_types::goal::GoalView;
use api_types::transaction::TransactionView;
use engine::{Budget, EntryKind, Goal, Transaction};

pub use engine::stats::{
    BudgetProgress, GoalProgress, MonthlyPoint, MonthlyTotals, budget_progress, goal_progress,
    monthly_series, monthly_totals, net_savings, spend_by_category,
};

fn domain_kind(kind: api_types::EntryKind) -> EntryKind {
    match kind {
        api_types::EntryKind::Income => EntryKind::Income,
        api_types::EntryKind::Expense => EntryKind::Expense,
    }
}

pub fn to_transactions(owner: &str, views: &[TransactionView]) -> Vec<Transaction> {
    views
        .iter()
        .map(|view| Transaction {
            id: view.id,
            owner: owner.to_string(),
            category_id: view.category_id,
            kind: domain_kind(view.kind),
            amount_minor: view.amount_minor,
            occurred_on: view.occurred_on,
            note: view.note.clone(),
            location: view.location.clone(),
        })
        .collect()
}

pub fn to_budgets(owner: &str, views: &[BudgetView]) -> Vec<Budget> {
    views
        .iter()
        .map(|view| Budget {
            id: view.id,
            owner: owner.to_string(),
            category_id: view.category_id,
            limit_minor: view.limit_minor,
            spent_minor: view.spent_minor,
            month: view.month,
            year: view.year,
        })
        .collect()
}

pub fn to_goals(owner: &str, views: &[GoalView]) -> Vec<Goal> {
    views
        .iter()
        .map(|view| Goal {
            id: view.id,
            owner: owner.to_string(),
            name: view.name.clone(),
            target_minor: view.target_minor,
            saved_minor: view.saved_minor,
            deadline: view.deadline,
            description: view.description.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use uuid::Uuid;

    use super::*;

    #[test]
    fn converted_transactions_feed_the_aggregations() {
        let views = vec![
            TransactionView {
                id: Uuid::new_v4(),
                amount_minor: 200_000,
                kind: api_types::EntryKind::Income,
                category_id: Uuid::new_v4(),
                occurred_on: NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date"),
                note: None,
                location: None,
            },
            TransactionView {
                id: Uuid::new_v4(),
                amount_minor: 50_000,
                kind: api_types::EntryKind::Expense,
                category_id: Uuid::new_v4(),
                occurred_on: NaiveDate::from_ymd_opt(2024, 6, 9).expect("valid date"),
                note: None,
                location: None,
            },
        ];

        let transactions = to_transactions("alice", &views);
        let totals = monthly_totals(&transactions, 2024, 6);
        assert_eq!(totals.income_minor, 200_000);
        assert_eq!(totals.expenses_minor, 50_000);
        assert_eq!(net_savings(&totals), 150_000);
    }
}
