//! Pure aggregate calculations over in-memory entity lists.
//!
//! Everything here is deterministic and does no I/O: callers load the
//! owner's lists once and recompute whenever a store signals a change.
//! Amounts are accumulated as integer cents; percentages are the only
//! floating-point values and are display-oriented.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Budget, Category, EntryKind, Goal, Transaction};

/// Label shown when a transaction references a deleted category.
pub const UNKNOWN_CATEGORY: &str = "Unknown category";

/// Income/expense totals for one (year, month) bucket.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTotals {
    pub income_minor: i64,
    pub expenses_minor: i64,
}

/// Sum the transactions falling in the given calendar month, split by kind.
pub fn monthly_totals(transactions: &[Transaction], year: i32, month: u32) -> MonthlyTotals {
    let mut totals = MonthlyTotals::default();
    for tx in transactions {
        if tx.occurred_on.year() != year || tx.occurred_on.month() != month {
            continue;
        }
        match tx.kind {
            EntryKind::Income => totals.income_minor += tx.amount_minor,
            EntryKind::Expense => totals.expenses_minor += tx.amount_minor,
        }
    }
    totals
}

/// Income minus expenses; negative when the month overspent.
pub fn net_savings(totals: &MonthlyTotals) -> i64 {
    totals.income_minor - totals.expenses_minor
}

/// Expense totals grouped by category over the given slice. Callers wanting
/// a current-month pie pre-filter the slice.
pub fn spend_by_category(transactions: &[Transaction]) -> HashMap<Uuid, i64> {
    let mut spend = HashMap::new();
    for tx in transactions {
        if tx.kind == EntryKind::Expense {
            *spend.entry(tx.category_id).or_insert(0) += tx.amount_minor;
        }
    }
    spend
}

/// Resolve a category name, tolerating dangling references.
pub fn category_name(categories: &[Category], id: Uuid) -> &str {
    categories
        .iter()
        .find(|category| category.id == id)
        .map_or(UNKNOWN_CATEGORY, |category| category.name.as_str())
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BudgetProgress {
    /// Actual spend derived from transactions; the budget's stored
    /// `spent_minor` counter is never consulted, it goes stale.
    pub spent_actual_minor: i64,
    /// Unclamped so callers can detect over-budget (> 100).
    pub progress_percent: f64,
    pub is_over_budget: bool,
    pub remaining_minor: i64,
}

/// Progress of one budget against the expense transactions of its category
/// and (year, month) bucket.
pub fn budget_progress(budget: &Budget, transactions: &[Transaction]) -> BudgetProgress {
    let spent_actual_minor: i64 = transactions
        .iter()
        .filter(|tx| {
            tx.kind == EntryKind::Expense
                && tx.category_id == budget.category_id
                && tx.occurred_on.year() == budget.year
                && tx.occurred_on.month() == budget.month
        })
        .map(|tx| tx.amount_minor)
        .sum();

    let progress_percent = if budget.limit_minor > 0 {
        spent_actual_minor as f64 / budget.limit_minor as f64 * 100.0
    } else {
        0.0
    };

    BudgetProgress {
        spent_actual_minor,
        progress_percent,
        is_over_budget: spent_actual_minor > budget.limit_minor,
        remaining_minor: budget.limit_minor - spent_actual_minor,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GoalProgress {
    /// Unclamped; clamp at the display layer only.
    pub progress_percent: f64,
    pub is_complete: bool,
}

pub fn goal_progress(goal: &Goal) -> GoalProgress {
    let progress_percent = if goal.target_minor > 0 {
        goal.saved_minor as f64 / goal.target_minor as f64 * 100.0
    } else {
        0.0
    };
    GoalProgress {
        progress_percent,
        is_complete: goal.saved_minor >= goal.target_minor,
    }
}

/// One bar of the monthly summary chart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyPoint {
    pub year: i32,
    pub month: u32,
    pub income_minor: i64,
    pub expenses_minor: i64,
}

impl MonthlyPoint {
    /// "YYYY-MM" period label.
    pub fn period(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

/// Bucket all transactions by calendar month, chronologically ascending, one
/// entry per distinct month present in the data.
pub fn monthly_series(transactions: &[Transaction]) -> Vec<MonthlyPoint> {
    let mut buckets: BTreeMap<(i32, u32), MonthlyTotals> = BTreeMap::new();
    for tx in transactions {
        let totals = buckets
            .entry((tx.occurred_on.year(), tx.occurred_on.month()))
            .or_default();
        match tx.kind {
            EntryKind::Income => totals.income_minor += tx.amount_minor,
            EntryKind::Expense => totals.expenses_minor += tx.amount_minor,
        }
    }
    buckets
        .into_iter()
        .map(|((year, month), totals)| MonthlyPoint {
            year,
            month,
            income_minor: totals.income_minor,
            expenses_minor: totals.expenses_minor,
        })
        .collect()
}

pub mod advice {
    //! Advisory hints derived from threshold heuristics. The thresholds are
    //! configuration constants, not business invariants.

    use super::*;

    /// Monthly net savings considered "great" (in cents; 50 000.00 DA).
    pub const HIGH_SAVINGS_MINOR: i64 = 5_000_000;
    /// Monthly net deficit considered alarming (10 000.00 DA).
    pub const HIGH_OVERSPEND_MINOR: i64 = 1_000_000;
    /// Spend above this share of the limit triggers the overspend warning.
    pub const OVER_BUDGET_RATIO: f64 = 1.10;
    /// Spend below this share of the limit (but above zero) counts as
    /// comfortably under budget.
    pub const UNDER_BUDGET_RATIO: f64 = 0.80;
    /// Goal progress window for the near-completion nudge.
    pub const GOAL_NEAR_PERCENT: f64 = 90.0;
    /// Lower bound of the "good progress" goal window.
    pub const GOAL_GOOD_PERCENT: f64 = 50.0;

    /// Advisory hint, not authoritative. Subjects are ids; display layers
    /// resolve names (with the unknown-category fallback).
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub enum Advice {
        AddFirstEntry,
        GreatSavings,
        PositiveSavings,
        HighExpenses,
        OverBudget { category_id: Uuid, over_minor: i64 },
        UnderBudget { category_id: Uuid },
        UnusedBudget { category_id: Uuid },
        GoalAlmostReached { goal_id: Uuid },
        GoalGoodProgress { goal_id: Uuid },
        GoalStartStrong { goal_id: Uuid },
        KeepItUp,
    }

    /// Derive hints for the month containing `today`.
    pub fn recommend(
        transactions: &[Transaction],
        budgets: &[Budget],
        goals: &[Goal],
        today: NaiveDate,
    ) -> Vec<Advice> {
        let mut tips = Vec::new();
        let (year, month) = (today.year(), today.month());

        if transactions.is_empty() {
            tips.push(Advice::AddFirstEntry);
        } else {
            let savings = net_savings(&monthly_totals(transactions, year, month));
            if savings > HIGH_SAVINGS_MINOR {
                tips.push(Advice::GreatSavings);
            } else if savings > 0 {
                tips.push(Advice::PositiveSavings);
            } else if savings < -HIGH_OVERSPEND_MINOR {
                tips.push(Advice::HighExpenses);
            }
        }

        for budget in budgets {
            if budget.year != year || budget.month != month {
                continue;
            }
            let progress = budget_progress(budget, transactions);
            let spent = progress.spent_actual_minor;
            if spent as f64 > budget.limit_minor as f64 * OVER_BUDGET_RATIO {
                tips.push(Advice::OverBudget {
                    category_id: budget.category_id,
                    over_minor: spent - budget.limit_minor,
                });
            } else if spent > 0 && (spent as f64) < budget.limit_minor as f64 * UNDER_BUDGET_RATIO {
                tips.push(Advice::UnderBudget {
                    category_id: budget.category_id,
                });
            } else if spent == 0 && budget.limit_minor > 0 {
                tips.push(Advice::UnusedBudget {
                    category_id: budget.category_id,
                });
            }
        }

        for goal in goals {
            let progress = goal_progress(goal).progress_percent;
            if (GOAL_NEAR_PERCENT..100.0).contains(&progress) {
                tips.push(Advice::GoalAlmostReached { goal_id: goal.id });
            } else if (GOAL_GOOD_PERCENT..GOAL_NEAR_PERCENT).contains(&progress) {
                tips.push(Advice::GoalGoodProgress { goal_id: goal.id });
            } else if progress == 0.0 && goal.target_minor > 0 {
                tips.push(Advice::GoalStartStrong { goal_id: goal.id });
            }
        }

        if tips.is_empty() && !transactions.is_empty() {
            tips.push(Advice::KeepItUp);
        }

        tips
    }
}

#[cfg(test)]
mod tests {
    use super::advice::*;
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn tx(kind: EntryKind, amount_minor: i64, on: NaiveDate, category_id: Uuid) -> Transaction {
        Transaction {
            id: Uuid::new_v4(),
            owner: "alice".to_string(),
            category_id,
            kind,
            amount_minor,
            occurred_on: on,
            note: None,
            location: None,
        }
    }

    fn budget(category_id: Uuid, limit_minor: i64, month: u32, year: i32) -> Budget {
        Budget {
            id: Uuid::new_v4(),
            owner: "alice".to_string(),
            category_id,
            limit_minor,
            // Deliberately wrong cached value: progress must ignore it.
            spent_minor: 99_999_99,
            month,
            year,
        }
    }

    fn goal(target_minor: i64, saved_minor: i64) -> Goal {
        Goal {
            id: Uuid::new_v4(),
            owner: "alice".to_string(),
            name: "Car".to_string(),
            target_minor,
            saved_minor,
            deadline: None,
            description: None,
        }
    }

    #[test]
    fn monthly_totals_split_by_kind_and_bucket() {
        let food = Uuid::new_v4();
        let salary = Uuid::new_v4();
        let txs = vec![
            tx(EntryKind::Expense, 500_00, date(2024, 6, 10), food),
            tx(EntryKind::Income, 2000_00, date(2024, 6, 1), salary),
            tx(EntryKind::Expense, 999_00, date(2024, 7, 2), food),
        ];

        let totals = monthly_totals(&txs, 2024, 6);
        assert_eq!(
            totals,
            MonthlyTotals {
                income_minor: 2000_00,
                expenses_minor: 500_00,
            }
        );
        assert_eq!(net_savings(&totals), 1500_00);
    }

    #[test]
    fn adding_a_transaction_shifts_only_its_bucket() {
        let category = Uuid::new_v4();
        let mut txs = vec![tx(EntryKind::Income, 1000_00, date(2024, 6, 5), category)];
        let before = monthly_totals(&txs, 2024, 6);

        txs.push(tx(EntryKind::Expense, 120_50, date(2024, 6, 20), category));
        let after = monthly_totals(&txs, 2024, 6);

        assert_eq!(after.income_minor, before.income_minor);
        assert_eq!(after.expenses_minor, before.expenses_minor + 120_50);
        assert_eq!(net_savings(&after), net_savings(&before) - 120_50);
        // Other buckets untouched.
        assert_eq!(monthly_totals(&txs, 2024, 5), MonthlyTotals::default());
    }

    #[test]
    fn spend_by_category_groups_expenses_only() {
        let food = Uuid::new_v4();
        let transport = Uuid::new_v4();
        let txs = vec![
            tx(EntryKind::Expense, 300_00, date(2024, 6, 1), food),
            tx(EntryKind::Expense, 200_00, date(2024, 6, 2), food),
            tx(EntryKind::Expense, 80_00, date(2024, 6, 3), transport),
            tx(EntryKind::Income, 5000_00, date(2024, 6, 4), transport),
        ];

        let spend = spend_by_category(&txs);
        assert_eq!(spend.get(&food), Some(&500_00));
        assert_eq!(spend.get(&transport), Some(&80_00));
        assert_eq!(spend.len(), 2);
    }

    #[test]
    fn budget_progress_derives_spend_and_allows_negative_remaining() {
        let food = Uuid::new_v4();
        let txs = vec![tx(EntryKind::Expense, 500_00, date(2024, 6, 10), food)];
        let b = budget(food, 400_00, 6, 2024);

        let progress = budget_progress(&b, &txs);
        assert_eq!(progress.spent_actual_minor, 500_00);
        assert!((progress.progress_percent - 125.0).abs() < f64::EPSILON);
        assert!(progress.is_over_budget);
        assert_eq!(progress.remaining_minor, -100_00);
        assert_eq!(
            progress.remaining_minor,
            b.limit_minor - progress.spent_actual_minor
        );
    }

    #[test]
    fn budget_progress_ignores_other_months_and_kinds() {
        let food = Uuid::new_v4();
        let txs = vec![
            tx(EntryKind::Expense, 100_00, date(2024, 5, 31), food),
            tx(EntryKind::Income, 100_00, date(2024, 6, 1), food),
        ];
        let progress = budget_progress(&budget(food, 400_00, 6, 2024), &txs);
        assert_eq!(progress.spent_actual_minor, 0);
        assert!(!progress.is_over_budget);
        assert_eq!(progress.remaining_minor, 400_00);
    }

    #[test]
    fn goal_progress_unclamped_and_complete_only_at_target() {
        let nearly = goal_progress(&goal(1000_00, 950_00));
        assert!((nearly.progress_percent - 95.0).abs() < f64::EPSILON);
        assert!(!nearly.is_complete);

        let done = goal_progress(&goal(1000_00, 1000_00));
        assert!(done.is_complete);

        let over = goal_progress(&goal(1000_00, 1200_00));
        assert!(over.is_complete);
        assert!(over.progress_percent > 100.0);
    }

    #[test]
    fn monthly_series_is_chronological_with_one_entry_per_month() {
        let category = Uuid::new_v4();
        let txs = vec![
            tx(EntryKind::Expense, 10_00, date(2024, 7, 3), category),
            tx(EntryKind::Income, 30_00, date(2023, 12, 25), category),
            tx(EntryKind::Expense, 5_00, date(2024, 7, 9), category),
            tx(EntryKind::Income, 20_00, date(2024, 1, 1), category),
        ];

        let series = monthly_series(&txs);
        let periods: Vec<String> = series.iter().map(MonthlyPoint::period).collect();
        assert_eq!(periods, ["2023-12", "2024-01", "2024-07"]);
        assert_eq!(series[2].expenses_minor, 15_00);
        assert_eq!(series[2].income_minor, 0);
    }

    #[test]
    fn category_name_falls_back_for_dangling_references() {
        let known = Category {
            id: Uuid::new_v4(),
            owner: "alice".to_string(),
            name: "Food".to_string(),
            kind: EntryKind::Expense,
        };
        assert_eq!(category_name(&[known.clone()], known.id), "Food");
        assert_eq!(
            category_name(&[known], Uuid::new_v4()),
            UNKNOWN_CATEGORY
        );
    }

    #[test]
    fn advice_for_empty_books() {
        assert_eq!(
            recommend(&[], &[], &[], date(2024, 6, 15)),
            vec![Advice::AddFirstEntry]
        );
    }

    #[test]
    fn advice_flags_overspent_budget_and_near_goal() {
        let food = Uuid::new_v4();
        let today = date(2024, 6, 15);
        let txs = vec![
            tx(EntryKind::Income, 2000_00, date(2024, 6, 1), Uuid::new_v4()),
            tx(EntryKind::Expense, 500_00, date(2024, 6, 10), food),
        ];
        let budgets = vec![budget(food, 400_00, 6, 2024)];
        let goals = vec![goal(1000_00, 950_00)];

        let tips = recommend(&txs, &budgets, &goals, today);
        assert!(tips.contains(&Advice::PositiveSavings));
        assert!(tips.contains(&Advice::OverBudget {
            category_id: food,
            over_minor: 100_00,
        }));
        assert!(
            tips.iter()
                .any(|tip| matches!(tip, Advice::GoalAlmostReached { .. }))
        );
    }

    #[test]
    fn advice_thresholds_for_savings_levels() {
        let category = Uuid::new_v4();
        let today = date(2024, 6, 15);

        let great = vec![tx(
            EntryKind::Income,
            HIGH_SAVINGS_MINOR + 1,
            date(2024, 6, 1),
            category,
        )];
        assert_eq!(
            recommend(&great, &[], &[], today),
            vec![Advice::GreatSavings]
        );

        let deficit = vec![tx(
            EntryKind::Expense,
            HIGH_OVERSPEND_MINOR + 1,
            date(2024, 6, 1),
            category,
        )];
        assert_eq!(
            recommend(&deficit, &[], &[], today),
            vec![Advice::HighExpenses]
        );

        // Break-even month with no budgets or goals: general fallback.
        let flat = vec![
            tx(EntryKind::Income, 100_00, date(2024, 6, 1), category),
            tx(EntryKind::Expense, 100_00, date(2024, 6, 2), category),
        ];
        assert_eq!(recommend(&flat, &[], &[], today), vec![Advice::KeepItUp]);
    }
}
