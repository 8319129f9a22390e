//! Statistics API endpoints.
//!
//! Aggregates are recomputed from the owner's transaction list on every
//! request (`engine::stats`); the cached `spent_minor` counters are never
//! consulted.

use api_types::stats::{
    Advice, AdviceResponse, CategorySpend, CategorySpendResponse, MonthlyPoint,
    MonthlySeriesResponse, Summary,
};
use axum::{
    Extension, Json,
    extract::{Query, State},
};
use chrono::{Datelike, Utc};
use engine::stats;
use serde::Deserialize;

use crate::{ServerError, server::ServerState, user};

/// Optional (year, month) bucket; defaults to the current month.
#[derive(Debug, Deserialize)]
pub struct PeriodQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

impl PeriodQuery {
    fn resolve(&self) -> (i32, u32) {
        let today = Utc::now().date_naive();
        (
            self.year.unwrap_or_else(|| today.year()),
            self.month.unwrap_or_else(|| today.month()),
        )
    }
}

pub async fn summary(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Query(period): Query<PeriodQuery>,
) -> Result<Json<Summary>, ServerError> {
    let (year, month) = period.resolve();
    let transactions = state.engine.list_transactions(&user.username).await?;
    let totals = stats::monthly_totals(&transactions, year, month);

    Ok(Json(Summary {
        year,
        month,
        income_minor: totals.income_minor,
        expenses_minor: totals.expenses_minor,
        net_savings_minor: stats::net_savings(&totals),
    }))
}

pub async fn monthly(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<MonthlySeriesResponse>, ServerError> {
    let transactions = state.engine.list_transactions(&user.username).await?;
    let points = stats::monthly_series(&transactions)
        .into_iter()
        .map(|point| MonthlyPoint {
            period: point.period(),
            income_minor: point.income_minor,
            expenses_minor: point.expenses_minor,
        })
        .collect();

    Ok(Json(MonthlySeriesResponse { points }))
}

pub async fn categories(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Query(period): Query<PeriodQuery>,
) -> Result<Json<CategorySpendResponse>, ServerError> {
    let (year, month) = period.resolve();
    let transactions: Vec<_> = state
        .engine
        .list_transactions(&user.username)
        .await?
        .into_iter()
        .filter(|tx| tx.occurred_on.year() == year && tx.occurred_on.month() == month)
        .collect();
    let names = state.engine.list_categories(&user.username).await?;

    let mut categories: Vec<CategorySpend> = stats::spend_by_category(&transactions)
        .into_iter()
        .map(|(category_id, spent_minor)| CategorySpend {
            category_id,
            category: stats::category_name(&names, category_id).to_string(),
            spent_minor,
        })
        .collect();
    // Pie slices, biggest first.
    categories.sort_by(|a, b| b.spent_minor.cmp(&a.spent_minor));

    Ok(Json(CategorySpendResponse { categories }))
}

pub async fn advice(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<AdviceResponse>, ServerError> {
    let transactions = state.engine.list_transactions(&user.username).await?;
    let budgets = state.engine.list_budgets(&user.username).await?;
    let goals = state.engine.list_goals(&user.username).await?;
    let names = state.engine.list_categories(&user.username).await?;
    let today = Utc::now().date_naive();

    let resolve_category = |id| stats::category_name(&names, id).to_string();
    let resolve_goal = |id: uuid::Uuid| {
        goals
            .iter()
            .find(|goal| goal.id == id)
            .map_or_else(|| "goal".to_string(), |goal| goal.name.clone())
    };

    let advice = stats::advice::recommend(&transactions, &budgets, &goals, today)
        .into_iter()
        .map(|tip| match tip {
            stats::advice::Advice::AddFirstEntry => Advice::AddFirstEntry,
            stats::advice::Advice::GreatSavings => Advice::GreatSavings,
            stats::advice::Advice::PositiveSavings => Advice::PositiveSavings,
            stats::advice::Advice::HighExpenses => Advice::HighExpenses,
            stats::advice::Advice::OverBudget {
                category_id,
                over_minor,
            } => Advice::OverBudget {
                category: resolve_category(category_id),
                over_minor,
            },
            stats::advice::Advice::UnderBudget { category_id } => Advice::UnderBudget {
                category: resolve_category(category_id),
            },
            stats::advice::Advice::UnusedBudget { category_id } => Advice::UnusedBudget {
                category: resolve_category(category_id),
            },
            stats::advice::Advice::GoalAlmostReached { goal_id } => Advice::GoalAlmostReached {
                goal: resolve_goal(goal_id),
            },
            stats::advice::Advice::GoalGoodProgress { goal_id } => Advice::GoalGoodProgress {
                goal: resolve_goal(goal_id),
            },
            stats::advice::Advice::GoalStartStrong { goal_id } => Advice::GoalStartStrong {
                goal: resolve_goal(goal_id),
            },
            stats::advice::Advice::KeepItUp => Advice::KeepItUp,
        })
        .collect();

    Ok(Json(AdviceResponse { advice }))
}
