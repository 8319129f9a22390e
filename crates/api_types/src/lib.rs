use serde::{Deserialize, Serialize};

/// Income/expense discriminator shared by categories and transactions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Income,
    Expense,
}

impl EntryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

pub mod category {
    use super::*;
    use uuid::Uuid;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryCreate {
        pub name: String,
        pub kind: EntryKind,
    }

    /// Partial update; at least one field must be set.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct CategoryUpdate {
        pub name: Option<String>,
        pub kind: Option<EntryKind>,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct CategoryView {
        pub id: Uuid,
        pub name: String,
        pub kind: EntryKind,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryListResponse {
        pub categories: Vec<CategoryView>,
    }
}

pub mod transaction {
    use super::*;
    use chrono::NaiveDate;
    use uuid::Uuid;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionCreate {
        /// Amount in integer cents, strictly positive.
        pub amount_minor: i64,
        pub kind: EntryKind,
        pub category_id: Uuid,
        pub occurred_on: NaiveDate,
        pub note: Option<String>,
        pub location: Option<String>,
    }

    /// Partial update; omitted fields are left untouched.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct TransactionUpdate {
        pub amount_minor: Option<i64>,
        pub kind: Option<EntryKind>,
        pub category_id: Option<Uuid>,
        pub occurred_on: Option<NaiveDate>,
        pub note: Option<String>,
        pub location: Option<String>,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct TransactionView {
        pub id: Uuid,
        pub amount_minor: i64,
        pub kind: EntryKind,
        /// May reference a deleted category; readers must fall back to an
        /// "unknown category" label instead of failing.
        pub category_id: Uuid,
        pub occurred_on: NaiveDate,
        pub note: Option<String>,
        pub location: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionListResponse {
        pub transactions: Vec<TransactionView>,
    }
}

pub mod budget {
    use super::*;
    use uuid::Uuid;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetCreate {
        pub category_id: Uuid,
        /// Monthly limit in integer cents, strictly positive.
        pub limit_minor: i64,
        /// Calendar month, 1-12.
        pub month: u32,
        pub year: i32,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct BudgetUpdate {
        pub category_id: Option<Uuid>,
        pub limit_minor: Option<i64>,
        pub month: Option<u32>,
        pub year: Option<i32>,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct BudgetView {
        pub id: Uuid,
        pub category_id: Uuid,
        pub limit_minor: i64,
        /// Cached spend counter. Progress calculations derive the actual
        /// figure from transactions; this field is informational only.
        pub spent_minor: i64,
        pub month: u32,
        pub year: i32,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetListResponse {
        pub budgets: Vec<BudgetView>,
    }
}

pub mod goal {
    use super::*;
    use chrono::NaiveDate;
    use uuid::Uuid;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GoalCreate {
        pub name: String,
        /// Target in integer cents, strictly positive.
        pub target_minor: i64,
        /// Starting saved amount; defaults to 0.
        pub saved_minor: Option<i64>,
        pub deadline: Option<NaiveDate>,
        pub description: Option<String>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct GoalUpdate {
        pub name: Option<String>,
        pub target_minor: Option<i64>,
        pub saved_minor: Option<i64>,
        pub deadline: Option<NaiveDate>,
        pub description: Option<String>,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct GoalView {
        pub id: Uuid,
        pub name: String,
        pub target_minor: i64,
        pub saved_minor: i64,
        pub deadline: Option<NaiveDate>,
        pub description: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GoalListResponse {
        pub goals: Vec<GoalView>,
    }
}

pub mod session {
    use super::*;

    /// Identity echo returned by `GET /session`; the client uses it to
    /// validate credentials at login.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct SessionView {
        pub username: String,
    }
}

pub mod stats {
    use super::*;
    use uuid::Uuid;

    /// Totals for one (year, month) bucket.
    #[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Summary {
        pub year: i32,
        pub month: u32,
        pub income_minor: i64,
        pub expenses_minor: i64,
        pub net_savings_minor: i64,
    }

    /// One bar of the monthly income/expense chart.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct MonthlyPoint {
        /// "YYYY-MM".
        pub period: String,
        pub income_minor: i64,
        pub expenses_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct MonthlySeriesResponse {
        pub points: Vec<MonthlyPoint>,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct CategorySpend {
        pub category_id: Uuid,
        /// Display name, "Unknown category" when the reference dangles.
        pub category: String,
        pub spent_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategorySpendResponse {
        pub categories: Vec<CategorySpend>,
    }

    /// Advisory hints derived from threshold heuristics. Category and goal
    /// subjects are resolved to display names server-side.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(tag = "kind", rename_all = "snake_case")]
    pub enum Advice {
        AddFirstEntry,
        GreatSavings,
        PositiveSavings,
        HighExpenses,
        OverBudget { category: String, over_minor: i64 },
        UnderBudget { category: String },
        UnusedBudget { category: String },
        GoalAlmostReached { goal: String },
        GoalGoodProgress { goal: String },
        GoalStartStrong { goal: String },
        KeepItUp,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AdviceResponse {
        pub advice: Vec<Advice>,
    }
}
