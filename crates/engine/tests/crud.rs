use chrono::NaiveDate;
use sea_orm::Database;
use uuid::Uuid;

use engine::{
    BudgetDraft, BudgetPatch, Engine, EngineError, EntryKind, GoalDraft, GoalPatch,
    TransactionDraft, TransactionPatch, stats,
};
use migration::MigratorTrait;

async fn engine_with_db() -> Engine {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    Engine::builder().database(db).build().await.unwrap()
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn draft(category_id: Uuid, kind: EntryKind, amount_minor: i64, on: NaiveDate) -> TransactionDraft {
    TransactionDraft {
        category_id,
        kind,
        amount_minor,
        occurred_on: on,
        note: None,
        location: None,
    }
}

#[tokio::test]
async fn categories_crud_ordered_by_name() {
    let engine = engine_with_db().await;

    let food = engine
        .create_category("alice", "Food", EntryKind::Expense)
        .await
        .unwrap();
    engine
        .create_category("alice", "Transport", EntryKind::Expense)
        .await
        .unwrap();
    engine
        .create_category("alice", "Salary", EntryKind::Income)
        .await
        .unwrap();

    let names: Vec<String> = engine
        .list_categories("alice")
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, ["Food", "Salary", "Transport"]);

    let renamed = engine
        .update_category("alice", food.id, Some("Groceries"), None)
        .await
        .unwrap();
    assert_eq!(renamed.name, "Groceries");
    assert_eq!(renamed.kind, EntryKind::Expense);

    engine.delete_category("alice", food.id).await.unwrap();
    let err = engine
        .update_category("alice", food.id, Some("Gone"), None)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));
}

#[tokio::test]
async fn category_names_are_trimmed_and_empty_rejected() {
    let engine = engine_with_db().await;

    let cafe = engine
        .create_category("alice", "  Caf\u{e9}   du  coin ", EntryKind::Expense)
        .await
        .unwrap();
    assert_eq!(cafe.name, "Caf\u{e9} du coin");

    let err = engine
        .create_category("alice", "   ", EntryKind::Expense)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidName(_)));
}

#[tokio::test]
async fn transactions_crud_and_validation() {
    let engine = engine_with_db().await;
    let food = engine
        .create_category("alice", "Food", EntryKind::Expense)
        .await
        .unwrap();

    let err = engine
        .create_transaction(
            "alice",
            draft(food.id, EntryKind::Expense, 0, date(2024, 6, 10)),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));

    let err = engine
        .create_transaction(
            "alice",
            draft(Uuid::new_v4(), EntryKind::Expense, 100, date(2024, 6, 10)),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidReference(_)));

    let tx = engine
        .create_transaction(
            "alice",
            draft(food.id, EntryKind::Expense, 500_00, date(2024, 6, 10)),
        )
        .await
        .unwrap();

    let updated = engine
        .update_transaction(
            "alice",
            tx.id,
            TransactionPatch {
                amount_minor: Some(450_00),
                note: Some("market".to_string()),
                ..TransactionPatch::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.amount_minor, 450_00);
    assert_eq!(updated.note.as_deref(), Some("market"));
    assert_eq!(updated.occurred_on, date(2024, 6, 10));

    engine.delete_transaction("alice", tx.id).await.unwrap();
    assert!(engine.list_transactions("alice").await.unwrap().is_empty());
}

#[tokio::test]
async fn transactions_listed_newest_first_and_list_is_idempotent() {
    let engine = engine_with_db().await;
    let food = engine
        .create_category("alice", "Food", EntryKind::Expense)
        .await
        .unwrap();

    for (amount, day) in [(10_00, 3), (20_00, 17), (30_00, 9)] {
        engine
            .create_transaction(
                "alice",
                draft(food.id, EntryKind::Expense, amount, date(2024, 6, day)),
            )
            .await
            .unwrap();
    }

    let first = engine.list_transactions("alice").await.unwrap();
    let days: Vec<u32> = first
        .iter()
        .map(|tx| chrono::Datelike::day(&tx.occurred_on))
        .collect();
    assert_eq!(days, [17, 9, 3]);

    let second = engine.list_transactions("alice").await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn owner_scoping_hides_other_users_rows() {
    let engine = engine_with_db().await;
    let food = engine
        .create_category("alice", "Food", EntryKind::Expense)
        .await
        .unwrap();
    let tx = engine
        .create_transaction(
            "alice",
            draft(food.id, EntryKind::Expense, 100_00, date(2024, 6, 1)),
        )
        .await
        .unwrap();

    assert!(engine.list_categories("bob").await.unwrap().is_empty());
    assert!(engine.list_transactions("bob").await.unwrap().is_empty());

    // Bob cannot see, mutate, or reference Alice's rows.
    let err = engine.delete_transaction("bob", tx.id).await.unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));
    let err = engine
        .create_transaction(
            "bob",
            draft(food.id, EntryKind::Expense, 100_00, date(2024, 6, 1)),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidReference(_)));
}

#[tokio::test]
async fn budgets_require_expense_category_and_valid_month() {
    let engine = engine_with_db().await;
    let food = engine
        .create_category("alice", "Food", EntryKind::Expense)
        .await
        .unwrap();
    let salary = engine
        .create_category("alice", "Salary", EntryKind::Income)
        .await
        .unwrap();

    let err = engine
        .create_budget(
            "alice",
            BudgetDraft {
                category_id: salary.id,
                limit_minor: 400_00,
                month: 6,
                year: 2024,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidReference(_)));

    let err = engine
        .create_budget(
            "alice",
            BudgetDraft {
                category_id: food.id,
                limit_minor: 400_00,
                month: 13,
                year: 2024,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidDate(_)));

    let budget = engine
        .create_budget(
            "alice",
            BudgetDraft {
                category_id: food.id,
                limit_minor: 400_00,
                month: 6,
                year: 2024,
            },
        )
        .await
        .unwrap();
    assert_eq!(budget.spent_minor, 0);

    let updated = engine
        .update_budget(
            "alice",
            budget.id,
            BudgetPatch {
                limit_minor: Some(450_00),
                ..BudgetPatch::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.limit_minor, 450_00);

    engine.delete_budget("alice", budget.id).await.unwrap();
    assert!(engine.list_budgets("alice").await.unwrap().is_empty());
}

#[tokio::test]
async fn goals_crud_and_validation() {
    let engine = engine_with_db().await;

    let err = engine
        .create_goal(
            "alice",
            GoalDraft {
                name: "Car".to_string(),
                target_minor: 0,
                saved_minor: 0,
                deadline: None,
                description: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));

    let goal = engine
        .create_goal(
            "alice",
            GoalDraft {
                name: "Car".to_string(),
                target_minor: 1000_00,
                saved_minor: 0,
                deadline: Some(date(2025, 1, 1)),
                description: Some("down payment".to_string()),
            },
        )
        .await
        .unwrap();

    let err = engine
        .update_goal(
            "alice",
            goal.id,
            GoalPatch {
                saved_minor: Some(-1),
                ..GoalPatch::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));

    let bumped = engine
        .update_goal(
            "alice",
            goal.id,
            GoalPatch {
                saved_minor: Some(950_00),
                ..GoalPatch::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(bumped.saved_minor, 950_00);
    assert!(!stats::goal_progress(&bumped).is_complete);

    engine.delete_goal("alice", goal.id).await.unwrap();
    assert!(engine.list_goals("alice").await.unwrap().is_empty());
}

#[tokio::test]
async fn deleting_a_category_leaves_dangling_reference_behind() {
    let engine = engine_with_db().await;
    let food = engine
        .create_category("alice", "Food", EntryKind::Expense)
        .await
        .unwrap();
    engine
        .create_transaction(
            "alice",
            draft(food.id, EntryKind::Expense, 500_00, date(2024, 6, 10)),
        )
        .await
        .unwrap();

    engine.delete_category("alice", food.id).await.unwrap();

    // The transaction survives with its reference intact...
    let txs = engine.list_transactions("alice").await.unwrap();
    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0].category_id, food.id);

    // ...and the name lookup degrades instead of failing.
    let categories = engine.list_categories("alice").await.unwrap();
    assert_eq!(
        stats::category_name(&categories, txs[0].category_id),
        stats::UNKNOWN_CATEGORY
    );
}
