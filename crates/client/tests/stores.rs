//! End-to-end store tests against a real backend on an ephemeral port.

use api_types::EntryKind;
use api_types::budget::BudgetCreate;
use api_types::transaction::TransactionCreate;
use chrono::NaiveDate;
use client::{AppError, Client, Phase, Stores};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ActiveValue, Database, EntityTrait};
use uuid::Uuid;

const API_KEY: &str = "public-anon-key";

async fn spawn_backend() -> String {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("connect in-memory db");
    Migrator::up(&db, None).await.expect("apply migrations");
    server::user::Entity::insert(server::user::ActiveModel {
        username: ActiveValue::Set("alice".to_string()),
        password: ActiveValue::Set("password".to_string()),
    })
    .exec(&db)
    .await
    .expect("seed user");

    let engine = engine::Engine::builder()
        .database(db.clone())
        .build()
        .await
        .expect("build engine");
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral listener");
    let addr = server::spawn_with_listener(engine, db, Some(API_KEY.to_string()), listener)
        .expect("spawn server");
    format!("http://{addr}")
}

async fn logged_in_stores() -> (Stores, Client) {
    let base_url = spawn_backend().await;
    let client = Client::new(&base_url, API_KEY).expect("build client");
    let stores = Stores::with_client(client.clone());
    stores
        .session
        .login(&client, "alice", "password")
        .await
        .expect("login");
    (stores, client)
}

#[tokio::test]
async fn login_rejects_bad_credentials() {
    let base_url = spawn_backend().await;
    let client = Client::new(&base_url, API_KEY).expect("build client");
    let stores = Stores::with_client(client.clone());

    let err = stores
        .session
        .login(&client, "alice", "wrong")
        .await
        .expect_err("bad password");
    assert!(matches!(err, AppError::NotAuthenticated));
    assert!(!stores.session.is_authenticated());
}

#[tokio::test]
async fn stores_block_without_a_session() {
    let base_url = spawn_backend().await;
    let client = Client::new(&base_url, API_KEY).expect("build client");
    let stores = Stores::with_client(client);

    let err = stores.transactions.refresh().await.expect_err("no session");
    assert!(matches!(err, AppError::NotAuthenticated));
    assert_eq!(stores.transactions.snapshot().phase, Phase::Idle);
}

#[tokio::test]
async fn category_and_transaction_flow_updates_snapshots() {
    let (stores, client) = logged_in_stores().await;
    stores.refresh_all().await.expect("initial refresh");
    assert_eq!(stores.categories.snapshot().phase, Phase::Ready);
    assert!(stores.categories.snapshot().items.is_empty());

    let mut changed = stores.transactions.subscribe();

    let food = stores
        .categories
        .add("Food", EntryKind::Expense)
        .await
        .expect("create category");

    stores
        .transactions
        .add(TransactionCreate {
            amount_minor: 50_000,
            kind: EntryKind::Expense,
            category_id: food.id,
            occurred_on: NaiveDate::from_ymd_opt(2024, 6, 9).expect("valid date"),
            note: Some("groceries".to_string()),
            location: None,
        })
        .await
        .expect("create transaction");

    assert!(changed.has_changed().expect("sender alive"));
    let snapshot = stores.transactions.snapshot();
    assert_eq!(snapshot.phase, Phase::Ready);
    assert_eq!(snapshot.items.len(), 1);
    assert_eq!(snapshot.items[0].amount_minor, 50_000);
    assert_eq!(snapshot.items[0].category_id, food.id);

    let summary = client
        .stats_summary(&stores.session.get().expect("session"), 2024, 6)
        .await
        .expect("summary");
    assert_eq!(summary.expenses_minor, 50_000);
    assert_eq!(summary.net_savings_minor, -50_000);
}

#[tokio::test]
async fn local_validation_rejects_before_the_network() {
    let (stores, _client) = logged_in_stores().await;

    let err = stores
        .budgets
        .add(BudgetCreate {
            category_id: Uuid::new_v4(),
            limit_minor: 100_000,
            month: 13,
            year: 2024,
        })
        .await
        .expect_err("month out of range");
    assert!(matches!(err, AppError::Validation(_)));

    let err = stores
        .transactions
        .add(TransactionCreate {
            amount_minor: 0,
            kind: EntryKind::Expense,
            category_id: Uuid::new_v4(),
            occurred_on: NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date"),
            note: None,
            location: None,
        })
        .await
        .expect_err("non-positive amount");
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn backend_rejections_surface_as_validation_errors() {
    let (stores, _client) = logged_in_stores().await;

    let err = stores
        .transactions
        .add(TransactionCreate {
            amount_minor: 1_000,
            kind: EntryKind::Expense,
            category_id: Uuid::new_v4(),
            occurred_on: NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date"),
            note: None,
            location: None,
        })
        .await
        .expect_err("unknown category reference");
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn deleting_a_category_leaves_a_dangling_reference() {
    let (stores, client) = logged_in_stores().await;

    let food = stores
        .categories
        .add("Food", EntryKind::Expense)
        .await
        .expect("create category");
    stores
        .transactions
        .add(TransactionCreate {
            amount_minor: 7_500,
            kind: EntryKind::Expense,
            category_id: food.id,
            occurred_on: NaiveDate::from_ymd_opt(2024, 6, 2).expect("valid date"),
            note: None,
            location: None,
        })
        .await
        .expect("create transaction");

    stores.categories.delete(food.id).await.expect("delete category");

    stores.transactions.refresh().await.expect("refresh");
    let snapshot = stores.transactions.snapshot();
    assert_eq!(snapshot.items.len(), 1);
    assert_eq!(snapshot.items[0].category_id, food.id);

    let spend = client
        .stats_categories(&stores.session.get().expect("session"), 2024, 6)
        .await
        .expect("category spend");
    assert_eq!(spend.len(), 1);
    assert_eq!(spend[0].category, "Unknown category");
    assert_eq!(spend[0].spent_minor, 7_500);
}

#[tokio::test]
async fn list_is_idempotent_between_mutations() {
    let (stores, _client) = logged_in_stores().await;

    let salary = stores
        .categories
        .add("Salary", EntryKind::Income)
        .await
        .expect("create category");
    stores
        .transactions
        .add(TransactionCreate {
            amount_minor: 200_000,
            kind: EntryKind::Income,
            category_id: salary.id,
            occurred_on: NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date"),
            note: None,
            location: None,
        })
        .await
        .expect("create transaction");

    stores.transactions.refresh().await.expect("first refresh");
    let first = stores.transactions.snapshot().items;
    stores.transactions.refresh().await.expect("second refresh");
    let second = stores.transactions.snapshot().items;
    assert_eq!(first, second);
}
