//! Shared test utilities for recovery integration tests.

use salvage_store::{RecoveryStore, SqliteStore};
use sqlx::{Pool, Sqlite};
use std::sync::Arc;
use tempfile::TempDir;
use time::OffsetDateTime;
use uuid::Uuid;

/// A test store wrapper that keeps its temp directory alive.
pub struct TestStore {
    sqlite: Arc<SqliteStore>,
    _temp_dir: TempDir,
}

impl TestStore {
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let sqlite = SqliteStore::new(temp_dir.path().join("salvage.db"))
            .await
            .expect("Failed to create store");
        Self {
            sqlite: Arc::new(sqlite),
            _temp_dir: temp_dir,
        }
    }

    pub fn store(&self) -> Arc<dyn RecoveryStore> {
        self.sqlite.clone()
    }

    pub fn pool(&self) -> &Pool<Sqlite> {
        self.sqlite.pool()
    }
}

/// Note: #[allow(dead_code)] because each test file compiles common/ separately.
#[allow(dead_code)]
pub async fn insert_customer(pool: &Pool<Sqlite>, id: Uuid, deleted_at: Option<OffsetDateTime>) {
    let now = OffsetDateTime::now_utc();
    sqlx::query(
        "INSERT INTO customers (id, name, email, phone, created_at, updated_at, deleted_at)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind("Acme Industries")
    .bind(Some("sales@acme.test"))
    .bind(None::<String>)
    .bind(now)
    .bind(now)
    .bind(deleted_at)
    .execute(pool)
    .await
    .expect("Failed to insert customer");
}

#[allow(dead_code)]
pub async fn insert_contact(
    pool: &Pool<Sqlite>,
    id: Uuid,
    customer_id: Option<Uuid>,
    deleted_at: Option<OffsetDateTime>,
) {
    let now = OffsetDateTime::now_utc();
    sqlx::query(
        "INSERT INTO contacts (id, customer_id, first_name, last_name, email, created_at, updated_at, deleted_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(customer_id)
    .bind("Jamie")
    .bind("Doe")
    .bind(Some("jamie@acme.test"))
    .bind(now)
    .bind(now)
    .bind(deleted_at)
    .execute(pool)
    .await
    .expect("Failed to insert contact");
}

#[allow(dead_code)]
pub async fn insert_offer(
    pool: &Pool<Sqlite>,
    id: Uuid,
    customer_id: Option<Uuid>,
    deleted_at: Option<OffsetDateTime>,
) {
    let now = OffsetDateTime::now_utc();
    sqlx::query(
        "INSERT INTO offers (id, customer_id, title, status, total_amount_cents, created_at, updated_at, deleted_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(customer_id)
    .bind("Annual maintenance contract")
    .bind("sent")
    .bind(250_000_i64)
    .bind(now)
    .bind(now)
    .bind(deleted_at)
    .execute(pool)
    .await
    .expect("Failed to insert offer");
}

#[allow(dead_code)]
pub async fn insert_offer_detail(
    pool: &Pool<Sqlite>,
    id: Uuid,
    offer_id: Option<Uuid>,
    deleted_at: Option<OffsetDateTime>,
) {
    let now = OffsetDateTime::now_utc();
    sqlx::query(
        "INSERT INTO offer_details (id, offer_id, description, quantity, unit_price_cents, created_at, updated_at, deleted_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(offer_id)
    .bind("On-site service visit")
    .bind(4_i64)
    .bind(12_500_i64)
    .bind(now)
    .bind(now)
    .bind(deleted_at)
    .execute(pool)
    .await
    .expect("Failed to insert offer detail");
}
