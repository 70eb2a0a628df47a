//! Shared test utilities for store integration tests.

use salvage_store::SqliteStore;
use sqlx::Pool;
use sqlx::Sqlite;
use tempfile::TempDir;
use time::OffsetDateTime;
use uuid::Uuid;

/// A test store wrapper that keeps its temp directory alive.
pub struct TestStore {
    pub store: SqliteStore,
    _temp_dir: TempDir,
}

impl TestStore {
    /// Create a fresh SQLite store backed by a temp directory.
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = SqliteStore::new(temp_dir.path().join("salvage.db"))
            .await
            .expect("Failed to create store");
        Self {
            store,
            _temp_dir: temp_dir,
        }
    }

    pub fn pool(&self) -> &Pool<Sqlite> {
        self.store.pool()
    }
}

/// Insert a customer row directly, bypassing the store API.
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

#[allow(dead_code)]
pub async fn insert_task(pool: &Pool<Sqlite>, id: Uuid, deleted_at: Option<OffsetDateTime>) {
    let now = OffsetDateTime::now_utc();
    sqlx::query(
        "INSERT INTO tasks (id, title, status, assignee_id, due_at, created_at, updated_at, deleted_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind("Follow up on offer")
    .bind("open")
    .bind(None::<Uuid>)
    .bind(None::<OffsetDateTime>)
    .bind(now)
    .bind(now)
    .bind(deleted_at)
    .execute(pool)
    .await
    .expect("Failed to insert task");
}

#[allow(dead_code)]
pub async fn insert_user(pool: &Pool<Sqlite>, id: Uuid, deleted_at: Option<OffsetDateTime>) {
    let now = OffsetDateTime::now_utc();
    sqlx::query(
        "INSERT INTO users (id, email, display_name, created_at, updated_at, deleted_at)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind("agent@crm.test")
    .bind("Agent")
    .bind(now)
    .bind(now)
    .bind(deleted_at)
    .execute(pool)
    .await
    .expect("Failed to insert user");
}
