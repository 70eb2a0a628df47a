//! Database models mapping to the CRM schema.
//!
//! Every participating table gets a typed row struct. The structs derive
//! `Serialize` so a full row can be carried as the JSON payload of a
//! [`DeletedRecordEnvelope`] without a second query.

use crate::error::StoreResult;
use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Uniform access to the soft-delete columns shared by every row type.
pub trait RecordRow {
    fn record_id(&self) -> Uuid;
    fn deleted_at(&self) -> Option<OffsetDateTime>;
}

macro_rules! impl_record_row {
    ($($row:ty),+ $(,)?) => {
        $(impl RecordRow for $row {
            fn record_id(&self) -> Uuid {
                self.id
            }

            fn deleted_at(&self) -> Option<OffsetDateTime> {
                self.deleted_at
            }
        })+
    };
}

/// Customer record.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CustomerRow {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub deleted_at: Option<OffsetDateTime>,
}

/// Contact record. `customer_id` is optional and unenforced; a contact may
/// outlive its customer after a retention purge.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContactRow {
    pub id: Uuid,
    pub customer_id: Option<Uuid>,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub deleted_at: Option<OffsetDateTime>,
}

/// Offer record.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OfferRow {
    pub id: Uuid,
    pub customer_id: Option<Uuid>,
    pub title: String,
    pub status: String,
    /// Monetary total in minor units.
    pub total_amount_cents: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub deleted_at: Option<OffsetDateTime>,
}

/// Offer line-item record.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OfferDetailRow {
    pub id: Uuid,
    pub offer_id: Option<Uuid>,
    pub description: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub deleted_at: Option<OffsetDateTime>,
}

/// Task record.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TaskRow {
    pub id: Uuid,
    pub title: String,
    pub status: String,
    pub assignee_id: Option<Uuid>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub due_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub deleted_at: Option<OffsetDateTime>,
}

/// Application user record.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub deleted_at: Option<OffsetDateTime>,
}

impl_record_row!(
    CustomerRow,
    ContactRow,
    OfferRow,
    OfferDetailRow,
    TaskRow,
    UserRow,
);

/// Read-only projection of a soft-deleted row.
///
/// Computed on demand by the deleted-record query; never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct DeletedRecordEnvelope {
    pub id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub deleted_at: OffsetDateTime,
    /// The full row payload as JSON.
    pub record: serde_json::Value,
}

impl DeletedRecordEnvelope {
    /// Wrap a row fetched by a `deleted_at IS NOT NULL` query.
    pub fn from_row<T: RecordRow + Serialize>(row: T) -> StoreResult<Self> {
        let deleted_at = row.deleted_at().ok_or_else(|| {
            crate::error::StoreError::Internal(
                "deleted-record query returned a live row".to_string(),
            )
        })?;
        Ok(Self {
            id: row.record_id(),
            deleted_at,
            record: serde_json::to_value(&row)?,
        })
    }
}

/// A row fetched regardless of its deletion state.
///
/// Used by the relationship resolver and the restore orchestrator, which
/// need both the payload (for reference fields) and the current state.
#[derive(Debug, Clone)]
pub struct StoredRecord {
    pub id: Uuid,
    pub deleted_at: Option<OffsetDateTime>,
    /// The full row payload as JSON.
    pub record: serde_json::Value,
}

impl StoredRecord {
    pub fn from_row<T: RecordRow + Serialize>(row: T) -> StoreResult<Self> {
        Ok(Self {
            id: row.record_id(),
            deleted_at: row.deleted_at(),
            record: serde_json::to_value(&row)?,
        })
    }

    /// Whether the row is currently soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}
