//! Repository traits for soft-delete store operations.

pub mod deleted;
pub mod purge;
pub mod soft_delete;

pub use deleted::DeletedRecordRepo;
pub use purge::PurgeRepo;
pub use soft_delete::{RecordStatus, SoftDeleteRepo};
