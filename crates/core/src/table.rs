//! Entity-table allow-list and the static relationship edge table.
//!
//! Every table participating in soft delete is listed here. Table names
//! arriving from the UI or RPC boundary must be parsed through
//! [`EntityTable::parse`] before any SQL is issued; an unknown name fails
//! closed with [`Error::UnsupportedTable`].

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A soft-delete-enabled table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityTable {
    Customers,
    Contacts,
    Offers,
    OfferDetails,
    Tasks,
    Users,
}

impl EntityTable {
    /// All participating tables, in purge iteration order.
    ///
    /// Children come before their parents so a purge pass never leaves a
    /// freshly purged parent referenced by a still-expiring child longer
    /// than one iteration.
    pub const ALL: [EntityTable; 6] = [
        EntityTable::OfferDetails,
        EntityTable::Offers,
        EntityTable::Contacts,
        EntityTable::Tasks,
        EntityTable::Users,
        EntityTable::Customers,
    ];

    /// The SQL table name. Safe to interpolate into statements because the
    /// set of values is closed.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Customers => "customers",
            Self::Contacts => "contacts",
            Self::Offers => "offers",
            Self::OfferDetails => "offer_details",
            Self::Tasks => "tasks",
            Self::Users => "users",
        }
    }

    /// Parse a table name against the allow-list.
    pub fn parse(name: &str) -> Result<Self> {
        match name {
            "customers" => Ok(Self::Customers),
            "contacts" => Ok(Self::Contacts),
            "offers" => Ok(Self::Offers),
            "offer_details" => Ok(Self::OfferDetails),
            "tasks" => Ok(Self::Tasks),
            "users" => Ok(Self::Users),
            other => Err(Error::UnsupportedTable(other.to_string())),
        }
    }
}

impl fmt::Display for EntityTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityTable {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// A statically known foreign-key relationship between two tables.
///
/// The restore orchestrator walks these edges upward (child to parent) to
/// revive soft-deleted ancestors before the target, and downward for edges
/// flagged `cascade_on_parent_restore`.
#[derive(Debug, Clone, Copy)]
pub struct RelationshipEdge {
    /// Table holding the reference.
    pub child: EntityTable,
    /// Column on the child carrying the parent id. Nullable; the schema
    /// does not enforce it, so dangling references are expected.
    pub reference_field: &'static str,
    /// Table the reference points into.
    pub parent: EntityTable,
    /// Whether restoring the parent also revives its soft-deleted children
    /// along this edge.
    pub cascade_on_parent_restore: bool,
}

/// The relationship edge table. Adding a relationship is a data change
/// here, not a code change in the resolver or orchestrator.
pub const RESTORE_EDGES: &[RelationshipEdge] = &[
    RelationshipEdge {
        child: EntityTable::Offers,
        reference_field: "customer_id",
        parent: EntityTable::Customers,
        cascade_on_parent_restore: false,
    },
    RelationshipEdge {
        child: EntityTable::Contacts,
        reference_field: "customer_id",
        parent: EntityTable::Customers,
        cascade_on_parent_restore: false,
    },
    RelationshipEdge {
        child: EntityTable::OfferDetails,
        reference_field: "offer_id",
        parent: EntityTable::Offers,
        cascade_on_parent_restore: true,
    },
];

/// The edge leading from `table` to its parent, if any.
///
/// Each table has at most one parent in the current model; the first match
/// wins if that ever changes.
pub fn parent_edge(table: EntityTable) -> Option<&'static RelationshipEdge> {
    RESTORE_EDGES.iter().find(|edge| edge.child == table)
}

/// All edges where `table` is the parent.
pub fn child_edges(table: EntityTable) -> impl Iterator<Item = &'static RelationshipEdge> {
    RESTORE_EDGES.iter().filter(move |edge| edge.parent == table)
}
