//! Core data model.
//!
//! A creator is the account being scanned for achievements. An unlock is
//! the record that a creator satisfied a trophy's predicate, written the
//! first time the predicate passes and never re-created by the engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Creator
// ---------------------------------------------------------------------------

/// Newtype for creator ids (a stable numeric identity, e.g. a chat user id).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CreatorId(pub u64);

impl std::fmt::Display for CreatorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The account being evaluated for unlocks.
///
/// Creators lifted out of chat messages sometimes carry a display name
/// only. Identity is the scan queue's dedup key, so an id-less creator
/// cannot be queued — `Scanner::enqueue` rejects it synchronously.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creator {
    /// Stable identity, when known.
    pub id: Option<CreatorId>,

    /// Display name, shown in unlock notifications and logs.
    pub name: String,
}

impl Creator {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id: Some(CreatorId(id)),
            name: name.into(),
        }
    }

    /// A creator known by name only. Cannot be queued for scanning.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Creator stats
// ---------------------------------------------------------------------------

/// Read-only snapshot of a creator's stored state, supplied by the store
/// at scan time. Trophy predicates only ever see this view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatorStats {
    /// Species this creator has submitted.
    pub species_count: u64,

    /// How many of those species have gone extinct.
    pub extinct_species_count: u64,

    /// Distinct zones the creator's species inhabit.
    pub zones_inhabited: u64,
}

// ---------------------------------------------------------------------------
// Unlock
// ---------------------------------------------------------------------------

/// A persisted unlock. Unique per (creator, trophy); `times_unlocked`
/// only moves when storage merges a duplicate persist call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unlock {
    pub creator_id: CreatorId,
    pub trophy_id: String,
    pub unlocked_at: DateTime<Utc>,
    pub times_unlocked: u32,
}
