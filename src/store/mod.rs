//! Storage collaborators: where unlocks live and where creator state is read.
//!
//! The engine owns no schema. It talks to a [`TrophyStore`], which the
//! host application implements — Postgres in production, in-memory in
//! tests. Implementations provide their own consistency: `persist_unlock`
//! must tolerate a duplicate call for the same (creator, trophy) pair
//! (last write wins, bumping the counter).

pub mod memory;
pub mod postgres;

use std::collections::HashSet;

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::model::{Creator, CreatorId, CreatorStats, Unlock};
use crate::trophy::Trophy;

/// Storage boundary consumed by the evaluation engine.
#[async_trait]
pub trait TrophyStore: Send + Sync {
    /// Identifiers of trophies this creator has already unlocked,
    /// restricted to the given registered set.
    async fn unlocked(&self, creator: &Creator, trophies: &[Trophy]) -> Result<HashSet<String>>;

    /// Read-only snapshot of the creator's stored state for predicates.
    async fn stats(&self, creator: &Creator) -> Result<CreatorStats>;

    /// Persist a new unlock and return the stored record.
    async fn persist_unlock(&self, creator: &Creator, trophy: &Trophy) -> Result<Unlock>;
}

/// Stores key everything by stable id; a name-only creator has nothing
/// to look up.
pub(crate) fn require_id(creator: &Creator) -> Result<CreatorId> {
    creator
        .id
        .ok_or_else(|| Error::UnidentifiedCreator(creator.name.clone()))
}
