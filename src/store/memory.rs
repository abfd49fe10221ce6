//! In-memory store, for tests and embedded use.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Utc;

use super::{TrophyStore, require_id};
use crate::error::Result;
use crate::model::{Creator, CreatorId, CreatorStats, Unlock};
use crate::trophy::Trophy;

#[derive(Debug, Default)]
struct MemoryState {
    stats: HashMap<CreatorId, CreatorStats>,
    unlocks: HashMap<(CreatorId, String), Unlock>,
}

/// Mutex-guarded maps behind the [`TrophyStore`] boundary.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored stats snapshot for a creator.
    pub fn set_stats(&self, id: CreatorId, stats: CreatorStats) {
        self.locked().stats.insert(id, stats);
    }

    /// All unlocks recorded for a creator, in no particular order.
    pub fn unlocks_for(&self, id: CreatorId) -> Vec<Unlock> {
        self.locked()
            .unlocks
            .values()
            .filter(|u| u.creator_id == id)
            .cloned()
            .collect()
    }

    fn locked(&self) -> MutexGuard<'_, MemoryState> {
        // A panicked predicate cannot corrupt these maps; recover rather
        // than poisoning every later scan.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl TrophyStore for MemoryStore {
    async fn unlocked(&self, creator: &Creator, trophies: &[Trophy]) -> Result<HashSet<String>> {
        let id = require_id(creator)?;
        let state = self.locked();
        Ok(trophies
            .iter()
            .map(|t| t.id())
            .filter(|tid| state.unlocks.contains_key(&(id, tid.to_string())))
            .map(str::to_string)
            .collect())
    }

    async fn stats(&self, creator: &Creator) -> Result<CreatorStats> {
        let id = require_id(creator)?;
        Ok(self.locked().stats.get(&id).copied().unwrap_or_default())
    }

    async fn persist_unlock(&self, creator: &Creator, trophy: &Trophy) -> Result<Unlock> {
        let id = require_id(creator)?;
        let mut state = self.locked();
        let unlock = state
            .unlocks
            .entry((id, trophy.id().to_string()))
            .and_modify(|u| {
                // Duplicate persist: last write wins, counter moves.
                u.unlocked_at = Utc::now();
                u.times_unlocked += 1;
            })
            .or_insert_with(|| Unlock {
                creator_id: id,
                trophy_id: trophy.id().to_string(),
                unlocked_at: Utc::now(),
                times_unlocked: 1,
            });
        Ok(unlock.clone())
    }
}
