//! Trophy registry: the fixed collection of all known trophy definitions.
//!
//! Write-once-then-read. Hosts register every trophy before constructing
//! the scanner; the scanner then shares the registry immutably across the
//! worker and callers, so no locking is needed.

use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::trophy::Trophy;

/// Registered trophies in registration order.
#[derive(Debug, Default)]
pub struct TrophyRegistry {
    trophies: Vec<Trophy>,
    ids: HashSet<String>,
}

impl TrophyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a trophy definition. A duplicate identifier is a caller error
    /// and leaves the registry unchanged.
    pub fn register(&mut self, trophy: Trophy) -> Result<()> {
        if !self.ids.insert(trophy.id().to_string()) {
            return Err(Error::DuplicateTrophy(trophy.id().to_string()));
        }
        self.trophies.push(trophy);
        Ok(())
    }

    /// The full set, in registration order. This is evaluation order.
    pub fn list(&self) -> &[Trophy] {
        &self.trophies
    }

    /// Look up a trophy by identifier.
    pub fn get(&self, id: &str) -> Option<&Trophy> {
        self.trophies.iter().find(|t| t.id() == id)
    }

    pub fn len(&self) -> usize {
        self.trophies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trophies.is_empty()
    }
}
