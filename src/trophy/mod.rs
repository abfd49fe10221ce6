//! Trophy definitions.
//!
//! A trophy is a named achievement with a boolean predicate over a
//! creator's current stored state. Trophies are built once at startup and
//! registered explicitly — there is no discovery mechanism, so evaluation
//! order is exactly registration order.

pub mod builtin;

use crate::error::Result;
use crate::model::{Creator, CreatorStats};

/// Evaluation context handed to trophy predicates: the creator under scan
/// and a read-only snapshot of their stored state.
#[derive(Debug, Clone)]
pub struct ScanContext {
    pub creator: Creator,
    pub stats: CreatorStats,
}

type Predicate = Box<dyn Fn(&ScanContext) -> Result<bool> + Send + Sync>;

/// A named, uniquely-identified achievement definition.
///
/// The identifier must be unique across the registry; the display name is
/// what notification layers show. Hidden trophies keep their unlock
/// condition a surprise; the flag rides along on the unlock event so
/// renderers can obscure the description.
pub struct Trophy {
    id: String,
    name: String,
    description: String,
    hidden: bool,
    predicate: Predicate,
}

impl Trophy {
    /// Start a trophy definition. Optional fields chain builder-style.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        predicate: impl Fn(&ScanContext) -> Result<bool> + Send + Sync + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            hidden: false,
            predicate: Box::new(predicate),
        }
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = text.into();
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn describe(&self) -> &str {
        &self.description
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Run the predicate against a scan context.
    pub fn check(&self, ctx: &ScanContext) -> Result<bool> {
        (self.predicate)(ctx)
    }
}

impl std::fmt::Debug for Trophy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Trophy")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("hidden", &self.hidden)
            .finish_non_exhaustive()
    }
}
