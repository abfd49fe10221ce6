//! Per-creator evaluation: which registered trophies are newly satisfied.
//!
//! One trophy failing never aborts the rest of the scan. A storage
//! failure on the fetch side aborts this creator only — without the
//! already-unlocked set there is no safe way to decide what is new.

use std::panic::{AssertUnwindSafe, catch_unwind};

use tracing::debug;
use uuid::Uuid;

use crate::event::{EventChannel, Severity, UnlockEvent};
use crate::model::Creator;
use crate::registry::TrophyRegistry;
use crate::store::TrophyStore;
use crate::trophy::ScanContext;

pub(crate) async fn scan_creator(
    registry: &TrophyRegistry,
    store: &dyn TrophyStore,
    events: &EventChannel,
    creator: Creator,
) {
    let scan_id = Uuid::new_v4();
    debug!(scan_id = %scan_id, creator = %creator.name, "scanning creator");

    let already = match store.unlocked(&creator, registry.list()).await {
        Ok(set) => set,
        Err(e) => {
            events.log(
                Severity::Error,
                "scanner",
                format!(
                    "failed to fetch unlocked trophies for \"{}\": {e}",
                    creator.name
                ),
            );
            return;
        }
    };

    let stats = match store.stats(&creator).await {
        Ok(stats) => stats,
        Err(e) => {
            events.log(
                Severity::Error,
                "scanner",
                format!("failed to read stats for \"{}\": {e}", creator.name),
            );
            return;
        }
    };

    let ctx = ScanContext { creator, stats };

    for trophy in registry.list() {
        if already.contains(trophy.id()) {
            continue;
        }

        // A panicking predicate counts as a failed check; letting it
        // unwind would kill the worker task and strand the queue.
        let satisfied = match catch_unwind(AssertUnwindSafe(|| trophy.check(&ctx))) {
            Ok(Ok(satisfied)) => satisfied,
            Ok(Err(e)) => {
                events.log(
                    Severity::Error,
                    "scanner",
                    format!("error checking \"{}\" trophy: {e}", trophy.name()),
                );
                continue;
            }
            Err(_) => {
                events.log(
                    Severity::Error,
                    "scanner",
                    format!("panic while checking \"{}\" trophy", trophy.name()),
                );
                continue;
            }
        };

        if !satisfied {
            continue;
        }

        // Persist first. Once stored the unlock is final, even if no
        // subscriber ever hears about it; a failed persist suppresses
        // the notification and the next scan will retry.
        match store.persist_unlock(&ctx.creator, trophy).await {
            Ok(unlock) => {
                debug!(scan_id = %scan_id, trophy = %trophy.id(), "new unlock");
                events.unlock(UnlockEvent {
                    creator: ctx.creator.clone(),
                    trophy_id: trophy.id().to_string(),
                    trophy_name: trophy.name().to_string(),
                    hidden: trophy.is_hidden(),
                    unlocked_at: unlock.unlocked_at,
                });
            }
            Err(e) => {
                events.log(
                    Severity::Error,
                    "scanner",
                    format!(
                        "failed to persist \"{}\" unlock for \"{}\": {e}",
                        trophy.name(),
                        ctx.creator.name
                    ),
                );
            }
        }
    }
}
