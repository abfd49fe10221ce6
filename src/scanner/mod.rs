//! Background trophy scanner: debounced queue, single lazy worker.
//!
//! Callers enqueue creators after activity. The worker starts on the
//! first enqueue, drains the queue once each head item has aged past the
//! scan delay, evaluates the registry per creator, and parks itself when
//! the queue runs dry. Enqueueing a pending creator is a no-op, so a
//! burst of activity collapses into one scan.

mod debounce;
mod evaluate;
mod queue;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::{Notify, broadcast};
use tokio::time::Instant;
use tracing::debug;

use crate::config::DEFAULT_SCAN_DELAY;
use crate::error::{Error, Result};
use crate::event::{EventChannel, LogEvent, Severity, UnlockEvent};
use crate::model::Creator;
use crate::registry::TrophyRegistry;
use crate::store::TrophyStore;
use self::queue::ScanQueue;

/// Scanner tuning.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// How long a creator sits in the queue before being scanned.
    pub delay: Duration,
    /// Buffer size of each broadcast event stream.
    pub event_capacity: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            delay: DEFAULT_SCAN_DELAY,
            event_capacity: 256,
        }
    }
}

/// What an enqueue call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnqueueOutcome {
    /// Creator added to the queue.
    Queued,
    /// Creator was already pending — dedup hit, nothing changed.
    AlreadyQueued,
}

/// Handle to the scanning engine. Cheap to clone; all clones share the
/// same queue, worker and event streams.
#[derive(Clone)]
pub struct Scanner {
    inner: Arc<Inner>,
}

struct Inner {
    registry: TrophyRegistry,
    store: Arc<dyn TrophyStore>,
    events: EventChannel,
    delay: Duration,
    queue: Mutex<ScanQueue>,
    /// True while a worker task owns the queue. Flipped with
    /// compare-and-swap so two racing enqueues can never start two
    /// workers.
    active: AtomicBool,
    shutdown: AtomicBool,
    shutdown_notify: Notify,
}

impl Scanner {
    /// Build a scanner over a finished registry. The registry is
    /// immutable from here on; register everything first.
    pub fn new(registry: TrophyRegistry, store: Arc<dyn TrophyStore>, config: ScanConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                registry,
                store,
                events: EventChannel::new(config.event_capacity),
                delay: config.delay,
                queue: Mutex::new(ScanQueue::default()),
                active: AtomicBool::new(false),
                shutdown: AtomicBool::new(false),
                shutdown_notify: Notify::new(),
            }),
        }
    }

    /// Queue a creator for a debounced scan. No-op if already pending.
    ///
    /// Must be called from within a Tokio runtime: the first enqueue
    /// spawns the worker task.
    pub fn enqueue(&self, creator: &Creator) -> Result<EnqueueOutcome> {
        self.enqueue_inner(creator, false)
    }

    /// Queue a creator at the minimum timestamp, bypassing the debounce
    /// window entirely.
    pub fn enqueue_immediate(&self, creator: &Creator) -> Result<EnqueueOutcome> {
        self.enqueue_inner(creator, true)
    }

    fn enqueue_inner(&self, creator: &Creator, immediate: bool) -> Result<EnqueueOutcome> {
        if self.inner.shutdown.load(Ordering::Acquire) {
            return Err(Error::ShutDown);
        }
        let id = creator
            .id
            .ok_or_else(|| Error::UnidentifiedCreator(creator.name.clone()))?;

        let added = lock(&self.inner.queue).push(creator.clone(), id, immediate, Instant::now());
        if !added {
            return Ok(EnqueueOutcome::AlreadyQueued);
        }

        debug!(creator = %creator.name, immediate, "creator queued for scan");
        self.spawn_worker_if_idle();
        Ok(EnqueueOutcome::Queued)
    }

    /// Start the background worker unless one already owns the queue.
    /// The CAS makes check-and-start a single atomic step.
    fn spawn_worker_if_idle(&self) {
        if self
            .inner
            .active
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            let inner = Arc::clone(&self.inner);
            tokio::spawn(worker_loop(inner));
        }
    }

    /// Number of creators currently pending.
    pub fn queued(&self) -> usize {
        lock(&self.inner.queue).len()
    }

    /// Whether this creator is pending a scan.
    pub fn is_pending(&self, creator: &Creator) -> bool {
        creator
            .id
            .is_some_and(|id| lock(&self.inner.queue).contains(id))
    }

    /// Whether a worker is currently draining the queue.
    pub fn is_active(&self) -> bool {
        self.inner.active.load(Ordering::Acquire)
    }

    pub fn registry(&self) -> &TrophyRegistry {
        &self.inner.registry
    }

    /// Subscribe to the operator-facing log stream.
    pub fn subscribe_logs(&self) -> broadcast::Receiver<LogEvent> {
        self.inner.events.subscribe_logs()
    }

    /// Subscribe to the unlock stream.
    pub fn subscribe_unlocks(&self) -> broadcast::Receiver<UnlockEvent> {
        self.inner.events.subscribe_unlocks()
    }

    /// Stop the scanner. Interrupts the debounce wait; an in-flight
    /// evaluation still runs to completion. Queued creators are dropped
    /// and further enqueues fail.
    pub fn shutdown(&self) {
        self.inner.shutdown.store(true, Ordering::Release);
        // notify_one stores a permit, so a worker that has not yet
        // reached its select still wakes immediately.
        self.inner.shutdown_notify.notify_one();
    }
}

/// Drain the queue, waiting out each head item's remaining debounce.
///
/// Exactly one of these runs at a time; `active` is our claim on the
/// queue and is released on every exit path.
async fn worker_loop(inner: Arc<Inner>) {
    inner
        .events
        .log(Severity::Info, "scanner", "starting trophy scanner");

    while !inner.shutdown.load(Ordering::Acquire) {
        let head = lock(&inner.queue).head_enqueued_at();
        let Some(enqueued_at) = head else {
            // Queue drained — go idle, then re-check: an enqueue that
            // raced us saw `active` still true and skipped the start.
            inner.active.store(false, Ordering::Release);
            let reclaimed = !lock(&inner.queue).is_empty()
                && inner
                    .active
                    .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
                    .is_ok();
            if reclaimed {
                continue;
            }
            inner
                .events
                .log(Severity::Info, "scanner", "shutting down trophy scanner");
            return;
        };

        let wait = debounce::remaining(inner.delay, enqueued_at, Instant::now());
        if !wait.is_zero() {
            // The only intentional suspension point. New enqueues never
            // touch this wait; only shutdown interrupts it.
            tokio::select! {
                () = tokio::time::sleep(wait) => {}
                () = inner.shutdown_notify.notified() => break,
            }
        }
        if inner.shutdown.load(Ordering::Acquire) {
            break;
        }

        let item = lock(&inner.queue).pop();
        if let Some(item) = item {
            evaluate::scan_creator(
                &inner.registry,
                inner.store.as_ref(),
                &inner.events,
                item.creator,
            )
            .await;
        }
    }

    inner.active.store(false, Ordering::Release);
    inner
        .events
        .log(Severity::Info, "scanner", "shutting down trophy scanner");
}

fn lock(queue: &Mutex<ScanQueue>) -> MutexGuard<'_, ScanQueue> {
    // Queue state stays consistent across a panicking holder; recover
    // instead of wedging every later enqueue.
    queue.lock().unwrap_or_else(PoisonError::into_inner)
}
