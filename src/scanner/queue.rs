//! Scan queue: deduplicated, timestamp-ordered pending creators.

use std::collections::{HashSet, VecDeque};

use tokio::time::Instant;

use crate::model::{Creator, CreatorId};

/// A creator waiting to be scanned.
#[derive(Debug, Clone)]
pub(crate) struct QueueItem {
    pub creator: Creator,
    /// When the creator entered the queue. `None` marks an immediate
    /// scan — the minimum possible timestamp, waiting out no debounce.
    pub enqueued_at: Option<Instant>,
}

/// Pending creators in scan order, at most one item per creator.
///
/// Not synchronized by itself; the scanner wraps it in a mutex and holds
/// the lock only across push/pop.
#[derive(Debug, Default)]
pub(crate) struct ScanQueue {
    items: VecDeque<QueueItem>,
    pending: HashSet<CreatorId>,
}

impl ScanQueue {
    /// Insert a creator. Returns false (leaving the queue untouched) when
    /// the creator is already pending; dedup is by identity, not value.
    pub fn push(&mut self, creator: Creator, id: CreatorId, immediate: bool, now: Instant) -> bool {
        if !self.pending.insert(id) {
            return false;
        }

        if immediate {
            // Immediate items sort at the minimum timestamp: behind any
            // earlier immediates, ahead of every dated item.
            let at = self
                .items
                .iter()
                .take_while(|item| item.enqueued_at.is_none())
                .count();
            self.items.insert(
                at,
                QueueItem {
                    creator,
                    enqueued_at: None,
                },
            );
        } else {
            // Dated enqueues arrive in timestamp order already.
            self.items.push_back(QueueItem {
                creator,
                enqueued_at: Some(now),
            });
        }
        true
    }

    /// Enqueue timestamp of the head item, if any.
    pub fn head_enqueued_at(&self) -> Option<Option<Instant>> {
        self.items.front().map(|item| item.enqueued_at)
    }

    /// Remove and return the head item, releasing its dedup slot.
    pub fn pop(&mut self) -> Option<QueueItem> {
        let item = self.items.pop_front()?;
        if let Some(id) = item.creator.id {
            self.pending.remove(&id);
        }
        Some(item)
    }

    pub fn contains(&self, id: CreatorId) -> bool {
        self.pending.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creator(n: u64) -> (Creator, CreatorId) {
        (Creator::new(n, format!("creator-{n}")), CreatorId(n))
    }

    #[test]
    fn duplicate_push_is_a_noop() {
        let mut queue = ScanQueue::default();
        let now = Instant::now();
        let (c, id) = creator(1);

        assert!(queue.push(c.clone(), id, false, now));
        assert!(!queue.push(c, id, false, now));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn pop_releases_the_dedup_slot() {
        let mut queue = ScanQueue::default();
        let now = Instant::now();
        let (c, id) = creator(1);

        queue.push(c.clone(), id, false, now);
        assert!(queue.contains(id));

        let popped = queue.pop().unwrap();
        assert_eq!(popped.creator.id, Some(id));
        assert!(!queue.contains(id));

        // Re-enqueue after pop is allowed.
        assert!(queue.push(c, id, false, now));
    }

    #[test]
    fn immediate_items_sort_ahead_of_dated_ones() {
        let mut queue = ScanQueue::default();
        let now = Instant::now();
        let (c1, id1) = creator(1);
        let (c2, id2) = creator(2);
        let (c3, id3) = creator(3);

        queue.push(c1, id1, false, now);
        queue.push(c2, id2, true, now);
        queue.push(c3, id3, true, now);

        // Both immediates jump the dated item; ties resolve by insertion.
        assert_eq!(queue.pop().unwrap().creator.id, Some(id2));
        assert_eq!(queue.pop().unwrap().creator.id, Some(id3));
        assert_eq!(queue.pop().unwrap().creator.id, Some(id1));
    }

    #[test]
    fn dated_items_stay_fifo() {
        let mut queue = ScanQueue::default();
        let now = Instant::now();
        for n in 1..=3 {
            let (c, id) = creator(n);
            queue.push(c, id, false, now);
        }

        for n in 1..=3 {
            assert_eq!(queue.pop().unwrap().creator.id, Some(CreatorId(n)));
        }
        assert!(queue.is_empty());
    }
}
