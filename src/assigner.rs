use crate::indexer;
use crate::kv::KeyValueStore;
use crate::slot_store::{SlotKey, SlotStore};
use spdlog::debug;

/// Owns the current pool index for a pair of slots drawn from one pool.
///
/// Invariant once initialized: both indices are in `[0, pool_len)` and
/// distinct whenever the pool has more than one element.
pub struct SlotAssigner {
    slots: [SlotKey; 2],
    indices: [usize; 2],
    dismissed: [bool; 2],
    pool_len: usize,
}

// Sentinel fed to distinct_pair when nothing valid is persisted; always
// out of range, so the slot falls back to its default.
const ABSENT: usize = usize::MAX;

impl SlotAssigner {
    pub fn new(slots: [SlotKey; 2]) -> Self {
        Self {
            slots,
            indices: [0, 1],
            dismissed: [false, false],
            pool_len: 0,
        }
    }

    /// Runs once per pool load: validates persisted indices against the
    /// pool size, substitutes defaults, resolves collisions and persists
    /// the result back.
    pub fn initialize<K: KeyValueStore>(&mut self, pool_len: usize, store: &mut SlotStore<K>) {
        self.pool_len = pool_len;
        self.dismissed = [false, false];

        match pool_len {
            // Empty pool: nothing to show, nothing to correct.
            0 => {
                self.indices = [0, 0];
            }
            // Single ad: first slot shows it, second is suppressed and its
            // stale key cleared.
            1 => {
                self.indices = [0, 0];
                store.write(self.slots[0], 0);
                store.clear(self.slots[1]);
            }
            _ => {
                let persisted_a = store.read(self.slots[0]).unwrap_or(ABSENT);
                let persisted_b = store.read(self.slots[1]).unwrap_or(ABSENT);
                let (a, b) = indexer::distinct_pair(persisted_a, persisted_b, pool_len);
                if (a, b) != (persisted_a, persisted_b) {
                    debug!(
                        "slot indices corrected: ({:?}, {:?}) -> ({}, {})",
                        self.slots[0], self.slots[1], a, b
                    );
                }
                self.indices = [a, b];
                store.write(self.slots[0], a);
                store.write(self.slots[1], b);
            }
        }
    }

    fn position(&self, slot: SlotKey) -> Option<usize> {
        self.slots.iter().position(|s| *s == slot)
    }

    pub fn holds(&self, slot: SlotKey) -> bool {
        self.position(slot).is_some()
    }

    pub fn slots(&self) -> [SlotKey; 2] {
        self.slots
    }

    /// Whether the slot currently shows an ad.
    pub fn visible(&self, slot: SlotKey) -> bool {
        match self.position(slot) {
            Some(at) => {
                if self.pool_len == 0 || self.dismissed[at] {
                    return false;
                }
                // With one ad in the pool only the first slot renders.
                !(at == 1 && self.pool_len == 1)
            }
            None => false,
        }
    }

    /// Index of the ad the slot shows, `None` while hidden or suppressed.
    pub fn current(&self, slot: SlotKey) -> Option<usize> {
        if self.visible(slot) {
            self.position(slot).map(|at| self.indices[at])
        } else {
            None
        }
    }

    /// Both raw indices, valid whether or not the slots are visible.
    pub fn indices(&self) -> [usize; 2] {
        self.indices
    }

    pub fn pool_len(&self) -> usize {
        self.pool_len
    }

    /// Dismiss-driven advancement: hides the slot for the rest of the
    /// session and persists its successor so the next visit starts past
    /// the dismissed ad. Other slots are untouched.
    pub fn dismiss<K: KeyValueStore>(&mut self, slot: SlotKey, store: &mut SlotStore<K>) {
        if !self.visible(slot) {
            return;
        }
        let Some(at) = self.position(slot) else {
            return;
        };

        self.dismissed[at] = true;
        store.write(slot, indexer::next(self.indices[at], self.pool_len));
    }

    /// Timer-driven advancement: both indices step forward, the second
    /// steps once more on collision, and both are persisted. No-op unless
    /// the pool has at least two ads.
    pub fn advance_pair<K: KeyValueStore>(&mut self, store: &mut SlotStore<K>) {
        if self.pool_len < 2 {
            return;
        }

        let a = indexer::next(self.indices[0], self.pool_len);
        let mut b = indexer::next(self.indices[1], self.pool_len);
        if a == b {
            b = indexer::next(b, self.pool_len);
        }

        self.indices = [a, b];
        store.write(self.slots[0], a);
        store.write(self.slots[1], b);
    }
}
