use crate::ad::{Ad, AdPools};
use crate::assigner::SlotAssigner;
use crate::interleave::{self, FeedItem};
use crate::kv::KeyValueStore;
use crate::slot_store::{SlotKey, SlotStore};
use fxhash::FxHashMap;
use spdlog::info;

/// Slot layout of one listing page. Keys are that page's constants; the
/// namespace keeps its persisted state apart from other pages sharing the
/// same store.
pub struct PageConfig {
    pub namespace: &'static str,
    pub small_slots: [SlotKey; 2],
    pub large_slots: [SlotKey; 2],
}

/// Snapshot of slot → pool index for every currently visible slot.
pub type SlotAssignment = FxHashMap<SlotKey, usize>;

/// One page's rotation state: the persisted slot store, one assigner per
/// pool, and the pools themselves, frozen for the lifetime of the mount.
pub struct RotationEngine<K: KeyValueStore> {
    store: SlotStore<K>,
    small: SlotAssigner,
    large: SlotAssigner,
    pools: AdPools,
}

impl<K: KeyValueStore> RotationEngine<K> {
    pub fn new(kv: K, config: PageConfig) -> Self {
        Self {
            store: SlotStore::new(kv, config.namespace),
            small: SlotAssigner::new(config.small_slots),
            large: SlotAssigner::new(config.large_slots),
            pools: AdPools::default(),
        }
    }

    /// Binds the fetched pools to the slots. Persisted indices are
    /// validated against the pool sizes, corrected where stale, and
    /// written back. Runs once per mount, before any timer is armed.
    pub fn initialize(&mut self, pools: AdPools) -> SlotAssignment {
        info!(
            "ad pools bound: small={}, large={}",
            pools.small.len(),
            pools.large.len()
        );

        self.small.initialize(pools.small.len(), &mut self.store);
        self.large.initialize(pools.large.len(), &mut self.store);
        self.pools = pools;

        self.assignment()
    }

    /// Current visible assignments across both pools.
    pub fn assignment(&self) -> SlotAssignment {
        let mut map = SlotAssignment::default();
        for assigner in [&self.small, &self.large] {
            for slot in assigner.slots() {
                if let Some(index) = assigner.current(slot) {
                    map.insert(slot, index);
                }
            }
        }
        map
    }

    /// Handles the close event of a small-ad popup: hides that slot for
    /// the rest of the session and persists its successor index. Large
    /// slots have no dismiss affordance; unknown keys are ignored.
    pub fn advance_on_dismiss(&mut self, slot: SlotKey) {
        if self.small.holds(slot) {
            self.small.dismiss(slot, &mut self.store);
        }
    }

    /// One rotation step for the large-ad pair; no-op while the pool has
    /// fewer than two ads.
    pub fn tick(&mut self) {
        self.large.advance_pair(&mut self.store);
    }

    /// The ad a slot currently shows, i.e. what the host's render callback
    /// receives. `None` for hidden, suppressed or unknown slots.
    pub fn ad_in(&self, slot: SlotKey) -> Option<&Ad> {
        let (assigner, pool) = if self.small.holds(slot) {
            (&self.small, &self.pools.small)
        } else if self.large.holds(slot) {
            (&self.large, &self.pools.large)
        } else {
            return None;
        };

        pool.get(assigner.current(slot)?)
    }

    pub fn visible(&self, slot: SlotKey) -> bool {
        self.small.visible(slot) || self.large.visible(slot)
    }

    /// Merges a content list with the large-ad pool for narrow layouts,
    /// using the indices the pair currently holds.
    pub fn interleave<'a, C>(&'a self, content: &'a [C]) -> Vec<FeedItem<'a, C>> {
        interleave::interleave(content, &self.pools.large, self.large.indices())
    }

    pub fn large_pool_len(&self) -> usize {
        self.pools.large.len()
    }

    pub fn small_pool_len(&self) -> usize {
        self.pools.small.len()
    }

    pub fn into_store(self) -> K {
        self.store.into_inner()
    }
}
