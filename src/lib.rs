mod ad;
mod assigner;
mod engine;
mod indexer;
mod interleave;
mod kv;
mod loader;
mod scheduler;
mod slot_store;
mod storage;

pub use crate::ad::{Ad, AdPools, SizeClass};
pub use crate::assigner::SlotAssigner;
pub use crate::engine::{PageConfig, RotationEngine, SlotAssignment};
pub use crate::indexer::{distinct_pair, next};
pub use crate::interleave::{FeedItem, interleave};
pub use crate::kv::{KeyValueStore, KvOptions, MemoryKv, PersistentKv};
pub use crate::loader::{AdSource, FetchError, PoolLoader};
pub use crate::scheduler::{DEFAULT_ROTATION_INTERVAL, RotationHandle, RotationScheduler};
pub use crate::slot_store::{SlotKey, SlotStore};
