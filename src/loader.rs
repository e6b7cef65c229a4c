use crate::ad::{Ad, AdPools, SizeClass};
use fxhash::hash64;
use spdlog::warn;

pub type FetchError = Box<dyn std::error::Error + Send + Sync>;

/// The network boundary: whatever retrieves a pool from the content API.
///
/// Retry policy lives behind this trait; the engine never retries.
pub trait AdSource {
    fn fetch(&self, class: SizeClass) -> Result<Vec<Ad>, FetchError>;
}

/// Loads the two pools, absorbing fetch failures into empty pools.
///
/// Optionally shuffles each pool once at load time. Order is frozen from
/// then on so the engine's index arithmetic stays meaningful for the mount.
pub struct PoolLoader<S: AdSource> {
    source: S,
    shuffle_seed: Option<u64>,
}

impl<S: AdSource> PoolLoader<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            shuffle_seed: None,
        }
    }

    /// Enables load-time shuffling, deterministic per seed.
    pub fn with_shuffle(mut self, seed: u64) -> Self {
        self.shuffle_seed = Some(seed);
        self
    }

    pub fn load(&self, class: SizeClass) -> Vec<Ad> {
        let mut pool = match self.source.fetch(class) {
            Ok(ads) => ads,
            Err(err) => {
                warn!("ad pool fetch failed for '{}': {}", class.as_str(), err);
                return vec![];
            }
        };

        if let Some(seed) = self.shuffle_seed {
            pool.sort_by_key(|ad| hash64(&(seed, ad.id)));
        }

        pool
    }

    pub fn load_all(&self) -> AdPools {
        AdPools {
            small: self.load(SizeClass::Small),
            large: self.load(SizeClass::Large),
        }
    }
}
