use crate::storage::kv_mmap::KvMmap;
use fxhash::FxHashMap;
use std::path::PathBuf;

/// The persistent key-value store the engine rotates through.
///
/// String keys and values, no transactions, last write wins. Implementations
/// are injected at engine construction so tests can run against an
/// in-memory fake.
pub trait KeyValueStore {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// In-memory store: the unit-test fake, also usable for sessions that
/// should not persist across reloads.
#[derive(Default)]
pub struct MemoryKv {
    entries: FxHashMap<String, String>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKv {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// Configuration for [`PersistentKv`]: file name under the root path,
/// record capacity, and an `in_memory` switch that maps anonymously
/// instead of touching disk.
pub struct KvOptions {
    pub name: &'static str,
    pub capacity: usize,
    pub in_memory: bool,
}

/// File-backed store over [`KvMmap`]; survives process restarts.
pub struct PersistentKv {
    storage: KvMmap,
}

impl PersistentKv {
    pub fn new(root_path: &str, options: KvOptions) -> Result<Self, std::io::Error> {
        let storage = if options.in_memory {
            KvMmap::new(None, options.capacity)?
        } else {
            let path: PathBuf = format!("{}/{}.slots", root_path, options.name).into();
            if path.exists() {
                KvMmap::load(path)?
            } else {
                KvMmap::new(Some(path), options.capacity)?
            }
        };

        Ok(Self { storage })
    }
}

impl KeyValueStore for PersistentKv {
    fn read(&self, key: &str) -> Option<String> {
        self.storage.read(key)
    }

    fn write(&mut self, key: &str, value: &str) {
        self.storage.write(key, value);
    }

    fn remove(&mut self, key: &str) {
        self.storage.remove(key);
    }
}
