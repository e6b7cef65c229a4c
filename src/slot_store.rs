use crate::kv::KeyValueStore;

/// Names a fixed on-screen position that shows one ad at a time.
///
/// Page-scoped: each listing page defines its own constants and passes them
/// at engine construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotKey(pub &'static str);

impl SlotKey {
    pub fn name(&self) -> &'static str {
        self.0
    }
}

/// Typed integer reads and writes over the injected key-value store.
///
/// Storage keys are namespaced per page ("{page}.{slot}") so different
/// listing pages never collide. Unparseable or negative persisted values
/// read as absent; the assigner regenerates them.
pub struct SlotStore<K: KeyValueStore> {
    kv: K,
    namespace: &'static str,
}

impl<K: KeyValueStore> SlotStore<K> {
    pub fn new(kv: K, namespace: &'static str) -> Self {
        Self { kv, namespace }
    }

    fn storage_key(&self, slot: SlotKey) -> String {
        format!("{}.{}", self.namespace, slot.name())
    }

    pub fn read(&self, slot: SlotKey) -> Option<usize> {
        let raw = self.kv.read(&self.storage_key(slot))?;
        raw.trim().parse::<usize>().ok()
    }

    pub fn write(&mut self, slot: SlotKey, index: usize) {
        let key = self.storage_key(slot);
        self.kv.write(&key, &index.to_string());
    }

    pub fn clear(&mut self, slot: SlotKey) {
        let key = self.storage_key(slot);
        self.kv.remove(&key);
    }

    pub fn into_inner(self) -> K {
        self.kv
    }
}
