use bytemuck::{Pod, Zeroable};
use fxhash::hash64;
use memmap2::{MmapMut, MmapOptions};
use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;

const STATE_EMPTY: u64 = 0;
const STATE_USED: u64 = 1;
const STATE_TOMBSTONE: u64 = 2;

pub const MAX_KEY_LEN: usize = 64;
pub const MAX_VAL_LEN: usize = 24;

/// One record in the mapped table. Fixed-size so the whole file is a flat
/// `Pod` array.
#[derive(Clone, Copy, Zeroable, Pod)]
#[repr(C)]
struct KvRecord {
    state: u64,
    key_len: u64,
    val_len: u64,
    key: [u8; MAX_KEY_LEN],
    val: [u8; MAX_VAL_LEN],
}

impl KvRecord {
    fn key_bytes(&self) -> &[u8] {
        &self.key[..self.key_len as usize]
    }
}

/// A memory-mapped, fixed-capacity key-value table.
///
/// Open addressing with linear probing over fxhash buckets; removals leave
/// tombstones so later keys in the same probe chain stay reachable. Writes
/// go straight through the mapping, so state survives process restarts when
/// backed by a file.
pub struct KvMmap {
    mmap: MmapMut,
    capacity: usize,
}

impl KvMmap {
    pub fn new(path: Option<PathBuf>, capacity: usize) -> Result<Self, io::Error> {
        assert!(capacity > 0, "KvMmap capacity must be non-zero");
        let total = capacity * size_of::<KvRecord>();

        let mmap = if let Some(p) = path {
            let file = OpenOptions::new()
                .read(true)
                .write(true)
                .create(true)
                .truncate(true)
                .open(p)?;

            file.set_len(total as u64)?;
            unsafe { MmapOptions::new().map_mut(&file)? }
        } else {
            MmapOptions::new().len(total).map_anon()?
        };

        Ok(Self { mmap, capacity })
    }

    /// OPEN: Maps an existing file; capacity is derived from its size.
    pub fn load(path: PathBuf) -> Result<Self, io::Error> {
        let file = OpenOptions::new().read(true).write(true).open(&path)?;
        let mmap = unsafe { MmapOptions::new().map_mut(&file)? };

        let capacity = mmap.len() / size_of::<KvRecord>();
        if capacity == 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "store file too small for a single record",
            ));
        }

        Ok(Self { mmap, capacity })
    }

    fn records(&self) -> &[KvRecord] {
        bytemuck::cast_slice(&self.mmap[..self.capacity * size_of::<KvRecord>()])
    }

    fn records_mut(&mut self) -> &mut [KvRecord] {
        let len = self.capacity * size_of::<KvRecord>();
        bytemuck::cast_slice_mut(&mut self.mmap[..len])
    }

    fn bucket(&self, key: &[u8]) -> usize {
        (hash64(key) as usize) % self.capacity
    }

    /// Probe position of `key` if present.
    fn find(&self, key: &[u8]) -> Option<usize> {
        let records = self.records();
        let start = self.bucket(key);
        for step in 0..self.capacity {
            let at = (start + step) % self.capacity;
            match records[at].state {
                STATE_EMPTY => return None,
                STATE_USED if records[at].key_bytes() == key => return Some(at),
                _ => {}
            }
        }
        None
    }

    pub fn read(&self, key: &str) -> Option<String> {
        let at = self.find(key.as_bytes())?;
        let record = &self.records()[at];
        let val = &record.val[..record.val_len as usize];
        String::from_utf8(val.to_vec()).ok()
    }

    pub fn write(&mut self, key: &str, value: &str) {
        let key_bytes = key.as_bytes();
        let val_bytes = value.as_bytes();
        assert!(
            key_bytes.len() <= MAX_KEY_LEN,
            "key '{}' exceeds {} bytes",
            key,
            MAX_KEY_LEN
        );
        assert!(
            val_bytes.len() <= MAX_VAL_LEN,
            "value for '{}' exceeds {} bytes",
            key,
            MAX_VAL_LEN
        );

        let capacity = self.capacity;
        let start = self.bucket(key_bytes);

        // Update in place when the key exists, otherwise take the first
        // reusable slot on the probe path.
        let mut insert_at = None;
        let target = {
            let records = self.records();
            let mut found = None;
            for step in 0..capacity {
                let at = (start + step) % capacity;
                match records[at].state {
                    STATE_USED if records[at].key_bytes() == key_bytes => {
                        found = Some(at);
                        break;
                    }
                    STATE_USED => {}
                    STATE_TOMBSTONE => {
                        if insert_at.is_none() {
                            insert_at = Some(at);
                        }
                    }
                    _ => {
                        if insert_at.is_none() {
                            insert_at = Some(at);
                        }
                        break;
                    }
                }
            }
            found.or(insert_at)
        };

        assert!(target.is_some(), "KvMmap full, capacity {}", capacity);
        let at = target.unwrap();
        let record = &mut self.records_mut()[at];
        record.state = STATE_USED;
        record.key_len = key_bytes.len() as u64;
        record.val_len = val_bytes.len() as u64;
        record.key[..key_bytes.len()].copy_from_slice(key_bytes);
        record.val[..val_bytes.len()].copy_from_slice(val_bytes);
    }

    pub fn remove(&mut self, key: &str) {
        if let Some(at) = self.find(key.as_bytes()) {
            self.records_mut()[at].state = STATE_TOMBSTONE;
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod kv_mmap_tests {
    use super::*;

    #[test]
    fn test_write_read_remove() {
        let mut kv = KvMmap::new(None, 16).unwrap();
        kv.write("page.topRight", "3");
        assert_eq!(kv.read("page.topRight"), Some("3".to_string()));

        kv.write("page.topRight", "4");
        assert_eq!(kv.read("page.topRight"), Some("4".to_string()));

        kv.remove("page.topRight");
        assert_eq!(kv.read("page.topRight"), None);
    }

    #[test]
    fn test_probe_chain_survives_removal() {
        let mut kv = KvMmap::new(None, 4).unwrap();
        kv.write("a", "1");
        kv.write("b", "2");
        kv.write("c", "3");
        kv.remove("a");
        // Keys that probed past "a" must still resolve.
        assert_eq!(kv.read("b"), Some("2".to_string()));
        assert_eq!(kv.read("c"), Some("3".to_string()));
        // Tombstone slot is reusable.
        kv.write("d", "4");
        assert_eq!(kv.read("d"), Some("4".to_string()));
    }
}
