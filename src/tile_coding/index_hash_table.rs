use fxhash::FxBuildHasher;
use indexmap::IndexMap;
use log::warn;

/// Assigns a stable index to every distinct coordinate vector it sees.
///
/// Indices are handed out in insertion order until `size` of them exist.
/// After that, unseen coordinates are hashed into `[0, size)` and share
/// slots with whatever already lives there.
#[derive(Debug, Clone)]
pub struct IndexHashTable {
    size: usize,
    overfull_count: usize,
    dictionary: IndexMap<Vec<i64>, usize, FxBuildHasher>,
}

impl IndexHashTable {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            overfull_count: 0,
            dictionary: IndexMap::with_hasher(FxBuildHasher::default()),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of coordinate vectors holding a dedicated index.
    pub fn count(&self) -> usize {
        self.dictionary.len()
    }

    pub fn is_full(&self) -> bool {
        self.count() >= self.size
    }

    /// Number of lookups answered by hashing after the table filled up.
    pub fn overfull_count(&self) -> usize {
        self.overfull_count
    }

    /// Index for `coords`. In `read_only` mode unseen coordinates give `None`
    /// and the table is left untouched.
    pub fn get_index(&mut self, coords: &[i64], read_only: bool) -> Option<usize> {
        if let Some(index) = self.dictionary.get(coords) {
            return Some(*index);
        }
        if read_only {
            return None;
        }
        if self.is_full() {
            if self.overfull_count == 0 {
                warn!(
                    "index hash table full at {} entries, starting to allow collisions",
                    self.size
                );
            }
            self.overfull_count += 1;
            return Some((fxhash::hash64(coords) % self.size as u64) as usize);
        }
        let index = self.count();
        self.dictionary.insert(coords.to_vec(), index);
        Some(index)
    }
}
