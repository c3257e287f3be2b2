//! Output of a generation run: every level, in order.

use xxhash_rust::xxh3::xxh3_64;

use crate::level::Level;

#[derive(Clone, Debug)]
pub struct Dungeon {
    seed: u64,
    levels: Vec<Level>,
}

impl Dungeon {
    pub(super) fn new(seed: u64, levels: Vec<Level>) -> Self {
        Self { seed, levels }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn level(&self, index: usize) -> Option<&Level> {
        self.levels.get(index)
    }

    pub fn level_mut(&mut self, index: usize) -> Option<&mut Level> {
        self.levels.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Same seed and config give the same fingerprint.
    pub fn fingerprint(&self) -> u64 {
        let mut bytes = Vec::new();
        for level in &self.levels {
            bytes.extend(level.canonical_bytes());
        }
        xxh3_64(&bytes)
    }
}
