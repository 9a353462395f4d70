//! Transposition table for caching search results.
//!
//! Keyed by the position key (placement hash plus side to move). Each
//! bucket holds a few entries; the low bits of the key select the bucket and
//! the full key is compared inside it. The table is a pure cache: a lost or
//! evicted entry only costs search time.

use std::mem;

use log::trace;

use crate::board::PseudoMove;

/// Default table size in megabytes
pub const DEFAULT_TT_MB: usize = 16;

/// Entries per bucket
const BUCKET_SIZE: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum BoundType {
    #[default]
    Exact, // Score is the exact value
    LowerBound, // Score is at least this value (failed high - score >= beta)
    UpperBound, // Score is at most this value (failed low - score <= alpha)
}

impl BoundType {
    fn to_u8(self) -> u8 {
        match self {
            BoundType::Exact => 0,
            BoundType::LowerBound => 1,
            BoundType::UpperBound => 2,
        }
    }

    fn from_u8(v: u8) -> Self {
        match v & 0x3 {
            0 => BoundType::Exact,
            1 => BoundType::LowerBound,
            _ => BoundType::UpperBound,
        }
    }
}

/// Unpacked TT entry for reading
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TTEntry {
    pub depth: i8,
    pub score: i16,
    pub bound_type: BoundType,
    pub best_move: PseudoMove,
    pub generation: u8,
}

impl TTEntry {
    pub fn depth(&self) -> i32 {
        i32::from(self.depth)
    }

    pub fn score(&self) -> i32 {
        i32::from(self.score)
    }

    pub fn bound_type(&self) -> BoundType {
        self.bound_type
    }

    /// Best move recorded for this position, if any
    pub fn best_move(&self) -> Option<PseudoMove> {
        (!self.best_move.is_none()).then_some(self.best_move)
    }
}

/// Packed entry format (fits in 64 bits):
/// - bits 0-15:  pseudo move (u16, 0 = no move)
/// - bits 16-31: score (i16 as u16)
/// - bits 32-39: depth (i8 as u8)
/// - bits 40-41: bound
/// - bits 48-55: generation
/// - bit 63:     occupied flag
const OCCUPIED: u64 = 1 << 63;

fn pack_entry(entry: &TTEntry) -> u64 {
    u64::from(entry.best_move.raw())
        | (u64::from(entry.score as u16) << 16)
        | (u64::from(entry.depth as u8) << 32)
        | (u64::from(entry.bound_type.to_u8()) << 40)
        | (u64::from(entry.generation) << 48)
        | OCCUPIED
}

fn unpack_entry(data: u64) -> TTEntry {
    TTEntry {
        best_move: PseudoMove::from_raw((data & 0xFFFF) as u16),
        score: ((data >> 16) & 0xFFFF) as u16 as i16,
        depth: ((data >> 32) & 0xFF) as u8 as i8,
        bound_type: BoundType::from_u8(((data >> 40) & 0x3) as u8),
        generation: ((data >> 48) & 0xFF) as u8,
    }
}

#[derive(Clone, Copy, Default)]
struct TTSlot {
    key: u64,
    data: u64,
}

impl TTSlot {
    fn is_empty(&self) -> bool {
        self.data & OCCUPIED == 0
    }

    fn entry(&self) -> TTEntry {
        unpack_entry(self.data)
    }
}

#[derive(Clone, Copy, Default)]
struct TTBucket {
    slots: [TTSlot; BUCKET_SIZE],
}

impl TTBucket {
    /// Slot to overwrite with `new`, or `None` if the stored data should
    /// be kept.
    fn choose_slot(&self, key: u64, new: &TTEntry) -> Option<usize> {
        // Same position: replace only with data at least as good
        if let Some(idx) = self
            .slots
            .iter()
            .position(|s| !s.is_empty() && s.key == key)
        {
            let old = self.slots[idx].entry();
            let stale = old.generation != new.generation;
            let deeper = new.depth > old.depth;
            let equal_not_worse = new.depth == old.depth
                && !(old.bound_type == BoundType::Exact && new.bound_type != BoundType::Exact);
            return (stale || deeper || equal_not_worse).then_some(idx);
        }
        if let Some(idx) = self.slots.iter().position(TTSlot::is_empty) {
            return Some(idx);
        }
        // Evict the oldest, then the shallowest, then a non-exact entry
        self.slots
            .iter()
            .enumerate()
            .min_by_key(|(_, slot)| {
                let e = slot.entry();
                let age = new.generation.wrapping_sub(e.generation);
                (
                    std::cmp::Reverse(age),
                    e.depth,
                    e.bound_type == BoundType::Exact,
                )
            })
            .map(|(idx, _)| idx)
    }
}

/// Bucketed transposition table. Not shared between threads: every
/// search state owns its own table.
pub struct TranspositionTable {
    buckets: Vec<TTBucket>,
    mask: usize,
    generation: u8,
}

impl TranspositionTable {
    /// Create a new transposition table with the given size in megabytes.
    #[must_use]
    pub fn new(size_mb: usize) -> Self {
        let bucket_size = mem::size_of::<TTBucket>();
        let mut num_buckets = (size_mb.max(1) * 1024 * 1024) / bucket_size;

        // Power of two for mask indexing, never above the requested size
        num_buckets = num_buckets.next_power_of_two();
        if num_buckets * bucket_size > size_mb.max(1) * 1024 * 1024 {
            num_buckets /= 2;
        }
        num_buckets = num_buckets.max(1024);

        trace!(
            "allocating transposition table: {} buckets, {} bytes",
            num_buckets,
            num_buckets * bucket_size
        );

        TranspositionTable {
            buckets: vec![TTBucket::default(); num_buckets],
            mask: num_buckets - 1,
            generation: 0,
        }
    }

    fn index(&self, key: u64) -> usize {
        (key as usize) & self.mask
    }

    /// Probe the table for an entry matching the given key.
    #[must_use]
    pub fn probe(&self, key: u64) -> Option<TTEntry> {
        self.buckets[self.index(key)]
            .slots
            .iter()
            .find(|slot| !slot.is_empty() && slot.key == key)
            .map(TTSlot::entry)
    }

    /// Store an entry for `key`.
    ///
    /// An existing entry for the same position is overwritten only by a
    /// deeper result, or an equally deep one unless that would replace an
    /// exact score with a bound. Entries from older searches are always
    /// replaceable. Otherwise a free slot is used, and in a full bucket the
    /// oldest, then shallowest, then non-exact entry is evicted.
    pub fn store(
        &mut self,
        key: u64,
        depth: i32,
        score: i32,
        bound_type: BoundType,
        best_move: PseudoMove,
    ) {
        let entry = TTEntry {
            depth: depth.clamp(i32::from(i8::MIN), i32::from(i8::MAX)) as i8,
            score: score.clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16,
            bound_type,
            best_move,
            generation: self.generation,
        };
        let idx = self.index(key);
        let bucket = &mut self.buckets[idx];
        if let Some(slot) = bucket.choose_slot(key, &entry) {
            bucket.slots[slot] = TTSlot {
                key,
                data: pack_entry(&entry),
            };
        }
    }

    /// Start a new search; older entries lose replacement priority
    pub fn new_search(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    #[must_use]
    pub fn generation(&self) -> u8 {
        self.generation
    }

    /// Returns hash table fullness in per mille (0-1000).
    #[must_use]
    pub fn hashfull_per_mille(&self) -> u32 {
        // Sample first 1000 buckets for efficiency
        let sample_size = self.buckets.len().min(1000);
        let occupied = self
            .buckets
            .iter()
            .take(sample_size)
            .flat_map(|b| b.slots.iter())
            .filter(|s| !s.is_empty())
            .count();

        let total_slots = sample_size * BUCKET_SIZE;
        ((occupied as u64 * 1000) / total_slots as u64) as u32
    }

    /// Clear all entries from the table.
    pub fn clear(&mut self) {
        self.buckets.fill(TTBucket::default());
        self.generation = 0;
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        TranspositionTable::new(DEFAULT_TT_MB)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Position;

    fn pm(from: (u8, u8), to: (u8, u8)) -> PseudoMove {
        PseudoMove::new(Position::new(from.0, from.1), Position::new(to.0, to.1))
    }

    #[test]
    fn test_pack_unpack_roundtrip() {
        let entry = TTEntry {
            depth: -3,
            score: -29_990,
            bound_type: BoundType::UpperBound,
            best_move: pm((2, 2), (3, 3)),
            generation: 200,
        };
        assert_eq!(unpack_entry(pack_entry(&entry)), entry);
    }

    #[test]
    fn test_store_and_probe() {
        let mut tt = TranspositionTable::new(1);
        let key = 0x1234_5678_9ABC_DEF0;

        tt.store(key, 10, 500, BoundType::Exact, PseudoMove::NONE);

        let entry = tt.probe(key).expect("should find entry");
        assert_eq!(entry.depth(), 10);
        assert_eq!(entry.score(), 500);
        assert_eq!(entry.bound_type(), BoundType::Exact);
        assert_eq!(entry.best_move(), None);
    }

    #[test]
    fn test_no_false_positives() {
        let mut tt = TranspositionTable::new(1);
        tt.store(0x1234_5678_9ABC_DEF0, 10, 500, BoundType::Exact, PseudoMove::NONE);
        assert!(tt.probe(0xFEDC_BA98_7654_3210).is_none());
    }

    #[test]
    fn shallower_result_does_not_overwrite() {
        let mut tt = TranspositionTable::new(1);
        let key = 42;
        tt.store(key, 6, 100, BoundType::Exact, pm((2, 2), (3, 3)));
        tt.store(key, 4, -50, BoundType::LowerBound, PseudoMove::NONE);
        assert_eq!(tt.probe(key).map(|e| e.score()), Some(100));

        // Equal depth may not downgrade an exact score
        tt.store(key, 6, 70, BoundType::UpperBound, PseudoMove::NONE);
        assert_eq!(tt.probe(key).map(|e| e.score()), Some(100));

        tt.store(key, 7, 30, BoundType::UpperBound, PseudoMove::NONE);
        assert_eq!(tt.probe(key).map(|e| e.score()), Some(30));
    }

    #[test]
    fn stale_entries_are_replaced() {
        let mut tt = TranspositionTable::new(1);
        let key = 7;
        tt.store(key, 9, 1, BoundType::Exact, PseudoMove::NONE);
        tt.new_search();
        tt.store(key, 1, 2, BoundType::LowerBound, PseudoMove::NONE);
        assert_eq!(tt.probe(key).map(|e| e.score()), Some(2));
    }

    #[test]
    fn full_bucket_evicts_shallowest() {
        let mut tt = TranspositionTable::new(1);
        let stride = (tt.mask as u64) + 1;
        // Four keys mapping to the same bucket
        let keys = [5, 5 + stride, 5 + 2 * stride, 5 + 3 * stride];
        tt.store(keys[0], 8, 0, BoundType::Exact, PseudoMove::NONE);
        tt.store(keys[1], 2, 0, BoundType::Exact, PseudoMove::NONE);
        tt.store(keys[2], 5, 0, BoundType::Exact, PseudoMove::NONE);
        tt.store(keys[3], 3, 0, BoundType::Exact, PseudoMove::NONE);
        assert!(tt.probe(keys[0]).is_some());
        assert!(tt.probe(keys[1]).is_none());
        assert!(tt.probe(keys[2]).is_some());
        assert!(tt.probe(keys[3]).is_some());
    }

    #[test]
    fn clear_empties_table() {
        let mut tt = TranspositionTable::new(1);
        tt.store(99, 3, 10, BoundType::Exact, PseudoMove::NONE);
        assert!(tt.hashfull_per_mille() > 0 || tt.probe(99).is_some());
        tt.clear();
        assert!(tt.probe(99).is_none());
    }
}
