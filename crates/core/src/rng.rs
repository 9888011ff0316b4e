//! RNG module - uniform trio generation
//!
//! Each deal draws three shapes uniformly at random, with replacement, from
//! the difficulty's eligible pool. Every dealt piece gets a fresh identity
//! token so two pieces with the same shape stay distinguishable.
//!
//! A seeded [`SmallRng`] keeps sessions reproducible for tests and replays.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::pieces::{block_pool, Piece, Trio};
use crate::types::{Difficulty, TRIO_SIZE};

/// Trio generator with monotonically allocated piece ids
#[derive(Debug, Clone)]
pub struct BlockGenerator {
    rng: SmallRng,
    seed: u64,
    /// Next identity token to hand out (0 is never used)
    next_id: u32,
}

impl BlockGenerator {
    /// Create a generator with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            seed,
            next_id: 1,
        }
    }

    /// Deal a fresh trio for `difficulty`
    pub fn deal(&mut self, difficulty: Difficulty) -> Trio {
        let pool = block_pool(difficulty);
        let mut trio = Trio::new();
        for _ in 0..TRIO_SIZE {
            let def = pool[self.rng.gen_range(0..pool.len())];
            let id = self.allocate_id();
            trio.push(Piece::new(id, def));
        }
        trio
    }

    /// Make sure future ids are greater than `id`
    ///
    /// Used when pieces are installed from outside the generator.
    pub fn reserve_through(&mut self, id: u32) {
        self.next_id = self.next_id.max(id.saturating_add(1));
    }

    fn allocate_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1).max(1);
        id
    }

    /// Get the seed the generator started from
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for BlockGenerator {
    fn default() -> Self {
        Self::new(0)
    }
}
