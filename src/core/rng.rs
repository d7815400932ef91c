//! Deterministic random number generation.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces an identical game, bit for bit
//! - **Per-game streams**: Each scheduled game derives its own generator,
//!   so a round can be simulated in any order (or in parallel) and still
//!   reproduce the same results
//!
//! ## Usage
//!
//! ```
//! use rust_ballgame::core::{GameId, GameRng};
//!
//! let round = GameRng::new(42);
//!
//! // Each game gets its own stream
//! let mut game_a = round.for_game(GameId::new(1));
//! let mut game_b = round.for_game(GameId::new(2));
//! assert_ne!(game_a.gen_range(0..1000), game_b.gen_range(0..1000));
//!
//! // Same game id, same stream
//! let mut again = GameRng::new(42).for_game(GameId::new(1));
//! let mut game_a = round.for_game(GameId::new(1));
//! assert_eq!(game_a.gen_range(0..1000), again.gen_range(0..1000));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::ids::GameId;

/// Deterministic RNG shared by every resolver of one game.
///
/// Uses ChaCha8 for speed while keeping high-quality randomness. All
/// resolvers draw from the same generator in a fixed call order, which is
/// what makes replays exact.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Derive the independent stream for one scheduled game.
    ///
    /// Depends only on this generator's seed and the game id, never on how
    /// many numbers have been drawn, so the sub-stream is stable no matter
    /// which games were simulated before it.
    #[must_use]
    pub fn for_game(&self, game: GameId) -> Self {
        Self::new(mix_seed(self.seed, u64::from(game.raw())))
    }

    /// Original seed of this generator.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate a random integer in the given range.
    pub fn gen_range(&mut self, range: std::ops::Range<i32>) -> i32 {
        self.inner.gen_range(range)
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Generate a uniform float in `[0, 1)`.
    pub fn unit(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    /// Weighted coin flip: true with the given probability.
    ///
    /// The probability is clamped to `[0, 1]`; NaN counts as zero.
    pub fn chance(&mut self, probability: f64) -> bool {
        let p = if probability.is_nan() {
            0.0
        } else {
            probability.clamp(0.0, 1.0)
        };
        self.unit() < p
    }

    /// Choose a random index with weighted probability.
    ///
    /// Weights do not need to sum to 1.0. Negative weights count as zero.
    /// Returns `None` if weights are empty or all zero.
    pub fn choose_weighted(&mut self, weights: &[f64]) -> Option<usize> {
        if weights.is_empty() {
            return None;
        }

        let total: f64 = weights.iter().map(|w| w.max(0.0)).sum();
        if total <= 0.0 || !total.is_finite() {
            return None;
        }

        let mut threshold = self.unit() * total;
        let mut last_positive = None;

        for (i, &weight) in weights.iter().enumerate() {
            let weight = weight.max(0.0);
            if weight > 0.0 {
                last_positive = Some(i);
            }
            threshold -= weight;
            if threshold < 0.0 && weight > 0.0 {
                return Some(i);
            }
        }

        // Floating point edge case - return last non-zero weight
        last_positive
    }
}

/// SplitMix64 finalizer over the seed and a stream discriminator.
fn mix_seed(seed: u64, stream: u64) -> u64 {
    let mut z = seed ^ stream.wrapping_add(0x9E37_79B9_7F4A_7C15).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
