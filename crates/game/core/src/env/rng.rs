//! RNG oracle for deterministic random number generation.
//!
//! Every roll the rules make is derived from the session seed, the action
//! nonce, and a [`Roll`] context, so replaying the same actions against the
//! same content reproduces the same session.

/// RNG oracle for deterministic random number generation.
///
/// Implementations must be deterministic and produce the same values
/// given the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Draw a percentile in `0..100`.
    fn percentile(&self, seed: u64) -> u32 {
        self.next_u32(seed) % 100
    }

    /// Generate a random value in range [min, max] inclusive.
    fn range(&self, seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let range = max - min + 1;
        min + (self.next_u32(seed) % range)
    }
}

/// PCG random number generator (PCG-XSH-RR, 64-bit state, 32-bit output).
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        let state = Self::pcg_step(seed);
        Self::pcg_output(state)
    }
}

static PCG: PcgRng = PcgRng;

/// Independent random streams used within a single action.
///
/// Rolls that happen in the same action must use different contexts so they
/// stay independent of each other.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Roll {
    Encounter = 0,
    Consolation = 1,
    SafeSearch = 2,
    AttackVariance = 3,
    Flee = 4,
    AreaContent = 10,
    EnemyContent = 11,
    LootContent = 12,
    BonusLootContent = 13,
    StoryContent = 14,
}

/// Compute deterministic seed from game state components.
///
/// * `game_seed` - Base seed set at session creation
/// * `nonce` - Action sequence number
/// * `context` - Distinguishes independent rolls within one action
pub fn compute_seed(game_seed: u64, nonce: u64, context: u32) -> u64 {
    // SplitMix64 / FxHash style mixing
    let mut hash = game_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

/// Rolls bound to one action of one session.
#[derive(Clone, Copy, Debug)]
pub struct Dice<'a, R: RngOracle + ?Sized> {
    rng: &'a R,
    seed: u64,
    nonce: u64,
}

impl Dice<'static, PcgRng> {
    pub fn pcg(seed: u64, nonce: u64) -> Self {
        Self::new(&PCG, seed, nonce)
    }
}

impl<'a, R: RngOracle + ?Sized> Dice<'a, R> {
    pub fn new(rng: &'a R, seed: u64, nonce: u64) -> Self {
        Self { rng, seed, nonce }
    }

    /// Seed for a roll context; also forwarded to the content generator.
    pub fn seed_for(&self, roll: Roll) -> u64 {
        compute_seed(self.seed, self.nonce, roll as u32)
    }

    /// Percentile draw in `0..100`.
    pub fn percentile(&self, roll: Roll) -> u32 {
        self.rng.percentile(self.seed_for(roll))
    }

    /// True with probability `percent / 100`.
    pub fn chance(&self, roll: Roll, percent: u32) -> bool {
        self.percentile(roll) < percent
    }

    pub fn range(&self, roll: Roll, min: u32, max: u32) -> u32 {
        self.rng.range(self.seed_for(roll), min, max)
    }
}
