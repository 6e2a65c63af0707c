//! Deterministic linear-congruential generator for world generation
//!
//! Generation is the only seeded, reproducible randomness in the game;
//! gameplay systems (combat variance, loot) use unseeded `rand` instead.
//! Generators may consult no entropy source other than this.

/// Classic C-library LCG parameters over a 2^31 modulus
const MULTIPLIER: u64 = 1_103_515_245;
const INCREMENT: u64 = 12_345;
const MODULUS: u64 = 1 << 31;

/// Seeded pseudo-random source
///
/// Identical seed produces an identical, infinite sequence.
#[derive(Debug, Clone)]
pub struct Lcg {
    state: u64,
}

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self { state: seed % MODULUS }
    }

    /// Advance and return a float in [0, 1)
    pub fn next(&mut self) -> f64 {
        self.state = (self.state.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT)) % MODULUS;
        self.state as f64 / MODULUS as f64
    }

    /// Integer in [0, max), derived from `next`
    pub fn next_int(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        (self.next() * max as f64) as u32
    }
}
