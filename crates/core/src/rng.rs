//! RNG module - deterministic randomness for round setup
//!
//! Every minigame draws its per-round state (board fill, hidden code, phrase,
//! pattern, lock windows) from a [`SimpleRng`] owned by the game controller, so a
//! seed fully determines a session. This keeps tests and benchmarks reproducible.

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits of the state; the low bits of an LCG have short periods.
    /// Returns 0 when `max` is 0.
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Random index into a collection of length `len`
    pub fn next_index(&mut self, len: usize) -> usize {
        self.next_range(len as u32) as usize
    }

    /// Pick `count` distinct values from `0..len`, in draw order.
    ///
    /// `count` is capped at `len`.
    pub fn sample_distinct(&mut self, len: usize, count: usize) -> Vec<usize> {
        let mut pool: Vec<usize> = (0..len).collect();
        let count = count.min(len);
        // Partial Fisher-Yates: only the first `count` slots need settling.
        for i in 0..count {
            let j = i + self.next_index(len - i);
            pool.swap(i, j);
        }
        pool.truncate(count);
        pool
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}
