//! Seedable 32-bit pseudo-random generator.
//!
//! Generators and solvers each own one of these; the same seed always replays
//! the same sequence, which is what makes mazes and solves reproducible.

use rand::RngCore;
use rand::rand_core::impls;

/// Mulberry32: a 32-bit state advanced by a Weyl increment and scrambled by a
/// fixed multiply-xorshift mix.
#[derive(Debug, Clone)]
pub struct Mulberry32 {
    seed: u32,
    state: u32,
}

impl Mulberry32 {
    /// Creates a generator from `seed`, or from a freshly drawn entropy seed.
    pub fn new(seed: Option<u32>) -> Self {
        let seed = seed.unwrap_or_else(rand::random::<u32>);
        Mulberry32 { seed, state: seed }
    }

    /// The seed this generator started from.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Next value of the sequence in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / 4_294_967_296.0
    }

    /// Uniform index in `0..max`. Returns 0 when `max` is 0.
    pub fn random_index(&mut self, max: usize) -> usize {
        (self.next_f64() * max as f64) as usize
    }
}

impl RngCore for Mulberry32 {
    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        impls::fill_bytes_via_next(self, dst)
    }
}
