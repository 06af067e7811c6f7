//! Deterministic pseudo-random number generator.
//!
//! All randomized pipeline stages (tree generation, playout, deviation and
//! uncertainty injection) draw from this PRNG, so a fixed seed reproduces an
//! entire experiment byte-for-byte. The generator is xorshift64: simple,
//! fast, and dependency-free. It is NOT cryptographically secure.

/// A deterministic pseudo-random number generator using xorshift64.
#[derive(Debug, Clone)]
pub struct DetRng {
    state: u64,
}

impl DetRng {
    /// Creates a new PRNG with the given seed.
    ///
    /// The seed must be non-zero. If zero is provided, it is replaced with 1.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    /// Generates the next pseudo-random u64 value.
    pub fn next_u64(&mut self) -> u64 {
        // xorshift64
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Generates a pseudo-random f64 uniformly distributed in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        // 53 high-quality bits into the mantissa.
        (self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Returns `true` with probability `p`.
    ///
    /// `p <= 0` never fires, `p >= 1` always fires. A draw is consumed
    /// regardless of the outcome, keeping the stream position independent of
    /// the probability value.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Generates a pseudo-random usize in the range `[0, bound)`.
    ///
    /// # Panics
    ///
    /// Panics if `bound` is zero.
    #[allow(clippy::cast_possible_truncation)]
    pub fn next_usize(&mut self, bound: usize) -> usize {
        assert!(bound > 0, "bound must be non-zero");
        (self.next_u64() as usize) % bound
    }

    /// Picks a uniformly random element of the slice, or `None` if empty.
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        if slice.is_empty() {
            None
        } else {
            Some(&slice[self.next_usize(slice.len())])
        }
    }

    /// Samples `k` distinct indices from `[0, n)` without replacement.
    ///
    /// Implemented as a partial Fisher-Yates shuffle; the returned indices
    /// are in selection order.
    ///
    /// # Panics
    ///
    /// Panics if `k > n`.
    pub fn sample_indices(&mut self, n: usize, k: usize) -> Vec<usize> {
        assert!(k <= n, "cannot sample {k} indices from a range of {n}");
        let mut pool: Vec<usize> = (0..n).collect();
        let mut picked = Vec::with_capacity(k);
        for i in 0..k {
            let j = i + self.next_usize(n - i);
            pool.swap(i, j);
            picked.push(pool[i]);
        }
        picked
    }
}
