use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// A per-[`crate::Evaluator`] deterministic random source.
///
/// Seeded from an arbitrary UTF-8 string rather than a raw integer, as the
/// language surface specifies. `DefaultHasher`'s initial keys are fixed
/// (unlike `HashMap`'s randomized ones), so hashing the seed string is
/// reproducible across runs and platforms, not just within one process —
/// which is what same-seed determinism requires.
pub struct SeededRng {
    inner: ChaCha8Rng,
}

impl SeededRng {
    pub fn from_seed_str(seed: &str) -> Self {
        let mut hasher = DefaultHasher::new();
        seed.hash(&mut hasher);
        Self {
            inner: ChaCha8Rng::seed_from_u64(hasher.finish()),
        }
    }

    /// Uniformly choose an index in `0..len`. Panics if `len == 0`; callers
    /// must check emptiness first (the language semantics treat an empty
    /// list as "nothing to select", handled before this is ever called).
    pub fn uniform_index(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len)
    }
}
