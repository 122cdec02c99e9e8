//! Random index sources for shuffling and drawing

use std::collections::VecDeque;

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Uniform integer source over `[0, bound)`
///
/// Every random choice the bag makes (shuffle swaps and draw positions) goes
/// through this trait, so tests can swap in a seeded RNG or a scripted queue.
pub trait DrawSource {
    /// Index in `0..bound`. Callers never pass `bound == 0`.
    fn index_below(&mut self, bound: usize) -> usize;
}

impl<R: RngCore> DrawSource for R {
    fn index_below(&mut self, bound: usize) -> usize {
        self.random_range(0..bound)
    }
}

/// Default engine RNG: seeded when `seed` is given, OS entropy otherwise
pub fn chacha_source(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_os_rng(),
    }
}

/// Replays a fixed queue of indices
///
/// Once the queue runs dry it answers `bound - 1`. That makes a Fisher–Yates
/// pass an identity permutation (every `j == i`), so a bag built with an
/// exhausted script keeps its build order: all reds first, then all blues.
/// A without-replacement draw of `bound - 1` pops the last token and leaves the
/// rest of the order alone.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    queue: VecDeque<usize>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_indices(indices: impl IntoIterator<Item = usize>) -> Self {
        Self {
            queue: indices.into_iter().collect(),
        }
    }

    /// Queue one more index
    pub fn push(&mut self, index: usize) {
        self.queue.push_back(index);
    }

    pub fn extend(&mut self, indices: impl IntoIterator<Item = usize>) {
        self.queue.extend(indices);
    }

    /// Indices not consumed yet
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl DrawSource for ScriptedSource {
    fn index_below(&mut self, bound: usize) -> usize {
        let last = bound.saturating_sub(1);
        match self.queue.pop_front() {
            Some(index) => index.min(last),
            None => last,
        }
    }
}
