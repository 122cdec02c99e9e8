//! Batch simulation configuration

use serde::{Deserialize, Serialize};

/// Configuration for simulation runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Number of complete games to play
    pub games: u64,

    /// Base seed (None = random, recorded in the report)
    pub seed: Option<u64>,

    /// Worker threads (None = rayon global pool)
    pub threads: Option<usize>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            games: 100_000,
            seed: None,
            threads: None,
        }
    }
}

impl SimConfig {
    /// Small run for CI and smoke tests
    pub fn quick() -> Self {
        Self {
            games: 10_000,
            ..Default::default()
        }
    }

    /// Large run for tight estimates
    pub fn thorough() -> Self {
        Self {
            games: 1_000_000,
            threads: Some(num_cpus::get()),
            ..Default::default()
        }
    }

    /// Builder: set game count
    pub fn with_games(mut self, games: u64) -> Self {
        self.games = games;
        self
    }

    /// Builder: set seed for reproducibility
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builder: set worker thread count (0 keeps the global pool)
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = (threads > 0).then_some(threads);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders() {
        let config = SimConfig::quick().with_seed(9).with_threads(2);
        assert_eq!(config.games, 10_000);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.threads, Some(2));
    }

    #[test]
    fn test_zero_threads_means_global_pool() {
        let config = SimConfig::default().with_threads(0);
        assert_eq!(config.threads, None);
    }

    #[test]
    fn test_thorough_uses_all_cores() {
        let config = SimConfig::thorough();
        assert_eq!(config.games, 1_000_000);
        assert!(config.threads.is_some_and(|t| t >= 1));
    }
}
