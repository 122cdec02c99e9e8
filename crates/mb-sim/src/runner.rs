//! Batch runner: plays many independent games in parallel

use std::time::Instant;

use mb_lab::{ExperimentConfig, LabError, Outcome, SamplingEngine};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::SimConfig;
use crate::report::SimReport;
use crate::{SimError, SimResult};

/// Aggregated counts over finished games
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub games: u64,
    pub wins: u64,
    /// Games that ended because the bag ran out
    pub early_endings: u64,
    /// `red_histogram[k]` = games that finished with `k` reds
    pub red_histogram: Vec<u64>,
}

impl Tally {
    /// Count one finished game
    pub fn record(&mut self, outcome: &Outcome) {
        self.games += 1;
        if outcome.won {
            self.wins += 1;
        }
        if outcome.bag_emptied() {
            self.early_endings += 1;
        }
        let k = outcome.red_pulled as usize;
        if self.red_histogram.len() <= k {
            self.red_histogram.resize(k + 1, 0);
        }
        self.red_histogram[k] += 1;
    }

    /// Combine two partial tallies
    pub fn merge(mut self, other: Tally) -> Tally {
        self.games += other.games;
        self.wins += other.wins;
        self.early_endings += other.early_endings;
        if self.red_histogram.len() < other.red_histogram.len() {
            self.red_histogram.resize(other.red_histogram.len(), 0);
        }
        for (slot, count) in self.red_histogram.iter_mut().zip(other.red_histogram) {
            *slot += count;
        }
        self
    }

    pub fn losses(&self) -> u64 {
        self.games - self.wins
    }

    pub fn win_rate(&self) -> f64 {
        if self.games > 0 {
            self.wins as f64 / self.games as f64
        } else {
            0.0
        }
    }

    pub fn mean_red(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        let total: u64 = self
            .red_histogram
            .iter()
            .enumerate()
            .map(|(k, &n)| k as u64 * n)
            .sum();
        total as f64 / self.games as f64
    }
}

/// Plays `SimConfig::games` complete games of one experiment
pub struct BatchRunner {
    config: SimConfig,
}

impl BatchRunner {
    pub fn new(config: SimConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Run the batch and build a report
    pub fn run(&self, experiment: &ExperimentConfig) -> SimResult<SimReport> {
        experiment.validate()?;

        let seed = self.config.seed.unwrap_or_else(rand::random);
        log::info!(
            "Simulating {} games (seed {}, {} red / {} blue, {} draws)",
            self.config.games,
            seed,
            experiment.total_red,
            experiment.total_blue,
            experiment.max_draws
        );

        let start = Instant::now();
        let tally = match self.config.threads {
            Some(threads) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|e| SimError::ThreadPool(e.to_string()))?;
                pool.install(|| self.play_all(experiment, seed))?
            }
            None => self.play_all(experiment, seed)?,
        };
        let duration_ms = start.elapsed().as_millis() as u64;

        log::info!(
            "Simulation finished in {} ms: win rate {:.4}",
            duration_ms,
            tally.win_rate()
        );

        let sim = SimConfig {
            seed: Some(seed),
            ..self.config.clone()
        };
        Ok(SimReport::new(*experiment, sim, tally, duration_ms))
    }

    fn play_all(&self, experiment: &ExperimentConfig, seed: u64) -> Result<Tally, LabError> {
        (0..self.config.games)
            .into_par_iter()
            .map(|i| play_one(experiment, seed.wrapping_add(i)))
            .try_fold(Tally::default, |mut tally, outcome| {
                tally.record(&outcome?);
                Ok::<_, LabError>(tally)
            })
            .try_reduce(Tally::default, |a, b| Ok(a.merge(b)))
    }
}

/// Play one seeded game to the end
pub fn play_one(experiment: &ExperimentConfig, seed: u64) -> Result<Outcome, LabError> {
    let mut engine = SamplingEngine::seeded(seed);
    engine.choose_custom(*experiment)?;
    engine.play_to_end().ok_or(LabError::DrawDisabled)
}
