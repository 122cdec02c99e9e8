//! # mb-sim
//!
//! Batch simulation for marble experiments.
//!
//! ## Features
//!
//! - **Parallel Batches**: Plays many complete games across a rayon pool
//! - **Reproducible Runs**: Game `i` is seeded with `seed + i`, independent of
//!   thread count
//! - **Exact Odds**: Hypergeometric / binomial win probability for comparison
//! - **Reports**: Text and JSON output
//!
//! ## Example
//!
//! ```rust,ignore
//! use mb_lab::Preset;
//! use mb_sim::{BatchRunner, SimConfig};
//!
//! let runner = BatchRunner::new(SimConfig::quick().with_seed(7));
//! let report = runner.run(&Preset::NoReplacement.config())?;
//! println!("{}", report.to_text());
//! ```

pub mod analytic;
pub mod config;
pub mod report;
pub mod runner;

pub use analytic::{red_count_distribution, win_probability};
pub use config::SimConfig;
pub use report::SimReport;
pub use runner::{BatchRunner, Tally};

use thiserror::Error;

/// Errors that can occur during batch simulation
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Experiment error: {0}")]
    Lab(#[from] mb_lab::LabError),

    #[error("Thread pool error: {0}")]
    ThreadPool(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type SimResult<T> = std::result::Result<T, SimError>;

/// Simulate one experiment with default settings
pub fn quick_sim(
    experiment: &mb_lab::ExperimentConfig,
    games: u64,
    seed: u64,
) -> SimResult<SimReport> {
    let config = SimConfig::default().with_games(games).with_seed(seed);
    BatchRunner::new(config).run(experiment)
}
