//! Report generation for simulation results

use std::fs;
use std::path::Path;

use mb_lab::ExperimentConfig;
use serde::{Deserialize, Serialize};

use crate::SimResult;
use crate::analytic;
use crate::config::SimConfig;
use crate::runner::Tally;

/// Simulation report for one experiment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimReport {
    /// Experiment that was played
    pub experiment: ExperimentConfig,

    /// Run settings, with the seed actually used
    pub sim: SimConfig,

    /// Raw counts
    pub tally: Tally,

    /// Observed win rate
    pub win_rate: f64,

    /// Exact win probability
    pub exact_win_probability: f64,

    /// Observed mean red count
    pub mean_red: f64,

    /// Exact expected red count
    pub expected_red: f64,

    /// Wall-clock duration
    pub duration_ms: u64,
}

impl SimReport {
    pub fn new(experiment: ExperimentConfig, sim: SimConfig, tally: Tally, duration_ms: u64) -> Self {
        Self {
            experiment,
            sim,
            win_rate: tally.win_rate(),
            exact_win_probability: analytic::win_probability(&experiment),
            mean_red: tally.mean_red(),
            expected_red: analytic::expected_red(&experiment),
            tally,
            duration_ms,
        }
    }

    /// |observed - exact| win rate
    pub fn deviation(&self) -> f64 {
        (self.win_rate - self.exact_win_probability).abs()
    }

    /// Generate text report
    pub fn to_text(&self) -> String {
        let e = &self.experiment;
        let mut output = String::new();

        let title = format!(
            "Marble Simulation: {} red / {} blue, {}, {} draws",
            e.total_red,
            e.total_blue,
            if e.with_replacement {
                "with replacement"
            } else {
                "no replacement"
            },
            e.max_draws
        );
        output.push_str(&format!("{}\n", title));
        output.push_str(&format!("{}\n\n", "=".repeat(title.len())));

        output.push_str(&format!(
            "Win condition: {}..={} red marbles\n",
            e.min_red_to_win, e.max_red_to_win
        ));
        output.push_str(&format!(
            "Games: {} (seed {})\n",
            self.tally.games,
            self.sim.seed.map_or_else(|| "random".to_string(), |s| s.to_string())
        ));
        output.push_str(&format!(
            "Wins: {}  Losses: {}  Bag emptied early: {}\n",
            self.tally.wins,
            self.tally.losses(),
            self.tally.early_endings
        ));
        output.push_str(&format!(
            "Win rate: {:.4} (exact {:.4}, deviation {:.4})\n",
            self.win_rate,
            self.exact_win_probability,
            self.deviation()
        ));
        output.push_str(&format!(
            "Mean reds: {:.3} (exact {:.3})\n",
            self.mean_red, self.expected_red
        ));
        output.push_str(&format!("Duration: {} ms\n\n", self.duration_ms));

        output.push_str("Red count histogram:\n");
        output.push_str(&"-".repeat(40));
        output.push('\n');
        for (k, &count) in self.tally.red_histogram.iter().enumerate() {
            let share = if self.tally.games > 0 {
                count as f64 / self.tally.games as f64
            } else {
                0.0
            };
            let marker = if e.is_winning_count(k as u32) { "*" } else { " " };
            output.push_str(&format!(
                "{}{:>3} reds: {:>9} ({:>6.2}%)\n",
                marker,
                k,
                count,
                share * 100.0
            ));
        }

        output
    }

    /// Generate JSON report
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".into())
    }

    /// Write the JSON report to `path`
    pub fn save_json(&self, path: impl AsRef<Path>) -> SimResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> SimReport {
        let tally = Tally {
            games: 4,
            wins: 1,
            early_endings: 0,
            red_histogram: vec![2, 1, 1],
        };
        SimReport::new(
            ExperimentConfig::no_replacement(),
            SimConfig::default().with_games(4).with_seed(1),
            tally,
            3,
        )
    }

    #[test]
    fn test_text_report_sections() {
        let text = sample_report().to_text();
        assert!(text.starts_with("Marble Simulation: 6 red / 19 blue, no replacement, 5 draws"));
        assert!(text.contains("Win condition: 2..=5 red marbles"));
        assert!(text.contains("Games: 4 (seed 1)"));
        assert!(text.contains("Wins: 1  Losses: 3"));
        assert!(text.contains("*  2 reds:"));
        assert!(text.contains("   0 reds:"));
    }

    #[test]
    fn test_json_report_fields() {
        let json: serde_json::Value = serde_json::from_str(&sample_report().to_json()).unwrap();
        assert_eq!(json["tally"]["games"], 4);
        assert_eq!(json["sim"]["seed"], 1);
        assert_eq!(json["experiment"]["max_draws"], 5);
        assert_eq!(json["win_rate"], 0.25);
    }
}
