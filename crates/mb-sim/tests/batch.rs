//! Batch Simulation Tests
//!
//! Checks the parallel runner against exact probabilities and verifies that
//! runs are reproducible and reports round out correctly:
//! - Monte Carlo convergence for both presets
//! - Thread-count independence
//! - Early bag endings
//! - JSON report output

use approx::assert_abs_diff_eq;
use mb_lab::{ExperimentConfig, Preset};
use mb_sim::{BatchRunner, SimConfig, SimReport, quick_sim, win_probability};

const GAMES: u64 = 20_000;

// ═══════════════════════════════════════════════════════════════════════════════
// CONVERGENCE
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_preset_win_rates_match_exact_odds() {
    for (preset, seed) in [(Preset::NoReplacement, 1), (Preset::WithReplacement, 2)] {
        let config = preset.config();
        let report = quick_sim(&config, GAMES, seed).unwrap();

        assert_eq!(report.tally.games, GAMES);
        assert_abs_diff_eq!(
            report.win_rate,
            win_probability(&config),
            epsilon = 0.02
        );
        assert_abs_diff_eq!(report.mean_red, report.expected_red, epsilon = 0.05);
        assert_eq!(report.tally.early_endings, 0);
    }
}

#[test]
fn test_red_count_never_exceeds_draw_budget() {
    let config = Preset::NoReplacement.config();
    let report = quick_sim(&config, 2_000, 9).unwrap();
    assert!(report.tally.red_histogram.len() <= config.max_draws as usize + 1);
}

// ═══════════════════════════════════════════════════════════════════════════════
// REPRODUCIBILITY
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_results_independent_of_thread_count() {
    let config = Preset::WithReplacement.config();
    let run = |threads| {
        let sim = SimConfig::default()
            .with_games(3_000)
            .with_seed(42)
            .with_threads(threads);
        BatchRunner::new(sim).run(&config).unwrap().tally
    };

    assert_eq!(run(1), run(4));
}

#[test]
fn test_unseeded_run_records_its_seed() {
    let runner = BatchRunner::new(SimConfig::default().with_games(100));
    let report = runner.run(&Preset::NoReplacement.config()).unwrap();
    let seed = report.sim.seed.expect("seed recorded");

    let replay = quick_sim(&Preset::NoReplacement.config(), 100, seed).unwrap();
    assert_eq!(report.tally, replay.tally);
}

// ═══════════════════════════════════════════════════════════════════════════════
// EARLY ENDINGS
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_small_bag_always_empties_early() {
    let config = ExperimentConfig {
        total_red: 1,
        total_blue: 3,
        with_replacement: false,
        max_draws: 5,
        min_red_to_win: 1,
        max_red_to_win: 4,
    };
    let report = quick_sim(&config, 500, 3).unwrap();

    assert_eq!(report.tally.early_endings, 500);
    assert_eq!(report.tally.wins, 500);
    assert_eq!(report.tally.red_histogram, vec![0, 500]);
    assert_abs_diff_eq!(report.exact_win_probability, 1.0, epsilon = 1e-12);
}

// ═══════════════════════════════════════════════════════════════════════════════
// REPORT OUTPUT
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_save_json_report() {
    let report = quick_sim(&Preset::WithReplacement.config(), 200, 5).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.json");

    report.save_json(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let loaded: SimReport = serde_json::from_str(&text).unwrap();
    assert_eq!(loaded.tally, report.tally);
    assert_eq!(loaded.experiment, report.experiment);
}
