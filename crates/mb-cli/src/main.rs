//! Marble Lab
//!
//! Usage:
//!   marble-lab play [--preset a|b] [--seed N]   - Interactive game
//!   marble-lab simulate --preset a|b [...]      - Batch simulation report
//!   marble-lab presets                          - List built-in experiments

mod play;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mb_lab::{Preset, SamplingEngine};
use mb_sim::{BatchRunner, SimConfig, win_probability};

#[derive(Parser)]
#[command(name = "marble-lab", version, about = "Marble sampling experiments")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game interactively
    Play {
        /// Start directly with a preset (a = Game 1, b = Game 2)
        #[arg(short, long)]
        preset: Option<Preset>,
        /// Seed for a reproducible game
        #[arg(short, long)]
        seed: Option<u64>,
    },
    /// Play many games and compare with exact odds
    Simulate {
        /// Experiment preset (a = Game 1, b = Game 2)
        #[arg(short, long, default_value = "a")]
        preset: Preset,
        /// Number of games
        #[arg(short, long, default_value_t = 100_000)]
        games: u64,
        /// Base seed
        #[arg(short, long)]
        seed: Option<u64>,
        /// Worker threads (0 = all cores)
        #[arg(short, long, default_value_t = 0)]
        threads: usize,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
        /// Also write the JSON report to this file
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// List built-in experiments
    Presets,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play { preset, seed } => run_play(preset, seed),
        Commands::Simulate {
            preset,
            games,
            seed,
            threads,
            json,
            out,
        } => run_simulate(preset, games, seed, threads, json, out),
        Commands::Presets => {
            list_presets();
            Ok(())
        }
    }
}

fn run_play(preset: Option<Preset>, seed: Option<u64>) -> Result<()> {
    let mut engine = match seed {
        Some(seed) => SamplingEngine::seeded(seed),
        None => SamplingEngine::new(),
    };
    if let Some(preset) = preset {
        engine.choose_configuration(preset);
    }

    play::run(&mut engine, io::stdin().lock(), io::stdout().lock())
}

fn run_simulate(
    preset: Preset,
    games: u64,
    seed: Option<u64>,
    threads: usize,
    json: bool,
    out: Option<PathBuf>,
) -> Result<()> {
    let mut config = SimConfig::default().with_games(games).with_threads(threads);
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }

    let report = BatchRunner::new(config)
        .run(&preset.config())
        .with_context(|| format!("simulation of {} failed", preset))?;

    if json {
        println!("{}", report.to_json());
    } else {
        print!("{}", report.to_text());
    }

    if let Some(path) = out {
        report
            .save_json(&path)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        log::info!("Report saved to {}", path.display());
    }

    Ok(())
}

fn list_presets() {
    for preset in Preset::ALL {
        let config = preset.config();
        println!("[{}] {}", preset.id(), preset.menu_label());
        println!(
            "    {} red / {} blue, win with {}..={} reds, exact win chance {:.2}%",
            config.total_red,
            config.total_blue,
            config.min_red_to_win,
            config.max_red_to_win,
            win_probability(&config) * 100.0
        );
    }
}
