//! Sampling Engine: game state machine around the bag

use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::bag::Bag;
use crate::config::{ExperimentConfig, Preset};
use crate::draw::{DisplayState, DrawDiagnostic, DrawOutcome};
use crate::error::{LabError, LabResult};
use crate::source::{DrawSource, chacha_source};
use crate::trial::{Outcome, Termination, TrialState, evaluate_termination};

/// Game phase
///
/// `Selecting → InProgress` on configuration choice, `InProgress → Concluded`
/// when a termination rule fires, `Concluded → Selecting` on reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Selecting,
    InProgress,
    Concluded,
}

/// One game from configuration choice to reset
#[derive(Debug, Clone)]
struct Game {
    preset: Option<Preset>,
    config: ExperimentConfig,
    bag: Bag,
    trial: TrialState,
    outcome: Option<Outcome>,
}

impl Game {
    fn phase(&self) -> Phase {
        if self.outcome.is_some() {
            Phase::Concluded
        } else {
            Phase::InProgress
        }
    }

    fn can_draw(&self) -> bool {
        self.outcome.is_none()
            && self.trial.draws_made < self.config.max_draws
            && (self.config.with_replacement || !self.bag.is_empty())
    }

    fn outcome_message(&self) -> Option<String> {
        self.outcome.as_ref().map(Outcome::message)
    }

    fn report(&self, diagnostic: Option<DrawDiagnostic>) -> DrawOutcome {
        DrawOutcome {
            color: self.trial.last_drawn,
            remaining_in_bag: self.bag.len(),
            draws_made: self.trial.draws_made,
            red_pulled: self.trial.red_pulled,
            phase: self.phase(),
            outcome_message: self.outcome_message(),
            diagnostic,
        }
    }
}

#[derive(Debug, Clone)]
enum EngineState {
    Selecting,
    Playing(Game),
}

/// Marble sampling engine
///
/// Owns the configuration, bag, counters and phase of exactly one game at a
/// time. Every random choice goes through the injected [`DrawSource`].
pub struct SamplingEngine<S: DrawSource = ChaCha8Rng> {
    source: S,
    state: EngineState,
}

impl SamplingEngine<ChaCha8Rng> {
    /// Engine seeded from OS entropy
    pub fn new() -> Self {
        Self::with_source(chacha_source(None))
    }

    /// Seed RNG for reproducible games
    pub fn seeded(seed: u64) -> Self {
        Self::with_source(chacha_source(Some(seed)))
    }
}

impl Default for SamplingEngine<ChaCha8Rng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: DrawSource> SamplingEngine<S> {
    /// Engine drawing from a caller-supplied source
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            state: EngineState::Selecting,
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // CONFIGURATION
    // ═══════════════════════════════════════════════════════════════════════

    /// Start a fresh game with a built-in preset
    pub fn choose_configuration(&mut self, preset: Preset) {
        self.start(Some(preset), preset.config());
    }

    /// Start a fresh game with a custom configuration
    ///
    /// An invalid configuration leaves the engine untouched.
    pub fn choose_custom(&mut self, config: ExperimentConfig) -> LabResult<()> {
        config.validate()?;
        self.start(None, config);
        Ok(())
    }

    fn start(&mut self, preset: Option<Preset>, config: ExperimentConfig) {
        let label = preset.map_or("Custom game", Preset::name);
        log::info!(
            "Setting up {}: {} total marbles ({} Red, {} Blue), {} draws, {}",
            label,
            config.total_marbles(),
            config.total_red,
            config.total_blue,
            config.max_draws,
            if config.with_replacement {
                "with replacement"
            } else {
                "no replacement"
            }
        );

        let bag = Bag::new(config.composition(), &mut self.source);
        log::debug!("Bag shuffled: {} marbles", bag.len());

        self.state = EngineState::Playing(Game {
            preset,
            config,
            bag,
            trial: TrialState::new(),
            outcome: None,
        });
    }

    /// Back to the selection menu, discarding bag and counters
    pub fn reset(&mut self) {
        if matches!(self.state, EngineState::Playing(_)) {
            log::debug!("Game reset, back to selection");
        }
        self.state = EngineState::Selecting;
    }

    // ═══════════════════════════════════════════════════════════════════════
    // DRAWING
    // ═══════════════════════════════════════════════════════════════════════

    /// The single "pull enabled" predicate
    pub fn can_draw(&self) -> bool {
        match &self.state {
            EngineState::Selecting => false,
            EngineState::Playing(game) => game.can_draw(),
        }
    }

    /// Pull one marble, rejecting the request when drawing is not allowed
    pub fn try_draw(&mut self) -> LabResult<DrawOutcome> {
        let game = match &mut self.state {
            EngineState::Selecting => return Err(LabError::DrawWhileSelecting),
            EngineState::Playing(game) => game,
        };
        if game.outcome.is_some() {
            return Err(LabError::DrawWhileConcluded);
        }
        if !game.can_draw() {
            return Err(LabError::DrawDisabled);
        }

        let drawn = game
            .bag
            .draw(&mut self.source, game.config.with_replacement)?;
        let diagnostic = if drawn.recovered {
            log::warn!(
                "Bag was empty in with-replacement mode; refilled to {} marbles",
                game.bag.len()
            );
            Some(DrawDiagnostic::EmptyBagRecovered)
        } else {
            None
        };

        game.trial.record_draw(drawn.color);
        log::debug!(
            "Pulled a {} marble ({}/{} draws, {} red, {} left in bag)",
            drawn.color,
            game.trial.draws_made,
            game.config.max_draws,
            game.trial.red_pulled,
            game.bag.len()
        );

        if let Termination::Concluded(outcome) =
            evaluate_termination(&game.config, &game.trial, game.bag.len())
        {
            log::info!("Game over: {}", outcome.message().replace('\n', " "));
            game.outcome = Some(outcome);
        }

        Ok(game.report(diagnostic))
    }

    /// Pull one marble; a refused request is a no-op reporting the unchanged
    /// state plus a diagnostic
    pub fn draw(&mut self) -> DrawOutcome {
        match self.try_draw() {
            Ok(outcome) => outcome,
            Err(err) => {
                log::debug!("Draw ignored: {}", err);
                let diagnostic = Some(DrawDiagnostic::from_error(&err));
                match &self.state {
                    EngineState::Selecting => DrawOutcome {
                        color: None,
                        remaining_in_bag: 0,
                        draws_made: 0,
                        red_pulled: 0,
                        phase: Phase::Selecting,
                        outcome_message: None,
                        diagnostic,
                    },
                    EngineState::Playing(game) => game.report(diagnostic),
                }
            }
        }
    }

    /// Draw until the game concludes
    ///
    /// Returns `None` when no game is in progress.
    pub fn play_to_end(&mut self) -> Option<Outcome> {
        if self.phase() != Phase::InProgress {
            return None;
        }
        while self.can_draw() {
            if self.try_draw().is_err() {
                break;
            }
        }
        self.outcome().copied()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // STATE
    // ═══════════════════════════════════════════════════════════════════════

    pub fn phase(&self) -> Phase {
        match &self.state {
            EngineState::Selecting => Phase::Selecting,
            EngineState::Playing(game) => game.phase(),
        }
    }

    /// Preset of the current game (`None` for custom games or while selecting)
    pub fn preset(&self) -> Option<Preset> {
        match &self.state {
            EngineState::Selecting => None,
            EngineState::Playing(game) => game.preset,
        }
    }

    pub fn config(&self) -> Option<&ExperimentConfig> {
        match &self.state {
            EngineState::Selecting => None,
            EngineState::Playing(game) => Some(&game.config),
        }
    }

    pub fn bag(&self) -> Option<&Bag> {
        match &self.state {
            EngineState::Selecting => None,
            EngineState::Playing(game) => Some(&game.bag),
        }
    }

    pub fn trial(&self) -> Option<&TrialState> {
        match &self.state {
            EngineState::Selecting => None,
            EngineState::Playing(game) => Some(&game.trial),
        }
    }

    /// Verdict once concluded
    pub fn outcome(&self) -> Option<&Outcome> {
        match &self.state {
            EngineState::Selecting => None,
            EngineState::Playing(game) => game.outcome.as_ref(),
        }
    }

    /// Read-only snapshot for the presentation layer
    pub fn display_state(&self) -> DisplayState {
        match &self.state {
            EngineState::Selecting => DisplayState::selecting(),
            EngineState::Playing(game) => DisplayState {
                preset: game.preset,
                bag_count: game.bag.len(),
                last_drawn: game.trial.last_drawn,
                draws_made: game.trial.draws_made,
                max_draws: game.config.max_draws,
                red_pulled: game.trial.red_pulled,
                with_replacement: game.config.with_replacement,
                phase: game.phase(),
                outcome_message: game.outcome_message(),
                can_draw: game.can_draw(),
            },
        }
    }

    /// Access the random source (e.g. to queue scripted indices)
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}
