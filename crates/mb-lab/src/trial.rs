//! Trial counters and outcome evaluation

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::color::MarbleColor;
use crate::config::ExperimentConfig;

/// Counters for the running game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TrialState {
    pub draws_made: u32,
    /// Never exceeds `draws_made`
    pub red_pulled: u32,
    pub last_drawn: Option<MarbleColor>,
}

impl TrialState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one pulled marble
    pub fn record_draw(&mut self, color: MarbleColor) {
        self.draws_made += 1;
        if color.is_red() {
            self.red_pulled += 1;
        }
        self.last_drawn = Some(color);
    }
}

/// How a lost game explains what was needed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WinRule {
    /// Needed exactly N reds
    Exact(u32),
    /// Needed at least N reds (upper bound unreachable within the budget)
    AtLeast(u32),
    /// Needed between N and M reds
    Between(u32, u32),
    /// None of the above shapes apply
    Unmet,
}

impl WinRule {
    /// Classify the winning range; first matching rule wins
    pub fn for_config(config: &ExperimentConfig) -> Self {
        let min = config.min_red_to_win;
        let max = config.max_red_to_win;

        if min == max {
            WinRule::Exact(min)
        } else if max >= config.max_draws && min > 0 {
            WinRule::AtLeast(min)
        } else if min > 0 && max < config.max_draws {
            WinRule::Between(min, max)
        } else {
            WinRule::Unmet
        }
    }

    /// Parenthesized hint appended to a losing message
    pub fn phrase(&self) -> String {
        match self {
            WinRule::Exact(n) => format!("Needed exactly {n}"),
            WinRule::AtLeast(n) => format!("Needed at least {n}"),
            WinRule::Between(lo, hi) => format!("Needed between {lo} and {hi}"),
            WinRule::Unmet => "Did not meet win condition".to_string(),
        }
    }
}

/// Why the game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutcomeReason {
    /// The draw budget was used up
    DrawLimitReached(WinRule),
    /// A without-replacement bag ran out before the budget
    BagEmptied,
}

/// Final verdict of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub won: bool,
    pub red_pulled: u32,
    pub draws_made: u32,
    pub reason: OutcomeReason,
}

impl Outcome {
    pub fn bag_emptied(&self) -> bool {
        matches!(self.reason, OutcomeReason::BagEmptied)
    }

    /// Message shown on the game-over screen
    pub fn message(&self) -> String {
        let red = self.red_pulled;
        match self.reason {
            OutcomeReason::DrawLimitReached(_) if self.won => {
                format!("YOU WIN! You pulled {red} red marbles.")
            }
            OutcomeReason::DrawLimitReached(rule) => {
                format!("YOU LOSE! You pulled {red} red marbles. ({})", rule.phrase())
            }
            OutcomeReason::BagEmptied => {
                let verdict = if self.won {
                    "(You still won based on your draws!)"
                } else {
                    "(You lost based on your draws.)"
                };
                format!("BAG EMPTY! You ran out of marbles. Pulled {red} red marbles.\n{verdict}")
            }
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Result of the after-draw check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    Continue,
    Concluded(Outcome),
}

impl Termination {
    pub fn is_concluded(&self) -> bool {
        matches!(self, Termination::Concluded(_))
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        match self {
            Termination::Continue => None,
            Termination::Concluded(outcome) => Some(outcome),
        }
    }
}

/// Decide whether the game is over after a draw
///
/// The draw-limit check runs first, so a bag that empties on the last allowed
/// draw still reports `DrawLimitReached`.
pub fn evaluate_termination(
    config: &ExperimentConfig,
    trial: &TrialState,
    bag_remaining: usize,
) -> Termination {
    let won = config.is_winning_count(trial.red_pulled);

    let reason = if trial.draws_made >= config.max_draws {
        OutcomeReason::DrawLimitReached(config.win_rule())
    } else if !config.with_replacement && bag_remaining == 0 {
        OutcomeReason::BagEmptied
    } else {
        return Termination::Continue;
    };

    Termination::Concluded(Outcome {
        won,
        red_pulled: trial.red_pulled,
        draws_made: trial.draws_made,
        reason,
    })
}
