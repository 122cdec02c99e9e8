//! Experiment configuration and built-in presets

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::bag::Composition;
use crate::error::{LabError, LabResult};
use crate::trial::WinRule;

/// One sampling experiment
///
/// Chosen once per game and never mutated while the game runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperimentConfig {
    /// Red marbles in a full bag
    pub total_red: u32,
    /// Blue marbles in a full bag
    pub total_blue: u32,
    /// Drawn marbles go back into the bag
    pub with_replacement: bool,
    /// Draw budget for one game
    pub max_draws: u32,
    /// Lowest winning red count (inclusive)
    pub min_red_to_win: u32,
    /// Highest winning red count (inclusive)
    pub max_red_to_win: u32,
}

impl ExperimentConfig {
    /// Game 1: 6 red + 19 blue, no replacement, 5 draws, win on 2..=5 reds
    pub const fn no_replacement() -> Self {
        Self {
            total_red: 6,
            total_blue: 19,
            with_replacement: false,
            max_draws: 5,
            min_red_to_win: 2,
            max_red_to_win: 5,
        }
    }

    /// Game 2: 12 red + 18 blue, with replacement, 10 draws, win on 3..=8 reds
    pub const fn with_replacement() -> Self {
        Self {
            total_red: 12,
            total_blue: 18,
            with_replacement: true,
            max_draws: 10,
            min_red_to_win: 3,
            max_red_to_win: 8,
        }
    }

    /// Marbles in a full bag (saturates at `u32::MAX`; `validate` rejects that)
    pub fn total_marbles(&self) -> u32 {
        self.total_red.saturating_add(self.total_blue)
    }

    pub fn composition(&self) -> Composition {
        Composition::new(self.total_red, self.total_blue)
    }

    /// Does `red_pulled` fall inside the winning range?
    pub fn is_winning_count(&self, red_pulled: u32) -> bool {
        (self.min_red_to_win..=self.max_red_to_win).contains(&red_pulled)
    }

    /// How a losing verdict explains the win condition
    pub fn win_rule(&self) -> WinRule {
        WinRule::for_config(self)
    }

    /// Check configuration invariants
    pub fn validate(&self) -> LabResult<()> {
        let Some(total) = self.total_red.checked_add(self.total_blue) else {
            return Err(LabError::InvalidConfiguration(format!(
                "{} red + {} blue marbles overflows the bag size",
                self.total_red, self.total_blue
            )));
        };
        if total == 0 {
            return Err(LabError::InvalidConfiguration(
                "bag must contain at least one marble".into(),
            ));
        }
        if self.max_draws == 0 {
            return Err(LabError::InvalidConfiguration(
                "max_draws must be positive".into(),
            ));
        }
        if self.min_red_to_win > self.max_red_to_win {
            return Err(LabError::InvalidConfiguration(format!(
                "min_red_to_win ({}) exceeds max_red_to_win ({})",
                self.min_red_to_win, self.max_red_to_win
            )));
        }
        Ok(())
    }
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self::no_replacement()
    }
}

/// Built-in experiment presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    /// Preset A: draws are removed from the bag
    NoReplacement,
    /// Preset B: draws go back into the bag
    WithReplacement,
}

impl Preset {
    pub const ALL: [Preset; 2] = [Preset::NoReplacement, Preset::WithReplacement];

    pub fn config(self) -> ExperimentConfig {
        match self {
            Preset::NoReplacement => ExperimentConfig::no_replacement(),
            Preset::WithReplacement => ExperimentConfig::with_replacement(),
        }
    }

    /// Short name used in logs and menus
    pub fn name(self) -> &'static str {
        match self {
            Preset::NoReplacement => "Game 1",
            Preset::WithReplacement => "Game 2",
        }
    }

    /// Single-letter id ("a" / "b")
    pub fn id(self) -> &'static str {
        match self {
            Preset::NoReplacement => "a",
            Preset::WithReplacement => "b",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = LabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" | "1" | "game1" | "no-replacement" | "no_replacement" => {
                Ok(Preset::NoReplacement)
            }
            "b" | "2" | "game2" | "with-replacement" | "with_replacement" => {
                Ok(Preset::WithReplacement)
            }
            other => Err(LabError::UnknownPreset(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_a_values() {
        let config = Preset::NoReplacement.config();
        assert_eq!(config.total_red, 6);
        assert_eq!(config.total_blue, 19);
        assert_eq!(config.total_marbles(), 25);
        assert!(!config.with_replacement);
        assert_eq!(config.max_draws, 5);
        assert_eq!(config.min_red_to_win, 2);
        assert_eq!(config.max_red_to_win, 5);
    }

    #[test]
    fn test_preset_b_values() {
        let config = Preset::WithReplacement.config();
        assert_eq!(config.total_red, 12);
        assert_eq!(config.total_blue, 18);
        assert_eq!(config.total_marbles(), 30);
        assert!(config.with_replacement);
        assert_eq!(config.max_draws, 10);
        assert_eq!(config.min_red_to_win, 3);
        assert_eq!(config.max_red_to_win, 8);
    }

    #[test]
    fn test_presets_are_valid() {
        for preset in Preset::ALL {
            assert!(preset.config().validate().is_ok(), "{preset} invalid");
        }
    }

    #[test]
    fn test_validate_rejects_empty_bag() {
        let config = ExperimentConfig {
            total_red: 0,
            total_blue: 0,
            ..ExperimentConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(LabError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_validate_rejects_overflowing_bag() {
        let config = ExperimentConfig {
            total_red: u32::MAX,
            total_blue: 2,
            ..ExperimentConfig::default()
        };
        assert_eq!(config.total_marbles(), u32::MAX);
        assert!(matches!(
            config.validate(),
            Err(LabError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_validate_rejects_inverted_range() {
        let config = ExperimentConfig {
            min_red_to_win: 4,
            max_red_to_win: 3,
            ..ExperimentConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(LabError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_validate_rejects_zero_draws() {
        let config = ExperimentConfig {
            max_draws: 0,
            ..ExperimentConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_winning_range_is_inclusive() {
        let config = ExperimentConfig::with_replacement();
        assert!(!config.is_winning_count(2));
        assert!(config.is_winning_count(3));
        assert!(config.is_winning_count(8));
        assert!(!config.is_winning_count(9));
    }

    #[test]
    fn test_preset_from_str() {
        assert_eq!("a".parse::<Preset>(), Ok(Preset::NoReplacement));
        assert_eq!("B".parse::<Preset>(), Ok(Preset::WithReplacement));
        assert_eq!("2".parse::<Preset>(), Ok(Preset::WithReplacement));
        assert_eq!(
            "with-replacement".parse::<Preset>(),
            Ok(Preset::WithReplacement)
        );
        assert_eq!(
            "c".parse::<Preset>(),
            Err(LabError::UnknownPreset("c".into()))
        );
    }
}
