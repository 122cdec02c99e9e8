//! Marble colors

use std::fmt;

use serde::{Deserialize, Serialize};

/// Color of a single marble token
///
/// Outcome evaluation only asks "red or not", so further colors can be added
/// without touching the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarbleColor {
    Red,
    Blue,
}

impl MarbleColor {
    /// Every color, in bag-building order
    pub const ALL: [MarbleColor; 2] = [MarbleColor::Red, MarbleColor::Blue];

    pub fn is_red(self) -> bool {
        matches!(self, MarbleColor::Red)
    }

    /// Display name ("Red", "Blue")
    pub fn name(self) -> &'static str {
        match self {
            MarbleColor::Red => "Red",
            MarbleColor::Blue => "Blue",
        }
    }
}

impl fmt::Display for MarbleColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
