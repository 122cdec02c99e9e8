//! Draw results and read-only display snapshots

use serde::{Deserialize, Serialize};

use crate::color::MarbleColor;
use crate::config::Preset;
use crate::engine::Phase;
use crate::error::{BagError, LabError};

/// Side note attached to a draw result
///
/// `EmptyBag` and `EmptyBagRecovered` mirror the [`Bag`](crate::Bag) level
/// results. The engine builds a fresh bag for every game and `can_draw()`
/// refuses an empty one, so a game played through the engine never reports
/// either; they cover bags driven directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawDiagnostic {
    /// Ignored: no configuration chosen yet
    NotStarted,
    /// Ignored: the game is already over
    AlreadyConcluded,
    /// Ignored: draw limit reached or bag empty without replacement
    Disabled,
    /// Ignored: the bag had nothing to draw
    EmptyBag,
    /// The draw happened, but the bag had to be refilled first
    EmptyBagRecovered,
}

impl DrawDiagnostic {
    /// Map a draw refusal onto the diagnostic a no-op outcome carries
    pub fn from_error(err: &LabError) -> Self {
        match err {
            LabError::DrawWhileSelecting => DrawDiagnostic::NotStarted,
            LabError::DrawWhileConcluded => DrawDiagnostic::AlreadyConcluded,
            LabError::Bag(BagError::Empty) => DrawDiagnostic::EmptyBag,
            LabError::DrawDisabled
            | LabError::InvalidConfiguration(_)
            | LabError::UnknownPreset(_) => DrawDiagnostic::Disabled,
        }
    }

    /// True when the draw request changed nothing
    pub fn is_ignored(&self) -> bool {
        !matches!(self, DrawDiagnostic::EmptyBagRecovered)
    }
}

/// What a `draw()` call reports back
///
/// On a no-op the fields describe the unchanged state and `color` repeats the
/// last drawn color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawOutcome {
    pub color: Option<MarbleColor>,
    pub remaining_in_bag: usize,
    pub draws_made: u32,
    pub red_pulled: u32,
    pub phase: Phase,
    pub outcome_message: Option<String>,
    pub diagnostic: Option<DrawDiagnostic>,
}

impl DrawOutcome {
    /// The request was ignored and nothing changed
    pub fn is_noop(&self) -> bool {
        self.diagnostic.is_some_and(|d| d.is_ignored())
    }
}

/// Snapshot for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayState {
    pub preset: Option<Preset>,
    pub bag_count: usize,
    pub last_drawn: Option<MarbleColor>,
    pub draws_made: u32,
    pub max_draws: u32,
    pub red_pulled: u32,
    pub with_replacement: bool,
    pub phase: Phase,
    pub outcome_message: Option<String>,
    /// Pull control enabled
    pub can_draw: bool,
}

impl DisplayState {
    /// Menu screen, nothing chosen
    pub fn selecting() -> Self {
        Self {
            preset: None,
            bag_count: 0,
            last_drawn: None,
            draws_made: 0,
            max_draws: 0,
            red_pulled: 0,
            with_replacement: false,
            phase: Phase::Selecting,
            outcome_message: None,
            can_draw: false,
        }
    }
}
