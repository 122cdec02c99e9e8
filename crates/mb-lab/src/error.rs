//! Error types for the sampling engine

use thiserror::Error;

/// Bag-level failure
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BagError {
    #[error("bag is empty")]
    Empty,
}

/// Engine error type
///
/// None of these are fatal. The draw refusals (`DrawWhileSelecting`,
/// `DrawWhileConcluded`, `DrawDisabled`) only surface from
/// [`SamplingEngine::try_draw`](crate::SamplingEngine::try_draw); the regular
/// `draw()` turns them into a no-op outcome carrying a diagnostic.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LabError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    #[error("Draw requested before a configuration was chosen")]
    DrawWhileSelecting,

    #[error("Draw requested after the game concluded")]
    DrawWhileConcluded,

    #[error("Drawing is disabled (draw limit reached or bag empty)")]
    DrawDisabled,

    #[error("Bag error: {0}")]
    Bag(#[from] BagError),
}

/// Result type alias
pub type LabResult<T> = Result<T, LabError>;
