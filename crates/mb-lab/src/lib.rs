//! # mb-lab: Marble Sampling Engine
//!
//! A small, fully deterministic (when seeded) engine for the marble-drawing
//! probability game: pick an experiment preset, pull marbles from a shuffled
//! bag with or without replacement, and get a win/lose verdict based on how
//! many red marbles came out within the draw budget.
//!
//! ## Architecture
//!
//! ```text
//! SamplingEngine
//!     │
//!     ├── ExperimentConfig (red/blue counts, draw budget, win range)
//!     ├── Bag (shuffled tokens, draw with/without replacement)
//!     ├── TrialState (draws made, reds pulled, last color)
//!     └── DrawSource (ChaCha8Rng or ScriptedSource)
//!           │
//!           v
//!     DrawOutcome / DisplayState → presentation layer
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use mb_lab::{Phase, Preset, SamplingEngine};
//!
//! let mut engine = SamplingEngine::seeded(42);
//! engine.choose_configuration(Preset::NoReplacement);
//! while engine.can_draw() {
//!     engine.draw();
//! }
//! assert_eq!(engine.phase(), Phase::Concluded);
//! ```

pub mod bag;
pub mod color;
pub mod config;
pub mod draw;
pub mod engine;
pub mod error;
pub mod labels;
pub mod source;
pub mod trial;

pub use bag::*;
pub use color::*;
pub use config::*;
pub use draw::*;
pub use engine::*;
pub use error::*;
pub use source::*;
pub use trial::*;
