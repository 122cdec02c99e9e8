//! Bag model: shuffled marble tokens with destructive or non-destructive draws

use serde::{Deserialize, Serialize};

use crate::color::MarbleColor;
use crate::error::BagError;
use crate::source::DrawSource;

/// Color counts of a full bag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Composition {
    pub red: u32,
    pub blue: u32,
}

impl Composition {
    pub const fn new(red: u32, blue: u32) -> Self {
        Self { red, blue }
    }

    pub fn total(&self) -> usize {
        self.red as usize + self.blue as usize
    }

    pub fn count(&self, color: MarbleColor) -> usize {
        match color {
            MarbleColor::Red => self.red as usize,
            MarbleColor::Blue => self.blue as usize,
        }
    }

    /// Take one token of `color` out of the counts
    fn remove(&mut self, color: MarbleColor) {
        match color {
            MarbleColor::Red => self.red -= 1,
            MarbleColor::Blue => self.blue -= 1,
        }
    }

    /// Unshuffled tokens: all reds, then all blues
    pub fn tokens(&self) -> Vec<MarbleColor> {
        let mut tokens = Vec::with_capacity(self.total());
        for color in MarbleColor::ALL {
            tokens.extend(std::iter::repeat_n(color, self.count(color)));
        }
        tokens
    }
}

/// Result of one pull
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BagDraw {
    pub color: MarbleColor,
    /// The bag was found empty in with-replacement mode and refilled first
    pub recovered: bool,
}

/// Bag of marbles for the current game
#[derive(Debug, Clone)]
pub struct Bag {
    marbles: Vec<MarbleColor>,
    /// Counts of `marbles`, kept in step with every removal
    remaining: Composition,
    original: Composition,
}

impl Bag {
    /// Fill from `original` and shuffle
    pub fn new<S: DrawSource + ?Sized>(original: Composition, source: &mut S) -> Self {
        let mut bag = Self {
            marbles: original.tokens(),
            remaining: original,
            original,
        };
        bag.shuffle(source);
        bag
    }

    /// Fisher–Yates: for i from the last index down to 1, swap i with a
    /// uniform j in [0, i]
    pub fn shuffle<S: DrawSource + ?Sized>(&mut self, source: &mut S) {
        for i in (1..self.marbles.len()).rev() {
            let j = source.index_below(i + 1);
            self.marbles.swap(i, j);
        }
    }

    /// Restore the original composition and reshuffle
    pub fn refill<S: DrawSource + ?Sized>(&mut self, source: &mut S) {
        self.marbles = self.original.tokens();
        self.remaining = self.original;
        self.shuffle(source);
        log::debug!("Bag refilled: {} marbles", self.marbles.len());
    }

    /// Pull one marble at a uniformly random position
    ///
    /// Without replacement the token is removed (`swap_remove`; the order of
    /// the remaining tokens is not preserved). With replacement the bag is left
    /// untouched, and an empty bag is refilled from the original composition
    /// before the pull. That refill is the intended recovery for a bag that was
    /// drained by an earlier without-replacement session.
    pub fn draw<S: DrawSource + ?Sized>(
        &mut self,
        source: &mut S,
        with_replacement: bool,
    ) -> Result<BagDraw, BagError> {
        let mut recovered = false;
        if self.marbles.is_empty() {
            if !with_replacement || self.original.total() == 0 {
                return Err(BagError::Empty);
            }
            self.refill(source);
            recovered = true;
        }

        let index = source.index_below(self.marbles.len());
        let color = if with_replacement {
            self.marbles[index]
        } else {
            let color = self.marbles.swap_remove(index);
            self.remaining.remove(color);
            color
        };

        Ok(BagDraw { color, recovered })
    }

    pub fn len(&self) -> usize {
        self.marbles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marbles.is_empty()
    }

    /// Tokens of `color` still in the bag
    pub fn count(&self, color: MarbleColor) -> usize {
        self.remaining.count(color)
    }

    /// Current color counts
    pub fn composition(&self) -> Composition {
        self.remaining
    }

    /// Composition the bag was built from
    pub fn original(&self) -> Composition {
        self.original
    }

    pub fn marbles(&self) -> &[MarbleColor] {
        &self.marbles
    }
}
