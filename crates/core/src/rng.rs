//! RNG module - piece kind generation with a one-piece lookahead
//!
//! The [`Randomizer`] holds the "next" kind and refills it from a
//! [`PieceSource`] each time it is consumed. Sources are deterministic given
//! their seed, which keeps whole games reproducible:
//!
//! - [`UniformSource`]: each kind drawn independently with equal probability
//! - [`BagSource`]: "7-bag" shuffles, every kind once per seven draws
//! - [`SequenceSource`]: cycles a fixed list (tests, replays)
//!
//! Also provides a simple LCG for deterministic draws.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::types::PieceKind;

/// Simple 64-bit LCG (Linear Congruential Generator) RNG
/// Uses Knuth's MMIX constants
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod 2^64, keep the high bits
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.state >> 32) as u32
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    /// Current internal state
    pub fn state(&self) -> u64 {
        self.state
    }
}

/// Anything that can produce an endless stream of piece kinds
pub trait PieceSource: fmt::Debug {
    fn next_kind(&mut self) -> PieceKind;
}

/// Uniform random kinds
#[derive(Debug, Clone)]
pub struct UniformSource {
    rng: SimpleRng,
}

impl UniformSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }
}

impl PieceSource for UniformSource {
    fn next_kind(&mut self) -> PieceKind {
        PieceKind::from_index(self.rng.next_range(PieceKind::ALL.len() as u32) as usize)
    }
}

/// 7-bag piece generator
#[derive(Debug, Clone)]
pub struct BagSource {
    bag: [PieceKind; 7],
    /// Index into current bag
    bag_index: usize,
    rng: SimpleRng,
}

impl BagSource {
    pub fn new(seed: u64) -> Self {
        let mut source = Self {
            bag: PieceKind::ALL,
            bag_index: 0,
            rng: SimpleRng::new(seed),
        };
        source.refill_bag();
        source
    }

    /// Generate a new shuffled bag
    fn refill_bag(&mut self) {
        self.bag = PieceKind::ALL;
        self.rng.shuffle(&mut self.bag);
        self.bag_index = 0;
    }
}

impl PieceSource for BagSource {
    fn next_kind(&mut self) -> PieceKind {
        if self.bag_index >= self.bag.len() {
            self.refill_bag();
        }
        let piece = self.bag[self.bag_index];
        self.bag_index += 1;
        piece
    }
}

/// Cycles through a fixed list of kinds forever
#[derive(Debug, Clone)]
pub struct SequenceSource {
    kinds: Vec<PieceKind>,
    index: usize,
}

impl SequenceSource {
    /// An empty list behaves like `[PieceKind::I]`.
    pub fn new(kinds: impl IntoIterator<Item = PieceKind>) -> Self {
        let mut kinds: Vec<PieceKind> = kinds.into_iter().collect();
        if kinds.is_empty() {
            kinds.push(PieceKind::I);
        }
        Self { kinds, index: 0 }
    }
}

impl PieceSource for SequenceSource {
    fn next_kind(&mut self) -> PieceKind {
        let kind = self.kinds[self.index % self.kinds.len()];
        self.index = (self.index + 1) % self.kinds.len();
        kind
    }
}

/// Which built-in source a seeded randomizer uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RandomizerMode {
    #[default]
    Uniform,
    SevenBag,
}

/// Piece randomizer with a one-piece lookahead
#[derive(Debug)]
pub struct Randomizer {
    source: Box<dyn PieceSource + Send>,
    next: PieceKind,
}

impl Randomizer {
    /// Wrap a source and draw the first lookahead from it
    pub fn new(mut source: Box<dyn PieceSource + Send>) -> Self {
        let next = source.next_kind();
        Self { source, next }
    }

    /// Build one of the built-in seeded sources
    ///
    /// With no seed, one is taken from OS entropy; the engine itself never
    /// assumes a particular source.
    pub fn seeded(mode: RandomizerMode, seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(rand::random);
        let source: Box<dyn PieceSource + Send> = match mode {
            RandomizerMode::Uniform => Box::new(UniformSource::new(seed)),
            RandomizerMode::SevenBag => Box::new(BagSource::new(seed)),
        };
        Self::new(source)
    }

    /// Peek at the next kind without consuming it
    pub fn peek(&self) -> PieceKind {
        self.next
    }

    /// Yield the held lookahead and draw a new one
    pub fn draw(&mut self) -> PieceKind {
        std::mem::replace(&mut self.next, self.source.next_kind())
    }

    /// Discard the lookahead and draw a fresh one
    pub fn refresh(&mut self) {
        self.next = self.source.next_kind();
    }
}
