//! Player levels and the word-length range each level asks for.

use tracing::instrument;

/// Player level, never below 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub struct Level(u32);

impl Level {
    /// The starting level.
    pub const FIRST: Level = Level(1);

    /// Creates a level, raising 0 to 1.
    pub fn new(value: u32) -> Self {
        Self(value.max(1))
    }

    /// Creates a level from an untrusted stored value, clamping anything
    /// below 1 (including negatives) to 1.
    #[instrument]
    pub fn from_raw(value: i64) -> Self {
        if value < 1 {
            return Self::FIRST;
        }
        Self(u32::try_from(value).unwrap_or(u32::MAX))
    }

    /// Numeric value.
    pub fn get(self) -> u32 {
        self.0
    }

    /// The level after a win.
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Word lengths requested at this level.
    pub fn length_range(self) -> LengthRange {
        LengthRange::for_level(self)
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::FIRST
    }
}

/// Inclusive range of word lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[display("{}-{}", min, max)]
pub struct LengthRange {
    min: usize,
    max: usize,
}

impl LengthRange {
    /// Creates a range, swapping the bounds if given backwards.
    pub fn new(min: usize, max: usize) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Step table: level 1 asks for 4-6 letters, each level after shifts the
    /// window up by one, topping out at 7-9 from level 4.
    #[instrument]
    pub fn for_level(level: Level) -> Self {
        match level.get() {
            0 | 1 => Self::new(4, 6),
            2 => Self::new(5, 7),
            3 => Self::new(6, 8),
            _ => Self::new(7, 9),
        }
    }

    /// Shortest accepted length.
    pub fn min(&self) -> usize {
        self.min
    }

    /// Longest accepted length.
    pub fn max(&self) -> usize {
        self.max
    }

    /// Returns true if `len` lies in the range.
    pub fn contains(&self, len: usize) -> bool {
        (self.min..=self.max).contains(&len)
    }
}
