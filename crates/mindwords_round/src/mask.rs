//! Player-visible rendering of the answer.

use serde::{Deserialize, Serialize};

/// The answer with unrevealed positions hidden.
///
/// Always has exactly one cell per letter of the answer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Mask {
    cells: Vec<Option<char>>,
}

impl Mask {
    /// Glyph shown for a hidden position.
    pub const PLACEHOLDER: char = '•';

    pub(crate) fn new(cells: Vec<Option<char>>) -> Self {
        Self { cells }
    }

    /// Returns one cell per position, `None` where the letter is hidden.
    pub fn cells(&self) -> &[Option<char>] {
        &self.cells
    }

    /// Number of positions.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if the mask has no positions.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of hidden positions.
    pub fn hidden(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    /// Returns true once every letter is shown.
    pub fn is_fully_revealed(&self) -> bool {
        self.hidden() == 0
    }
}

impl std::fmt::Display for Mask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for cell in &self.cells {
            write!(f, "{}", cell.unwrap_or(Self::PLACEHOLDER))?;
        }
        Ok(())
    }
}
