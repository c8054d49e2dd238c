//! In-memory high score table. Lost on power-off.

use heapless::Vec;

/// Entries kept on the game-over screen.
pub const TOP_SCORES: usize = 5;

/// Best scores of this power cycle, highest first.
#[derive(Clone, Debug, Default)]
pub struct TopScores {
    scores: Vec<u32, TOP_SCORES>,
}

impl TopScores {
    pub const fn new() -> Self {
        Self { scores: Vec::new() }
    }

    /// Record `score`. Returns its zero-based rank, or `None` if it did not
    /// make the table. Equal scores rank below the ones already recorded.
    pub fn insert(&mut self, score: u32) -> Option<usize> {
        let rank = self
            .scores
            .iter()
            .position(|&s| score > s)
            .unwrap_or(self.scores.len());
        if rank >= TOP_SCORES {
            return None;
        }
        if self.scores.is_full() {
            self.scores.pop();
        }
        self.scores.insert(rank, score).ok()?;
        Some(rank)
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.scores
    }

    pub fn best(&self) -> Option<u32> {
        self.scores.first().copied()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}
