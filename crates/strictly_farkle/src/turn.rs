//! Turn tracking: the score riding on the turn in progress.

use crate::dice::Roll;
use crate::scoring::{self, ScoreOutcome};
use tracing::{debug, instrument};

/// Outcome of applying one roll to the turn in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnOutcome {
    /// How the roll itself scored.
    pub roll: ScoreOutcome,
    /// Pending turn score after the roll (zero after a bust).
    pub pending: u32,
}

impl TurnOutcome {
    /// Points scored by the roll.
    pub fn points(&self) -> u32 {
        self.roll.points
    }

    /// True when the roll scored nothing and forfeited the turn.
    pub fn busted(&self) -> bool {
        self.roll.busted
    }
}

/// Accumulates the pending score of the current turn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnTracker {
    pending: u32,
}

impl TurnTracker {
    /// Creates a tracker with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Score accumulated so far this turn.
    pub fn pending(&self) -> u32 {
        self.pending
    }

    /// Scores a roll and folds it into the pending total.
    ///
    /// A bust discards everything pending.
    #[instrument(skip(self), fields(pending = self.pending, roll = %roll))]
    pub fn apply_roll(&mut self, roll: &Roll) -> TurnOutcome {
        let outcome = scoring::score(roll);
        if outcome.busted {
            debug!(forfeited = self.pending, "Bust, pending score lost");
            self.pending = 0;
        } else {
            self.pending = self.pending.saturating_add(outcome.points);
            debug!(points = outcome.points, pending = self.pending, "Roll scored");
        }
        TurnOutcome {
            roll: outcome,
            pending: self.pending,
        }
    }

    /// Takes the pending score for banking and clears it.
    #[instrument(skip(self), fields(pending = self.pending))]
    pub fn finalize_turn(&mut self) -> u32 {
        std::mem::take(&mut self.pending)
    }

    /// Discards the pending score.
    pub fn reset(&mut self) {
        self.pending = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rolls_accumulate() {
        let mut tracker = TurnTracker::new();
        let one = Roll::new([1, 2, 2, 3, 3, 4]).unwrap();
        assert_eq!(tracker.apply_roll(&one).pending, 100);
        assert_eq!(tracker.apply_roll(&one).pending, 200);
        assert_eq!(tracker.pending(), 200);
    }

    #[test]
    fn test_bust_discards_pending() {
        let mut tracker = TurnTracker::new();
        tracker.apply_roll(&Roll::new([1, 1, 1, 2, 3, 4]).unwrap());
        let outcome = tracker.apply_roll(&Roll::new([2, 2, 3, 3, 4, 6]).unwrap());
        assert!(outcome.busted());
        assert_eq!(outcome.points(), 0);
        assert_eq!(tracker.pending(), 0);
    }

    #[test]
    fn test_finalize_takes_and_clears() {
        let mut tracker = TurnTracker::new();
        tracker.apply_roll(&Roll::new([5, 2, 2, 3, 3, 4]).unwrap());
        assert_eq!(tracker.finalize_turn(), 50);
        assert_eq!(tracker.pending(), 0);
        assert_eq!(tracker.finalize_turn(), 0);
    }

    #[test]
    fn test_reset() {
        let mut tracker = TurnTracker::new();
        tracker.apply_roll(&Roll::new([5, 2, 2, 3, 3, 4]).unwrap());
        tracker.reset();
        assert_eq!(tracker.pending(), 0);
    }
}
