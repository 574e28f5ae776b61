//! The active game and its banked turns.

use crate::dice::{Roll, Roller};
use derive_getters::Getters;
use serde::Serialize;
use tracing::{info, instrument};

/// A completed turn. Immutable once recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Turn {
    /// Score banked for the turn (zero for a bust).
    pub score: u32,
}

/// One game of Farkle played to a target score.
#[derive(Debug, Getters, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Game {
    /// Total banked across completed turns.
    current_score: u32,
    /// Completed turns, oldest first.
    turns: Vec<Turn>,
    /// Score that ends the game.
    winning_score: u32,
    #[getter(skip)]
    #[serde(skip)]
    roller: Box<dyn Roller>,
}

impl Game {
    /// Creates a game with nothing banked.
    #[instrument(skip(roller))]
    pub fn new(winning_score: u32, roller: Box<dyn Roller>) -> Self {
        info!(winning_score, ?roller, "Creating game");
        Self {
            current_score: 0,
            turns: Vec::new(),
            winning_score,
            roller,
        }
    }

    /// Throws the dice with this game's roller.
    pub fn roll(&mut self) -> Roll {
        self.roller.roll()
    }

    /// Replaces the dice.
    pub fn set_roller(&mut self, roller: Box<dyn Roller>) {
        self.roller = roller;
    }

    /// True when `pending` on top of the banked score reaches the target.
    pub fn reaches_target(&self, pending: u32) -> bool {
        self.current_score.saturating_add(pending) >= self.winning_score
    }

    /// Banks a finished turn.
    pub(crate) fn record_turn(&mut self, score: u32) {
        self.current_score = self.current_score.saturating_add(score);
        self.turns.push(Turn { score });
        info!(
            turn = self.turns.len(),
            score,
            current_score = self.current_score,
            "Turn banked"
        );
    }
}
