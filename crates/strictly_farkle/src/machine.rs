//! Game state machine.
//!
//! The phase alone decides which actions are legal. Each action kind maps to
//! exactly one transition function; an illegal action is rejected before
//! anything is touched.

use crate::action::{ActionError, ActionKind, ActionRequest, ActionSet};
use crate::contracts::{ActionContract, Contract};
use crate::dice::{Roll, Roller};
use crate::game::Game;
use crate::scoring::ScoreOutcome;
use crate::turn::TurnTracker;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// Where the game stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Phase {
    /// No game has been started.
    NoGame,
    /// A turn is open and nothing has been rolled yet.
    AwaitingRoll,
    /// The last roll scored; the pending score can be banked or risked.
    RolledNonBust,
    /// The last roll scored nothing; the turn is forfeit.
    Busted,
    /// The target was reached. Only a new game can follow.
    Won,
}

impl Phase {
    /// Actions legal in this phase.
    pub fn legal_actions(self) -> ActionSet {
        const NEW_GAME: ActionKind = ActionKind::NewGame;
        const ROLL: ActionKind = ActionKind::Roll;
        const NEW_TURN: ActionKind = ActionKind::NewTurn;
        match self {
            Phase::NoGame | Phase::Won => ActionSet::of(&[NEW_GAME]),
            Phase::AwaitingRoll => ActionSet::of(&[NEW_GAME, ROLL]),
            Phase::RolledNonBust => ActionSet::of(&[NEW_GAME, ROLL, NEW_TURN]),
            Phase::Busted => ActionSet::of(&[NEW_GAME, NEW_TURN]),
        }
    }
}

/// The most recent roll and how it scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct LastRoll {
    /// Faces thrown.
    pub dice: Roll,
    /// Score of the roll on its own.
    pub outcome: ScoreOutcome,
}

/// Record of one applied transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Action that was applied.
    pub kind: ActionKind,
    /// Phase before.
    pub from: Phase,
    /// Phase after.
    pub to: Phase,
}

/// Owns the game, its phase and the turn in progress.
#[derive(Debug)]
pub struct GameMachine {
    pub(crate) phase: Phase,
    pub(crate) game: Option<Game>,
    pub(crate) tracker: TurnTracker,
    pub(crate) last_roll: Option<LastRoll>,
}

impl GameMachine {
    /// Creates a machine with no game.
    pub fn new() -> Self {
        Self {
            phase: Phase::NoGame,
            game: None,
            tracker: TurnTracker::new(),
            last_roll: None,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Actions legal right now.
    pub fn legal_actions(&self) -> ActionSet {
        self.phase.legal_actions()
    }

    /// The active game, if one was started.
    pub fn game(&self) -> Option<&Game> {
        self.game.as_ref()
    }

    /// Mutable access to the active game.
    pub fn game_mut(&mut self) -> Option<&mut Game> {
        self.game.as_mut()
    }

    /// Score riding on the turn in progress.
    pub fn pending_score(&self) -> u32 {
        self.tracker.pending()
    }

    /// The last roll of the current game.
    pub fn last_roll(&self) -> Option<&LastRoll> {
        self.last_roll.as_ref()
    }

    /// Applies an action.
    ///
    /// `rollers` supplies the dice for a new game and is not called otherwise.
    ///
    /// # Errors
    ///
    /// Fails without changing anything when the action is illegal in the
    /// current phase or its arguments are invalid.
    ///
    /// # Panics
    ///
    /// In debug builds, when the transition breaks a machine invariant.
    #[instrument(skip(self, rollers), fields(phase = %self.phase))]
    pub fn apply(
        &mut self,
        request: ActionRequest,
        rollers: &mut dyn FnMut() -> Box<dyn Roller>,
    ) -> Result<Transition, ActionError> {
        ActionContract::pre(self, &request)?;

        let from = self.phase;
        match request {
            ActionRequest::NewGame { winning_score } => self.new_game(winning_score, rollers()),
            ActionRequest::Roll => self.roll()?,
            ActionRequest::NewTurn => self.new_turn()?,
        }

        #[cfg(debug_assertions)]
        if let Err(violation) = ActionContract::post(self) {
            panic!("{} left the machine inconsistent: {}", request.kind(), violation);
        }

        let transition = Transition {
            kind: request.kind(),
            from,
            to: self.phase,
        };
        info!(kind = %transition.kind, from = %from, to = %transition.to, "Transition applied");
        Ok(transition)
    }

    fn new_game(&mut self, winning_score: u32, roller: Box<dyn Roller>) {
        if self.game.is_some() {
            info!(previous_phase = %self.phase, "Discarding previous game");
        }
        self.game = Some(Game::new(winning_score, roller));
        self.tracker.reset();
        self.last_roll = None;
        self.phase = Phase::AwaitingRoll;
    }

    fn roll(&mut self) -> Result<(), ActionError> {
        let game = self
            .game
            .as_mut()
            .ok_or(ActionError::InvalidAction(ActionKind::Roll))?;

        let dice = game.roll();
        let outcome = self.tracker.apply_roll(&dice);
        self.last_roll = Some(LastRoll {
            dice,
            outcome: outcome.roll,
        });

        self.phase = if outcome.busted() {
            info!(%dice, "Farkle");
            Phase::Busted
        } else if game.reaches_target(outcome.pending) {
            let banked = self.tracker.finalize_turn();
            game.record_turn(banked);
            info!(%dice, final_score = *game.current_score(), "Game won");
            Phase::Won
        } else {
            info!(%dice, points = outcome.points(), pending = outcome.pending, "Roll scored");
            Phase::RolledNonBust
        };
        Ok(())
    }

    fn new_turn(&mut self) -> Result<(), ActionError> {
        let game = self
            .game
            .as_mut()
            .ok_or(ActionError::InvalidAction(ActionKind::NewTurn))?;

        let banked = self.tracker.finalize_turn();
        game.record_turn(banked);
        self.phase = Phase::AwaitingRoll;
        Ok(())
    }
}

impl Default for GameMachine {
    fn default() -> Self {
        Self::new()
    }
}
