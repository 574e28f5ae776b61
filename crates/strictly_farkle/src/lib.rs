//! Strictly Farkle - type-safe Farkle game logic
//!
//! This library implements a dice game exposed as a hypermedia action API:
//! the [`GameManager`] always advertises exactly the actions that are legal
//! right now, each as a link carrying a single-mint token.
//!
//! # Architecture
//!
//! - **Dice**: validated rolls and pluggable rollers
//! - **Scoring**: pure Farkle scoring of six dice
//! - **Turn**: pending score of the turn in progress
//! - **Machine**: phases, legal actions and transitions
//! - **Links**: tokenised action links
//! - **Manager**: composition root the transport calls into
//!
//! # Example
//!
//! ```
//! use strictly_farkle::{ActionKind, GameManager, LoadedRoller, Roll, Roller};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let roll = Roll::new([1, 2, 2, 3, 3, 4])?;
//! let mut manager = GameManager::with_roller_factory(
//!     "http://localhost:3000",
//!     Box::new(move || Box::new(LoadedRoller::new(roll)) as Box<dyn Roller>),
//! );
//!
//! manager.new_game(10_000)?;
//! manager.roll()?;
//! assert_eq!(manager.pending_score(), 100);
//! assert!(manager.is_active(ActionKind::NewTurn));
//!
//! manager.new_turn()?;
//! assert_eq!(manager.active_game().map(|g| *g.current_score()), Some(100));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod action;
mod contracts;
mod dice;
mod game;
mod invariants;
mod links;
mod machine;
mod manager;
mod scoring;
mod turn;

// Crate-level exports - Actions
pub use action::{ACTION_METHOD, Action, ActionError, ActionKind, ActionLinks, ActionRequest, ActionSet};

// Crate-level exports - Contracts and invariants
pub use contracts::{ActionContract, ActionIsLegal, Contract, PositiveWinningScore};
pub use invariants::{
    BelowTargetUntilWon, GameMatchesPhase, Invariant, InvariantSet, InvariantViolation,
    MachineInvariants, PendingOnlyAfterScoringRoll,
};

// Crate-level exports - Dice
pub use dice::{
    DICE_PER_ROLL, LoadedRoller, MAX_FACE, MIN_FACE, RandomRoller, Roll, RollError, Roller,
    ScriptedRoller, SeededRoller,
};

// Crate-level exports - Game and turns
pub use game::{Game, Turn};
pub use turn::{TurnOutcome, TurnTracker};

// Crate-level exports - Scoring
pub use scoring::{
    SINGLE_FIVE_POINTS, SINGLE_ONE_POINTS, SIX_OF_A_KIND_POINTS, STRAIGHT_POINTS,
    THREE_PAIRS_POINTS, TRIPLE_ONES_POINTS, ScoreOutcome, ScoringCombo, score,
};

// Crate-level exports - State machine
pub use machine::{GameMachine, LastRoll, Phase, Transition};

// Crate-level exports - Links
pub use links::{LinkIssuer, WINNING_SCORE_PLACEHOLDER, token_of};

// Crate-level exports - Manager
pub use manager::{GameManager, GameView, RollerFactory};
