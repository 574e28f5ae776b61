//! First-class invariants.
//!
//! Invariants are logical properties that must hold between transitions.
//! They are testable independently and document what the machine guarantees.

use crate::machine::{GameMachine, Phase};

// ─────────────────────────────────────────────────────────────
//  Invariant Trait
// ─────────────────────────────────────────────────────────────

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Invariant Sets
// ─────────────────────────────────────────────────────────────

/// A set of invariants that can be checked together.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let violations: Vec<_> = [
            (I1::holds(state), I1::description()),
            (I2::holds(state), I2::description()),
            (I3::holds(state), I3::description()),
        ]
        .into_iter()
        .filter(|(holds, _)| !holds)
        .map(|(_, description)| InvariantViolation::new(description))
        .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Machine Invariants
// ─────────────────────────────────────────────────────────────

/// A game exists exactly when the phase says one does.
pub struct GameMatchesPhase;

impl Invariant<GameMachine> for GameMatchesPhase {
    fn holds(machine: &GameMachine) -> bool {
        machine.game.is_none() == (machine.phase == Phase::NoGame)
    }

    fn description() -> &'static str {
        "Game is present in every phase except NoGame"
    }
}

/// Banked plus pending stays below the target until the game is won.
pub struct BelowTargetUntilWon;

impl Invariant<GameMachine> for BelowTargetUntilWon {
    fn holds(machine: &GameMachine) -> bool {
        let Some(game) = machine.game.as_ref() else {
            return true;
        };
        let reached = game.reaches_target(machine.tracker.pending());
        reached == (machine.phase == Phase::Won)
    }

    fn description() -> &'static str {
        "Score reaches the winning score exactly when the game is won"
    }
}

/// Only a scoring roll leaves anything pending.
pub struct PendingOnlyAfterScoringRoll;

impl Invariant<GameMachine> for PendingOnlyAfterScoringRoll {
    fn holds(machine: &GameMachine) -> bool {
        machine.phase == Phase::RolledNonBust || machine.tracker.pending() == 0
    }

    fn description() -> &'static str {
        "Pending turn score is zero outside RolledNonBust"
    }
}

/// All state machine invariants as a composable set.
pub type MachineInvariants = (GameMatchesPhase, BelowTargetUntilWon, PendingOnlyAfterScoringRoll);
