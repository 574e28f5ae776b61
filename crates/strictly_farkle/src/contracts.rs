//! Contract-based validation for actions.
//!
//! Contracts formalize Hoare-style reasoning: `{P} action {Q}`. The
//! precondition is checked on every call; the postcondition re-checks the
//! machine invariants in debug builds.

use crate::action::{ActionError, ActionRequest};
use crate::invariants::{InvariantSet, MachineInvariants};
use crate::machine::GameMachine;
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), ActionError>;

    /// Checks postconditions on the state the action produced.
    fn post(after: &S) -> Result<(), ActionError>;
}

// ─────────────────────────────────────────────────────────────
//  Action Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the action is legal in the current phase.
pub struct ActionIsLegal;

impl ActionIsLegal {
    /// Validates that the current phase allows the requested action.
    #[instrument(skip(machine))]
    pub fn check(request: &ActionRequest, machine: &GameMachine) -> Result<(), ActionError> {
        let kind = request.kind();
        if machine.legal_actions().contains(kind) {
            Ok(())
        } else {
            warn!(%kind, phase = %machine.phase(), "Rejected illegal action");
            Err(ActionError::InvalidAction(kind))
        }
    }
}

/// Precondition: a new game needs a positive target.
pub struct PositiveWinningScore;

impl PositiveWinningScore {
    /// Validates the target of a new game; other actions always pass.
    #[instrument]
    pub fn check(request: &ActionRequest) -> Result<(), ActionError> {
        match request {
            ActionRequest::NewGame { winning_score: 0 } => {
                warn!("Rejected zero winning score");
                Err(ActionError::InvalidWinningScore(0))
            }
            _ => Ok(()),
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Composite Contract
// ─────────────────────────────────────────────────────────────

/// Contract for every action.
///
/// Preconditions:
/// - Action is legal in the current phase
/// - Winning score is positive
///
/// Postconditions:
/// - All machine invariants hold
pub struct ActionContract;

impl Contract<GameMachine, ActionRequest> for ActionContract {
    fn pre(machine: &GameMachine, request: &ActionRequest) -> Result<(), ActionError> {
        ActionIsLegal::check(request, machine)?;
        PositiveWinningScore::check(request)?;
        Ok(())
    }

    fn post(after: &GameMachine) -> Result<(), ActionError> {
        MachineInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            ActionError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })
    }
}
