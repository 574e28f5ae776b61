//! First-class action types.
//!
//! An [`ActionKind`] names something a client may do. An [`ActionSet`] is the
//! set of kinds legal right now, and an [`Action`] is the rendered link a
//! client follows to perform one.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::IntoEnumIterator;

/// HTTP method every action link uses.
pub const ACTION_METHOD: &str = "POST";

/// The closed set of things a client can do.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
pub enum ActionKind {
    /// Start a fresh game with a caller-chosen winning score.
    NewGame,
    /// Throw the dice.
    Roll,
    /// Bank the turn in progress and start the next one.
    NewTurn,
}

impl ActionKind {
    /// Path segment of this action's link.
    pub fn path(self) -> &'static str {
        self.into()
    }

    fn bit(self) -> u8 {
        match self {
            ActionKind::NewGame => 1 << 0,
            ActionKind::Roll => 1 << 1,
            ActionKind::NewTurn => 1 << 2,
        }
    }
}

/// A set of action kinds, stored as a bitmask.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ActionSet(u8);

impl ActionSet {
    /// The empty set.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Builds a set from the given kinds.
    pub fn of(kinds: &[ActionKind]) -> Self {
        kinds.iter().fold(Self::empty(), |set, kind| set.with(*kind))
    }

    /// Returns this set with `kind` added.
    #[must_use]
    pub fn with(self, kind: ActionKind) -> Self {
        Self(self.0 | kind.bit())
    }

    /// Returns true when `kind` is in the set.
    pub fn contains(self, kind: ActionKind) -> bool {
        self.0 & kind.bit() != 0
    }

    /// Returns true when no kind is in the set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of kinds in the set.
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterates the kinds in declaration order.
    pub fn iter(self) -> impl Iterator<Item = ActionKind> {
        ActionKind::iter().filter(move |kind| self.contains(*kind))
    }
}

impl FromIterator<ActionKind> for ActionSet {
    fn from_iter<I: IntoIterator<Item = ActionKind>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), Self::with)
    }
}

impl Serialize for ActionSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl std::fmt::Display for ActionSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&'static str> = self.iter().map(ActionKind::path).collect();
        write!(f, "{{{}}}", names.join(", "))
    }
}

/// A rendered hypermedia link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Action {
    /// HTTP method to use.
    pub method: String,
    /// URL to invoke, carrying the action token.
    pub url: String,
}

/// Links for every currently legal action, keyed by kind.
pub type ActionLinks = BTreeMap<ActionKind, Action>;

/// A request to perform one action, with its arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionRequest {
    /// Start a game played to `winning_score`.
    NewGame {
        /// Target score that ends the game.
        winning_score: u32,
    },
    /// Throw the dice.
    Roll,
    /// Bank the turn.
    NewTurn,
}

impl ActionRequest {
    /// The kind of action requested.
    pub fn kind(&self) -> ActionKind {
        match self {
            ActionRequest::NewGame { .. } => ActionKind::NewGame,
            ActionRequest::Roll => ActionKind::Roll,
            ActionRequest::NewTurn => ActionKind::NewTurn,
        }
    }
}

/// Error performing an action. State is never changed when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ActionError {
    /// The action is not legal in the current phase.
    #[display("Action {} is not available right now", _0)]
    InvalidAction(ActionKind),

    /// The token does not belong to any current link.
    #[display("Token {} is stale or unknown", _0)]
    InvalidToken(u64),

    /// The token is current but was minted for a different action.
    #[display("Token {} was issued for {}, not {}", token, issued_for, requested)]
    TokenMismatch {
        /// Presented token.
        token: u64,
        /// Kind the token was minted for.
        issued_for: ActionKind,
        /// Kind the caller tried to perform.
        requested: ActionKind,
    },

    /// Winning score must be positive.
    #[display("Winning score must be greater than zero, got {}", _0)]
    InvalidWinningScore(u32),

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for ActionError {}
