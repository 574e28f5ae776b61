//! Game manager: the single entry point for the transport layer.
//!
//! Holds the state machine and the current links, and keeps them in
//! lock-step. Every successful action re-mints the links; every failed one
//! leaves both untouched.

use crate::action::{ActionError, ActionKind, ActionLinks, ActionRequest, ActionSet};
use crate::dice::{RandomRoller, Roller};
use crate::game::Game;
use crate::links::LinkIssuer;
use crate::machine::{GameMachine, LastRoll, Phase, Transition};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

/// Produces the dice for each new game.
pub type RollerFactory = Box<dyn FnMut() -> Box<dyn Roller> + Send>;

/// Owns the one active game and the links advertising what can be done next.
pub struct GameManager {
    machine: GameMachine,
    issuer: LinkIssuer,
    links: ActionLinks,
    rollers: RollerFactory,
}

impl GameManager {
    /// Creates a manager that plays with fair random dice.
    #[instrument(skip(base_url), fields(base_url = %base_url.as_ref()))]
    pub fn new(base_url: impl AsRef<str>) -> Self {
        Self::with_roller_factory(
            base_url,
            Box::new(|| Box::new(RandomRoller::new()) as Box<dyn Roller>),
        )
    }

    /// Creates a manager whose games get their dice from `rollers`.
    #[instrument(skip(base_url, rollers), fields(base_url = %base_url.as_ref()))]
    pub fn with_roller_factory(base_url: impl AsRef<str>, rollers: RollerFactory) -> Self {
        Self::with_issuer(LinkIssuer::new(base_url.as_ref()), rollers)
    }

    /// Creates a manager from a prepared link issuer.
    pub fn with_issuer(mut issuer: LinkIssuer, rollers: RollerFactory) -> Self {
        let machine = GameMachine::new();
        let links = issuer.mint(machine.legal_actions());
        info!(base_url = issuer.base_url(), "Game manager ready");
        Self {
            machine,
            issuer,
            links,
            rollers,
        }
    }

    /// Starts a new game, replacing any current one.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::InvalidWinningScore`] for a zero target.
    pub fn new_game(&mut self, winning_score: u32) -> Result<(), ActionError> {
        self.perform(ActionRequest::NewGame { winning_score })
    }

    /// Rolls the dice.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::InvalidAction`] unless a roll is legal now.
    pub fn roll(&mut self) -> Result<(), ActionError> {
        self.perform(ActionRequest::Roll)
    }

    /// Banks the turn in progress (or closes a busted one).
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::InvalidAction`] unless a new turn is legal now.
    pub fn new_turn(&mut self) -> Result<(), ActionError> {
        self.perform(ActionRequest::NewTurn)
    }

    /// Performs an action presented with a link token.
    ///
    /// The token must come from the latest mint and belong to the requested
    /// action.
    ///
    /// # Errors
    ///
    /// Token errors, then any error of the action itself. Nothing changes on
    /// failure.
    #[instrument(skip(self), fields(kind = %request.kind()))]
    pub fn invoke(&mut self, token: u64, request: ActionRequest) -> Result<(), ActionError> {
        let requested = request.kind();
        let issued_for = self.issuer.resolve(token)?;
        if issued_for != requested {
            warn!(token, %issued_for, %requested, "Token presented for the wrong action");
            return Err(ActionError::TokenMismatch {
                token,
                issued_for,
                requested,
            });
        }
        self.perform(request)
    }

    /// Applies an action and re-mints the links.
    #[instrument(skip(self))]
    pub fn perform(&mut self, request: ActionRequest) -> Result<(), ActionError> {
        let transition: Transition = self.machine.apply(request, &mut *self.rollers)?;
        self.links = self.issuer.mint(self.machine.legal_actions());
        debug!(
            from = %transition.from,
            to = %transition.to,
            actions = %self.active_actions(),
            "Links re-minted"
        );
        debug_assert!(self.links_match_actions(), "Links out of step with actions");
        Ok(())
    }

    /// The active game, if one was started.
    pub fn active_game(&self) -> Option<&Game> {
        self.machine.game()
    }

    /// Mutable access to the active game, for swapping its dice.
    pub fn active_game_mut(&mut self) -> Option<&mut Game> {
        self.machine.game_mut()
    }

    /// Actions legal right now.
    pub fn active_actions(&self) -> ActionSet {
        self.machine.legal_actions()
    }

    /// True when `kind` can be performed right now.
    pub fn is_active(&self, kind: ActionKind) -> bool {
        self.active_actions().contains(kind)
    }

    /// Links for the legal actions.
    pub fn action_links(&self) -> &ActionLinks {
        &self.links
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.machine.phase()
    }

    /// Score riding on the turn in progress.
    pub fn pending_score(&self) -> u32 {
        self.machine.pending_score()
    }

    /// The last roll of the current game.
    pub fn last_roll(&self) -> Option<&LastRoll> {
        self.machine.last_roll()
    }

    /// Checks that exactly the legal actions have links, and that there is
    /// always at least one to follow.
    pub fn links_match_actions(&self) -> bool {
        let linked: ActionSet = self.links.keys().copied().collect();
        !linked.is_empty() && linked == self.active_actions() && linked.len() == self.links.len()
    }

    /// Snapshot for rendering.
    pub fn view(&self) -> GameView<'_> {
        GameView {
            phase: self.phase(),
            active_game: self.active_game(),
            pending_score: self.pending_score(),
            last_roll: self.last_roll(),
            action_links: &self.links,
        }
    }
}

impl std::fmt::Debug for GameManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameManager")
            .field("machine", &self.machine)
            .field("issuer", &self.issuer)
            .field("links", &self.links)
            .finish_non_exhaustive()
    }
}

/// Everything a client needs to render the game and pick its next action.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GameView<'a> {
    /// Current phase.
    pub phase: Phase,
    /// The active game, if any.
    pub active_game: Option<&'a Game>,
    /// Score riding on the turn in progress.
    pub pending_score: u32,
    /// The most recent roll.
    pub last_roll: Option<&'a LastRoll>,
    /// Links for the legal actions.
    pub action_links: &'a ActionLinks,
}
