//! Action link issuer.
//!
//! Every mint hands each legal action a fresh random token and forgets the
//! previous ones, so links captured from an earlier state stop resolving.

use crate::action::{ACTION_METHOD, Action, ActionError, ActionKind, ActionLinks, ActionSet};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;
use tracing::{debug, instrument, warn};

/// Placeholder the caller substitutes with a concrete winning score.
pub const WINNING_SCORE_PLACEHOLDER: &str = "{WinningScore}";

/// Mints tokenised links and resolves tokens back to actions.
#[derive(Debug)]
pub struct LinkIssuer {
    base_url: String,
    rng: StdRng,
    tokens: BTreeMap<u64, ActionKind>,
}

impl LinkIssuer {
    /// Creates an issuer whose links live under `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_rng(base_url, StdRng::from_entropy())
    }

    /// Creates an issuer with a reproducible token sequence.
    pub fn seeded(base_url: impl Into<String>, seed: u64) -> Self {
        Self::with_rng(base_url, StdRng::seed_from_u64(seed))
    }

    fn with_rng(base_url: impl Into<String>, rng: StdRng) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            rng,
            tokens: BTreeMap::new(),
        }
    }

    /// Base URL links are built under.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Mints one link per kind in `kinds`, invalidating every earlier token.
    #[instrument(skip(self), fields(kinds = %kinds))]
    pub fn mint(&mut self, kinds: ActionSet) -> ActionLinks {
        let previous = std::mem::take(&mut self.tokens);
        let mut links = ActionLinks::new();

        for kind in kinds.iter() {
            let token = self.fresh_token(&previous);
            self.tokens.insert(token, kind);
            links.insert(kind, self.link(kind, token));
        }

        debug!(count = links.len(), "Minted action links");
        links
    }

    /// Resolves a token from the latest mint to its action kind.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::InvalidToken`] for stale or unknown tokens.
    #[instrument(skip(self))]
    pub fn resolve(&self, token: u64) -> Result<ActionKind, ActionError> {
        self.tokens.get(&token).copied().ok_or_else(|| {
            warn!(token, "Rejected stale or unknown token");
            ActionError::InvalidToken(token)
        })
    }

    /// Non-zero token unused by the previous and the current mint.
    fn fresh_token(&mut self, previous: &BTreeMap<u64, ActionKind>) -> u64 {
        loop {
            let token = self.rng.gen_range(1..=u64::MAX);
            if !previous.contains_key(&token) && !self.tokens.contains_key(&token) {
                return token;
            }
        }
    }

    fn link(&self, kind: ActionKind, token: u64) -> Action {
        let mut url = format!("{}/{}?token={}", self.base_url, kind.path(), token);
        if kind == ActionKind::NewGame {
            url.push_str("&winningScore=");
            url.push_str(WINNING_SCORE_PLACEHOLDER);
        }
        Action {
            method: ACTION_METHOD.to_string(),
            url,
        }
    }
}

/// Pulls the token out of a minted link URL.
pub fn token_of(action: &Action) -> Option<u64> {
    let (_, query) = action.url.split_once('?')?;
    query
        .split('&')
        .find_map(|pair| pair.strip_prefix("token="))
        .and_then(|token| token.parse().ok())
}
