//! Tests for token-gated action invocation.

use strictly_farkle::{
    ActionError, ActionKind, ActionLinks, ActionRequest, GameManager, LinkIssuer, LoadedRoller,
    Roll, Roller, token_of,
};

fn manager() -> GameManager {
    let roll = Roll::new([1, 2, 2, 3, 3, 4]).expect("Valid faces");
    GameManager::with_issuer(
        LinkIssuer::seeded("http://localhost:3000", 7),
        Box::new(move || Box::new(LoadedRoller::new(roll)) as Box<dyn Roller>),
    )
}

fn token(links: &ActionLinks, kind: ActionKind) -> u64 {
    links
        .get(&kind)
        .and_then(token_of)
        .unwrap_or_else(|| panic!("No {kind} token"))
}

#[test]
fn test_invoke_follows_links() {
    let mut manager = manager();

    let new_game = token(manager.action_links(), ActionKind::NewGame);
    manager
        .invoke(new_game, ActionRequest::NewGame { winning_score: 10_000 })
        .expect("New game");

    let roll = token(manager.action_links(), ActionKind::Roll);
    manager.invoke(roll, ActionRequest::Roll).expect("Roll");

    let new_turn = token(manager.action_links(), ActionKind::NewTurn);
    manager.invoke(new_turn, ActionRequest::NewTurn).expect("New turn");

    let game = manager.active_game().expect("Game");
    assert_eq!(*game.current_score(), 100);
    assert_eq!(game.turns().len(), 1);
}

#[test]
fn test_stale_token_rejected() {
    let mut manager = manager();
    let stale = token(manager.action_links(), ActionKind::NewGame);
    manager
        .invoke(stale, ActionRequest::NewGame { winning_score: 10_000 })
        .expect("New game");

    let links_before = manager.action_links().clone();
    let result = manager.invoke(stale, ActionRequest::NewGame { winning_score: 500 });
    assert_eq!(result, Err(ActionError::InvalidToken(stale)));
    assert_eq!(manager.action_links(), &links_before);
    assert_eq!(manager.active_game().map(|g| *g.winning_score()), Some(10_000));
}

#[test]
fn test_token_for_other_action_rejected() {
    let mut manager = manager();
    manager.new_game(10_000).expect("New game");

    let new_game = token(manager.action_links(), ActionKind::NewGame);
    let result = manager.invoke(new_game, ActionRequest::Roll);
    assert_eq!(
        result,
        Err(ActionError::TokenMismatch {
            token: new_game,
            issued_for: ActionKind::NewGame,
            requested: ActionKind::Roll,
        })
    );
    assert_eq!(manager.pending_score(), 0);
    assert!(manager.active_game().expect("Game").turns().is_empty());
}

#[test]
fn test_every_transition_remints_all_links() {
    let mut manager = manager();
    manager.new_game(10_000).expect("New game");
    let before = manager.action_links().clone();
    manager.roll().expect("Roll");
    let after = manager.action_links();

    for (kind, action) in &before {
        let old = token_of(action).expect("Token");
        assert_ne!(after.get(kind).and_then(token_of), Some(old));
    }
}

#[test]
fn test_failed_action_keeps_token_usable() {
    let mut manager = manager();
    let new_game = token(manager.action_links(), ActionKind::NewGame);
    assert_eq!(
        manager.invoke(new_game, ActionRequest::NewGame { winning_score: 0 }),
        Err(ActionError::InvalidWinningScore(0))
    );
    manager
        .invoke(new_game, ActionRequest::NewGame { winning_score: 300 })
        .expect("Same token still valid");
}

#[test]
fn test_links_track_base_url() {
    let manager = manager();
    let link = &manager.action_links()[&ActionKind::NewGame];
    assert!(link.url.starts_with("http://localhost:3000/NewGame?token="));
    assert!(link.url.ends_with("&winningScore={WinningScore}"));
}
