//! Integration tests for running games through their actors.

use std::collections::BTreeSet;

use nightfall_game::{ActorRef, GameError, GameSession, GameStore};
use nightfall_protocol::{GameCode, PlayerId, Role, TargetId};
use nightfall_roles::{AssignedPlayer, GameConfig, RoleAssignment, StaticCatalog};

// =========================================================================
// Helpers
// =========================================================================

fn role(name: &str) -> Role {
    StaticCatalog::standard()
        .by_name(name)
        .cloned()
        .unwrap_or_else(|| panic!("{name} is in the standard catalog"))
}

fn pid(id: &str) -> PlayerId {
    PlayerId::from(id)
}

/// Seats `a`, `b`, `c`, ... with `roles` in order.
fn session(code: &str, roles: &[&str], center: &[&str]) -> GameSession {
    let players = roles
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let id = char::from(b'a' + i as u8).to_string();
            AssignedPlayer {
                id: PlayerId(id.clone()),
                name: id.to_uppercase(),
                role: role(name),
            }
        })
        .collect();
    let center = center.iter().map(|name| role(name)).collect();
    GameSession::new(
        GameCode::from(code),
        RoleAssignment { players, center },
        &GameConfig::default(),
    )
}

// =========================================================================
// A full game
// =========================================================================

#[tokio::test]
async fn test_full_night_and_vote() {
    let mut store = GameStore::default();
    let game = store
        .create(session(
            "FULL",
            &["Werewolf", "Seer", "Robber", "Troublemaker"],
            &["Villager", "Villager", "Tanner"],
        ))
        .unwrap();

    let turn = game.current_turn().await.unwrap().unwrap();
    assert_eq!(turn.role.name, "Werewolf");
    assert!(game.is_players_turn(pid("a")).await.unwrap());
    assert!(!game.is_players_turn(pid("b")).await.unwrap());

    // Werewolf peeks at the center.
    let step = game
        .resolve_action(pid("a"), vec![TargetId::center(2)])
        .await
        .unwrap();
    assert_eq!(step.result.info.seen_roles, Some(vec![role("Tanner")]));
    assert_eq!(step.next_turn.unwrap().role.name, "Seer");

    // Seer looks at the werewolf.
    let step = game
        .resolve_action(pid("b"), vec![TargetId::player("a")])
        .await
        .unwrap();
    assert_eq!(step.result.info.seen_roles, Some(vec![role("Werewolf")]));

    // Robber takes the werewolf card and learns it.
    let step = game
        .resolve_action(pid("c"), vec![TargetId::player("a")])
        .await
        .unwrap();
    assert_eq!(step.result.info.swapped_role, Some(role("Werewolf")));
    assert_eq!(step.next_turn.unwrap().actor, ActorRef::Player(pid("d")));

    // Troublemaker swaps the Seer and the Robber (now holding Werewolf).
    let step = game
        .resolve_action(pid("d"), vec![TargetId::player("b"), TargetId::player("c")])
        .await
        .unwrap();
    assert!(step.result.info.is_empty());
    assert!(step.next_turn.is_none());
    assert!(game.current_turn().await.unwrap().is_none());

    let snapshot = game.snapshot().await.unwrap();
    let b = snapshot.player(&pid("b")).unwrap();
    assert_eq!(b.current_role().name, "Werewolf");
    assert_eq!(b.original_role().name, "Seer");

    for voter in ["a", "c", "d"] {
        game.record_vote(pid(voter), pid("b")).await.unwrap();
    }
    let votes = game.record_vote(pid("b"), pid("a")).await.unwrap();
    assert_eq!(votes.len(), 4);

    let winners = game.compute_winners().await.unwrap();
    assert_eq!(winners, BTreeSet::from([pid("a"), pid("c"), pid("d")]));

    let outcome = game.outcome().await.unwrap();
    assert_eq!(outcome.winners, winners);
    assert_eq!(outcome.eliminated, BTreeSet::from([pid("b")]));
}

// =========================================================================
// Serialization of turns
// =========================================================================

#[tokio::test]
async fn test_concurrent_werewolves_only_one_acts() {
    let mut store = GameStore::default();
    let game = store
        .create(session(
            "RACE",
            &["Werewolf", "Werewolf", "Seer"],
            &["Villager", "Villager", "Tanner"],
        ))
        .unwrap();

    let (first, second) = tokio::join!(
        game.resolve_action(pid("a"), vec![TargetId::center(0)]),
        game.resolve_action(pid("b"), vec![TargetId::center(1)]),
    );

    let succeeded = [&first, &second].iter().filter(|r| r.is_ok()).count();
    assert_eq!(succeeded, 1);
    let failed = if first.is_err() { first } else { second };
    assert!(matches!(failed, Err(GameError::NotYourTurn(_))));

    let turn = game.current_turn().await.unwrap().unwrap();
    assert_eq!(turn.role.name, "Seer");
}

#[tokio::test]
async fn test_rejected_action_keeps_the_turn() {
    let mut store = GameStore::default();
    let game = store
        .create(session("KEEP", &["Seer", "Villager"], &["Villager", "Villager", "Tanner"]))
        .unwrap();

    let err = game
        .resolve_action(pid("a"), vec![TargetId::center(7)])
        .await
        .unwrap_err();
    assert!(matches!(err, GameError::InvalidTarget(_)));

    let err = game
        .resolve_action(pid("b"), vec![TargetId::center(0)])
        .await
        .unwrap_err();
    assert!(matches!(err, GameError::NotYourTurn(_)));

    assert!(game.is_players_turn(pid("a")).await.unwrap());
}

#[tokio::test]
async fn test_center_turn_passes_on_advance() {
    let mut store = GameStore::default();
    let game = store
        .create(session("CNTR", &["Robber", "Villager"], &["Seer", "Villager", "Tanner"]))
        .unwrap();

    let turn = game.current_turn().await.unwrap().unwrap();
    assert_eq!(turn.actor, ActorRef::Center(0));
    assert!(!game.is_players_turn(pid("a")).await.unwrap());

    let next = game.advance_turn().await.unwrap().unwrap();
    assert_eq!(next.role.name, "Robber");
    assert!(game.is_players_turn(pid("a")).await.unwrap());
}

// =========================================================================
// Store
// =========================================================================

#[tokio::test]
async fn test_store_lifecycle() {
    let mut store = GameStore::new(8);
    let code = GameCode::from("LIFE");

    let game = store
        .create(session("LIFE", &["Villager"], &["Villager", "Villager", "Tanner"]))
        .unwrap();
    assert_eq!(store.len(), 1);
    assert!(store.contains(&code));

    let err = store
        .create(session("LIFE", &["Villager"], &["Villager", "Villager", "Tanner"]))
        .unwrap_err();
    assert!(matches!(err, GameError::AlreadyExists(_)));

    assert!(store.get(&code).is_ok());
    assert!(matches!(
        store.get(&GameCode::from("NOPE")),
        Err(GameError::GameNotFound(_))
    ));

    store.remove(&code).await.unwrap();
    assert!(store.is_empty());
    assert!(matches!(store.remove(&code).await, Err(GameError::GameNotFound(_))));

    // The old handle outlives the game but can no longer reach it.
    let err = game.current_turn().await.unwrap_err();
    assert!(matches!(err, GameError::Unavailable(_)));
}

#[tokio::test]
async fn test_games_are_isolated() {
    let mut store = GameStore::default();
    let one = store
        .create(session("ONE", &["Seer", "Villager"], &["Villager", "Villager", "Tanner"]))
        .unwrap();
    let two = store
        .create(session("TWO", &["Seer", "Villager"], &["Villager", "Villager", "Tanner"]))
        .unwrap();

    one.resolve_action(pid("a"), vec![TargetId::player("b")])
        .await
        .unwrap();

    assert!(one.current_turn().await.unwrap().is_none());
    assert!(two.is_players_turn(pid("a")).await.unwrap());
    assert_eq!(store.codes().len(), 2);
}
