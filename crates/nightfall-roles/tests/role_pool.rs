//! Integration tests for dealing roles from a configuration.
//!
//! Every property is checked across a range of seeds so the shuffle and
//! the guaranteed-seat sampling are exercised, not just one lucky deal.

use std::collections::BTreeMap;

use nightfall_protocol::{Role, WinCondition};
use nightfall_roles::{
    build_and_assign_roles, ConfigError, GameConfig, RoleAssignment, RoleCatalog, RoleQuota,
    Seat, StaticCatalog,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

// =========================================================================
// Helpers
// =========================================================================

fn seats(n: usize) -> Vec<Seat> {
    (0..n).map(|i| Seat::new(format!("p{i}"), format!("Player {i}"))).collect()
}

fn standard_roles() -> Vec<Role> {
    StaticCatalog::standard().roles().to_vec()
}

fn player_count(assignment: &RoleAssignment, name: &str) -> usize {
    assignment.players.iter().filter(|p| p.role.name == name).count()
}

fn multiset<'a>(roles: impl Iterator<Item = &'a Role>) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for role in roles {
        *counts.entry(role.name.clone()).or_insert(0) += 1;
    }
    counts
}

// =========================================================================
// Sizes and contents
// =========================================================================

#[test]
fn test_deal_returns_one_role_per_seat_and_three_center() {
    for n in 0..=10 {
        let mut rng = StdRng::seed_from_u64(n as u64);
        let assignment =
            build_and_assign_roles(&seats(n), &GameConfig::default(), &standard_roles(), &mut rng)
                .unwrap();
        assert_eq!(assignment.players.len(), n);
        assert_eq!(assignment.center.len(), 3);
    }
}

#[test]
fn test_exact_pool_is_dealt_in_full() {
    // 5 seats + 3 center = 8 configured cards, no fillers needed.
    let config = GameConfig::empty()
        .with_role("Werewolf", RoleQuota::new(2))
        .with_role("Seer", RoleQuota::new(1))
        .with_role("Robber", RoleQuota::new(1))
        .with_role("Troublemaker", RoleQuota::new(1))
        .with_role("Villager", RoleQuota::new(3));

    let expected: BTreeMap<String, usize> = config
        .roles
        .iter()
        .map(|(name, quota)| (name.clone(), quota.count))
        .collect();

    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        let assignment =
            build_and_assign_roles(&seats(5), &config, &standard_roles(), &mut rng).unwrap();
        assert_eq!(multiset(assignment.all_roles()), expected, "seed {seed}");
    }
}

#[test]
fn test_custom_center_size() {
    let mut config = GameConfig::default();
    config.center_cards = 1;
    let mut rng = StdRng::seed_from_u64(11);
    let assignment =
        build_and_assign_roles(&seats(4), &config, &standard_roles(), &mut rng).unwrap();

    assert_eq!(assignment.center.len(), 1);
    assert_eq!(assignment.all_roles().count(), 5);
}

#[test]
fn test_same_seed_same_deal() {
    let config = GameConfig::default();
    let a = build_and_assign_roles(
        &seats(6),
        &config,
        &standard_roles(),
        &mut StdRng::seed_from_u64(42),
    )
    .unwrap();
    let b = build_and_assign_roles(
        &seats(6),
        &config,
        &standard_roles(),
        &mut StdRng::seed_from_u64(42),
    )
    .unwrap();
    assert_eq!(a, b);
}

// =========================================================================
// Guaranteed ("must") quotas
// =========================================================================

#[test]
fn test_two_werewolves_guaranteed_among_four_players() {
    let config = GameConfig::empty()
        .with_role("Villager", RoleQuota::new(2))
        .with_role("Werewolf", RoleQuota::guaranteed(2, 2));

    for seed in 0..100 {
        let mut rng = StdRng::seed_from_u64(seed);
        let assignment =
            build_and_assign_roles(&seats(4), &config, &standard_roles(), &mut rng).unwrap();
        assert_eq!(player_count(&assignment, "Werewolf"), 2, "seed {seed}");
        assert!(
            assignment.center.iter().all(|r| r.name != "Werewolf"),
            "seed {seed}: werewolf left in center"
        );
    }
}

#[test]
fn test_several_guaranteed_roles_do_not_overwrite_each_other() {
    let config = GameConfig::empty()
        .with_role("Werewolf", RoleQuota::guaranteed(2, 2))
        .with_role("Seer", RoleQuota::guaranteed(1, 1))
        .with_role("Tanner", RoleQuota::guaranteed(1, 1))
        .with_role("Villager", RoleQuota::new(3));

    for seed in 0..100 {
        let mut rng = StdRng::seed_from_u64(seed);
        let assignment =
            build_and_assign_roles(&seats(4), &config, &standard_roles(), &mut rng).unwrap();
        assert_eq!(player_count(&assignment, "Werewolf"), 2, "seed {seed}");
        assert_eq!(player_count(&assignment, "Seer"), 1, "seed {seed}");
        assert_eq!(player_count(&assignment, "Tanner"), 1, "seed {seed}");
    }
}

#[test]
fn test_guaranteed_quota_never_exceeds_seats() {
    // 5 guaranteed werewolves, only 2 seats.
    let config = GameConfig::empty().with_role("Werewolf", RoleQuota::guaranteed(5, 5));

    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let assignment =
            build_and_assign_roles(&seats(2), &config, &standard_roles(), &mut rng).unwrap();
        assert_eq!(assignment.players.len(), 2);
        assert_eq!(player_count(&assignment, "Werewolf"), 2);
    }
}

#[test]
fn test_guaranteed_seats_vary_between_seeds() {
    let config = GameConfig::empty()
        .with_role("Villager", RoleQuota::new(5))
        .with_role("Werewolf", RoleQuota::guaranteed(1, 1));

    let mut seats_seen = std::collections::HashSet::new();
    for seed in 0..200 {
        let mut rng = StdRng::seed_from_u64(seed);
        let assignment =
            build_and_assign_roles(&seats(4), &config, &standard_roles(), &mut rng).unwrap();
        if let Some(p) = assignment.players.iter().find(|p| p.role.name == "Werewolf") {
            seats_seen.insert(p.id.clone());
        }
    }
    assert_eq!(seats_seen.len(), 4, "every seat should get the werewolf sometimes");
}

// =========================================================================
// Errors
// =========================================================================

#[test]
fn test_quota_over_count_is_a_configuration_error() {
    let config = GameConfig::empty().with_role("Seer", RoleQuota::guaranteed(1, 3));
    let mut rng = StdRng::seed_from_u64(0);
    let err = build_and_assign_roles(&seats(3), &config, &standard_roles(), &mut rng)
        .unwrap_err();
    assert!(matches!(err, ConfigError::QuotaExceedsCount { ref role, .. } if role == "Seer"));
}

#[test]
fn test_single_role_catalog_still_fills_the_pool() {
    let catalog = vec![Role::new("v", "Villager", WinCondition::KillingEvil)];
    let mut rng = StdRng::seed_from_u64(0);
    let assignment =
        build_and_assign_roles(&seats(4), &GameConfig::default(), &catalog, &mut rng).unwrap();
    assert_eq!(assignment.all_roles().count(), 7);
    assert!(assignment.all_roles().all(|r| r.name == "Villager"));
}

#[tokio::test]
async fn test_deal_from_catalog_trait() {
    let catalog = StaticCatalog::standard();
    let roles = catalog.list_roles().await.unwrap();
    let mut rng = StdRng::seed_from_u64(5);
    let assignment =
        build_and_assign_roles(&seats(3), &GameConfig::default(), &roles, &mut rng).unwrap();
    assert_eq!(assignment.players.len(), 3);
}
