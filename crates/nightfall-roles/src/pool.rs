//! Dealing: turning a [`GameConfig`] into concrete cards.
//!
//! The deal runs as a pipeline:
//!
//! ```text
//! configured copies ──→ + filler roles ──→ hold back guaranteed copies
//!                                                     │
//!                                                  shuffle
//!                                                     │
//!                     ┌───────────────────────────────┴──────────┐
//!                     ▼                                          ▼
//!              first `center_cards`            the rest + held-back copies:
//!              (center slots)                         player pool
//!                                                          │
//!                                   guaranteed ("must") copies to random seats
//!                                                          │
//!                                        remaining seats in pool order
//! ```

use std::collections::HashSet;

use nightfall_protocol::{PlayerId, Role};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::{ConfigError, GameConfig};

/// A player sitting at the table before roles are dealt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    pub id: PlayerId,
    pub name: String,
}

impl Seat {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: PlayerId(id.into()),
            name: name.into(),
        }
    }
}

/// A seat together with the role it was dealt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignedPlayer {
    pub id: PlayerId,
    pub name: String,
    pub role: Role,
}

/// The result of dealing: one role per seat (in seat order) and the
/// center cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAssignment {
    pub players: Vec<AssignedPlayer>,
    pub center: Vec<Role>,
}

impl RoleAssignment {
    /// The role dealt to `player`, if they are seated.
    pub fn role_of(&self, player: &PlayerId) -> Option<&Role> {
        self.players.iter().find(|p| &p.id == player).map(|p| &p.role)
    }

    /// Every dealt card, players first, then center.
    pub fn all_roles(&self) -> impl Iterator<Item = &Role> {
        self.players.iter().map(|p| &p.role).chain(self.center.iter())
    }
}

/// Deals roles to `seats` and the center.
///
/// `rng` drives both the shuffle and the choice of seats for guaranteed
/// roles; pass a seeded `StdRng` for reproducible deals.
///
/// If more copies are configured than there are cards to deal, the
/// surplus (after shuffling) is left out of the game.
///
/// # Errors
/// - [`ConfigError::EmptyCatalog`]: nothing to deal from
/// - [`ConfigError::QuotaExceedsCount`]: inconsistent quota
/// - [`ConfigError::DuplicatePlayer`]: the same player seated twice
/// - [`ConfigError::ReservedPlayerId`]: a player id that reads as a
///   center slot
/// - [`ConfigError::PoolTooSmall`]: fewer cards than seats + center
pub fn build_and_assign_roles<R: Rng + ?Sized>(
    seats: &[Seat],
    config: &GameConfig,
    catalog: &[Role],
    rng: &mut R,
) -> Result<RoleAssignment, ConfigError> {
    if catalog.is_empty() {
        return Err(ConfigError::EmptyCatalog);
    }
    config.validate()?;

    let mut seen = HashSet::with_capacity(seats.len());
    for seat in seats {
        if !seat.id.is_addressable() {
            return Err(ConfigError::ReservedPlayerId(seat.id.clone()));
        }
        if !seen.insert(&seat.id) {
            return Err(ConfigError::DuplicatePlayer(seat.id.clone()));
        }
    }

    let needed = seats.len() + config.center_cards;
    let (mut pool, quotas) = configured_pool(config, catalog);
    add_fillers(&mut pool, config, catalog, needed);

    if pool.len() < needed {
        return Err(ConfigError::PoolTooSmall {
            needed,
            available: pool.len(),
        });
    }

    // Guaranteed copies are held back from the center cut, capped at the
    // number of seats.
    let mut reserved = Vec::new();
    let mut budget = seats.len();
    for (name, must) in &quotas {
        let mut take = (*must).min(budget);
        while take > 0 {
            let Some(pos) = pool.iter().rposition(|r| &r.name == name) else {
                break;
            };
            reserved.push(pool.remove(pos));
            take -= 1;
            budget -= 1;
        }
    }

    // `SliceRandom::shuffle` is a Fisher–Yates shuffle.
    pool.shuffle(rng);
    let mut player_pool = pool.split_off(config.center_cards);
    let center = pool;
    player_pool.extend(reserved);

    let mut dealt: Vec<Option<Role>> = vec![None; seats.len()];

    for (name, must) in quotas {
        let available = player_pool.iter().filter(|r| r.name == name).count();
        let free: Vec<usize> = dealt
            .iter()
            .enumerate()
            .filter(|(_, role)| role.is_none())
            .map(|(i, _)| i)
            .collect();
        let take = must.min(available).min(free.len());
        if take < must {
            tracing::debug!(role = %name, must, placed = take, "guaranteed quota capped");
        }

        for pick in rand::seq::index::sample(rng, free.len(), take) {
            if let Some(pos) = player_pool.iter().position(|r| r.name == name) {
                dealt[free[pick]] = Some(player_pool.remove(pos));
            }
        }
    }

    let mut remaining = player_pool.into_iter();
    for slot in dealt.iter_mut().filter(|slot| slot.is_none()) {
        *slot = remaining.next();
    }
    let surplus = remaining.count();
    if surplus > 0 {
        tracing::debug!(surplus, "configured cards left out of the deal");
    }

    // The player pool held at least `seats.len()` cards, so every seat
    // has a role by now.
    let players = seats
        .iter()
        .zip(dealt)
        .filter_map(|(seat, role)| {
            role.map(|role| AssignedPlayer {
                id: seat.id.clone(),
                name: seat.name.clone(),
                role,
            })
        })
        .collect();

    Ok(RoleAssignment { players, center })
}

/// Configured copies of every catalog role named in `config`, plus the
/// guaranteed quotas. Names the catalog doesn't know are skipped.
fn configured_pool(config: &GameConfig, catalog: &[Role]) -> (Vec<Role>, Vec<(String, usize)>) {
    let mut pool = Vec::new();
    let mut quotas = Vec::new();

    for (name, quota) in &config.roles {
        let Some(role) = catalog.iter().find(|r| &r.name == name) else {
            tracing::warn!(role = %name, "configured role not in catalog, ignoring");
            continue;
        };
        pool.extend(std::iter::repeat_n(role.clone(), quota.count));
        if quota.must > 0 {
            quotas.push((name.clone(), quota.must));
        }
    }

    (pool, quotas)
}

/// Tops `pool` up to `needed` cards, cycling through the catalog roles
/// the configuration doesn't mention (or the whole catalog if it
/// mentions all of them).
fn add_fillers(pool: &mut Vec<Role>, config: &GameConfig, catalog: &[Role], needed: usize) {
    let unconfigured: Vec<&Role> = catalog
        .iter()
        .filter(|r| !config.roles.contains_key(&r.name))
        .collect();
    let fillers: Vec<&Role> = if unconfigured.is_empty() {
        catalog.iter().collect()
    } else {
        unconfigured
    };
    if fillers.is_empty() {
        return;
    }

    let mut next = 0;
    while pool.len() < needed {
        pool.push(fillers[next % fillers.len()].clone());
        next += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nightfall_protocol::WinCondition;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::RoleQuota;

    fn catalog() -> Vec<Role> {
        vec![
            Role::new("w", "Werewolf", WinCondition::StayingAlive).with_night_order(1),
            Role::new("s", "Seer", WinCondition::KillingEvil).with_night_order(2),
            Role::new("v", "Villager", WinCondition::KillingEvil),
            Role::new("t", "Tanner", WinCondition::Solo),
        ]
    }

    fn seats(n: usize) -> Vec<Seat> {
        (0..n).map(|i| Seat::new(format!("p{i}"), format!("Player {i}"))).collect()
    }

    fn count(assignment: &RoleAssignment, name: &str) -> usize {
        assignment.all_roles().filter(|r| r.name == name).count()
    }

    #[test]
    fn test_fillers_cycle_through_unconfigured_roles() {
        let config = GameConfig::empty().with_role("Werewolf", RoleQuota::new(2));
        let mut pool = Vec::new();
        add_fillers(&mut pool, &config, &catalog(), 5);

        let names: Vec<&str> = pool.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Seer", "Villager", "Tanner", "Seer", "Villager"]);
    }

    #[test]
    fn test_fillers_fall_back_to_whole_catalog() {
        let mut config = GameConfig::empty();
        for role in catalog() {
            config = config.with_role(role.name, RoleQuota::new(0));
        }
        let mut pool = Vec::new();
        add_fillers(&mut pool, &config, &catalog(), 6);

        let names: Vec<&str> = pool.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            ["Werewolf", "Seer", "Villager", "Tanner", "Werewolf", "Seer"]
        );
    }

    #[test]
    fn test_unknown_configured_role_is_skipped() {
        let config = GameConfig::empty()
            .with_role("Alchemist", RoleQuota::guaranteed(3, 3))
            .with_role("Seer", RoleQuota::new(1));
        let (pool, quotas) = configured_pool(&config, &catalog());

        assert_eq!(pool.len(), 1);
        assert!(quotas.is_empty());
    }

    #[test]
    fn test_deal_sizes() {
        let mut rng = StdRng::seed_from_u64(7);
        let assignment =
            build_and_assign_roles(&seats(5), &GameConfig::default(), &catalog(), &mut rng)
                .unwrap();

        assert_eq!(assignment.players.len(), 5);
        assert_eq!(assignment.center.len(), 3);
        // 2 Villagers + 2 Werewolves configured, 4 fillers cycling Seer, Tanner.
        assert_eq!(count(&assignment, "Villager"), 2);
        assert_eq!(count(&assignment, "Werewolf"), 2);
        assert_eq!(count(&assignment, "Seer"), 2);
        assert_eq!(count(&assignment, "Tanner"), 2);
    }

    #[test]
    fn test_seats_keep_their_order_and_names() {
        let mut rng = StdRng::seed_from_u64(1);
        let assignment =
            build_and_assign_roles(&seats(3), &GameConfig::default(), &catalog(), &mut rng)
                .unwrap();

        let ids: Vec<&str> = assignment.players.iter().map(|p| p.id.0.as_str()).collect();
        assert_eq!(ids, ["p0", "p1", "p2"]);
        assert_eq!(assignment.players[1].name, "Player 1");
    }

    #[test]
    fn test_empty_catalog_is_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        let err = build_and_assign_roles(&seats(3), &GameConfig::default(), &[], &mut rng)
            .unwrap_err();
        assert!(matches!(err, ConfigError::EmptyCatalog));
    }

    #[test]
    fn test_duplicate_seat_is_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut table = seats(2);
        table.push(Seat::new("p0", "Again"));
        let err = build_and_assign_roles(&table, &GameConfig::default(), &catalog(), &mut rng)
            .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicatePlayer(ref id) if id.0 == "p0"));
    }

    #[test]
    fn test_center_prefixed_seat_is_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut table = seats(2);
        table.push(Seat::new("center-0", "Sneaky"));
        let err = build_and_assign_roles(&table, &GameConfig::default(), &catalog(), &mut rng)
            .unwrap_err();
        assert!(matches!(err, ConfigError::ReservedPlayerId(ref id) if id.0 == "center-0"));
    }

    #[test]
    fn test_role_of_finds_each_seat() {
        let mut rng = StdRng::seed_from_u64(5);
        let assignment =
            build_and_assign_roles(&seats(3), &GameConfig::default(), &catalog(), &mut rng)
                .unwrap();

        for player in &assignment.players {
            assert_eq!(assignment.role_of(&player.id), Some(&player.role));
        }
        assert_eq!(assignment.role_of(&PlayerId::from("nobody")), None);
    }

    #[test]
    fn test_surplus_configured_cards_are_left_out() {
        let mut rng = StdRng::seed_from_u64(3);
        let config = GameConfig::empty().with_role("Villager", RoleQuota::new(10));
        let assignment =
            build_and_assign_roles(&seats(2), &config, &catalog(), &mut rng).unwrap();

        assert_eq!(assignment.players.len(), 2);
        assert_eq!(assignment.center.len(), 3);
        assert_eq!(count(&assignment, "Villager"), 5);
    }
}
