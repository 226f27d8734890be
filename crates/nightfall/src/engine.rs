//! `Engine` builder and the operations the boundary layer calls.
//!
//! The engine ties the layers together: catalog → role pool → game
//! actors. It holds no per-game state itself; every game lives in its
//! own actor, and the engine only looks up the right handle.

use std::collections::{BTreeMap, BTreeSet};

use nightfall_game::{GameHandle, GameSession, GameStore, Outcome, Turn};
use nightfall_protocol::{ActionResult, GameCode, PlayerId, Role, TargetId};
use nightfall_roles::{GameConfig, RoleAssignment, RoleCatalog, Seat};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};

use crate::NightfallError;

/// Engine-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Mailbox size of each game actor.
    pub channel_size: usize,

    /// Seed for dealing. `None` seeds from the operating system.
    pub rng_seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            channel_size: nightfall_game::DEFAULT_CHANNEL_SIZE,
            rng_seed: None,
        }
    }
}

impl EngineConfig {
    /// Parses engine settings from JSON; missing fields keep their
    /// defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Builder for an [`Engine`].
///
/// # Example
///
/// ```rust
/// use nightfall::prelude::*;
///
/// let engine = EngineBuilder::new()
///     .rng_seed(7)
///     .build(StaticCatalog::standard());
/// # let _ = engine;
/// ```
#[derive(Debug, Clone, Default)]
pub struct EngineBuilder {
    config: EngineConfig,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces every setting at once.
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the mailbox size of each game actor.
    pub fn channel_size(mut self, size: usize) -> Self {
        self.config.channel_size = size;
        self
    }

    /// Makes every deal reproducible.
    pub fn rng_seed(mut self, seed: u64) -> Self {
        self.config.rng_seed = Some(seed);
        self
    }

    /// Builds the engine on top of `catalog`.
    pub fn build<C: RoleCatalog>(self, catalog: C) -> Engine<C> {
        let rng = match self.config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Engine {
            catalog,
            games: RwLock::new(GameStore::new(self.config.channel_size)),
            rng: Mutex::new(rng),
        }
    }
}

/// The night-phase engine.
///
/// Share it between connection handlers behind an `Arc`. The store lock
/// is only held long enough to look up or register a game; the game
/// itself is driven through its actor without holding any lock.
pub struct Engine<C: RoleCatalog> {
    catalog: C,
    games: RwLock<GameStore>,
    rng: Mutex<StdRng>,
}

impl<C: RoleCatalog> Engine<C> {
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Deals roles for `seats` without starting a game.
    ///
    /// # Errors
    /// [`NightfallError::Catalog`] if the catalog can't be read, or
    /// [`NightfallError::Config`] if no pool can be built.
    pub async fn build_and_assign_roles(
        &self,
        seats: &[Seat],
        config: &GameConfig,
    ) -> Result<RoleAssignment, NightfallError> {
        let roles = self.catalog.list_roles().await?;
        let mut rng = self.rng.lock().await;
        let assignment =
            nightfall_roles::build_and_assign_roles(seats, config, &roles, &mut *rng)?;
        Ok(assignment)
    }

    /// Deals roles and starts the night for a new game.
    ///
    /// Returns the deal so the boundary layer can tell each player their
    /// card.
    ///
    /// # Errors
    /// Anything from [`build_and_assign_roles`](Self::build_and_assign_roles),
    /// or `GameError::AlreadyExists` if `game_code` is taken.
    pub async fn start_game(
        &self,
        game_code: GameCode,
        seats: &[Seat],
        config: &GameConfig,
    ) -> Result<RoleAssignment, NightfallError> {
        if self.games.read().await.contains(&game_code) {
            return Err(nightfall_game::GameError::AlreadyExists(game_code).into());
        }

        let assignment = self.build_and_assign_roles(seats, config).await?;
        let session = GameSession::new(game_code.clone(), assignment.clone(), config);
        self.games.write().await.create(session)?;

        tracing::info!(
            %game_code,
            players = seats.len(),
            center = assignment.center.len(),
            "game started"
        );
        Ok(assignment)
    }

    /// The role awake now, or `None` once the night is over.
    pub async fn current_turn_role(
        &self,
        game_code: &GameCode,
    ) -> Result<Option<Role>, NightfallError> {
        Ok(self.current_turn(game_code).await?.map(|turn| turn.role))
    }

    /// The full current turn, including who holds it.
    pub async fn current_turn(
        &self,
        game_code: &GameCode,
    ) -> Result<Option<Turn>, NightfallError> {
        Ok(self.game(game_code).await?.current_turn().await?)
    }

    /// Moves to the next turn and returns its role.
    pub async fn advance_turn(
        &self,
        game_code: &GameCode,
    ) -> Result<Option<Role>, NightfallError> {
        let next = self.game(game_code).await?.advance_turn().await?;
        Ok(next.map(|turn| turn.role))
    }

    pub async fn is_players_turn(
        &self,
        game_code: &GameCode,
        player: &PlayerId,
    ) -> Result<bool, NightfallError> {
        Ok(self
            .game(game_code)
            .await?
            .is_players_turn(player.clone())
            .await?)
    }

    /// Resolves `player`'s night action.
    ///
    /// On success the turn advances in the same step, so the next
    /// [`current_turn_role`](Self::current_turn_role) already reflects
    /// it. On error nothing changes.
    pub async fn resolve_action(
        &self,
        game_code: &GameCode,
        player: &PlayerId,
        targets: &[TargetId],
    ) -> Result<ActionResult, NightfallError> {
        let resolution = self
            .game(game_code)
            .await?
            .resolve_action(player.clone(), targets.to_vec())
            .await?;
        Ok(resolution.result)
    }

    /// Records a vote and returns every vote cast so far.
    pub async fn record_vote(
        &self,
        game_code: &GameCode,
        voter: &PlayerId,
        target: &PlayerId,
    ) -> Result<BTreeMap<PlayerId, PlayerId>, NightfallError> {
        let votes = self
            .game(game_code)
            .await?
            .record_vote(voter.clone(), target.clone())
            .await?;
        tracing::debug!(%game_code, %voter, %target, votes = votes.len(), "vote recorded");
        Ok(votes)
    }

    pub async fn compute_winners(
        &self,
        game_code: &GameCode,
    ) -> Result<BTreeSet<PlayerId>, NightfallError> {
        Ok(self.game(game_code).await?.compute_winners().await?)
    }

    /// Votes, eliminations, winners, and every final card.
    pub async fn outcome(&self, game_code: &GameCode) -> Result<Outcome, NightfallError> {
        Ok(self.game(game_code).await?.outcome().await?)
    }

    /// A copy of the whole session, hidden roles included.
    pub async fn snapshot(&self, game_code: &GameCode) -> Result<GameSession, NightfallError> {
        Ok(self.game(game_code).await?.snapshot().await?)
    }

    /// Stops a game and forgets it.
    pub async fn close_game(&self, game_code: &GameCode) -> Result<(), NightfallError> {
        self.games.write().await.remove(game_code).await?;
        Ok(())
    }

    /// Number of running games.
    pub async fn game_count(&self) -> usize {
        self.games.read().await.len()
    }

    /// Clones the game's handle out of the store; the lock is released
    /// before the handle is used.
    async fn game(&self, game_code: &GameCode) -> Result<GameHandle, NightfallError> {
        Ok(self.games.read().await.get(game_code)?)
    }
}

/// Parses raw target ids such as `"center-0"` or a player id.
///
/// # Errors
/// [`NightfallError::Protocol`] for the first id that doesn't parse.
pub fn parse_targets<S: AsRef<str>>(raw: &[S]) -> Result<Vec<TargetId>, NightfallError> {
    raw.iter()
        .map(|id| id.as_ref().parse::<TargetId>().map_err(NightfallError::from))
        .collect()
}
