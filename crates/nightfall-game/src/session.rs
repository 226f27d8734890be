//! Game session: the mutable state of one game.
//!
//! A session is created from a [`RoleAssignment`] when the game starts and
//! lives until the room closes. It is plain data: the turn, action, and
//! vote logic live in sibling modules as `impl GameSession` blocks, and
//! the actor task in `actor.rs` is the only owner at runtime.

use std::collections::{BTreeMap, BTreeSet};

use nightfall_protocol::{GameCode, PlayerId, Role, RoleId, TargetId};
use nightfall_roles::{GameConfig, RoleAssignment, TurnPolicy};
use serde::Serialize;

use crate::turn::ActorRef;
use crate::GameError;

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// A seated player and every card they have held.
///
/// The role history is never empty: entry 0 is the card dealt at the
/// start and never changes. Turn eligibility is decided by that original
/// card, not by whatever the player holds after being swapped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    id: PlayerId,
    name: String,
    current_role: Role,
    role_history: Vec<Role>,
}

impl Player {
    /// Seats a player with their dealt role.
    pub fn new(id: PlayerId, name: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            name: name.into(),
            current_role: role.clone(),
            role_history: vec![role],
        }
    }

    pub fn id(&self) -> &PlayerId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The card the player holds right now.
    pub fn current_role(&self) -> &Role {
        &self.current_role
    }

    /// The card dealt at game start.
    pub fn original_role(&self) -> &Role {
        &self.role_history[0]
    }

    /// Every card held, oldest first.
    pub fn role_history(&self) -> &[Role] {
        &self.role_history
    }

    /// Takes `role` as the new current card and records it.
    pub(crate) fn hold(&mut self, role: Role) {
        self.role_history.push(role.clone());
        self.current_role = role;
    }
}

// ---------------------------------------------------------------------------
// CenterSlot
// ---------------------------------------------------------------------------

/// One face-down center card. Center slots keep no history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CenterSlot {
    pub(crate) index: usize,
    pub(crate) role: Role,
}

impl CenterSlot {
    /// The slot's synthetic target id (`center-<index>`).
    pub fn id(&self) -> TargetId {
        TargetId::Center(self.index)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn role(&self) -> &Role {
        &self.role
    }
}

// ---------------------------------------------------------------------------
// GameSession
// ---------------------------------------------------------------------------

/// All mutable state of one game.
///
/// Turn order is not stored: it is recomputed from the players' original
/// roles and the center cards on every query. The only turn bookkeeping
/// is the cursor (`actor_index`) and the set of consumed turns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSession {
    pub(crate) game_code: GameCode,
    pub(crate) players: Vec<Player>,
    pub(crate) center: Vec<CenterSlot>,

    /// Cursor into the sorted actor sequence. Only moves forward.
    pub(crate) actor_index: usize,

    /// Original role ids of every actor that has acted. Under
    /// [`TurnPolicy::PerRole`] this alone decides which turns are spent.
    pub(crate) used_role_ids: BTreeSet<RoleId>,

    /// Every actor that has acted. Consulted under
    /// [`TurnPolicy::PerInstance`].
    pub(crate) used_actors: BTreeSet<ActorRef>,

    /// Voter → target. Last vote per voter wins.
    pub(crate) votes: BTreeMap<PlayerId, PlayerId>,

    pub(crate) turn_policy: TurnPolicy,
    pub(crate) adversary_role: String,
}

impl GameSession {
    /// Creates the session for a freshly dealt game.
    pub fn new(game_code: GameCode, assignment: RoleAssignment, config: &GameConfig) -> Self {
        let players = assignment
            .players
            .into_iter()
            .map(|p| Player::new(p.id, p.name, p.role))
            .collect();
        let center = assignment
            .center
            .into_iter()
            .enumerate()
            .map(|(index, role)| CenterSlot { index, role })
            .collect();

        Self {
            game_code,
            players,
            center,
            actor_index: 0,
            used_role_ids: BTreeSet::new(),
            used_actors: BTreeSet::new(),
            votes: BTreeMap::new(),
            turn_policy: config.turn_policy,
            adversary_role: config.adversary_role.clone(),
        }
    }

    pub fn game_code(&self) -> &GameCode {
        &self.game_code
    }

    /// Players in seat order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn center(&self) -> &[CenterSlot] {
        &self.center
    }

    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == id)
    }

    pub fn actor_index(&self) -> usize {
        self.actor_index
    }

    pub fn used_role_ids(&self) -> &BTreeSet<RoleId> {
        &self.used_role_ids
    }

    pub fn turn_policy(&self) -> TurnPolicy {
        self.turn_policy
    }

    /// The current role behind a target, without revealing anything to
    /// anyone.
    ///
    /// # Errors
    /// [`GameError::InvalidTarget`] if no such player or slot exists.
    pub fn role_at(&self, target: &TargetId) -> Result<&Role, GameError> {
        match target {
            TargetId::Player(id) => self
                .player(id)
                .map(|p| &p.current_role)
                .ok_or_else(|| GameError::InvalidTarget(format!("no player {id}"))),
            TargetId::Center(index) => self
                .center
                .get(*index)
                .map(|slot| &slot.role)
                .ok_or_else(|| GameError::InvalidTarget(format!("no center slot {index}"))),
        }
    }

    pub(crate) fn player_index(&self, id: &PlayerId) -> Result<usize, GameError> {
        self.players
            .iter()
            .position(|p| &p.id == id)
            .ok_or_else(|| GameError::InvalidTarget(format!("no player {id}")))
    }

    pub(crate) fn center_index(&self, index: usize) -> Result<usize, GameError> {
        if index < self.center.len() {
            Ok(index)
        } else {
            Err(GameError::InvalidTarget(format!("no center slot {index}")))
        }
    }
}
