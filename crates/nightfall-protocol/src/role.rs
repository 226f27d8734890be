//! Role definitions as supplied by the role catalog.
//!
//! A [`Role`] is immutable game data: the catalog owns the definitions,
//! and a running game only ever holds clones of them. The serialized form
//! uses camelCase field names (`nightOrder`, `actionType`, ...) because
//! that is what the role store and the browser clients exchange.

use serde::{Deserialize, Serialize};

use crate::RoleId;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// How a role wins once the votes are in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WinCondition {
    /// Wins alone by being eliminated (e.g. the Tanner).
    Solo,
    /// Wins if nobody holding this same role is eliminated.
    StayingAlive,
    /// Wins if every holder of the adversary role is eliminated.
    KillingEvil,
}

/// What a role may do during its night turn.
///
/// `#[serde(other)]` catches action strings this engine does not know
/// (a role store ahead of the engine, a typo in an admin form). Such
/// roles still load, but resolving their turn fails with an
/// unknown-action error instead of the whole catalog failing to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RoleAction {
    /// Wakes up but does nothing.
    None,
    /// Looks at one or more cards without moving them.
    Peek,
    /// Exchanges the actor's own card with another player's or a center card.
    SwapSelf,
    /// Exchanges the cards of two other players.
    SwapTwo,
    /// Exchanges two center cards.
    SwapCenter,
    /// Any action name not listed above.
    #[serde(other)]
    Unsupported,
}

/// The kinds of target a role's action may select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetType {
    /// The acting player themself.
    #[serde(rename = "self")]
    Own,
    /// Another seated player.
    Player,
    /// A center slot.
    Center,
}

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// A role definition from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    /// Catalog id. Shared by every instance of this role in a game.
    pub id: RoleId,

    /// Display name, also used to match configuration entries and the
    /// adversary role.
    pub name: String,

    /// Rank in the night order, lowest first. `None` means the role
    /// never takes a night turn.
    #[serde(default)]
    pub night_order: Option<i32>,

    /// How the holder of this role wins.
    pub win_condition: WinCondition,

    /// What the role does during its night turn.
    #[serde(rename = "actionType")]
    pub action: RoleAction,

    /// Which kinds of target the action may select.
    #[serde(default)]
    pub target_types: Vec<TargetType>,

    /// Upper bound on the number of targets.
    #[serde(default)]
    pub max_targets: usize,
}

impl Role {
    /// Creates a role that never wakes up at night.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        win_condition: WinCondition,
    ) -> Self {
        Self {
            id: RoleId(id.into()),
            name: name.into(),
            night_order: None,
            win_condition,
            action: RoleAction::None,
            target_types: Vec::new(),
            max_targets: 0,
        }
    }

    /// Sets the night order rank.
    pub fn with_night_order(mut self, order: i32) -> Self {
        self.night_order = Some(order);
        self
    }

    /// Sets the night action together with its target constraints.
    pub fn with_action(
        mut self,
        action: RoleAction,
        target_types: &[TargetType],
        max_targets: usize,
    ) -> Self {
        self.action = action;
        self.target_types = target_types.to_vec();
        self.max_targets = max_targets;
        self
    }

    /// Returns `true` if this role takes a night turn.
    pub fn acts_at_night(&self) -> bool {
        self.night_order.is_some()
    }

    /// Returns `true` if the action may select targets of `kind`.
    pub fn allows(&self, kind: TargetType) -> bool {
        self.target_types.contains(&kind)
    }
}
