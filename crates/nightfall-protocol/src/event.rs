//! What the engine reports back to its callers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{GameCode, PlayerId, Role, RoleAction, TargetId};

// ---------------------------------------------------------------------------
// ActionResult
// ---------------------------------------------------------------------------

/// Information revealed to the acting player by their night action.
///
/// Both fields are absent for actions that reveal nothing (`none`,
/// `swapTwo`, `swapCenter`, and a `swapSelf` with a center card).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionInfo {
    /// Roles seen by a peek, in the same order as the requested targets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seen_roles: Option<Vec<Role>>,

    /// The role the actor now holds after swapping with another player.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swapped_role: Option<Role>,
}

impl ActionInfo {
    /// An info block that reveals nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns `true` if nothing is revealed.
    pub fn is_empty(&self) -> bool {
        self.seen_roles.is_none() && self.swapped_role.is_none()
    }
}

/// The outcome of one resolved night action.
///
/// This is sent only to the acting player; it may contain hidden roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResult {
    pub game_code: GameCode,
    pub player_id: PlayerId,
    /// The action that was performed (the actor's original role's action).
    pub action: RoleAction,
    pub info: ActionInfo,
    /// The targets as requested, echoed back in order.
    pub target_ids: Vec<TargetId>,
}

// ---------------------------------------------------------------------------
// GameEvent
// ---------------------------------------------------------------------------

/// Events the boundary layer broadcasts to the players of a room.
///
/// `#[serde(tag = "type")]` produces internally tagged JSON
/// (`{ "type": "CurrentTurn", "role": ... }`), which the web client
/// switches on directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// Roles have been dealt and the night begins.
    GameStarted { game_code: GameCode, players: usize },

    /// Whose role is awake now. `None` once the night is over.
    CurrentTurn { role: Option<Role> },

    /// A player's action was resolved (sent to that player only).
    ActionResolved { result: ActionResult },

    /// The current vote map after a vote was cast.
    VoteRecorded { votes: BTreeMap<PlayerId, PlayerId> },

    /// Voting closed; the winners and the eliminated players.
    GameOver {
        winners: Vec<PlayerId>,
        eliminated: Vec<PlayerId>,
    },

    /// Something went wrong handling a client's request.
    Error { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WinCondition;

    #[test]
    fn test_empty_info_serializes_to_empty_object() {
        let json = serde_json::to_string(&ActionInfo::empty()).unwrap();
        assert_eq!(json, "{}");
        assert!(ActionInfo::empty().is_empty());
    }

    #[test]
    fn test_action_result_uses_camel_case() {
        let result = ActionResult {
            game_code: GameCode::from("G1"),
            player_id: PlayerId::from("p1"),
            action: RoleAction::SwapSelf,
            info: ActionInfo {
                seen_roles: None,
                swapped_role: Some(Role::new("w", "Werewolf", WinCondition::StayingAlive)),
            },
            target_ids: vec![TargetId::player("p2")],
        };

        let json: serde_json::Value = serde_json::to_value(&result).unwrap();

        assert_eq!(json["gameCode"], "G1");
        assert_eq!(json["action"], "swapSelf");
        assert_eq!(json["targetIds"][0], "p2");
        assert_eq!(json["info"]["swappedRole"]["name"], "Werewolf");
        assert!(json["info"].get("seenRoles").is_none());
    }
}
