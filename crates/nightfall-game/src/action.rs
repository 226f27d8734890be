//! Night action resolution.
//!
//! Every action is checked in full by [`validate_targets`] before the
//! session is touched, so a rejected action never leaves a half-applied
//! swap behind.

use std::collections::HashSet;

use nightfall_protocol::{
    ActionInfo, ActionResult, PlayerId, Role, RoleAction, TargetId, TargetType,
};

use crate::turn::ActorRef;
use crate::{GameError, GameSession};

/// Checks that `targets` are a legal selection for `role` acting as
/// `actor`.
///
/// Every target must exist and appear once, be of a kind the role may
/// select (the actor's own seat counts as [`TargetType::Own`]), and the
/// number of targets must fit both the action and `max_targets`.
///
/// # Errors
/// [`GameError::InvalidTarget`] describing the first problem found, or
/// [`GameError::UnknownAction`] for an action the engine can't resolve.
pub fn validate_targets(
    role: &Role,
    actor: &PlayerId,
    targets: &[TargetId],
    session: &GameSession,
) -> Result<(), GameError> {
    let mut seen = HashSet::with_capacity(targets.len());
    for target in targets {
        session.role_at(target)?;
        if !seen.insert(target) {
            return Err(GameError::InvalidTarget(format!("{target} selected twice")));
        }
        let kind = target_kind(target, actor);
        if !role.allows(kind) {
            return Err(GameError::InvalidTarget(format!(
                "{} cannot target {target}",
                role.name
            )));
        }
    }

    if targets.len() > role.max_targets {
        return Err(GameError::InvalidTarget(format!(
            "{} takes at most {} target(s), got {}",
            role.name,
            role.max_targets,
            targets.len()
        )));
    }

    let arity = |expected: &str| {
        GameError::InvalidTarget(format!(
            "{} needs {expected}, got {} target(s)",
            role.name,
            targets.len()
        ))
    };

    match role.action {
        RoleAction::None if targets.is_empty() => Ok(()),
        RoleAction::None => Err(arity("no targets")),
        RoleAction::Peek if !targets.is_empty() => Ok(()),
        RoleAction::Peek => Err(arity("at least one target")),
        RoleAction::SwapSelf => match targets {
            [target] if target_kind(target, actor) != TargetType::Own => Ok(()),
            [_] => Err(GameError::InvalidTarget("cannot swap with yourself".into())),
            _ => Err(arity("exactly one target")),
        },
        RoleAction::SwapTwo => match targets {
            [first, second]
                if [first, second]
                    .iter()
                    .all(|t| target_kind(t, actor) == TargetType::Player) =>
            {
                Ok(())
            }
            _ => Err(arity("two other players")),
        },
        RoleAction::SwapCenter => match targets {
            [first, second] if first.is_center() && second.is_center() => Ok(()),
            _ => Err(arity("two center cards")),
        },
        RoleAction::Unsupported => Err(GameError::UnknownAction(role.name.clone())),
    }
}

fn target_kind(target: &TargetId, actor: &PlayerId) -> TargetType {
    match target {
        TargetId::Player(id) if id == actor => TargetType::Own,
        TargetId::Player(_) => TargetType::Player,
        TargetId::Center(_) => TargetType::Center,
    }
}

impl GameSession {
    /// Performs `player`'s night action against `targets`.
    ///
    /// The action is always the one of the player's *original* role, even
    /// if their card has since been swapped away. On success the turn is
    /// marked as spent; the cursor is left where it is.
    ///
    /// | action       | effect                                   | revealed        |
    /// |--------------|------------------------------------------|-----------------|
    /// | `none`       | nothing                                  | nothing         |
    /// | `peek`       | nothing                                  | each target     |
    /// | `swapSelf`   | actor trades cards with the target       | new card*       |
    /// | `swapTwo`    | the two players trade cards              | nothing         |
    /// | `swapCenter` | the two center cards trade places        | nothing         |
    ///
    /// *Only when the target is a player. Taking a center card reveals
    /// nothing.
    ///
    /// # Errors
    /// - [`GameError::NotInGame`]: `player` isn't seated
    /// - [`GameError::NotYourTurn`]: another role is awake
    /// - [`GameError::UnknownAction`]: the role's action can't be resolved
    /// - [`GameError::InvalidTarget`]: see [`validate_targets`]
    pub fn resolve_action(
        &mut self,
        player: &PlayerId,
        targets: &[TargetId],
    ) -> Result<ActionResult, GameError> {
        let actor_index = self
            .player_index(player)
            .map_err(|_| GameError::NotInGame(player.clone()))?;
        if !self.is_actors_turn(player) {
            return Err(GameError::NotYourTurn(player.clone()));
        }

        let original = self.players[actor_index].original_role().clone();
        if original.action == RoleAction::Unsupported {
            return Err(GameError::UnknownAction(original.name));
        }
        validate_targets(&original, player, targets, self)?;

        let info = self.apply_action(original.action, actor_index, targets)?;

        self.consume_turn(ActorRef::Player(player.clone()), &original);

        tracing::debug!(
            game_code = %self.game_code,
            player = %player,
            role = %original.name,
            action = ?original.action,
            targets = targets.len(),
            "night action resolved"
        );

        Ok(ActionResult {
            game_code: self.game_code.clone(),
            player_id: player.clone(),
            action: original.action,
            info,
            target_ids: targets.to_vec(),
        })
    }

    /// Applies an already validated action; `actor_index` is the acting
    /// seat. A target shape the action doesn't take is rejected untouched.
    fn apply_action(
        &mut self,
        action: RoleAction,
        actor_index: usize,
        targets: &[TargetId],
    ) -> Result<ActionInfo, GameError> {
        let info = match (action, targets) {
            (RoleAction::None, []) => ActionInfo::empty(),
            (RoleAction::Peek, _) => {
                let seen = targets
                    .iter()
                    .map(|t| self.role_at(t).cloned())
                    .collect::<Result<Vec<_>, _>>()?;
                ActionInfo {
                    seen_roles: Some(seen),
                    swapped_role: None,
                }
            }
            (RoleAction::SwapSelf, [TargetId::Player(other)]) => {
                let other = self.player_index(other)?;
                self.swap_players(actor_index, other);
                ActionInfo {
                    seen_roles: None,
                    swapped_role: Some(self.players[actor_index].current_role().clone()),
                }
            }
            (RoleAction::SwapSelf, [TargetId::Center(slot)]) => {
                let slot = self.center_index(*slot)?;
                let taken = self.center[slot].role.clone();
                let given = self.players[actor_index].current_role().clone();
                self.center[slot].role = given;
                self.players[actor_index].hold(taken);
                ActionInfo::empty()
            }
            (RoleAction::SwapTwo, [TargetId::Player(first), TargetId::Player(second)]) => {
                let first = self.player_index(first)?;
                let second = self.player_index(second)?;
                self.swap_players(first, second);
                ActionInfo::empty()
            }
            (RoleAction::SwapCenter, [TargetId::Center(first), TargetId::Center(second)]) => {
                let first = self.center_index(*first)?;
                let second = self.center_index(*second)?;
                let first_role = self.center[first].role.clone();
                self.center[first].role = self.center[second].role.clone();
                self.center[second].role = first_role;
                ActionInfo::empty()
            }
            (action, _) => {
                return Err(GameError::InvalidTarget(format!(
                    "{action:?} cannot be applied to {} target(s)",
                    targets.len()
                )));
            }
        };
        Ok(info)
    }

    /// Exchanges the current cards of two players, recording both.
    fn swap_players(&mut self, a: usize, b: usize) {
        let role_a = self.players[a].current_role().clone();
        let role_b = self.players[b].current_role().clone();
        self.players[a].hold(role_b);
        self.players[b].hold(role_a);
    }
}
