//! Turn sequencing.
//!
//! The night runs through every *actor* (a player whose dealt role wakes
//! up, or a center card whose current role wakes up) in ascending night
//! order:
//!
//! ```text
//! actors:  [a: Werewolf(1)] [c: Werewolf(1)] [center-1: Seer(2)] [b: Robber(3)]
//!                  ▲
//!             actor_index
//! ```
//!
//! The sequence is rebuilt from the session on every query. `peek_turn`
//! scans forward from the cursor to the first actor whose turn hasn't
//! been spent; `advance_turn` steps the cursor by one and parks it on
//! the next such actor.

use nightfall_protocol::{PlayerId, Role};
use nightfall_roles::TurnPolicy;
use serde::{Deserialize, Serialize};

use crate::GameSession;

/// Who is taking a turn.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ActorRef {
    /// A seated player, acting with their original role.
    Player(PlayerId),
    /// A center card whose role wakes up. Nobody can act for it; the
    /// boundary layer simply lets its turn pass.
    Center(usize),
}

/// One entry of the actor sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub actor: ActorRef,
    pub role: Role,
}

impl GameSession {
    /// The actor sequence, sorted by night order.
    ///
    /// Players are listed by their original role, center slots by their
    /// current role. The sort is stable: at equal night order, players
    /// come before center slots, each in seat order. Roles without a
    /// night order are not actors.
    pub fn actors(&self) -> Vec<Turn> {
        let players = self.players.iter().map(|p| Turn {
            actor: ActorRef::Player(p.id().clone()),
            role: p.original_role().clone(),
        });
        let center = self.center.iter().map(|slot| Turn {
            actor: ActorRef::Center(slot.index),
            role: slot.role.clone(),
        });

        let mut actors: Vec<Turn> = players
            .chain(center)
            .filter(|turn| turn.role.acts_at_night())
            .collect();
        actors.sort_by_key(|turn| turn.role.night_order);
        actors
    }

    /// The turn currently up, or `None` once the night is over.
    ///
    /// Calling this any number of times without an intervening
    /// [`advance_turn`](Self::advance_turn) returns the same turn.
    pub fn peek_turn(&self) -> Option<Turn> {
        let actors = self.actors();
        self.scan(&actors).map(|(_, turn)| turn.clone())
    }

    /// Steps the cursor forward and returns the next turn.
    ///
    /// The cursor moves one position, then on to the first actor whose
    /// turn hasn't been spent, and stays parked there. It only moves
    /// forward and never past the end of the actor sequence; once this
    /// returns `None` it keeps returning `None`.
    pub fn advance_turn(&mut self) -> Option<Turn> {
        let actors = self.actors();
        let stepped = (self.actor_index + 1).min(actors.len());
        self.actor_index = self.actor_index.max(stepped);

        let next = match self.scan(&actors) {
            Some((index, turn)) => {
                self.actor_index = index;
                Some(turn.clone())
            }
            None => {
                self.actor_index = self.actor_index.max(actors.len());
                None
            }
        };

        tracing::debug!(
            game_code = %self.game_code,
            actor_index = self.actor_index,
            role = next.as_ref().map(|t| t.role.name.as_str()).unwrap_or("-"),
            "turn advanced"
        );
        next
    }

    /// Returns `true` if `player` may act now.
    ///
    /// Under [`TurnPolicy::PerRole`] any player whose original role is the
    /// role currently awake may act (two Werewolves share one turn).
    /// Under [`TurnPolicy::PerInstance`] only the exact actor may.
    pub fn is_actors_turn(&self, player: &PlayerId) -> bool {
        let Some(turn) = self.peek_turn() else {
            return false;
        };
        let Some(seated) = self.player(player) else {
            return false;
        };
        match self.turn_policy {
            TurnPolicy::PerRole => turn.role.id == seated.original_role().id,
            TurnPolicy::PerInstance => turn.actor == ActorRef::Player(player.clone()),
        }
    }

    /// Returns `true` once every actor has acted or been skipped.
    pub fn is_night_over(&self) -> bool {
        self.peek_turn().is_none()
    }

    /// First unspent actor at or after the cursor.
    fn scan<'a>(&self, actors: &'a [Turn]) -> Option<(usize, &'a Turn)> {
        actors
            .iter()
            .enumerate()
            .skip(self.actor_index)
            .find(|(_, turn)| !self.is_spent(turn))
    }

    fn is_spent(&self, turn: &Turn) -> bool {
        match self.turn_policy {
            TurnPolicy::PerRole => self.used_role_ids.contains(&turn.role.id),
            TurnPolicy::PerInstance => self.used_actors.contains(&turn.actor),
        }
    }

    /// Marks `actor`'s turn as spent.
    pub(crate) fn consume_turn(&mut self, actor: ActorRef, original_role: &Role) {
        self.used_role_ids.insert(original_role.id.clone());
        self.used_actors.insert(actor);
    }
}
