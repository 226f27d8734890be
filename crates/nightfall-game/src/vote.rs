//! Voting and win evaluation.
//!
//! Everything here except [`GameSession::record_vote`] is a pure function
//! of the session: computing winners any number of times never changes
//! the game.

use std::collections::{BTreeMap, BTreeSet};

use nightfall_protocol::{GameEvent, PlayerId, Role, WinCondition};
use serde::Serialize;

use crate::{GameError, GameSession};

/// Everything known once voting has closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcome {
    /// Votes received, per player who received any.
    pub tally: BTreeMap<PlayerId, usize>,
    pub eliminated: BTreeSet<PlayerId>,
    pub winners: BTreeSet<PlayerId>,
    /// The card each player ended the night with.
    pub final_roles: BTreeMap<PlayerId, Role>,
    /// The center cards after the night, by slot.
    pub center: Vec<Role>,
}

impl Outcome {
    /// The event announcing the end of the game.
    pub fn game_over_event(&self) -> GameEvent {
        GameEvent::GameOver {
            winners: self.winners.iter().cloned().collect(),
            eliminated: self.eliminated.iter().cloned().collect(),
        }
    }
}

impl GameSession {
    /// Records `voter`'s vote against `target`, replacing any earlier vote
    /// by the same voter, and returns the current vote map.
    ///
    /// # Errors
    /// - [`GameError::NotInGame`] if the voter isn't seated
    /// - [`GameError::InvalidTarget`] if the target isn't seated
    pub fn record_vote(
        &mut self,
        voter: &PlayerId,
        target: &PlayerId,
    ) -> Result<BTreeMap<PlayerId, PlayerId>, GameError> {
        if self.player(voter).is_none() {
            return Err(GameError::NotInGame(voter.clone()));
        }
        if self.player(target).is_none() {
            return Err(GameError::InvalidTarget(format!("no player {target}")));
        }

        if let Some(previous) = self.votes.insert(voter.clone(), target.clone()) {
            tracing::debug!(
                game_code = %self.game_code,
                %voter,
                %previous,
                %target,
                "vote changed"
            );
        }
        Ok(self.votes.clone())
    }

    pub fn votes(&self) -> &BTreeMap<PlayerId, PlayerId> {
        &self.votes
    }

    /// Votes received per target.
    pub fn tally(&self) -> BTreeMap<PlayerId, usize> {
        let mut tally = BTreeMap::new();
        for target in self.votes.values() {
            *tally.entry(target.clone()).or_insert(0) += 1;
        }
        tally
    }

    /// Every player with the highest vote count, players without votes
    /// counting zero. Ties are eliminated together, so with no votes cast
    /// the whole table is.
    pub fn eliminated(&self) -> BTreeSet<PlayerId> {
        let tally = self.tally();
        let count = |id: &PlayerId| tally.get(id).copied().unwrap_or(0);
        let max_votes = self.players.iter().map(|p| count(p.id())).max().unwrap_or(0);

        self.players
            .iter()
            .filter(|p| count(p.id()) == max_votes)
            .map(|p| p.id().clone())
            .collect()
    }

    /// Applies each player's final win condition to the vote result.
    ///
    /// - `SOLO` wins alone if eliminated, discarding every other winner.
    /// - `STAYING_ALIVE` wins if nobody holding the same role is
    ///   eliminated.
    /// - `KILLING_EVIL` wins if every holder of the adversary role is
    ///   eliminated.
    ///
    /// Players are evaluated in seat order, so with several eliminated
    /// `SOLO` players the first seated one wins.
    pub fn compute_winners(&self) -> BTreeSet<PlayerId> {
        let eliminated = self.eliminated();
        let mut winners = BTreeSet::new();

        for player in &self.players {
            let role = player.current_role();
            let wins = match role.win_condition {
                WinCondition::Solo => {
                    if eliminated.contains(player.id()) {
                        return BTreeSet::from([player.id().clone()]);
                    }
                    false
                }
                WinCondition::StayingAlive => self
                    .players
                    .iter()
                    .filter(|p| p.current_role().id == role.id)
                    .all(|p| !eliminated.contains(p.id())),
                WinCondition::KillingEvil => self
                    .players
                    .iter()
                    .filter(|p| p.current_role().name == self.adversary_role)
                    .all(|p| eliminated.contains(p.id())),
            };
            if wins {
                winners.insert(player.id().clone());
            }
        }

        winners
    }

    /// Tally, eliminations, winners, and the final cards in one report.
    pub fn outcome(&self) -> Outcome {
        Outcome {
            tally: self.tally(),
            eliminated: self.eliminated(),
            winners: self.compute_winners(),
            final_roles: self
                .players
                .iter()
                .map(|p| (p.id().clone(), p.current_role().clone()))
                .collect(),
            center: self.center.iter().map(|slot| slot.role.clone()).collect(),
        }
    }
}
