//! Game actor: an isolated Tokio task that owns one game session.
//!
//! Every request for a room is a message in that room's mailbox, handled
//! one at a time. A turn check and the mutation it authorizes happen in
//! the same message, so two players can never both be told it's their
//! turn and both act.

use std::collections::{BTreeMap, BTreeSet};

use nightfall_protocol::{ActionResult, GameCode, PlayerId, TargetId};
use tokio::sync::{mpsc, oneshot};

use crate::{GameError, GameSession, Outcome, Turn};

/// Commands sent to a game actor through its channel.
///
/// Every variant except `Shutdown` carries a reply channel.
pub(crate) enum GameCommand {
    CurrentTurn {
        reply: oneshot::Sender<Option<Turn>>,
    },

    AdvanceTurn {
        reply: oneshot::Sender<Option<Turn>>,
    },

    IsPlayersTurn {
        player: PlayerId,
        reply: oneshot::Sender<bool>,
    },

    /// Resolve an action and, if it succeeds, advance the turn.
    ResolveAction {
        player: PlayerId,
        targets: Vec<TargetId>,
        reply: oneshot::Sender<Result<Resolution, GameError>>,
    },

    RecordVote {
        voter: PlayerId,
        target: PlayerId,
        reply: oneshot::Sender<Result<BTreeMap<PlayerId, PlayerId>, GameError>>,
    },

    Winners {
        reply: oneshot::Sender<BTreeSet<PlayerId>>,
    },

    Outcome {
        reply: oneshot::Sender<Outcome>,
    },

    /// A full copy of the session, hidden roles included.
    Snapshot {
        reply: oneshot::Sender<GameSession>,
    },

    Shutdown,
}

/// A resolved action together with the turn that follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// For the acting player only.
    pub result: ActionResult,
    /// For everyone: the role now awake, or `None` once the night is over.
    pub next_turn: Option<Turn>,
}

/// Handle to a running game actor.
///
/// Cheap to clone: it's an `mpsc::Sender` and the room code. Every method
/// fails with [`GameError::Unavailable`] once the actor has stopped.
#[derive(Debug, Clone)]
pub struct GameHandle {
    game_code: GameCode,
    sender: mpsc::Sender<GameCommand>,
}

impl GameHandle {
    pub fn game_code(&self) -> &GameCode {
        &self.game_code
    }

    /// The turn currently up.
    pub async fn current_turn(&self) -> Result<Option<Turn>, GameError> {
        self.request(|reply| GameCommand::CurrentTurn { reply }).await
    }

    /// Moves on to the next turn, e.g. when a turn timer runs out or a
    /// center card's turn has been shown.
    pub async fn advance_turn(&self) -> Result<Option<Turn>, GameError> {
        self.request(|reply| GameCommand::AdvanceTurn { reply }).await
    }

    pub async fn is_players_turn(&self, player: PlayerId) -> Result<bool, GameError> {
        self.request(|reply| GameCommand::IsPlayersTurn { player, reply })
            .await
    }

    /// Resolves `player`'s night action and advances the turn, as one
    /// step.
    pub async fn resolve_action(
        &self,
        player: PlayerId,
        targets: Vec<TargetId>,
    ) -> Result<Resolution, GameError> {
        self.request(|reply| GameCommand::ResolveAction {
            player,
            targets,
            reply,
        })
        .await?
    }

    pub async fn record_vote(
        &self,
        voter: PlayerId,
        target: PlayerId,
    ) -> Result<BTreeMap<PlayerId, PlayerId>, GameError> {
        self.request(|reply| GameCommand::RecordVote {
            voter,
            target,
            reply,
        })
        .await?
    }

    pub async fn compute_winners(&self) -> Result<BTreeSet<PlayerId>, GameError> {
        self.request(|reply| GameCommand::Winners { reply }).await
    }

    pub async fn outcome(&self) -> Result<Outcome, GameError> {
        self.request(|reply| GameCommand::Outcome { reply }).await
    }

    pub async fn snapshot(&self) -> Result<GameSession, GameError> {
        self.request(|reply| GameCommand::Snapshot { reply }).await
    }

    /// Tells the actor to stop. Pending commands queued behind this one
    /// are dropped.
    pub async fn shutdown(&self) -> Result<(), GameError> {
        self.sender
            .send(GameCommand::Shutdown)
            .await
            .map_err(|_| GameError::Unavailable(self.game_code.clone()))
    }

    /// Sends a command built around a fresh reply channel and waits for
    /// the answer.
    async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<T>) -> GameCommand,
    ) -> Result<T, GameError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(command(reply_tx))
            .await
            .map_err(|_| GameError::Unavailable(self.game_code.clone()))?;
        reply_rx
            .await
            .map_err(|_| GameError::Unavailable(self.game_code.clone()))
    }
}

/// The actor state. Runs inside a Tokio task.
struct GameActor {
    session: GameSession,
    receiver: mpsc::Receiver<GameCommand>,
}

impl GameActor {
    /// Runs the actor loop, processing commands until shutdown or until
    /// every handle is dropped.
    async fn run(mut self) {
        let game_code = self.session.game_code().clone();
        tracing::info!(
            %game_code,
            players = self.session.players().len(),
            "game actor started"
        );

        while let Some(cmd) = self.receiver.recv().await {
            match cmd {
                GameCommand::CurrentTurn { reply } => {
                    let _ = reply.send(self.session.peek_turn());
                }
                GameCommand::AdvanceTurn { reply } => {
                    let _ = reply.send(self.session.advance_turn());
                }
                GameCommand::IsPlayersTurn { player, reply } => {
                    let _ = reply.send(self.session.is_actors_turn(&player));
                }
                GameCommand::ResolveAction {
                    player,
                    targets,
                    reply,
                } => {
                    let result = self.handle_action(&player, &targets);
                    let _ = reply.send(result);
                }
                GameCommand::RecordVote {
                    voter,
                    target,
                    reply,
                } => {
                    let _ = reply.send(self.session.record_vote(&voter, &target));
                }
                GameCommand::Winners { reply } => {
                    let _ = reply.send(self.session.compute_winners());
                }
                GameCommand::Outcome { reply } => {
                    let _ = reply.send(self.session.outcome());
                }
                GameCommand::Snapshot { reply } => {
                    let _ = reply.send(self.session.clone());
                }
                GameCommand::Shutdown => {
                    tracing::info!(%game_code, "game shutting down");
                    break;
                }
            }
        }

        tracing::info!(%game_code, "game actor stopped");
    }

    fn handle_action(
        &mut self,
        player: &PlayerId,
        targets: &[TargetId],
    ) -> Result<Resolution, GameError> {
        match self.session.resolve_action(player, targets) {
            Ok(result) => {
                let next_turn = self.session.advance_turn();
                Ok(Resolution { result, next_turn })
            }
            Err(err) => {
                tracing::debug!(
                    game_code = %self.session.game_code(),
                    %player,
                    error = %err,
                    "action rejected"
                );
                Err(err)
            }
        }
    }
}

/// Spawns a game actor that owns `session` and returns a handle to it.
///
/// `channel_size` bounds the mailbox; senders wait when it is full.
pub(crate) fn spawn_game(session: GameSession, channel_size: usize) -> GameHandle {
    let (tx, rx) = mpsc::channel(channel_size);
    let game_code = session.game_code().clone();

    let actor = GameActor {
        session,
        receiver: rx,
    };
    tokio::spawn(actor.run());

    GameHandle {
        game_code,
        sender: tx,
    }
}
