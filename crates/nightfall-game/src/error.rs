//! Error types for the game layer.

use nightfall_protocol::{GameCode, PlayerId};

/// Errors that can occur while running a game.
///
/// None of these change game state: a rejected action or vote leaves the
/// session exactly as it was.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// No active game for this room code.
    #[error("game {0} not found")]
    GameNotFound(GameCode),

    /// A game is already running for this room code.
    #[error("game {0} already exists")]
    AlreadyExists(GameCode),

    /// The player tried to act while another role is awake.
    #[error("it is not player {0}'s turn")]
    NotYourTurn(PlayerId),

    /// The player isn't seated in this game.
    #[error("player {0} is not in this game")]
    NotInGame(PlayerId),

    /// A target doesn't exist, is repeated, is of a kind the role can't
    /// select, or the number of targets doesn't fit the action.
    #[error("invalid target: {0}")]
    InvalidTarget(String),

    /// The acting role's action isn't one the engine can resolve.
    #[error("role {0:?} has an unknown action")]
    UnknownAction(String),

    /// The game's actor task has stopped or its mailbox is closed.
    #[error("game {0} is unavailable")]
    Unavailable(GameCode),
}
