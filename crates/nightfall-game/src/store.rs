//! Game store: room code → running game.

use std::collections::HashMap;

use nightfall_protocol::GameCode;

use crate::actor::spawn_game;
use crate::{GameError, GameHandle, GameSession};

/// Default mailbox size for game actors.
pub const DEFAULT_CHANNEL_SIZE: usize = 64;

/// Tracks every running game.
///
/// The store only hands out handles. All game state lives in the actors,
/// so holding the store's lock never blocks on a game.
#[derive(Debug)]
pub struct GameStore {
    games: HashMap<GameCode, GameHandle>,
    channel_size: usize,
}

impl GameStore {
    /// Creates an empty store whose game actors get mailboxes of
    /// `channel_size` commands.
    pub fn new(channel_size: usize) -> Self {
        Self {
            games: HashMap::new(),
            channel_size: channel_size.max(1),
        }
    }

    /// Spawns an actor for `session` and registers it under its code.
    ///
    /// # Errors
    /// [`GameError::AlreadyExists`] if a game with the same code is
    /// running. The session is dropped.
    pub fn create(&mut self, session: GameSession) -> Result<GameHandle, GameError> {
        let game_code = session.game_code().clone();
        if self.games.contains_key(&game_code) {
            return Err(GameError::AlreadyExists(game_code));
        }

        let handle = spawn_game(session, self.channel_size);
        self.games.insert(game_code.clone(), handle.clone());
        tracing::info!(%game_code, games = self.games.len(), "game created");
        Ok(handle)
    }

    /// Handle to the game running under `game_code`.
    ///
    /// # Errors
    /// [`GameError::GameNotFound`] if there is none.
    pub fn get(&self, game_code: &GameCode) -> Result<GameHandle, GameError> {
        self.games
            .get(game_code)
            .cloned()
            .ok_or_else(|| GameError::GameNotFound(game_code.clone()))
    }

    /// Stops the game and forgets it.
    ///
    /// # Errors
    /// [`GameError::GameNotFound`] if there is none.
    pub async fn remove(&mut self, game_code: &GameCode) -> Result<(), GameError> {
        let handle = self
            .games
            .remove(game_code)
            .ok_or_else(|| GameError::GameNotFound(game_code.clone()))?;

        // The actor may already be gone; either way it is no longer ours.
        let _ = handle.shutdown().await;

        tracing::info!(%game_code, games = self.games.len(), "game removed");
        Ok(())
    }

    pub fn contains(&self, game_code: &GameCode) -> bool {
        self.games.contains_key(game_code)
    }

    /// Number of running games.
    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Codes of every running game.
    pub fn codes(&self) -> Vec<GameCode> {
        self.games.keys().cloned().collect()
    }
}

impl Default for GameStore {
    fn default() -> Self {
        Self::new(DEFAULT_CHANNEL_SIZE)
    }
}
