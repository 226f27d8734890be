//! Unified error type for Nightfall.

use nightfall_game::GameError;
use nightfall_protocol::ProtocolError;
use nightfall_roles::{CatalogError, ConfigError};

/// Top-level error wrapping every crate-specific error.
///
/// The `#[from]` variants let `?` convert sub-crate errors, so engine
/// callers only ever match on this one type.
#[derive(Debug, thiserror::Error)]
pub enum NightfallError {
    /// A target id or event couldn't be parsed or encoded.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The role catalog couldn't be read.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The role pool couldn't be built from the configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A game operation was rejected.
    #[error(transparent)]
    Game(#[from] GameError),
}

impl NightfallError {
    /// The game error behind this error, if it is one.
    pub fn as_game(&self) -> Option<&GameError> {
        match self {
            Self::Game(err) => Some(err),
            _ => None,
        }
    }
}
