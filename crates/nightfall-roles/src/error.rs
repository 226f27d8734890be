//! Error types for the roles layer.

/// Errors raised while loading role definitions.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The backing role store could not be reached.
    #[error("role catalog unavailable: {0}")]
    Unavailable(String),

    /// The role definitions could not be parsed.
    #[error("malformed role catalog: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Errors raised while building a role pool from a game configuration.
///
/// All of these abort the game start; nothing is dealt.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The catalog has no roles at all, so nothing can be dealt.
    #[error("role catalog is empty")]
    EmptyCatalog,

    /// A role asks for more guaranteed copies than it has copies.
    #[error("role {role:?} guarantees {must} copies but only {count} are configured")]
    QuotaExceedsCount {
        role: String,
        must: usize,
        count: usize,
    },

    /// Fewer cards are available than seats plus center slots.
    #[error("role pool has {available} cards, {needed} are needed")]
    PoolTooSmall { needed: usize, available: usize },

    /// Two seats share the same player id.
    #[error("player {0} is seated twice")]
    DuplicatePlayer(nightfall_protocol::PlayerId),

    /// A player id that target ids can't address (empty, or using the
    /// center slot prefix).
    #[error("player id {0:?} is reserved")]
    ReservedPlayerId(nightfall_protocol::PlayerId),

    /// The configuration document could not be parsed.
    #[error("invalid game configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
