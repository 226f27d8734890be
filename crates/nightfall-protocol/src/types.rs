//! Identity types shared by the engine and its callers.
//!
//! Ids are opaque strings handed to us by the surrounding services (the
//! room service mints player UUIDs and six-character game codes, the role
//! store mints role ids). We wrap each in its own newtype so a `RoleId`
//! can never be passed where a `PlayerId` is expected, even though both
//! are `String` underneath.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ProtocolError;

/// Prefix of the synthetic ids given to center slots (`center-0`,
/// `center-1`, ...).
pub const CENTER_PREFIX: &str = "center-";

// ---------------------------------------------------------------------------
// Identity newtypes
// ---------------------------------------------------------------------------

/// A unique identifier for a player.
///
/// Ids starting with [`CENTER_PREFIX`] are reserved for center slots; a
/// player holding one could never be targeted.
///
/// `#[serde(transparent)]` serializes this as the bare string, so
/// `PlayerId("a1b2".into())` is just `"a1b2"` in JSON.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PlayerId {
    /// Returns `true` if a [`TargetId`] can refer to this player, i.e.
    /// the id is non-empty and doesn't use the center prefix.
    pub fn is_addressable(&self) -> bool {
        !self.0.is_empty() && !self.0.starts_with(CENTER_PREFIX)
    }
}

impl From<&str> for PlayerId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// The code of the room a game is being played in.
///
/// One room hosts at most one active game, so the code doubles as the
/// game's key in the session store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameCode(pub String);

impl fmt::Display for GameCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GameCode {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// The id of a role definition in the catalog.
///
/// Several players can hold instances of the same role definition (two
/// Werewolves share one `RoleId`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleId(pub String);

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoleId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

// ---------------------------------------------------------------------------
// TargetId
// ---------------------------------------------------------------------------

/// What a night action points at: a player, or one of the face-down
/// center cards.
///
/// On the wire a target is a single string. Center slots use the
/// synthetic form `center-<index>`; anything else is taken as a player id.
///
/// ```rust
/// use nightfall_protocol::{PlayerId, TargetId};
///
/// let center: TargetId = "center-2".parse().unwrap();
/// assert_eq!(center, TargetId::Center(2));
///
/// let player: TargetId = "3f1c".parse().unwrap();
/// assert_eq!(player, TargetId::Player(PlayerId::from("3f1c")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TargetId {
    /// A seated player.
    Player(PlayerId),
    /// A center slot, by position.
    Center(usize),
}

impl TargetId {
    /// Shorthand for a center target.
    pub fn center(index: usize) -> Self {
        Self::Center(index)
    }

    /// Shorthand for a player target.
    pub fn player(id: impl Into<String>) -> Self {
        Self::Player(PlayerId(id.into()))
    }

    /// Returns `true` if this target is a center slot.
    pub fn is_center(&self) -> bool {
        matches!(self, Self::Center(_))
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Player(id) => write!(f, "{id}"),
            Self::Center(index) => write!(f, "{CENTER_PREFIX}{index}"),
        }
    }
}

impl FromStr for TargetId {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ProtocolError::MalformedTarget(s.to_string()));
        }
        match s.strip_prefix(CENTER_PREFIX) {
            Some(index) => index
                .parse()
                .map(Self::Center)
                .map_err(|_| ProtocolError::MalformedTarget(s.to_string())),
            None => Ok(Self::Player(PlayerId(s.to_string()))),
        }
    }
}

impl TryFrom<String> for TargetId {
    type Error = ProtocolError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TargetId> for String {
    fn from(value: TargetId) -> Self {
        value.to_string()
    }
}
