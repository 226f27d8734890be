//! Shared data model for Nightfall.
//!
//! Everything in this crate is something the engine and its boundary
//! layer (socket gateway, HTTP API, test harness) agree on:
//!
//! - **Identity** ([`PlayerId`], [`GameCode`], [`RoleId`], [`TargetId`]):
//!   who and what an operation refers to.
//! - **Roles** ([`Role`], [`RoleAction`], [`WinCondition`], [`TargetType`]):
//!   the catalog's role definitions, as they travel on the wire.
//! - **Events** ([`ActionResult`], [`GameEvent`]): what the engine
//!   reports back after a night action, a vote, or the end of the game.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): how those values are
//!   turned into bytes.
//!
//! # Architecture
//!
//! ```text
//! Boundary (sockets, HTTP)  ← encodes GameEvents for clients
//!     ↕
//! Engine (nightfall, nightfall-game, nightfall-roles)
//!     ↕
//! Protocol (this crate)  ← plain data, no game rules
//! ```

mod codec;
mod error;
mod event;
mod role;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use event::{ActionInfo, ActionResult, GameEvent};
pub use role::{Role, RoleAction, TargetType, WinCondition};
pub use types::{GameCode, PlayerId, RoleId, TargetId, CENTER_PREFIX};
