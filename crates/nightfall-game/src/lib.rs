//! The night-phase engine for Nightfall.
//!
//! Each game runs as an isolated Tokio task (actor model) that owns its
//! [`GameSession`]; every command for a room goes through that task's
//! mailbox, so a turn check, the action it authorizes, and the turn
//! advance that follows can never interleave with another request for
//! the same room.
//!
//! # Key types
//!
//! - [`GameSession`]: all mutable state of one game (players, center
//!   cards, turn cursor, votes). Plain data with synchronous methods:
//!   - turn sequencing: [`peek_turn`](GameSession::peek_turn),
//!     [`advance_turn`](GameSession::advance_turn),
//!     [`is_actors_turn`](GameSession::is_actors_turn)
//!   - actions: [`resolve_action`](GameSession::resolve_action)
//!   - voting: [`record_vote`](GameSession::record_vote),
//!     [`compute_winners`](GameSession::compute_winners)
//! - [`GameHandle`]: send commands to a running game actor
//! - [`GameStore`]: room code → game handle

mod action;
mod actor;
mod error;
mod session;
mod store;
mod turn;
mod vote;

pub use action::validate_targets;
pub use actor::{GameHandle, Resolution};
pub use error::GameError;
pub use session::{CenterSlot, GameSession, Player};
pub use store::{GameStore, DEFAULT_CHANNEL_SIZE};
pub use turn::{ActorRef, Turn};
pub use vote::Outcome;
