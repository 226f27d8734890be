//! # Nightfall
//!
//! Night-phase turn engine and win resolution for one-night social
//! deduction games.
//!
//! Players are dealt secret roles, the roles that wake up at night act
//! once each in night order (peeking at or swapping hidden cards), then
//! everyone votes. Nightfall runs that core; lobbies, chat, persistence,
//! and the network transport belong to the service that embeds it.
//!
//! ## Layers
//!
//! ```text
//! nightfall (this crate)   Engine: the operations the boundary calls
//!     ↕
//! nightfall-game           one actor per game: turns, actions, votes
//!     ↕
//! nightfall-roles          catalog, configuration, dealing
//!     ↕
//! nightfall-protocol       ids, Role, results, events, codec
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use nightfall::prelude::*;
//!
//! # async fn run() -> Result<(), NightfallError> {
//! let engine = EngineBuilder::new().build(StaticCatalog::standard());
//! let code = GameCode::from("ROOM42");
//! let seats = [Seat::new("p1", "Ada"), Seat::new("p2", "Bo"), Seat::new("p3", "Cy")];
//!
//! engine.start_game(code.clone(), &seats, &GameConfig::default()).await?;
//! while let Some(role) = engine.current_turn_role(&code).await? {
//!     // Ask the players holding `role` for targets, then:
//!     // engine.resolve_action(&code, &player, &targets).await?;
//!     # let _ = role;
//!     engine.advance_turn(&code).await?;
//! }
//! # Ok(())
//! # }
//! ```

mod engine;
mod error;
pub mod telemetry;

pub use engine::{parse_targets, Engine, EngineBuilder, EngineConfig};
pub use error::NightfallError;

/// Re-exports of the protocol, roles, and game crates.
pub use nightfall_game as game;
pub use nightfall_protocol as protocol;
pub use nightfall_roles as roles;

/// Everything needed to embed the engine.
pub mod prelude {
    pub use crate::{parse_targets, Engine, EngineBuilder, EngineConfig, NightfallError};

    pub use nightfall_game::{ActorRef, GameError, Outcome, Turn};
    pub use nightfall_protocol::{
        ActionInfo, ActionResult, Codec, GameCode, GameEvent, JsonCodec, PlayerId, Role,
        RoleAction, TargetId, TargetType, WinCondition,
    };
    pub use nightfall_roles::{
        GameConfig, RoleAssignment, RoleCatalog, RoleQuota, Seat, StaticCatalog, TurnPolicy,
    };
}
