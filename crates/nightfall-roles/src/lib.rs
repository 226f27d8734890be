//! Roles and role pools for Nightfall.
//!
//! This crate covers everything that happens before the first night
//! turn:
//!
//! 1. **Catalog**: where role definitions come from ([`RoleCatalog`]
//!    trait, [`StaticCatalog`])
//! 2. **Configuration**: which roles a game wants and how many
//!    ([`GameConfig`], [`RoleQuota`])
//! 3. **Dealing**: turning the configuration into concrete cards for the
//!    players and the center ([`build_and_assign_roles`])
//!
//! # How it fits in the stack
//!
//! ```text
//! Game Layer (above)  ← creates a session from a RoleAssignment
//!     ↕
//! Roles Layer (this crate)  ← catalog lookup + dealing
//!     ↕
//! Protocol Layer (below)  ← provides Role, PlayerId
//! ```

mod catalog;
mod config;
mod error;
mod pool;

pub use catalog::{RoleCatalog, StaticCatalog};
pub use config::{GameConfig, RoleQuota, TurnPolicy};
pub use error::{CatalogError, ConfigError};
pub use pool::{build_and_assign_roles, AssignedPlayer, RoleAssignment, Seat};
