//! Role catalog: the read-only source of role definitions.
//!
//! Nightfall doesn't store role definitions itself. They live in whatever
//! the surrounding service uses (a document store, a config file, an
//! admin UI). The engine only needs one thing from that store: the full
//! list of roles, once, when a game starts. [`RoleCatalog`] is that single
//! method.

use std::future::Future;

use nightfall_protocol::Role;

use crate::CatalogError;

/// Supplies the role definitions a game can be dealt from.
///
/// `Send + Sync + 'static` because the engine holds the catalog for its
/// whole lifetime and may start games from any Tokio worker thread.
///
/// # Example
///
/// ```rust
/// use nightfall_protocol::{Role, WinCondition};
/// use nightfall_roles::{CatalogError, RoleCatalog};
///
/// /// Every game is villagers only.
/// struct VillagersOnly;
///
/// impl RoleCatalog for VillagersOnly {
///     async fn list_roles(&self) -> Result<Vec<Role>, CatalogError> {
///         Ok(vec![Role::new("v", "Villager", WinCondition::KillingEvil)])
///     }
/// }
/// ```
pub trait RoleCatalog: Send + Sync + 'static {
    /// Returns every role definition, ordered by night order.
    ///
    /// # Errors
    /// Returns [`CatalogError`] if the backing store is unreachable or
    /// returns definitions that can't be parsed.
    fn list_roles(
        &self,
    ) -> impl Future<Output = Result<Vec<Role>, CatalogError>> + Send;
}

// ---------------------------------------------------------------------------
// StaticCatalog
// ---------------------------------------------------------------------------

/// An in-memory catalog with a fixed set of roles.
///
/// Roles are kept sorted by night order (roles that never wake up go
/// last), matching how the role store lists them.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    roles: Vec<Role>,
}

impl StaticCatalog {
    /// Creates a catalog from the given definitions.
    pub fn new(mut roles: Vec<Role>) -> Self {
        roles.sort_by_key(|r| (r.night_order.is_none(), r.night_order));
        Self { roles }
    }

    /// Parses a JSON array of role definitions, in the role store's
    /// camelCase format.
    ///
    /// # Errors
    /// Returns [`CatalogError::Malformed`] if the document isn't a valid
    /// list of roles.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let roles: Vec<Role> = serde_json::from_str(json)?;
        Ok(Self::new(roles))
    }

    /// The classic one-night line-up.
    ///
    /// | Role         | Order | Action      | Wins by        |
    /// |--------------|-------|-------------|----------------|
    /// | Werewolf     | 1     | peek center | staying alive  |
    /// | Seer         | 2     | peek        | killing evil   |
    /// | Robber       | 3     | swap self   | killing evil   |
    /// | Troublemaker | 4     | swap two    | killing evil   |
    /// | Drunk        | 5     | swap self   | killing evil   |
    /// | Shuffler     | 6     | swap center | killing evil   |
    /// | Tanner       | –     | –           | solo           |
    /// | Villager     | –     | –           | killing evil   |
    pub fn standard() -> Self {
        use nightfall_protocol::{RoleAction as A, TargetType as T, WinCondition as W};

        Self::new(vec![
            Role::new("werewolf", "Werewolf", W::StayingAlive)
                .with_night_order(1)
                .with_action(A::Peek, &[T::Center], 1),
            Role::new("seer", "Seer", W::KillingEvil)
                .with_night_order(2)
                .with_action(A::Peek, &[T::Player, T::Center], 2),
            Role::new("robber", "Robber", W::KillingEvil)
                .with_night_order(3)
                .with_action(A::SwapSelf, &[T::Player], 1),
            Role::new("troublemaker", "Troublemaker", W::KillingEvil)
                .with_night_order(4)
                .with_action(A::SwapTwo, &[T::Player], 2),
            Role::new("drunk", "Drunk", W::KillingEvil)
                .with_night_order(5)
                .with_action(A::SwapSelf, &[T::Center], 1),
            Role::new("shuffler", "Shuffler", W::KillingEvil)
                .with_night_order(6)
                .with_action(A::SwapCenter, &[T::Center], 2),
            Role::new("tanner", "Tanner", W::Solo),
            Role::new("villager", "Villager", W::KillingEvil),
        ])
    }

    /// All roles, in night order.
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    /// Looks a role up by display name.
    pub fn by_name(&self, name: &str) -> Option<&Role> {
        self.roles.iter().find(|r| r.name == name)
    }
}

impl RoleCatalog for StaticCatalog {
    async fn list_roles(&self) -> Result<Vec<Role>, CatalogError> {
        Ok(self.roles.clone())
    }
}
