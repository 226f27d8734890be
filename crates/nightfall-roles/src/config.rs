//! Per-game configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

// ---------------------------------------------------------------------------
// RoleQuota
// ---------------------------------------------------------------------------

/// How many copies of a role go into the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoleQuota {
    /// Copies added to the pool (players and center together).
    pub count: usize,

    /// Copies guaranteed to land in front of a player rather than in the
    /// center. Must not exceed `count`.
    #[serde(default)]
    pub must: usize,
}

impl RoleQuota {
    /// `count` copies, none guaranteed.
    pub fn new(count: usize) -> Self {
        Self { count, must: 0 }
    }

    /// `count` copies, `must` of them guaranteed to a player.
    pub fn guaranteed(count: usize, must: usize) -> Self {
        Self { count, must }
    }
}

// ---------------------------------------------------------------------------
// TurnPolicy
// ---------------------------------------------------------------------------

/// How night turns are consumed when several actors share a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TurnPolicy {
    /// The role acts once, collectively: after any holder of a role acts,
    /// every other holder of that role is skipped for the rest of the
    /// night.
    #[default]
    PerRole,

    /// Every holder of a role gets a turn of their own.
    PerInstance,
}

// ---------------------------------------------------------------------------
// GameConfig
// ---------------------------------------------------------------------------

/// Configuration for one game.
///
/// Every field has a default, so a partial JSON document such as
/// `{"roles": {"Seer": {"count": 1}}}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    /// Role name → quota. Names not in the catalog are ignored.
    pub roles: BTreeMap<String, RoleQuota>,

    /// Number of face-down center cards.
    pub center_cards: usize,

    /// Whether duplicate roles act once or once per holder.
    pub turn_policy: TurnPolicy,

    /// Name of the role that `KILLING_EVIL` roles must see eliminated.
    pub adversary_role: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        let mut roles = BTreeMap::new();
        roles.insert("Villager".to_string(), RoleQuota::new(2));
        roles.insert("Werewolf".to_string(), RoleQuota::new(2));
        Self {
            roles,
            center_cards: 3,
            turn_policy: TurnPolicy::PerRole,
            adversary_role: "Werewolf".to_string(),
        }
    }
}

impl GameConfig {
    /// A configuration with no roles configured; the whole pool is filler.
    pub fn empty() -> Self {
        Self {
            roles: BTreeMap::new(),
            ..Self::default()
        }
    }

    /// Adds (or replaces) a role quota.
    pub fn with_role(mut self, name: impl Into<String>, quota: RoleQuota) -> Self {
        self.roles.insert(name.into(), quota);
        self
    }

    /// Sets the turn policy.
    pub fn with_turn_policy(mut self, policy: TurnPolicy) -> Self {
        self.turn_policy = policy;
        self
    }

    /// Parses a configuration from JSON.
    ///
    /// # Errors
    /// [`ConfigError::Parse`] if the document is malformed, or any error
    /// from [`validate`](Self::validate).
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the quotas for internal consistency.
    ///
    /// # Errors
    /// [`ConfigError::QuotaExceedsCount`] if a role guarantees more copies
    /// than it configures.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, quota) in &self.roles {
            if quota.must > quota.count {
                return Err(ConfigError::QuotaExceedsCount {
                    role: name.clone(),
                    must: quota.must,
                    count: quota.count,
                });
            }
        }
        Ok(())
    }

    /// Total number of configured copies.
    pub fn configured_cards(&self) -> usize {
        self.roles.values().map(|q| q.count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_config_default() {
        let config = GameConfig::default();
        assert_eq!(config.center_cards, 3);
        assert_eq!(config.turn_policy, TurnPolicy::PerRole);
        assert_eq!(config.adversary_role, "Werewolf");
        assert_eq!(config.roles["Villager"], RoleQuota::new(2));
        assert_eq!(config.roles["Werewolf"], RoleQuota::new(2));
        assert_eq!(config.configured_cards(), 4);
    }

    #[test]
    fn test_from_json_partial_document_uses_defaults() {
        let config = GameConfig::from_json(
            r#"{"roles": {"Seer": {"count": 1}, "Werewolf": {"count": 2, "must": 1}}}"#,
        )
        .unwrap();

        assert_eq!(config.center_cards, 3);
        assert_eq!(config.roles["Seer"], RoleQuota::new(1));
        assert_eq!(config.roles["Werewolf"], RoleQuota::guaranteed(2, 1));
        assert!(!config.roles.contains_key("Villager"));
    }

    #[test]
    fn test_from_json_turn_policy() {
        let config = GameConfig::from_json(r#"{"turnPolicy": "perInstance"}"#).unwrap();
        assert_eq!(config.turn_policy, TurnPolicy::PerInstance);
    }

    #[test]
    fn test_validate_rejects_must_over_count() {
        let config = GameConfig::empty().with_role("Werewolf", RoleQuota::guaranteed(1, 2));
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::QuotaExceedsCount { must: 2, count: 1, .. }
        ));
    }

    #[test]
    fn test_from_json_malformed() {
        let err = GameConfig::from_json("{\"centerCards\": \"three\"}").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
