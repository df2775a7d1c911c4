//! Placement policy configuration
//!
//! Every literal the engine checks for or writes lives in
//! [`PlacementPolicy`]. The defaults describe the TiFlash write-node
//! migration; a TOML file may override any subset of them.
//!
//! # Example
//! ```
//! use placerule_core::policy::PlacementPolicy;
//!
//! let policy = PlacementPolicy::from_toml_str("target_group = \"wn_region_b\"").unwrap();
//! assert_eq!(policy.target_group, "wn_region_b");
//! assert_eq!(policy.source_group, "tiflash");
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{PlaceRuleError, Result};
use crate::model::LabelConstraint;

/// Literals for validation and the write-region rewrite
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlacementPolicy {
    /// Group every input rule must belong to
    pub source_group: String,

    /// Label key of the required exclusion constraint
    pub exclusion_key: String,

    /// The single value the exclusion constraint must exclude
    pub exclusion_value: String,

    /// Group assigned to rewritten and retired rules
    pub target_group: String,

    /// Index assigned to rewritten rules
    pub target_index: i64,

    /// Replica count assigned to rewritten rules
    pub target_count: i64,

    /// First constraint of a rewritten rule: select write nodes
    pub write_constraint: LabelConstraint,

    /// Second constraint of a rewritten rule: select the engine tier
    pub engine_constraint: LabelConstraint,
}

impl Default for PlacementPolicy {
    fn default() -> Self {
        Self {
            source_group: "tiflash".to_string(),
            exclusion_key: "engine_role".to_string(),
            exclusion_value: "write".to_string(),
            target_group: "enable_s3_wn_region".to_string(),
            target_index: 1,
            target_count: 1,
            write_constraint: LabelConstraint::single_in("engine_role", "write"),
            engine_constraint: LabelConstraint::single_in("engine", "tiflash"),
        }
    }
}

impl PlacementPolicy {
    /// Parse a policy from TOML, filling unspecified fields with defaults
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let policy: Self = toml::from_str(s).map_err(|e| PlaceRuleError::InvalidInput {
            reason: format!("invalid policy: {}", e),
        })?;
        policy.ensure_valid()?;
        Ok(policy)
    }

    /// Reject policies whose literals cannot describe a migration
    pub fn ensure_valid(&self) -> Result<()> {
        let required = [
            ("source_group", &self.source_group),
            ("exclusion_key", &self.exclusion_key),
            ("exclusion_value", &self.exclusion_value),
            ("target_group", &self.target_group),
        ];
        for (name, value) in required {
            if value.is_empty() {
                return Err(PlaceRuleError::InvalidInput {
                    reason: format!("invalid policy: {} must not be empty", name),
                });
            }
        }
        if self.source_group == self.target_group {
            return Err(PlaceRuleError::InvalidInput {
                reason: "invalid policy: target_group must differ from source_group".to_string(),
            });
        }
        Ok(())
    }

    /// The two constraints a rewritten rule carries, in output order
    pub fn rewrite_constraints(&self) -> Vec<LabelConstraint> {
        vec![self.write_constraint.clone(), self.engine_constraint.clone()]
    }
}

/// Which rules belong to a keyspace
///
/// A rule is in scope when its id contains `keyspace-<ks>-` or
/// `keyspace-id-<ks>-` anywhere. This is plain substring containment, so an
/// id that merely embeds the pattern is in scope too.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyspaceScope {
    keyspace: String,
    name_pattern: String,
    id_pattern: String,
}

impl KeyspaceScope {
    /// Build the scope for `keyspace`; an empty keyspace is a usage error
    pub fn new(keyspace: impl Into<String>) -> Result<Self> {
        let keyspace = keyspace.into();
        if keyspace.is_empty() {
            return Err(PlaceRuleError::Usage {
                reason: "keyspace must not be empty".to_string(),
            });
        }
        Ok(Self {
            name_pattern: format!("keyspace-{}-", keyspace),
            id_pattern: format!("keyspace-id-{}-", keyspace),
            keyspace,
        })
    }

    pub fn keyspace(&self) -> &str {
        &self.keyspace
    }

    /// The two substrings tested against a rule id
    pub fn patterns(&self) -> [&str; 2] {
        [self.name_pattern.as_str(), self.id_pattern.as_str()]
    }

    /// True if `rule_id` contains either pattern
    pub fn contains(&self, rule_id: &str) -> bool {
        rule_id.contains(&self.name_pattern) || rule_id.contains(&self.id_pattern)
    }
}
