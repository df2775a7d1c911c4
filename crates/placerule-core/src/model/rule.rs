//! Placement rule model
//!
//! A rule tells the scheduler how many peers of which role to place for a
//! key range, and on which stores (via label constraints). Rules arrive as
//! a JSON array; every field defaults to its zero value when absent or `null`.

use serde::{Deserialize, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

use super::label_constraint::LabelConstraint;
use super::nullable;
use super::rule_group::RuleGroupRegistry;
use crate::errors::{PlaceRuleError, Result};
use crate::matcher;

/// Role a rule's peers must take
///
/// The role is carried through unchanged, so names this tool does not know
/// are kept verbatim in [`PeerRole::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum PeerRole {
    /// Role not given in the document; re-emitted as an empty string.
    #[default]
    Unspecified,
    /// Either a leader or a follower.
    Voter,
    Leader,
    Follower,
    Learner,
    Other(String),
}

impl PeerRole {
    /// Wire name of the role
    pub fn as_str(&self) -> &str {
        match self {
            PeerRole::Unspecified => "",
            PeerRole::Voter => "voter",
            PeerRole::Leader => "leader",
            PeerRole::Follower => "follower",
            PeerRole::Learner => "learner",
            PeerRole::Other(name) => name,
        }
    }
}

impl From<String> for PeerRole {
    fn from(name: String) -> Self {
        match name.as_str() {
            "" => PeerRole::Unspecified,
            "voter" => PeerRole::Voter,
            "leader" => PeerRole::Leader,
            "follower" => PeerRole::Follower,
            "learner" => PeerRole::Learner,
            _ => PeerRole::Other(name),
        }
    }
}

impl Serialize for PeerRole {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl fmt::Display for PeerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn is_zero(v: &i64) -> bool {
    *v == 0
}

fn is_false(v: &bool) -> bool {
    !*v
}

/// One placement directive
///
/// Absent and `null` fields both decode to their zero value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Rule {
    /// Policy family that owns the rule
    #[serde(deserialize_with = "nullable::or_default")]
    pub group_id: String,

    /// Unique within the group; keyspace-scoped rules embed the keyspace here
    #[serde(deserialize_with = "nullable::or_default")]
    pub id: String,

    /// Apply order within the group, lower first
    #[serde(skip_serializing_if = "is_zero", deserialize_with = "nullable::or_default")]
    pub index: i64,

    /// Disables every same-group rule with a lower index
    #[serde(
        rename = "override",
        skip_serializing_if = "is_false",
        deserialize_with = "nullable::or_default"
    )]
    pub override_lower: bool,

    /// Hex-encoded range start, kept verbatim
    #[serde(deserialize_with = "nullable::or_default")]
    pub start_key: String,

    /// Hex-encoded range end, kept verbatim
    #[serde(deserialize_with = "nullable::or_default")]
    pub end_key: String,

    #[serde(deserialize_with = "nullable::or_default")]
    pub role: PeerRole,

    #[serde(deserialize_with = "nullable::or_default")]
    pub is_witness: bool,

    /// Expected replica count
    #[serde(deserialize_with = "nullable::or_default")]
    pub count: i64,

    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "nullable::or_default")]
    pub label_constraints: Vec<LabelConstraint>,

    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "nullable::or_default")]
    pub location_labels: Vec<String>,

    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "nullable::or_default")]
    pub isolation_level: String,

    /// Runtime only: bumped each time the rule is updated
    #[serde(skip)]
    pub version: u64,

    /// Runtime only: creation time recorded by the scheduler
    #[serde(skip)]
    pub create_timestamp: u64,
}

impl Rule {
    /// Create a rule with only its identity set
    pub fn new(group_id: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            id: id.into(),
            ..Self::default()
        }
    }

    /// First constraint on `key`, if any
    pub fn constraint(&self, key: &str) -> Option<&LabelConstraint> {
        matcher::find_constraint(&self.label_constraints, key)
    }

    /// Compact JSON echo of the rule, used to point operators at it
    pub fn echo(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| format!("{:?}", self))
    }

    /// Decoded range start
    pub fn start_key_bytes(&self) -> Result<Vec<u8>> {
        self.decode_key("start_key", &self.start_key)
    }

    /// Decoded range end
    pub fn end_key_bytes(&self) -> Result<Vec<u8>> {
        self.decode_key("end_key", &self.end_key)
    }

    fn decode_key(&self, field: &str, value: &str) -> Result<Vec<u8>> {
        hex::decode(value).map_err(|e| PlaceRuleError::InvalidKey {
            rule_id: self.id.clone(),
            field: field.to_string(),
            reason: e.to_string(),
        })
    }

    /// Sort key for apply order: group index, group id, rule index, rule id
    ///
    /// Groups missing from the registry sort as index 0.
    pub fn apply_order_key(&self, groups: &RuleGroupRegistry) -> (i64, &str, i64, &str) {
        let group_index = groups.group_of(self).map_or(0, |g| g.index);
        (group_index, self.group_id.as_str(), self.index, self.id.as_str())
    }

    /// Compare two rules by apply order
    pub fn cmp_apply_order(&self, other: &Rule, groups: &RuleGroupRegistry) -> Ordering {
        self.apply_order_key(groups).cmp(&other.apply_order_key(groups))
    }
}

/// Sort rules into the order the scheduler applies them
pub fn sort_for_apply(rules: &mut [Rule], groups: &RuleGroupRegistry) {
    rules.sort_by(|a, b| a.cmp_apply_order(b, groups));
}
