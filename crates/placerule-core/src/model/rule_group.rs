//! Rule group descriptors
//!
//! A rule refers to its group by `group_id` only. The descriptors live in a
//! separate registry and are resolved on demand; nothing about the
//! association is serialized with the rule.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::rule::Rule;

/// Policy family descriptor
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleGroup {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,

    #[serde(skip_serializing_if = "is_zero")]
    pub index: i64,

    /// Disables every group with a lower index
    #[serde(rename = "override", skip_serializing_if = "is_false")]
    pub override_lower: bool,
}

fn is_zero(v: &i64) -> bool {
    *v == 0
}

fn is_false(v: &bool) -> bool {
    !*v
}

impl RuleGroup {
    pub fn new(id: impl Into<String>, index: i64, override_lower: bool) -> Self {
        Self {
            id: id.into(),
            index,
            override_lower,
        }
    }
}

/// Lookup table from group id to descriptor
#[derive(Debug, Clone, Default)]
pub struct RuleGroupRegistry {
    groups: BTreeMap<String, RuleGroup>,
}

impl RuleGroupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a group, replacing any descriptor with the same id
    pub fn register(&mut self, group: RuleGroup) -> Option<RuleGroup> {
        self.groups.insert(group.id.clone(), group)
    }

    pub fn get(&self, id: &str) -> Option<&RuleGroup> {
        self.groups.get(id)
    }

    /// Descriptor of the group a rule belongs to
    pub fn group_of(&self, rule: &Rule) -> Option<&RuleGroup> {
        self.get(&rule.group_id)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_of_resolves_by_id() {
        let mut registry = RuleGroupRegistry::new();
        registry.register(RuleGroup::new("tiflash", 120, true));

        let rule = Rule::new("tiflash", "r1");
        let group = registry.group_of(&rule).unwrap();
        assert_eq!(group.index, 120);
        assert!(group.override_lower);

        assert!(registry.group_of(&Rule::new("other", "r2")).is_none());
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = RuleGroupRegistry::new();
        assert!(registry.register(RuleGroup::new("g", 1, false)).is_none());
        let old = registry.register(RuleGroup::new("g", 2, false)).unwrap();
        assert_eq!(old.index, 1);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("g").unwrap().index, 2);
    }

    #[test]
    fn test_group_wire_omits_empty_fields() {
        let json = serde_json::to_string(&RuleGroup::new("g", 0, false)).unwrap();
        assert_eq!(json, r#"{"id":"g"}"#);
    }
}
