//! Rule rewrites
//!
//! Two passes derive new rule sets from a validated input:
//!
//! - [`enable_write_region`] keeps the rules of one keyspace and rewrites
//!   each into a rule that places a single replica on the write nodes of
//!   the engine tier.
//! - [`retire_rules`] turns every input rule into a bare `{group, id}` rule
//!   in the target group, the document an operator submits to withdraw a
//!   previously enabled set.
//!
//! Both build new [`Rule`] values; the input slice is never modified.

use std::time::Instant;

use crate::errors::Result;
use crate::model::Rule;
use crate::policy::{KeyspaceScope, PlacementPolicy};
use crate::rules::validation::check_rule;
use crate::{log_op_end, log_op_error, log_op_start};

/// Derive the write-region rule set for one keyspace
///
/// Every input rule is validated first, in scope or not. Rules whose id is
/// outside `scope` are then dropped and the rest rewritten with
/// [`derive_enabled_rule`]. Output keeps input order.
///
/// # Errors
/// The first validation failure in input order; no rules are returned.
pub fn enable_write_region(
    rules: &[Rule],
    scope: &KeyspaceScope,
    policy: &PlacementPolicy,
) -> Result<Vec<Rule>> {
    let started = Instant::now();
    log_op_start!(
        "enable_write_region",
        keyspace = scope.keyspace(),
        rules_in = rules.len()
    );

    if let Some(err) = rules.iter().find_map(|r| check_rule(r, policy).err()) {
        log_op_error!(
            "enable_write_region",
            &err,
            duration_ms = started.elapsed().as_millis() as u64,
            keyspace = scope.keyspace()
        );
        return Err(err);
    }

    let enabled: Vec<Rule> = rules
        .iter()
        .filter(|r| scope.contains(&r.id))
        .map(|r| derive_enabled_rule(r, policy))
        .collect();

    log_op_end!(
        "enable_write_region",
        duration_ms = started.elapsed().as_millis() as u64,
        keyspace = scope.keyspace(),
        rules_in = rules.len(),
        rules_out = enabled.len()
    );
    Ok(enabled)
}

/// Rewrite one rule to pin its peers to write nodes
///
/// Group, index, count and label constraints come from the policy; id,
/// range, role, location labels and isolation level are carried over.
pub fn derive_enabled_rule(rule: &Rule, policy: &PlacementPolicy) -> Rule {
    Rule {
        group_id: policy.target_group.clone(),
        id: rule.id.clone(),
        index: policy.target_index,
        start_key: rule.start_key.clone(),
        end_key: rule.end_key.clone(),
        role: rule.role.clone(),
        count: policy.target_count,
        label_constraints: policy.rewrite_constraints(),
        location_labels: rule.location_labels.clone(),
        isolation_level: rule.isolation_level.clone(),
        ..Rule::default()
    }
}

/// Derive the withdrawal document for a previously enabled rule set
///
/// No validation or scoping is applied: every input id is retired.
pub fn retire_rules(rules: &[Rule], policy: &PlacementPolicy) -> Vec<Rule> {
    let started = Instant::now();
    log_op_start!("retire_rules", rules_in = rules.len());

    let retired: Vec<Rule> = rules
        .iter()
        .map(|r| Rule::new(policy.target_group.clone(), r.id.clone()))
        .collect();

    log_op_end!(
        "retire_rules",
        duration_ms = started.elapsed().as_millis() as u64,
        rules_out = retired.len()
    );
    retired
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LabelConstraint, LabelConstraintOp, PeerRole};

    fn source_rule(id: &str) -> Rule {
        let mut rule = Rule::new("tiflash", id);
        rule.index = 120;
        rule.override_lower = true;
        rule.start_key = "7480000000000000ff".to_string();
        rule.end_key = "7480000000000000fe".to_string();
        rule.role = PeerRole::Learner;
        rule.count = 2;
        rule.location_labels = vec!["zone".to_string(), "host".to_string()];
        rule.isolation_level = "zone".to_string();
        rule.label_constraints = vec![
            LabelConstraint::single_in("engine", "tiflash"),
            LabelConstraint::single_not_in("engine_role", "write"),
        ];
        rule
    }

    #[test]
    fn test_derive_enabled_rule_fields() {
        let source = source_rule("keyspace-ks1-r1");
        let derived = derive_enabled_rule(&source, &PlacementPolicy::default());

        assert_eq!(derived.group_id, "enable_s3_wn_region");
        assert_eq!(derived.index, 1);
        assert_eq!(derived.count, 1);
        assert!(!derived.override_lower);
        assert_eq!(derived.id, source.id);
        assert_eq!(derived.start_key, source.start_key);
        assert_eq!(derived.end_key, source.end_key);
        assert_eq!(derived.role, PeerRole::Learner);
        assert_eq!(derived.location_labels, source.location_labels);
        assert_eq!(derived.isolation_level, "zone");

        assert_eq!(derived.label_constraints.len(), 2);
        assert_eq!(derived.label_constraints[0].key, "engine_role");
        assert_eq!(derived.label_constraints[0].op, LabelConstraintOp::In);
        assert_eq!(derived.label_constraints[1].key, "engine");
        assert_eq!(derived.label_constraints[1].op, LabelConstraintOp::In);
    }

    #[test]
    fn test_enable_leaves_input_untouched() {
        let rules = vec![source_rule("keyspace-ks1-r1")];
        let before = rules.clone();
        let scope = KeyspaceScope::new("ks1").unwrap();

        enable_write_region(&rules, &scope, &PlacementPolicy::default()).unwrap();
        assert_eq!(rules, before);
    }

    #[test]
    fn test_retire_rules_keeps_only_identity() {
        let rules = vec![source_rule("a"), source_rule("b")];
        let retired = retire_rules(&rules, &PlacementPolicy::default());

        assert_eq!(retired.len(), 2);
        assert_eq!(retired[0], Rule::new("enable_s3_wn_region", "a"));
        assert_eq!(retired[1].id, "b");
        assert_eq!(retired[1].count, 0);
    }

    #[test]
    fn test_unknown_role_passes_through_rewrite() {
        let mut source = source_rule("keyspace-ks1-r1");
        source.role = PeerRole::Other("witness".to_string());

        let derived = derive_enabled_rule(&source, &PlacementPolicy::default());
        assert_eq!(derived.role, PeerRole::Other("witness".to_string()));
    }
}
