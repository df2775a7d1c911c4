mod common;

use std::collections::BTreeSet;

use common::tiflash_rule;
use placerule_core::rules::validation::validate_rules;
use placerule_core::transform::enable_write_region;
use placerule_core::{KeyspaceScope, LabelConstraintOp, PlacementPolicy, Rule};
use proptest::prelude::*;

fn keyspace_name() -> impl Strategy<Value = String> {
    "[a-z0-9]{1,6}"
}

/// Rule ids drawn from a few keyspaces, with and without the `id-` form
fn rule_id() -> impl Strategy<Value = String> {
    (
        prop_oneof![Just("keyspace-"), Just("keyspace-id-"), Just("table-")],
        keyspace_name(),
        "[a-z0-9]{1,4}",
    )
        .prop_map(|(prefix, ks, suffix)| format!("{}{}-{}", prefix, ks, suffix))
}

fn rule_set() -> impl Strategy<Value = Vec<Rule>> {
    prop::collection::vec(rule_id(), 0..12)
        .prop_map(|ids| ids.iter().map(|id| tiflash_rule(id)).collect())
}

proptest! {
    #[test]
    fn prop_output_is_in_scope_subsequence(rules in rule_set(), ks in keyspace_name()) {
        let scope = KeyspaceScope::new(ks).unwrap();
        let out = enable_write_region(&rules, &scope, &PlacementPolicy::default()).unwrap();

        prop_assert!(out.len() <= rules.len());

        let expected: Vec<&str> = rules
            .iter()
            .filter(|r| scope.contains(&r.id))
            .map(|r| r.id.as_str())
            .collect();
        let actual: Vec<&str> = out.iter().map(|r| r.id.as_str()).collect();
        prop_assert_eq!(expected, actual);

        let kept: BTreeSet<&str> = out.iter().map(|r| r.id.as_str()).collect();
        for dropped in rules.iter().filter(|r| !scope.contains(&r.id)) {
            prop_assert!(!kept.contains(dropped.id.as_str()));
        }
    }

    #[test]
    fn prop_rewritten_rules_have_fixed_shape(rules in rule_set(), ks in keyspace_name()) {
        let scope = KeyspaceScope::new(ks).unwrap();
        let out = enable_write_region(&rules, &scope, &PlacementPolicy::default()).unwrap();

        for rule in &out {
            prop_assert_eq!(rule.count, 1);
            prop_assert_eq!(rule.index, 1);
            prop_assert_eq!(rule.label_constraints.len(), 2);
            prop_assert_eq!(rule.label_constraints[0].key.as_str(), "engine_role");
            prop_assert_eq!(rule.label_constraints[0].op, LabelConstraintOp::In);
            prop_assert_eq!(rule.label_constraints[1].key.as_str(), "engine");
            prop_assert_eq!(rule.label_constraints[1].op, LabelConstraintOp::In);
        }
    }

    #[test]
    fn prop_foreign_group_fails_both_passes(
        mut rules in rule_set(),
        group in "[a-z_]{1,10}",
        ks in keyspace_name(),
    ) {
        prop_assume!(group != "tiflash");
        let mut foreign = tiflash_rule("keyspace-x-1");
        foreign.group_id = group;
        rules.push(foreign);

        let policy = PlacementPolicy::default();
        let scope = KeyspaceScope::new(ks).unwrap();
        prop_assert!(validate_rules(&rules, &policy).is_err());
        prop_assert!(enable_write_region(&rules, &scope, &policy).is_err());
    }
}
