use std::fmt;
use std::time::Instant;

use crate::errors::{PlaceRuleError, Result};
use crate::model::Rule;
use crate::policy::PlacementPolicy;
use crate::{log_op_end, log_op_error, log_op_start};

/// A rule that failed validation, with its position in the input
#[derive(Debug, Clone, PartialEq)]
pub struct RuleViolation {
    /// Zero-based index of the rule in the input document
    pub position: usize,
    pub rule_id: String,
    pub error: PlaceRuleError,
}

impl fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}: {}", self.position, self.error)
    }
}

/// Check one rule against the policy
///
/// 1. The rule must belong to `policy.source_group`.
/// 2. The first constraint on `policy.exclusion_key` must exist and be
///    exactly `notIn [policy.exclusion_value]`.
///
/// # Errors
/// `GroupMismatch`, `MissingExclusionConstraint` or
/// `MalformedExclusionConstraint`, each echoing the rule.
pub fn check_rule(rule: &Rule, policy: &PlacementPolicy) -> Result<()> {
    if rule.group_id != policy.source_group {
        return Err(PlaceRuleError::GroupMismatch {
            rule_id: rule.id.clone(),
            group_id: rule.group_id.clone(),
            expected: policy.source_group.clone(),
            rule: rule.echo(),
        });
    }

    match rule.constraint(&policy.exclusion_key) {
        None => Err(PlaceRuleError::MissingExclusionConstraint {
            rule_id: rule.id.clone(),
            key: policy.exclusion_key.clone(),
            rule: rule.echo(),
        }),
        Some(c) if !c.is_single_not_in(&policy.exclusion_value) => {
            Err(PlaceRuleError::MalformedExclusionConstraint {
                rule_id: rule.id.clone(),
                key: policy.exclusion_key.clone(),
                rule: rule.echo(),
            })
        }
        Some(_) => Ok(()),
    }
}

/// Validate every rule, stopping at the first violation
///
/// Success means every rule keeps write-role peers off the engine tier.
///
/// # Errors
/// The first violation found, in input order. For a full report use
/// [`collect_violations`].
pub fn validate_rules(rules: &[Rule], policy: &PlacementPolicy) -> Result<()> {
    let started = Instant::now();
    log_op_start!("validate_rules", rules_in = rules.len());

    for rule in rules {
        if let Err(err) = check_rule(rule, policy) {
            log_op_error!(
                "validate_rules",
                &err,
                duration_ms = started.elapsed().as_millis() as u64
            );
            return Err(err);
        }
    }

    log_op_end!(
        "validate_rules",
        duration_ms = started.elapsed().as_millis() as u64,
        rules_in = rules.len()
    );
    Ok(())
}

/// Validate every rule and report all violations
///
/// Each violating rule appears once, with the first check it failed, in
/// input order. An empty result means the whole document is valid.
pub fn collect_violations(rules: &[Rule], policy: &PlacementPolicy) -> Vec<RuleViolation> {
    let started = Instant::now();
    log_op_start!("collect_violations", rules_in = rules.len());

    let violations: Vec<RuleViolation> = rules
        .iter()
        .enumerate()
        .filter_map(|(position, rule)| {
            check_rule(rule, policy).err().map(|error| RuleViolation {
                position,
                rule_id: rule.id.clone(),
                error,
            })
        })
        .collect();

    log_op_end!(
        "collect_violations",
        duration_ms = started.elapsed().as_millis() as u64,
        rules_in = rules.len(),
        violations = violations.len()
    );
    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LabelConstraint;

    fn tiflash_rule(id: &str) -> Rule {
        let mut rule = Rule::new("tiflash", id);
        rule.count = 3;
        rule.label_constraints = vec![
            LabelConstraint::single_in("engine", "tiflash"),
            LabelConstraint::single_not_in("engine_role", "write"),
        ];
        rule
    }

    #[test]
    fn test_check_rule_accepts_well_formed() {
        assert!(check_rule(&tiflash_rule("r1"), &PlacementPolicy::default()).is_ok());
    }

    #[test]
    fn test_check_rule_group_checked_first() {
        let mut rule = tiflash_rule("r1");
        rule.group_id = "other".to_string();
        rule.label_constraints.clear();

        let err = check_rule(&rule, &PlacementPolicy::default()).unwrap_err();
        assert!(matches!(err, PlaceRuleError::GroupMismatch { .. }));
    }

    #[test]
    fn test_check_rule_missing_exclusion() {
        let mut rule = tiflash_rule("r1");
        rule.label_constraints.truncate(1);

        let err = check_rule(&rule, &PlacementPolicy::default()).unwrap_err();
        assert!(matches!(err, PlaceRuleError::MissingExclusionConstraint { .. }));
        assert!(err.to_string().contains("\"id\":\"r1\""));
    }

    #[test]
    fn test_check_rule_malformed_exclusion() {
        let mut rule = tiflash_rule("r1");
        rule.label_constraints[1] = LabelConstraint::single_in("engine_role", "write");

        let err = check_rule(&rule, &PlacementPolicy::default()).unwrap_err();
        assert!(matches!(err, PlaceRuleError::MalformedExclusionConstraint { .. }));
    }

    #[test]
    fn test_validate_rules_empty_is_ok() {
        assert!(validate_rules(&[], &PlacementPolicy::default()).is_ok());
    }

    #[test]
    fn test_collect_violations_reports_each_rule_once() {
        let mut wrong_group = tiflash_rule("r2");
        wrong_group.group_id = "other".to_string();
        let mut missing = tiflash_rule("r4");
        missing.label_constraints.clear();

        let rules = vec![tiflash_rule("r1"), wrong_group, tiflash_rule("r3"), missing];
        let violations = collect_violations(&rules, &PlacementPolicy::default());

        let positions: Vec<_> = violations.iter().map(|v| v.position).collect();
        assert_eq!(positions, vec![1, 3]);
        assert_eq!(violations[1].rule_id, "r4");
        assert!(violations[0].to_string().starts_with("#1: "));
    }
}
