use placerule_core::{LabelConstraint, PeerRole, Rule};

/// A rule in the source group with a well-formed exclusion constraint
#[allow(dead_code)]
pub fn tiflash_rule(id: &str) -> Rule {
    let mut rule = Rule::new("tiflash", id);
    rule.index = 120;
    rule.start_key = "7480000000000000ff".to_string();
    rule.end_key = "7480000000000000fe".to_string();
    rule.role = PeerRole::Learner;
    rule.count = 3;
    rule.location_labels = vec!["zone".to_string()];
    rule.label_constraints = vec![
        LabelConstraint::single_in("engine", "tiflash"),
        LabelConstraint::single_not_in("engine_role", "write"),
    ];
    rule
}

/// A source-group rule with no exclusion constraint at all
#[allow(dead_code)]
pub fn rule_without_exclusion(id: &str) -> Rule {
    let mut rule = tiflash_rule(id);
    rule.label_constraints.retain(|c| c.key != "engine_role");
    rule
}

/// A well-formed rule moved to another group
#[allow(dead_code)]
pub fn foreign_group_rule(id: &str, group: &str) -> Rule {
    let mut rule = tiflash_rule(id);
    rule.group_id = group.to_string();
    rule
}

/// The literal scenario document: one keyspace rule excluding write nodes
#[allow(dead_code)]
pub const SCENARIO_DOC: &str = r#"[
  {
    "group_id": "tiflash",
    "id": "keyspace-ks1-r1",
    "index": 120,
    "start_key": "7480000000000000ff",
    "end_key": "7480000000000000fe",
    "role": "learner",
    "count": 3,
    "label_constraints": [
      {"key": "engine", "op": "in", "values": ["tiflash"]},
      {"key": "engine_role", "op": "notIn", "values": ["write"]}
    ],
    "location_labels": ["zone"]
  }
]"#;
