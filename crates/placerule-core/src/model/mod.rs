pub mod label_constraint;
mod nullable;
pub mod rule;
pub mod rule_group;
pub mod wire;

pub use label_constraint::{LabelConstraint, LabelConstraintOp};
pub use rule::{sort_for_apply, PeerRole, Rule};
pub use rule_group::{RuleGroup, RuleGroupRegistry};
pub use wire::{
    enabled_document, parse_rules, retired_document, DeletedRuleWire, EnabledRuleWire,
};
