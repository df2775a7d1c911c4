pub mod validation;

pub use validation::{check_rule, collect_violations, validate_rules, RuleViolation};
