//! Constraint matcher
//!
//! Lookup and evaluation over a rule's label constraints. Both are pure;
//! absence is a normal outcome, not an error.

use std::collections::BTreeMap;

use crate::model::LabelConstraint;

/// First constraint whose key equals `key`
///
/// Only the first match is returned, so a rule that constrains the same key
/// twice is judged by the earlier constraint.
pub fn find_constraint<'a>(
    constraints: &'a [LabelConstraint],
    key: &str,
) -> Option<&'a LabelConstraint> {
    constraints.iter().find(|c| c.key == key)
}

/// True if a store with `labels` satisfies every constraint
///
/// An empty constraint list accepts any store.
pub fn match_all(constraints: &[LabelConstraint], labels: &BTreeMap<String, String>) -> bool {
    constraints.iter().all(|c| c.matches(labels))
}
