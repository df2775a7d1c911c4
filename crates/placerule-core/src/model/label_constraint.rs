//! Label constraint model
//!
//! A label constraint is a predicate over a store's key/value labels. A rule
//! carries an ordered list of them, and a store is eligible for the rule's
//! peers only if every constraint holds.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::nullable;

/// Operator applied by a [`LabelConstraint`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelConstraintOp {
    /// Label value must be in the value list. A missing label never matches.
    #[serde(rename = "in")]
    In,
    /// Label value must not be in the value list. A missing label always matches.
    #[serde(rename = "notIn")]
    NotIn,
    /// Store must have the label.
    #[serde(rename = "exists")]
    Exists,
    /// Store must not have the label.
    #[serde(rename = "notExists")]
    NotExists,
}

impl fmt::Display for LabelConstraintOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LabelConstraintOp::In => "in",
            LabelConstraintOp::NotIn => "notIn",
            LabelConstraintOp::Exists => "exists",
            LabelConstraintOp::NotExists => "notExists",
        };
        f.write_str(s)
    }
}

/// A `{key, op, values}` predicate over store labels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelConstraint {
    #[serde(
        default,
        skip_serializing_if = "String::is_empty",
        deserialize_with = "nullable::or_default"
    )]
    pub key: String,

    pub op: LabelConstraintOp,

    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "nullable::or_default"
    )]
    pub values: Vec<String>,
}

impl LabelConstraint {
    /// Create a constraint from its parts
    pub fn new(key: impl Into<String>, op: LabelConstraintOp, values: Vec<String>) -> Self {
        Self {
            key: key.into(),
            op,
            values,
        }
    }

    /// `key in [value]`
    pub fn single_in(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(key, LabelConstraintOp::In, vec![value.into()])
    }

    /// `key notIn [value]`
    pub fn single_not_in(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(key, LabelConstraintOp::NotIn, vec![value.into()])
    }

    /// True if this is exactly `notIn` with the single value `value`
    pub fn is_single_not_in(&self, value: &str) -> bool {
        self.op == LabelConstraintOp::NotIn && self.values.len() == 1 && self.values[0] == value
    }

    /// Evaluate the constraint against a store's labels
    pub fn matches(&self, labels: &BTreeMap<String, String>) -> bool {
        let label = labels.get(&self.key);
        match self.op {
            LabelConstraintOp::In => label.is_some_and(|v| self.values.contains(v)),
            LabelConstraintOp::NotIn => label.map_or(true, |v| !self.values.contains(v)),
            LabelConstraintOp::Exists => label.is_some(),
            LabelConstraintOp::NotExists => label.is_none(),
        }
    }
}

impl fmt::Display for LabelConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {:?}", self.key, self.op, self.values)
    }
}
