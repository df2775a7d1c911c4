//! placerule core - validation and rewrite engine for placement rules
//!
//! This crate holds everything that is not I/O:
//! - The placement rule model and its wire forms
//! - Label constraint lookup and predicate evaluation
//! - The exclusion-constraint validator (fail-fast and aggregate)
//! - The keyspace-scoped rewrite that pins writes to a region, and the
//!   retirement pass that withdraws previously enabled rules
//! - The placement policy literals, loadable from TOML
//! - Error and logging facilities shared with the CLI

pub mod errors;
pub mod logging_facility;
pub mod matcher;
pub mod model;
pub mod policy;
pub mod rules;
pub mod transform;

// Re-export commonly used types
pub use errors::{ExError, ExErrorKind, PlaceRuleError, Result};
pub use model::{LabelConstraint, LabelConstraintOp, PeerRole, Rule, RuleGroup, RuleGroupRegistry};
pub use policy::{KeyspaceScope, PlacementPolicy};
