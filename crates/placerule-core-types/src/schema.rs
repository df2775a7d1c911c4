//! Canonical schema constants for structured logging and events
//!
//! These constants keep field names consistent between the engine, the CLI
//! and the test capture layer.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Rule identifiers
pub const FIELD_RULE_ID: &str = "rule_id";
pub const FIELD_KEYSPACE: &str = "keyspace";

// Collection sizes
pub const FIELD_RULES_IN: &str = "rules_in";
pub const FIELD_RULES_OUT: &str = "rules_out";
pub const FIELD_VIOLATIONS: &str = "violations";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
