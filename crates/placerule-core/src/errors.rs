use placerule_core_types::RunId;
use thiserror::Error;

/// Result type alias using PlaceRuleError
pub type Result<T> = std::result::Result<T, PlaceRuleError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every failure the tool can report falls into one of three families:
/// input-shape errors (the document does not map to rules), invariant
/// violations (a rule does not have the expected policy shape) and usage
/// errors (bad invocation). Each kind maps to a stable code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Input shape
    InvalidInput,
    Serialization,
    Io,

    // Invariant violations
    GroupMismatch,
    MissingExclusion,
    MalformedExclusion,

    // Invocation
    Usage,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::GroupMismatch => "ERR_GROUP_MISMATCH",
            ExErrorKind::MissingExclusion => "ERR_MISSING_EXCLUSION",
            ExErrorKind::MalformedExclusion => "ERR_MALFORMED_EXCLUSION",
            ExErrorKind::Usage => "ERR_USAGE",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// True for kinds raised by a rule that breaks the placement invariant
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            ExErrorKind::GroupMismatch
                | ExErrorKind::MissingExclusion
                | ExErrorKind::MalformedExclusion
        )
    }
}

/// Canonical structured error type
///
/// Carries the classification used for log fields and exit reporting plus
/// the context needed to find the offending rule.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    rule_id: Option<String>,
    run_id: Option<RunId>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            rule_id: None,
            run_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add rule ID context
    pub fn with_rule_id(mut self, id: impl Into<String>) -> Self {
        self.rule_id = Some(id.into());
        self
    }

    /// Add run ID context
    pub fn with_run_id(mut self, run_id: RunId) -> Self {
        self.run_id = Some(run_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the rule ID context, if any
    pub fn rule_id(&self) -> Option<&str> {
        self.rule_id.as_deref()
    }

    /// Get the run ID context, if any
    pub fn run_id(&self) -> Option<&RunId> {
        self.run_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(rule_id) = &self.rule_id {
            write!(f, " (rule_id: {})", rule_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for placement rule processing
///
/// Invariant variants carry the offending rule echoed as compact JSON so an
/// operator can locate it in the source document.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlaceRuleError {
    // ===== Invariant Violations =====
    /// Rule belongs to a different group than the one being migrated
    #[error("Rule {rule_id} belongs to group '{group_id}', expected '{expected}': {rule}")]
    GroupMismatch {
        rule_id: String,
        group_id: String,
        expected: String,
        rule: String,
    },

    /// Rule has no constraint on the exclusion label at all
    #[error("Rule {rule_id} lacks required exclusion constraint on '{key}': {rule}")]
    MissingExclusionConstraint {
        rule_id: String,
        key: String,
        rule: String,
    },

    /// Rule constrains the exclusion label, but not as a single-value notIn
    #[error("Rule {rule_id} has malformed exclusion constraint on '{key}': {rule}")]
    MalformedExclusionConstraint {
        rule_id: String,
        key: String,
        rule: String,
    },

    // ===== Input Shape =====
    /// A range bound is not valid hex
    #[error("Rule {rule_id} has invalid {field}: {reason}")]
    InvalidKey {
        rule_id: String,
        field: String,
        reason: String,
    },

    /// Input could not be interpreted (policy file, document shape)
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    /// JSON encoding or decoding failed
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Reading an input file failed
    #[error("Cannot read {path}: {message}")]
    Io { path: String, message: String },

    // ===== Invocation =====
    /// Invocation parameters are unusable
    #[error("Usage error: {reason}")]
    Usage { reason: String },
}

impl PlaceRuleError {
    /// ID of the rule this error is about, if it concerns a single rule
    pub fn rule_id(&self) -> Option<&str> {
        match self {
            PlaceRuleError::GroupMismatch { rule_id, .. }
            | PlaceRuleError::MissingExclusionConstraint { rule_id, .. }
            | PlaceRuleError::MalformedExclusionConstraint { rule_id, .. }
            | PlaceRuleError::InvalidKey { rule_id, .. } => Some(rule_id),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for PlaceRuleError {
    fn from(err: serde_json::Error) -> Self {
        PlaceRuleError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<PlaceRuleError> for ExError {
    fn from(err: PlaceRuleError) -> Self {
        let message = err.to_string();
        let ex = match &err {
            PlaceRuleError::GroupMismatch { rule_id, .. } => {
                ExError::new(ExErrorKind::GroupMismatch).with_rule_id(rule_id.clone())
            }
            PlaceRuleError::MissingExclusionConstraint { rule_id, .. } => {
                ExError::new(ExErrorKind::MissingExclusion).with_rule_id(rule_id.clone())
            }
            PlaceRuleError::MalformedExclusionConstraint { rule_id, .. } => {
                ExError::new(ExErrorKind::MalformedExclusion).with_rule_id(rule_id.clone())
            }
            PlaceRuleError::InvalidKey { rule_id, .. } => {
                ExError::new(ExErrorKind::InvalidInput).with_rule_id(rule_id.clone())
            }
            PlaceRuleError::InvalidInput { .. } => ExError::new(ExErrorKind::InvalidInput),
            PlaceRuleError::Serialization { .. } => ExError::new(ExErrorKind::Serialization),
            PlaceRuleError::Io { .. } => ExError::new(ExErrorKind::Io),
            PlaceRuleError::Usage { .. } => ExError::new(ExErrorKind::Usage),
        };
        ex.with_message(message)
    }
}

impl From<&PlaceRuleError> for ExError {
    fn from(err: &PlaceRuleError) -> Self {
        err.clone().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code_op_and_rule() {
        let err = ExError::new(ExErrorKind::GroupMismatch)
            .with_op("validate_rules")
            .with_rule_id("r1")
            .with_message("bad group");
        let text = err.to_string();
        assert!(text.starts_with("[ERR_GROUP_MISMATCH]"));
        assert!(text.contains("validate_rules"));
        assert!(text.contains("bad group"));
        assert!(text.contains("(rule_id: r1)"));
    }

    #[test]
    fn test_invariant_kinds() {
        assert!(ExErrorKind::GroupMismatch.is_invariant_violation());
        assert!(ExErrorKind::MalformedExclusion.is_invariant_violation());
        assert!(!ExErrorKind::Usage.is_invariant_violation());
        assert!(!ExErrorKind::Serialization.is_invariant_violation());
    }

    #[test]
    fn test_serde_error_maps_to_serialization() {
        let err: PlaceRuleError = serde_json::from_str::<Vec<u8>>("{")
            .map_err(PlaceRuleError::from)
            .unwrap_err();
        let ex: ExError = err.into();
        assert_eq!(ex.kind(), ExErrorKind::Serialization);
    }
}
