//! Canonical logging macros
//!
//! These macros give every engine operation the same start/end/error shape.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use placerule_core::log_op_start;
/// log_op_start!("validate_rules");
/// log_op_start!("validate_rules", rules_in = 3);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::logging_facility::macros::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::logging_facility::macros::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use placerule_core::log_op_end;
/// log_op_end!("validate_rules", duration_ms = 4);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::logging_facility::macros::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::logging_facility::macros::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// # Example
///
/// ```
/// # use placerule_core::{log_op_error, errors::PlaceRuleError};
/// let err = PlaceRuleError::Usage { reason: "empty keyspace".to_string() };
/// log_op_error!("enable_write_region", &err, duration_ms = 1);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let ex_err: $crate::errors::ExError = ($err).into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::logging_facility::macros::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            rule_id = ex_err.rule_id().unwrap_or(""),
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let ex_err: $crate::errors::ExError = ($err).into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::logging_facility::macros::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            rule_id = ex_err.rule_id().unwrap_or(""),
            $($field)*
        );
    }};
}

#[doc(hidden)]
pub use placerule_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};
