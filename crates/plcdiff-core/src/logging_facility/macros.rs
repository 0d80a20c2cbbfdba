//! Canonical logging macros
//!
//! Callers must depend on `tracing` and `plcdiff-core-types`.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use plcdiff_core::log_op_start;
/// log_op_start!("build_history");
/// log_op_start!("build_history", entry_count = 3);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = plcdiff_core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = plcdiff_core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use plcdiff_core::log_op_end;
/// log_op_end!("build_history", duration_ms = 4);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = plcdiff_core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = plcdiff_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// Accepts anything convertible into [`ExError`](crate::errors::ExError).
///
/// # Example
///
/// ```
/// # use plcdiff_core::{log_op_error, errors::PlcDiffError};
/// let err = PlcDiffError::InvalidLog { reason: "empty".to_string() };
/// log_op_error!("parse_audit_log", err, duration_ms = 1);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        use $crate::errors::ExError;
        let ex_err: ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = plcdiff_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        use $crate::errors::ExError;
        let ex_err: ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = plcdiff_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
            $($field)*
        );
    }};
}

/// Log an input entry that produced no events
///
/// # Example
///
/// ```
/// # use plcdiff_core::log_op_skip;
/// log_op_skip!("build_history", entry_index = 2, reason = "tombstoned_predecessor");
/// ```
#[macro_export]
macro_rules! log_op_skip {
    ($op:expr, $($field:tt)*) => {
        tracing::debug!(
            component = module_path!(),
            op = $op,
            event = plcdiff_core_types::schema::EVENT_SKIP,
            $($field)*
        );
    };
}
