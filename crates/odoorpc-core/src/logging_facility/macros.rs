//! Canonical logging macros

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use odoorpc_core::log_op_start;
/// log_op_start!("fetch_records");
/// log_op_start!("fetch_records", intent = "fetch_initial");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use odoorpc_core::log_op_end;
/// log_op_end!("fetch_records", duration_ms = 42);
/// log_op_end!("fetch_records", duration_ms = 42, record_count = 3);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// The error is converted into [`crate::errors::RpcError`] to obtain its
/// kind and stable code. Correlation ids attached to the error are emitted
/// as `request_id` and `trace_id`.
///
/// # Example
///
/// ```
/// # use odoorpc_core::log_op_error;
/// use odoorpc_core::errors::EnvelopeError;
///
/// log_op_error!("fetch_records", EnvelopeError::MissingRecords, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        use $crate::errors::RpcError;
        let rpc_err: RpcError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?rpc_err.kind(),
            err_code = rpc_err.code(),
            request_id = rpc_err.request_id().map(|id| id.as_str()),
            trace_id = rpc_err.trace_id().map(|id| id.as_str()),
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        use $crate::errors::RpcError;
        let rpc_err: RpcError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?rpc_err.kind(),
            err_code = rpc_err.code(),
            request_id = rpc_err.request_id().map(|id| id.as_str()),
            trace_id = rpc_err.trace_id().map(|id| id.as_str()),
            $($field)*
        );
    }};
}
