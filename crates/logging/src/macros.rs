//! # Logging Macros
//!
//! Structured access and timing logs shared by the server and the store.

/// Store operations slower than this are logged at `warn` by
/// [`measure_duration!`].
pub const SLOW_OPERATION_MS: f64 = 250.0;

/// Log one served request.
///
/// Server errors are logged at `warn`, everything else at `info`, so a 4xx
/// caused by a client never looks like an outage.
///
/// # Example
///
/// ```rust
/// use logging::{log_api_request, RequestId};
///
/// let request_id = RequestId::new();
/// log_api_request!("GET", "/api/v1/schools/info/DPS001", 200, 12, request_id);
/// ```
#[macro_export]
macro_rules! log_api_request {
    ($method:expr, $path:expr, $status:expr, $duration_ms:expr, $request_id:expr) => {{
        let status: u16 = $status;
        if status >= 500 {
            tracing::warn!(
                target: "api",
                method = %$method,
                path = %$path,
                status,
                duration_ms = %$duration_ms,
                request_id = %$request_id,
                "Request failed"
            )
        }
        else {
            tracing::info!(
                target: "api",
                method = %$method,
                path = %$path,
                status,
                duration_ms = %$duration_ms,
                request_id = %$request_id,
                "Request served"
            )
        }
    }};
}

/// Time a block and log how long it took under `operation`.
///
/// Evaluates to the block's value. Runs past [`SLOW_OPERATION_MS`] are
/// reported at `warn`.
///
/// # Example
///
/// ```rust
/// use logging::measure_duration;
///
/// let total = measure_duration!("store", "sum", { 1 + 2 });
/// assert_eq!(total, 3);
/// ```
#[macro_export]
macro_rules! measure_duration {
    ($target:expr, $operation:expr, $block:block) => {{
        let start = std::time::Instant::now();
        let result = $block;
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        if elapsed_ms > $crate::macros::SLOW_OPERATION_MS {
            tracing::warn!(target: $target, operation = %$operation, elapsed_ms, "Slow operation");
        }
        else {
            tracing::debug!(target: $target, operation = %$operation, elapsed_ms, "Operation completed");
        }
        result
    }};
}
