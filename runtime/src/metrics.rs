//! Metric names and descriptions for the store.
//!
//! Metrics are recorded through the `metrics` facade. Without an installed
//! recorder every call is a no-op, so the store never depends on an exporter.

use metrics::{describe_counter, describe_histogram};

/// Actions received through [`crate::Store::send`]
pub const ACTIONS_TOTAL: &str = "store_actions_total";

/// Actions fed back into the reducer by effects
pub const FEEDBACK_ACTIONS_TOTAL: &str = "store_feedback_actions_total";

/// Sends rejected because the store was shut down
pub const REJECTED_ACTIONS_TOTAL: &str = "store_rejected_actions_total";

/// Sends aborted by the feedback limit
pub const FEEDBACK_LIMIT_TOTAL: &str = "store_feedback_limit_exceeded_total";

/// Time spent inside a single `reduce` call
pub const REDUCER_DURATION_SECONDS: &str = "store_reducer_duration_seconds";

/// Register descriptions for every store metric.
///
/// Call once at startup, after installing a recorder.
pub fn describe() {
    describe_counter!(ACTIONS_TOTAL, "Total number of actions sent to the store");
    describe_counter!(
        FEEDBACK_ACTIONS_TOTAL,
        "Total number of actions dispatched by effects"
    );
    describe_counter!(
        REJECTED_ACTIONS_TOTAL,
        "Total number of actions rejected after shutdown"
    );
    describe_counter!(
        FEEDBACK_LIMIT_TOTAL,
        "Total number of sends aborted by the feedback limit"
    );
    describe_histogram!(
        REDUCER_DURATION_SECONDS,
        "Time taken by a single reducer call"
    );
}
