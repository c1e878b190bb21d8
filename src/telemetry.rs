//! Telemetry metric name constants.
//!
//! Consumers install their own `metrics` recorder (e.g. prometheus, statsd);
//! without a recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `venice_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `operation`: call invoked (e.g. "create_message", "list_models")
//! - `status`: outcome: "ok" or "error"
//! - `direction`: token direction: "prompt" or "completion"

/// Total requests sent to the Venice API.
///
/// Labels: `operation`, `status` ("ok" | "error").
pub const REQUESTS_TOTAL: &str = "venice_requests_total";

/// Time until response headers arrive, in seconds.
///
/// Labels: `operation`.
pub const REQUEST_DURATION_SECONDS: &str = "venice_request_duration_seconds";

/// Total retry attempts (not counting the initial request).
///
/// Labels: `operation`.
pub const RETRIES_TOTAL: &str = "venice_retries_total";

/// Total tokens reported by usage records.
///
/// Labels: `model`, `direction` ("prompt" | "completion").
pub const TOKENS_TOTAL: &str = "venice_tokens_total";

/// SSE data lines skipped because their payload did not parse.
pub const LINE_PARSE_ERRORS_TOTAL: &str = "venice_line_parse_errors_total";
