//! Telemetry metric name constants.
//!
//! Centralised metric names for bachu operations. Hosts install their own
//! `metrics` recorder (e.g. prometheus, statsd); without a recorder
//! installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `bachu_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `label`: intent label returned to the caller (e.g. "greeting")
//! - `reason`: why a fallback was served: "untrained", "no_responses" or "classified"

/// Total messages answered by the brain.
///
/// Labels: `label`.
pub const MESSAGES_TOTAL: &str = "bachu_messages_total";

/// Total replies served from the fallback bank.
///
/// Labels: `reason` ("untrained" | "no_responses" | "classified").
pub const FALLBACKS_TOTAL: &str = "bachu_fallbacks_total";

/// Time spent ranking labels for one message, in seconds.
pub const CLASSIFY_DURATION_SECONDS: &str = "bachu_classify_duration_seconds";

/// Training examples fed to the classifier during brain initialisation.
pub const TRAINING_EXAMPLES_TOTAL: &str = "bachu_training_examples_total";
