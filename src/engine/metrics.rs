//! Engine run metrics.
//!
//! This module defines a small set of structs used to observe and debug engine
//! performance and behavior.
//!
//! The intended usage is:
//!
//! - `Parser::run` for normal operation.
//! - `Parser::run_with_metrics` for profiling, debugging regressions, and
//!   inspecting what the scan pass produced.
//!
//! Metrics are intentionally simple and *opt-in*: the hot path avoids
//! per-candidate allocations unless debug tracing is enabled.

use crate::{Node, ResolvedSegment};
use std::time::Duration;

// --- Metrics -----------------------------------------------------------------

#[derive(Debug, Default, Clone)]
pub struct RunMetrics {
    /// Total elapsed time for `Parser::run_with_metrics`.
    pub total: Duration,
    /// Timings for the candidate scan pass.
    pub scan: ScanMetrics,
    /// Time spent resolving collisions and assembling segments.
    pub resolve: Duration,
}

/// Timings for the scan phase.
#[derive(Debug, Default, Clone)]
pub struct ScanMetrics {
    /// Total elapsed time across all rules.
    pub total: Duration,
    /// Per-rule scan measurements, in rule order.
    pub rules: Vec<RuleScanMetrics>,
}

/// Timing and candidate counts for a single rule's scan.
#[derive(Debug, Default, Clone)]
pub struct RuleScanMetrics {
    /// Name of the scanned rule.
    pub rule: &'static str,
    /// Elapsed time running the rule's pattern and production.
    pub duration: Duration,
    /// Number of raw pattern matches (before production filtering).
    pub matches: usize,
    /// Number of candidates that survived the production.
    pub candidates: usize,
}

/// Parser output bundled with timing information.
#[derive(Debug, Clone)]
pub struct RunResult {
    /// All candidates produced by the scan pass, before collision resolution.
    pub candidates: Vec<Node>,
    /// Final ordered segment sequence.
    pub segments: Vec<ResolvedSegment>,
    /// Timing measurements for the run.
    pub metrics: RunMetrics,
}
