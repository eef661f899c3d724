//! Trigger scanning (input pre-classification).
//!
//! This module inspects the raw input string and produces coarse signals that
//! let the parser quickly decide which rules should be considered.
//!
//! The scan produces **buckets** (`BucketMask`): cheap booleans derived from
//! the input such as "contains an asterisk" or "looks URL-like". These are
//! used to enable bucketed rules via `RuleIndex::by_bucket`.
//!
//! ## Design notes
//!
//! - Unlike a heuristic classifier, this scan must be *sound*: a bucket is only
//!   set when its marker is present, and a rule only declares a bucket that its
//!   pattern cannot match without. False positives are acceptable (the rule's
//!   pattern still has to match), false negatives are not.
//! - Chat and notification messages are short, so this is a handful of
//!   single-pass byte scans.
//!
//! ## Extension points
//!
//! - Adding new buckets is allowed, but keep the scan cheap: the goal is to
//!   reduce the active rule set without making the scan itself expensive.

use super::compiled_rules::BucketMask;

/// Input characteristics detected from the raw input.
///
/// This is used to quickly gate rule activation before the scan pass.
#[derive(Debug, Clone)]
pub struct TriggerInfo {
    pub buckets: BucketMask,
}

impl TriggerInfo {
    /// Scan `input` for coarse buckets.
    ///
    /// Note: the URL check uses ASCII lowercasing since schemes are ASCII.
    pub fn scan(input: &str) -> Self {
        let mut buckets = BucketMask::empty();

        if input.contains('*') {
            buckets |= BucketMask::HAS_ASTERISK;
        }
        if input.contains('@') {
            buckets |= BucketMask::HAS_AT;
        }
        if input.contains(':') {
            buckets |= BucketMask::HAS_COLON;
        }
        if input.contains('[') {
            buckets |= BucketMask::HAS_BRACKET;
        }

        // "HTTP://"-style casing is rare but legal, so match case-insensitively.
        if input.to_ascii_lowercase().contains("http") {
            buckets |= BucketMask::URLISH;
        }

        TriggerInfo { buckets }
    }
}
