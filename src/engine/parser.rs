//! Matching parser.
//!
//! This module is the operational core of the engine:
//!
//! - Select a subset of rules that are plausible for the input (bucket gating;
//!   see `compiled_rules.rs` and `trigger.rs`).
//! - Run every active rule's pattern over the raw input and apply its
//!   production, collecting candidate `Node`s.
//! - Hand the candidates to `resolve.rs` for global collision resolution and
//!   segment assembly.
//!
//! ## Key concepts
//!
//! - **Rule** (`crate::Rule`): a compiled pattern with a production.
//! - **Node** (`crate::Node`): a candidate match with a span (`Range`), the
//!   produced `Markup`, and the producing rule's list position.
//! - **Segment** (`crate::ResolvedSegment`): a literal or replacement span of
//!   the final output.
//!
//! ## Pass structure
//!
//! ```text
//! (0) trigger scan       -> buckets
//! (1) candidate scan     -> one regex sweep per active rule, productions applied
//! (2) resolve + assemble -> ordered, non-overlapping segments
//! ```
//!
//! A single scan pass suffices because rules only ever match the raw input,
//! never each other's output. Output is deterministic given the same input and
//! the same ordered rule list.
//!
//! ## Zero-length matches
//!
//! A pattern that can match the empty string (e.g. `a*`) must not stall the
//! parser or produce zero-width replacements. `captures_iter` always advances
//! past an empty match, so termination is the regex engine's problem; the scan
//! simply discards zero-length matches, which leaves the affected characters
//! to fall through as literal text.
//!
//! ## Debugging
//!
//! Setting `MARKSPAN_DEBUG_RULES=1` prints useful trace information about rule
//! activation, candidate production and collision resolution.

use super::compiled_rules::{
    BUCKET_HAS_ASTERISK, BUCKET_HAS_AT, BUCKET_HAS_BRACKET, BUCKET_HAS_COLON, BUCKET_URLISH, BucketMask,
    CompiledRules, RuleId,
};
use super::metrics::{RuleScanMetrics, RunMetrics, RunResult, ScanMetrics};
use super::resolve::{assemble_segments, resolve_collisions};
use super::trigger::TriggerInfo;
use crate::{Node, Options, Range, ResolvedSegment, Rule};
use std::collections::HashSet;
use std::time::Instant;

/// Parser orchestrates applying `Rule`s against an input string.
///
/// Usage: create with `Parser::new(input, &rules)` then call `run(options)`.
///
/// High-level flow inside `run`:
///
/// ```text
/// new() -> scan() -> resolve_collisions() -> assemble_segments()
///            │             └─ drop overlapping candidates
///            └─ collect candidates per active rule
/// ```
#[derive(Debug)]
pub struct Parser<'a> {
    /// Input text to parse.
    input: &'a str,
    /// Active rules after bucket gating, as `(list position, rule)` pairs in
    /// original list order. The position is the collision tie-break key, so it
    /// must survive gating untouched.
    active: Vec<(RuleId, &'a Rule)>,
}

impl<'a> Parser<'a> {
    /// Create a new `Parser` for `input` using pre-compiled rules.
    pub fn new_compiled(input: &'a str, compiled: CompiledRules<'a>) -> Self {
        // Scan input to get coarse buckets.
        let trigger_info = TriggerInfo::scan(input);

        if std::env::var_os("MARKSPAN_DEBUG_RULES").is_some() {
            eprintln!("[trigger_scan] buckets={:?}", trigger_info.buckets);
        }

        // Compute active rule set from trigger buckets.
        let mut active_rule_ids: HashSet<RuleId> = compiled.index.always_on.iter().copied().collect();

        // Add rules whose bucket requirements are satisfied by the input.
        // Direct checks avoid HashMap overhead.
        if trigger_info.buckets.contains(BucketMask::HAS_ASTERISK) {
            active_rule_ids.extend(&compiled.index.by_bucket[BUCKET_HAS_ASTERISK]);
        }
        if trigger_info.buckets.contains(BucketMask::HAS_AT) {
            active_rule_ids.extend(&compiled.index.by_bucket[BUCKET_HAS_AT]);
        }
        if trigger_info.buckets.contains(BucketMask::HAS_COLON) {
            active_rule_ids.extend(&compiled.index.by_bucket[BUCKET_HAS_COLON]);
        }
        if trigger_info.buckets.contains(BucketMask::URLISH) {
            active_rule_ids.extend(&compiled.index.by_bucket[BUCKET_URLISH]);
        }
        if trigger_info.buckets.contains(BucketMask::HAS_BRACKET) {
            active_rule_ids.extend(&compiled.index.by_bucket[BUCKET_HAS_BRACKET]);
        }

        // Rules gated on multiple buckets require all of them present.
        active_rule_ids.retain(|&id| {
            let meta = &compiled.metas[id];
            trigger_info.buckets.contains(meta.buckets)
        });

        // Preserve list order: iterate the compiled vector, not the id set.
        let active: Vec<(RuleId, &Rule)> = compiled
            .rules
            .iter()
            .enumerate()
            .filter(|(id, _)| active_rule_ids.contains(id))
            .map(|(id, r)| (id, *r))
            .collect();

        if std::env::var_os("MARKSPAN_DEBUG_RULES").is_some() {
            eprintln!("[active_rules] {}/{} rules active", active.len(), compiled.rules.len());
            for (id, rule) in &active {
                eprintln!("  - [{}] {}", id, rule.name);
            }
        }

        Parser { input, active }
    }

    /// Create a new `Parser` for `input` using `rules`.
    ///
    /// This is a convenience wrapper that builds a temporary `CompiledRules`.
    /// Callers that want to reuse compiled rules can use `new_compiled`.
    pub fn new(input: &'a str, rules: &'a [Rule]) -> Self {
        Self::new_compiled(input, CompiledRules::new(rules))
    }

    pub(crate) fn active_rule_names(&self) -> Vec<&'static str> {
        self.active.iter().map(|(_, r)| r.name).collect()
    }

    /// Collect candidates for a single rule.
    ///
    /// ```text
    /// input: "hi **there** friend"
    /// pattern: \*\*(.+?)\*\*
    /// -> raw match 3..12, groups ["**there**", "there"]
    /// -> production -> Markup::Bold("there") -> Node at 3..12
    /// ```
    ///
    /// Zero-length matches are skipped (see module docs). A production
    /// returning `None` rejects the match, leaving the span as literal text
    /// and, because rejection happens before collision resolution, still
    /// available to lower-priority rules.
    fn scan_rule(&self, rule_id: RuleId, rule: &Rule) -> (Vec<Node>, usize) {
        let debug = std::env::var_os("MARKSPAN_DEBUG_RULES").is_some();
        let mut candidates = Vec::new();
        let mut raw_matches = 0;

        for caps in rule.pattern.captures_iter(self.input) {
            let m = caps.get(0).unwrap();
            if m.start() == m.end() {
                continue;
            }
            raw_matches += 1;

            // Positional groups; non-participating groups stay as empty
            // strings so indices remain stable. Case is preserved.
            let groups: Vec<String> =
                (0..caps.len()).map(|i| caps.get(i).map(|g| g.as_str().to_string()).unwrap_or_default()).collect();

            match (rule.production)(&groups) {
                Some(markup) => {
                    if debug {
                        eprintln!(
                            "[rule:production_ok] name=\"{}\" span={}..{} text=\"{}\" markup={:?}",
                            rule.name,
                            m.start(),
                            m.end(),
                            m.as_str(),
                            markup,
                        );
                    }
                    candidates.push(Node {
                        range: Range { start: m.start(), end: m.end() },
                        markup,
                        rule_name: rule.name,
                        rule_id,
                    });
                }
                None => {
                    if debug {
                        eprintln!(
                            "[rule:production_none] name=\"{}\" span={}..{} text=\"{}\"",
                            rule.name,
                            m.start(),
                            m.end(),
                            m.as_str(),
                        );
                    }
                }
            }
        }

        (candidates, raw_matches)
    }

    /// Run the scan pass over all active rules.
    fn scan(&self) -> (Vec<Node>, ScanMetrics) {
        let scan_start = Instant::now();
        let mut all_candidates = Vec::new();
        let mut metrics = ScanMetrics::default();

        for &(rule_id, rule) in &self.active {
            let rule_start = Instant::now();
            let (candidates, raw_matches) = self.scan_rule(rule_id, rule);
            metrics.rules.push(RuleScanMetrics {
                rule: rule.name,
                duration: rule_start.elapsed(),
                matches: raw_matches,
                candidates: candidates.len(),
            });
            all_candidates.extend(candidates);
        }

        metrics.total = scan_start.elapsed();
        (all_candidates, metrics)
    }

    /// Run the parser (scan, resolve collisions, assemble segments) and return
    /// timing details.
    pub fn run_with_metrics(self, _options: &Options) -> RunResult {
        let total_start = Instant::now();
        let (candidates, scan) = self.scan();

        let resolve_start = Instant::now();
        let accepted = resolve_collisions(candidates.clone());
        let segments = assemble_segments(self.input, &accepted);
        let resolve = resolve_start.elapsed();

        let total = total_start.elapsed();
        RunResult { candidates, segments, metrics: RunMetrics { total, scan, resolve } }
    }

    /// Run the parser and return just the segment sequence.
    ///
    /// Convenience wrapper that discards timing details. Use
    /// [`Parser::run_with_metrics`] to inspect stage-by-stage durations.
    pub fn run(self, options: &Options) -> Vec<ResolvedSegment> {
        self.run_with_metrics(options).segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::markup;

    #[test]
    fn gating_skips_rules_whose_markers_are_absent() {
        let rules = markup::rules::get();
        let parser = Parser::new("no markup at all", &rules);
        assert!(parser.active_rule_names().is_empty());

        let parser = Parser::new("a **bold** word", &rules);
        let names = parser.active_rule_names();
        assert!(names.contains(&"bold (double asterisk)"));
        assert!(!names.iter().any(|n| n.contains("link")));
    }

    #[test]
    fn gating_never_changes_output() {
        // An ungated copy of every built-in rule must segment identically.
        let gated = markup::rules::get();
        let mut ungated = markup::rules::get();
        for rule in &mut ungated {
            rule.buckets = 0;
        }

        let inputs =
            ["plain", "**b** :tada: @who http://x.y [l](http://x.y)", "*i* and trailing", "@a@b::", ""];
        for input in inputs {
            let a = Parser::new(input, &gated).run(&Options::default());
            let b = Parser::new(input, &ungated).run(&Options::default());
            assert_eq!(a, b, "gating changed output for {input:?}");
        }
    }

    #[test]
    fn precompiled_rule_set_segments_cover_input() {
        let rules = markup::rules::chat();
        for input in ["**hey**", "plain", ":wave: **hi**"] {
            let parser = Parser::new_compiled(input, CompiledRules::new(&rules));
            let segments = parser.run(&Options::default());
            let rebuilt: String =
                segments.iter().map(|s| &input[s.range.start..s.range.end]).collect();
            assert_eq!(rebuilt, input);
        }
    }
}
