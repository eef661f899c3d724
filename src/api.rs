use crate::engine;
use crate::{Markup, ResolvedSegment, Rule};
use once_cell::sync::Lazy;
use std::time::Duration;

static DEFAULT_RULES: Lazy<Vec<Rule>> = Lazy::new(crate::rules::markup::rules::get);

/// Options that affect parsing behavior.
///
/// This is intentionally minimal today and will grow as more rendering
/// pipelines need configuration.
#[derive(Debug, Clone, Default)]
pub struct Options {
    // later: length limits, locale-aware word boundaries, etc.
}

/// A single unit of parser output covering a contiguous span of the input.
///
/// `start`/`end` are byte offsets into the original input; `body` is the exact
/// source slice. Concatenating the bodies of a parse's segments, in order,
/// reconstructs the input.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// Start byte index of the span.
    pub start: usize,
    /// End byte index of the span (exclusive).
    pub end: usize,
    /// Slice of the original input covered by this segment.
    pub body: String,
    /// Literal text or a rule-produced replacement.
    pub kind: SegmentKind,
}

/// What a [`Segment`] renders as.
#[derive(Debug, Clone, PartialEq)]
pub enum SegmentKind {
    /// Emit the `body` verbatim.
    Literal,
    /// Replace the span with a rendering of `markup`.
    Replacement {
        /// Name of the rule that produced this replacement.
        rule: &'static str,
        /// The renderer-agnostic value to display instead of `body`.
        markup: Markup,
    },
}

impl Segment {
    /// True if this segment is literal text.
    pub fn is_literal(&self) -> bool {
        matches!(self.kind, SegmentKind::Literal)
    }

    /// The markup value, if this segment is a replacement.
    pub fn markup(&self) -> Option<&Markup> {
        match &self.kind {
            SegmentKind::Replacement { markup, .. } => Some(markup),
            SegmentKind::Literal => None,
        }
    }
}

/// Result from [`parse`] and [`parse_with`].
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// The parsed input text.
    pub text: String,
    /// Ordered segment sequence covering the whole input.
    pub segments: Vec<Segment>,
    /// Total elapsed time spent parsing.
    pub elapsed: Duration,
}

/// A compact candidate summary used in verbose traces.
#[derive(Debug, Clone)]
pub struct SegmentSummary {
    pub start: usize,
    pub end: usize,
    pub rule: String,
    pub preview: String,
}

/// Per-rule scan trace.
#[derive(Debug, Clone)]
pub struct RuleScan {
    pub rule: String,
    pub duration: Duration,
    /// Raw pattern matches, before production filtering.
    pub matches: usize,
    /// Candidates that survived the production.
    pub candidates: usize,
}

/// Additional details returned by [`parse_verbose_with`].
///
/// This is intentionally compact: it's meant for debugging and performance
/// inspection without dumping the entire internal state.
#[derive(Debug, Clone)]
pub struct ParseDetails {
    /// Total elapsed time.
    pub total: Duration,
    /// Time spent scanning for candidates + per-rule trace.
    pub scan_total: Duration,
    pub scan: Vec<RuleScan>,
    /// Time spent resolving collisions and assembling segments.
    pub resolve: Duration,
    /// Names of rules that were active for this input.
    pub active_rules: Vec<String>,
    /// All candidates found during the scan, before collision resolution.
    pub all_candidates: Vec<SegmentSummary>,
}

/// Result from [`parse_verbose_with`].
#[derive(Debug, Clone)]
pub struct ParseResultVerbose {
    pub text: String,
    pub segments: Vec<Segment>,
    pub elapsed: Duration,
    pub details: ParseDetails,
}

/// Parse `text` using the built-in markup ruleset.
///
/// # Example
/// ```
/// use markspan::parse;
///
/// let out = parse("hello **world**");
/// assert_eq!(out.segments.len(), 2);
/// assert!(out.segments[0].is_literal());
/// ```
pub fn parse(text: &str) -> ParseResult {
    parse_with(text, &DEFAULT_RULES, &Options::default())
}

/// Parse `text` using the provided ordered `rules`.
///
/// Rule order is the priority order: when two rules match at the same start
/// offset, the earlier rule in `rules` wins. Identical inputs with an
/// identical rule list always yield an identical segment sequence.
pub fn parse_with(text: &str, rules: &[Rule], options: &Options) -> ParseResult {
    let parser = engine::Parser::new(text, rules);
    let run = parser.run_with_metrics(options);

    ParseResult {
        text: text.to_string(),
        segments: run.segments.iter().map(|rs| resolved_to_segment(text, rs)).collect(),
        elapsed: run.metrics.total,
    }
}

/// Parse `text` with `rules`/`options` and return extra (compact) debug details.
///
/// This is useful for profiling and rule debugging. The default [`parse_with`]
/// path does not allocate these extra traces.
pub fn parse_verbose_with(text: &str, rules: &[Rule], options: &Options) -> ParseResultVerbose {
    let parser = engine::Parser::new(text, rules);
    let active_rules = parser.active_rule_names().into_iter().map(|s| s.to_string()).collect();

    let run = parser.run_with_metrics(options);

    let segments: Vec<Segment> = run.segments.iter().map(|rs| resolved_to_segment(text, rs)).collect();
    let all_candidates: Vec<SegmentSummary> = run
        .candidates
        .iter()
        .map(|node| SegmentSummary {
            start: node.range.start,
            end: node.range.end,
            rule: node.rule_name.to_string(),
            preview: preview(text, node.range.start, node.range.end),
        })
        .collect();

    let scan = run
        .metrics
        .scan
        .rules
        .iter()
        .map(|rs| RuleScan {
            rule: rs.rule.to_string(),
            duration: rs.duration,
            matches: rs.matches,
            candidates: rs.candidates,
        })
        .collect();

    let details = ParseDetails {
        total: run.metrics.total,
        scan_total: run.metrics.scan.total,
        scan,
        resolve: run.metrics.resolve,
        active_rules,
        all_candidates,
    };

    ParseResultVerbose { text: text.to_string(), segments, elapsed: run.metrics.total, details }
}

fn resolved_to_segment(input: &str, rs: &ResolvedSegment) -> Segment {
    let start = rs.range.start;
    let end = rs.range.end;
    let body = input.get(start..end).unwrap_or("").to_string();

    let kind = match (&rs.markup, rs.rule_name) {
        (Some(markup), Some(rule)) => SegmentKind::Replacement { rule, markup: markup.clone() },
        _ => SegmentKind::Literal,
    };

    Segment { start, end, body, kind }
}

fn preview(input: &str, start: usize, end: usize) -> String {
    input.get(start..end).unwrap_or("").chars().take(80).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::markup;

    fn bodies(res: &ParseResult) -> Vec<&str> {
        res.segments.iter().map(|s| s.body.as_str()).collect()
    }

    #[test]
    fn empty_rule_list_yields_single_literal() {
        let res = parse_with("just some text", &[], &Options::default());
        assert_eq!(res.segments.len(), 1);
        assert!(res.segments[0].is_literal());
        assert_eq!(res.segments[0].body, "just some text");
        assert_eq!((res.segments[0].start, res.segments[0].end), (0, 14));
    }

    #[test]
    fn empty_input_yields_no_segments() {
        let res = parse_with("", &markup::rules::get(), &Options::default());
        assert!(res.segments.is_empty());

        let res = parse_with("", &[], &Options::default());
        assert!(res.segments.is_empty());
    }

    #[test]
    fn unmatched_input_passes_through_as_one_literal() {
        let res = parse_with("nothing fancy here", &markup::rules::get(), &Options::default());
        assert_eq!(bodies(&res), vec!["nothing fancy here"]);
        assert!(res.segments[0].is_literal());
    }

    #[test]
    fn notification_message_scenario() {
        let rules = markup::rules::notifications();
        let res = parse_with("Hello **world**, visit http://example.com now", &rules, &Options::default());

        assert_eq!(bodies(&res), vec!["Hello ", "**world**", ", visit ", "http://example.com", " now"]);
        assert_eq!(res.segments[1].markup(), Some(&Markup::Bold("world".to_string())));
        assert_eq!(
            res.segments[3].markup(),
            Some(&Markup::Link { href: "http://example.com".to_string(), label: "http://example.com".to_string() })
        );
        assert!(res.segments[0].is_literal());
        assert!(res.segments[2].is_literal());
        assert!(res.segments[4].is_literal());
    }

    #[test]
    fn repeated_matches_of_one_rule() {
        let rules = vec![markup::rules::rule_bold()];
        let res = parse_with("**a** **b**", &rules, &Options::default());

        assert_eq!(bodies(&res), vec!["**a**", " ", "**b**"]);
        assert_eq!(res.segments[0].markup(), Some(&Markup::Bold("a".to_string())));
        assert!(res.segments[1].is_literal());
        assert_eq!(res.segments[2].markup(), Some(&Markup::Bold("b".to_string())));
    }

    #[test]
    fn segments_reconstruct_input_exactly() {
        // includes multi-byte characters around and inside matches
        let inputs = [
            "héllo **wörld**, sée http://example.com/ø now",
            "@früend :tada: **bold** plain tail",
            "no markup, just tëxt",
            "**unterminated and :broken",
        ];
        for input in inputs {
            let res = parse_with(input, &markup::rules::get(), &Options::default());
            let rebuilt: String = res.segments.iter().map(|s| s.body.as_str()).collect();
            assert_eq!(rebuilt, input, "coverage invariant violated for {input:?}");

            let mut cursor = 0;
            for seg in &res.segments {
                assert_eq!(seg.start, cursor, "gap or overlap at {} in {input:?}", seg.start);
                assert!(seg.end > seg.start, "empty segment in {input:?}");
                cursor = seg.end;
            }
            assert_eq!(cursor, input.len());
        }
    }

    #[test]
    fn earlier_rule_wins_identical_patterns() {
        // Two rules with the same pattern but distinguishable markup: the
        // output must carry the first rule's transform.
        let first = rule! {
            name: "shout (first)",
            pattern: r"!!([a-z]+)!!",
            prod: |groups: &[String]| -> Option<crate::Markup> {
                Some(crate::Markup::Bold(groups[1].clone()))
            }
        };
        let second = rule! {
            name: "shout (second)",
            pattern: r"!!([a-z]+)!!",
            prod: |groups: &[String]| -> Option<crate::Markup> {
                Some(crate::Markup::Italic(groups[1].clone()))
            }
        };

        let res = parse_with("say !!hi!! now", &[first, second], &Options::default());
        assert_eq!(res.segments[1].markup(), Some(&Markup::Bold("hi".to_string())));

        // Swapped order flips the winner.
        let first = rule! {
            name: "shout (first)",
            pattern: r"!!([a-z]+)!!",
            prod: |groups: &[String]| -> Option<crate::Markup> {
                Some(crate::Markup::Bold(groups[1].clone()))
            }
        };
        let second = rule! {
            name: "shout (second)",
            pattern: r"!!([a-z]+)!!",
            prod: |groups: &[String]| -> Option<crate::Markup> {
                Some(crate::Markup::Italic(groups[1].clone()))
            }
        };
        let res = parse_with("say !!hi!! now", &[second, first], &Options::default());
        assert_eq!(res.segments[1].markup(), Some(&Markup::Italic("hi".to_string())));
    }

    #[test]
    fn bold_beats_italic_on_overlap() {
        let res = parse_with("**word**", &markup::rules::get(), &Options::default());
        assert_eq!(res.segments.len(), 1);
        assert_eq!(res.segments[0].markup(), Some(&Markup::Bold("word".to_string())));
    }

    #[test]
    fn zero_length_capable_pattern_terminates_and_stays_literal() {
        // `a*` matches empty at every position; only the non-empty hits count.
        let rule = rule! {
            name: "a-run",
            pattern: r"a*",
            prod: |groups: &[String]| -> Option<crate::Markup> {
                Some(crate::Markup::Custom(groups.to_vec()))
            }
        };
        let res = parse_with("xxaxx", &[rule], &Options::default());
        assert_eq!(bodies(&res), vec!["xx", "a", "xx"]);

        // A pattern that can only match empty leaves everything literal.
        let rule = rule! {
            name: "empty-only",
            pattern: r"(?:)",
            prod: |groups: &[String]| -> Option<crate::Markup> {
                Some(crate::Markup::Custom(groups.to_vec()))
            }
        };
        let res = parse_with("abc", &[rule], &Options::default());
        assert_eq!(bodies(&res), vec!["abc"]);
        assert!(res.segments[0].is_literal());
    }

    #[test]
    fn production_none_demotes_span_to_literal() {
        // Rejecting a match must not leave a hole in the output.
        let rule = rule! {
            name: "vowel words only",
            pattern: r"\b[a-z]+\b",
            prod: |groups: &[String]| -> Option<crate::Markup> {
                if groups[0].starts_with(['a', 'e', 'i', 'o', 'u']) {
                    Some(crate::Markup::Custom(groups.to_vec()))
                } else {
                    None
                }
            }
        };
        let res = parse_with("an odd word", &[rule], &Options::default());
        assert_eq!(bodies(&res), vec!["an", " ", "odd", " word"]);
        assert!(res.segments[3].is_literal());
    }

    #[test]
    fn determinism_across_repeated_runs() {
        let input = "@user said **hi** at http://a.b :wave:";
        let rules = markup::rules::get();
        let baseline = parse_with(input, &rules, &Options::default()).segments;
        for _ in 0..5 {
            let run = parse_with(input, &rules, &Options::default()).segments;
            assert_eq!(run, baseline);
        }
    }

    #[test]
    fn parse_verbose_includes_metrics_and_rules() {
        let res = parse_verbose_with("**hey** :tada:", &markup::rules::get(), &Options::default());

        assert_eq!(res.text, "**hey** :tada:");
        assert_eq!(res.elapsed, res.details.total);
        assert!(res.details.scan_total <= res.details.total);
        assert!(!res.details.active_rules.is_empty());
        // bold and emoji, plus the italic candidate inside "**hey**" that
        // collision resolution later discards
        assert_eq!(res.details.all_candidates.len(), 3);
    }
}
