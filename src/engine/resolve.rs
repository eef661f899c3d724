//! Collision resolution and segment assembly.
//!
//! The scan pass (`parser.rs`) produces candidate `Node`s, one per surviving
//! pattern match. Candidates from different rules may overlap; this module
//! turns them into the final, non-overlapping segment sequence by:
//!
//! - Resolving overlaps globally (earliest start wins, ties broken by rule
//!   order)
//! - Emitting literal segments for every uncovered gap
//!
//! ## Invariants enforced here
//!
//! - Segments come out in strictly increasing start-offset order.
//! - Accepted candidate spans never overlap.
//! - The segment spans exactly cover `[0, input.len())`: concatenating the
//!   segment bodies in order reconstructs the input byte-for-byte.
//!
//! ## Where this fits
//!
//! The parser builds the candidate list in rule order, with each rule's
//! matches in increasing start order. `resolve_collisions` relies on a stable
//! sort so that equal `(start, rule_id)` keys cannot reorder (they cannot
//! occur in the first place: a single rule's matches never share a start).

use crate::{Node, Range, ResolvedSegment};

/// Resolve overlaps between candidates from different rules.
///
/// ```text
/// candidates: bold 0..9   italic 1..8   link 12..30
///                 │            │             │
/// sort (start, rule order), sweep left to right:
///                 ▼            ▼             ▼
///             keep 0..9    drop (1 < 9)  keep 12..30
/// ```
///
/// The sweep keeps a candidate when its span starts at or after the end of
/// the previously kept one. Ties on start offset are decided by `rule_id`,
/// i.e. the rule's position in the caller-supplied list.
pub(crate) fn resolve_collisions(mut candidates: Vec<Node>) -> Vec<Node> {
    candidates.sort_by(|a, b| a.range.start.cmp(&b.range.start).then(a.rule_id.cmp(&b.rule_id)));

    let debug = std::env::var_os("MARKSPAN_DEBUG_RULES").is_some();

    let mut kept: Vec<Node> = Vec::new();
    let mut cursor = 0;
    for node in candidates {
        // First candidate always wins; afterwards the span must clear the
        // previously consumed region.
        if kept.is_empty() || node.range.start >= cursor {
            cursor = node.range.end;
            kept.push(node);
        } else if debug {
            eprintln!(
                "[resolve:drop] rule=\"{}\" span={}..{} overlaps consumed region ending at {}",
                node.rule_name, node.range.start, node.range.end, cursor
            );
        }
    }

    kept
}

/// Assemble the final segment sequence from the accepted candidates.
///
/// `accepted` must be the output of [`resolve_collisions`]: ordered by start
/// offset and non-overlapping. Match spans from the regex engine always fall
/// on UTF-8 character boundaries, so the literal slices here cannot split a
/// code point.
pub(crate) fn assemble_segments(input: &str, accepted: &[Node]) -> Vec<ResolvedSegment> {
    let mut segments = Vec::new();
    let mut cursor = 0;

    for node in accepted {
        if node.range.start > cursor {
            segments.push(literal(cursor, node.range.start));
        }
        segments.push(ResolvedSegment {
            range: node.range.clone(),
            markup: Some(node.markup.clone()),
            rule_name: Some(node.rule_name),
        });
        cursor = node.range.end;
    }

    if cursor < input.len() {
        segments.push(literal(cursor, input.len()));
    }

    segments
}

fn literal(start: usize, end: usize) -> ResolvedSegment {
    ResolvedSegment { range: Range { start, end }, markup: None, rule_name: None }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Markup;

    fn node(start: usize, end: usize, rule_id: usize, rule_name: &'static str) -> Node {
        Node {
            range: Range { start, end },
            markup: Markup::Custom(vec![format!("{rule_name}:{start}..{end}")]),
            rule_name,
            rule_id,
        }
    }

    #[test]
    fn earliest_start_wins() {
        let kept = resolve_collisions(vec![node(1, 8, 1, "inner"), node(0, 9, 0, "outer")]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].rule_name, "outer");
    }

    #[test]
    fn same_start_breaks_ties_by_rule_order() {
        // Rule order, not insertion order, decides.
        let kept = resolve_collisions(vec![node(0, 4, 2, "late"), node(0, 4, 1, "early")]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].rule_name, "early");
    }

    #[test]
    fn non_overlapping_candidates_all_survive_in_order() {
        let kept = resolve_collisions(vec![node(10, 12, 0, "a"), node(0, 4, 1, "b"), node(4, 7, 0, "a")]);
        let spans: Vec<(usize, usize)> = kept.iter().map(|n| (n.range.start, n.range.end)).collect();
        assert_eq!(spans, vec![(0, 4), (4, 7), (10, 12)]);
    }

    #[test]
    fn adjacent_spans_do_not_collide() {
        // end is exclusive: a match starting exactly where the previous ends is kept
        let kept = resolve_collisions(vec![node(0, 4, 0, "a"), node(4, 8, 1, "b")]);
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn assembly_covers_gaps_and_tail() {
        let input = "aa XX bb YY";
        let accepted = vec![node(3, 5, 0, "x"), node(9, 11, 0, "y")];
        let segments = assemble_segments(input, &accepted);

        let spans: Vec<(usize, usize)> = segments.iter().map(|s| (s.range.start, s.range.end)).collect();
        assert_eq!(spans, vec![(0, 3), (3, 5), (5, 9), (9, 11)]);
        assert!(segments[0].markup.is_none());
        assert!(segments[1].markup.is_some());

        // coverage: spans tile the input with no gaps
        let mut cursor = 0;
        for (start, end) in spans {
            assert_eq!(start, cursor);
            cursor = end;
        }
        assert_eq!(cursor, input.len());
    }

    #[test]
    fn assembly_of_empty_input_is_empty() {
        assert!(assemble_segments("", &[]).is_empty());
    }
}
