extern crate self as markspan;

use regex::Regex;

#[macro_use]
mod macros;
mod api;
mod engine;
pub mod rules;

pub use api::{
    Options, ParseDetails, ParseResult, ParseResultVerbose, RuleScan, Segment, SegmentKind,
    SegmentSummary, parse, parse_verbose_with, parse_with,
};

// --- Internal types ---------------------------------------------------------

/// Renderer-agnostic replacement value produced by a rule.
///
/// The parsing core never touches presentation: callers map these tagged
/// values to whatever display nodes they need after parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Markup {
    Bold(String),
    Italic(String),
    Link { href: String, label: String },
    Emoji(String),
    Mention(String),
    /// Raw capture groups for caller-defined rules that don't fit the
    /// built-in variants. Group 0 is the whole match.
    Custom(Vec<String>),
}

impl Markup {
    /// Stable lowercase name of the variant, e.g. `"bold"` or `"link"`.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Markup::Bold(_) => "bold",
            Markup::Italic(_) => "italic",
            Markup::Link { .. } => "link",
            Markup::Emoji(_) => "emoji",
            Markup::Mention(_) => "mention",
            Markup::Custom(_) => "custom",
        }
    }
}

/// Production callback: captured groups of a match to an optional [`Markup`].
///
/// Group 0 is the whole match; non-participating groups are empty strings so
/// indices stay positionally stable. Returning `None` drops the candidate and
/// leaves the span available as literal text.
pub type Production = Box<dyn Fn(&[String]) -> Option<Markup> + Send + Sync>;

/// A replacement rule: a compiled pattern plus a production that maps the
/// captured groups of a match to a [`Markup`] value.
///
/// Rules are usually built with the [`rule!`] macro. Their position in the
/// list passed to the parser doubles as their priority: when two rules match
/// at the same start offset, the earlier rule wins.
pub struct Rule {
    pub name: &'static str,
    /// Compiled pattern, stored as a static reference (created via the
    /// `regex!` helper macro in `src/macros.rs`).
    pub pattern: &'static Regex,
    pub production: Production,
    /// Bucket mask - rule is only considered if the input has matching buckets.
    ///
    /// A rule may only declare a bucket that is a *necessary* condition for
    /// its pattern to match; gating must never change parser output. Zero
    /// means always active.
    pub buckets: u32,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("pattern", &self.pattern.as_str())
            .field("production", &"<function>")
            .field("buckets", &self.buckets)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Range {
    /// Start byte index (inclusive).
    pub start: usize,
    /// End byte index (exclusive).
    pub end: usize,
}

/// A candidate match produced during the scan pass: a span, the markup the
/// rule produced for it, and enough provenance for tie-breaking and traces.
#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub range: Range,
    pub markup: Markup,
    /// Name of the rule that produced this candidate.
    pub rule_name: &'static str,
    /// Position of the producing rule in the caller-supplied list. Lower
    /// index wins when two candidates start at the same offset.
    pub rule_id: usize,
}

/// Internal resolved segment: a source span plus either nothing (literal) or
/// the markup of the accepted candidate that covers it. Converted to the
/// public `Segment` by the API layer.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ResolvedSegment {
    pub range: Range,
    pub markup: Option<Markup>,
    pub rule_name: Option<&'static str>,
}
