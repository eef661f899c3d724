//! Rule compilation and indexing.
//!
//! This module holds the *static* side of the engine: the structures derived from
//! the full rule list that make a parse run faster and more predictable.
//!
//! Parsing is intentionally split into two phases:
//!
//! 1. **Compile/index rules** (this module): create a cheap representation of the
//!    rule set (`CompiledRules`) and pre-index it with coarse metadata.
//! 2. **Run** (see `parser.rs`): scan the input for coarse triggers (`trigger.rs`),
//!    select a subset of rules, then perform matching and resolution.
//!
//! The indexing supports **buckets** (`BucketMask`): coarse boolean features of
//! the input (e.g. "contains an asterisk") that let the parser discard rules
//! whose patterns cannot possibly match.
//!
//! ## Extension points
//!
//! - Adding a new bucket:
//!   1. Add a `BucketMask` bit.
//!   2. Add a `BUCKET_*` constant and bump `BUCKET_COUNT`.
//!   3. Teach `CompiledRules::new` to index that bucket.
//!   4. Teach `TriggerInfo::scan` (in `trigger.rs`) to detect it.
//!   5. Teach `Parser::new_compiled` (in `parser.rs`) to activate rules from it.
//!
//! - Adding new per-rule metadata:
//!   extend `RuleMeta` and populate it from the `Rule` in `CompiledRules::new`.
//!
//! ## Invariants
//!
//! - `RuleId` is an index into `CompiledRules::rules` and `CompiledRules::metas`,
//!   *and* the rule's position in the caller-supplied list. It is the tie-break
//!   key during collision resolution, so those vectors must stay aligned and in
//!   input order.
//! - `RuleIndex::by_bucket` uses fixed indices (`BUCKET_*`) to avoid `HashMap`
//!   overhead in the hot path.
//! - A bucket on a rule must be a necessary condition for the rule's pattern to
//!   match; activation gating may never change parser output.

use crate::Rule;

// --- Rule compilation and indexing -------------------------------------------

/// Rule identifier (index into the rules vector, i.e. caller list position).
pub(crate) type RuleId = usize;

bitflags::bitflags! {
    /// Coarse buckets for fast input classification.
    ///
    /// Each bit corresponds to a marker that some markup syntax requires:
    /// asterisks for bold/italic, `@` for mentions, `:` for emoji shortcodes,
    /// an `http` substring for bare links and `[` for named links.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BucketMask: u32 {
        const HAS_ASTERISK = 1 << 0;
        const HAS_AT       = 1 << 1;
        const HAS_COLON    = 1 << 2;
        const URLISH       = 1 << 3;
        const HAS_BRACKET  = 1 << 4;
    }
}

/// Metadata attached to a rule.
#[derive(Clone, Copy, Debug)]
pub struct RuleMeta {
    pub buckets: BucketMask,
}

#[derive(Default, Debug)]
pub struct RuleIndex {
    pub always_on: Vec<RuleId>,
    pub by_bucket: [Vec<RuleId>; BUCKET_COUNT],
}

pub const BUCKET_COUNT: usize = 5;
pub const BUCKET_HAS_ASTERISK: usize = 0;
pub const BUCKET_HAS_AT: usize = 1;
pub const BUCKET_HAS_COLON: usize = 2;
pub const BUCKET_URLISH: usize = 3;
pub const BUCKET_HAS_BRACKET: usize = 4;

/// Pre-compiled rule set with metadata and indexes.
#[derive(Debug)]
pub struct CompiledRules<'a> {
    pub rules: Vec<&'a Rule>,
    pub metas: Vec<RuleMeta>,
    pub index: RuleIndex,
}

impl<'a> CompiledRules<'a> {
    /// Create a compiled rule set from a slice of rules.
    ///
    /// Notes:
    /// - This is intentionally lightweight: it does not rewrite patterns, does
    ///   not build automata, and does not allocate per-rule regex state.
    /// - Metadata currently comes directly from `Rule` fields.
    /// - Input order is preserved; `RuleId` doubles as the priority key.
    pub fn new(rules: &'a [Rule]) -> Self {
        let rule_refs: Vec<&Rule> = rules.iter().collect();

        let metas: Vec<RuleMeta> =
            rule_refs.iter().map(|r| RuleMeta { buckets: BucketMask::from_bits_truncate(r.buckets) }).collect();

        let mut index = RuleIndex::default();

        for (id, meta) in metas.iter().enumerate() {
            if meta.buckets.is_empty() {
                // No bucket requirements -> always on.
                index.always_on.push(id);
            } else {
                // Index by buckets using fixed array
                if meta.buckets.contains(BucketMask::HAS_ASTERISK) {
                    index.by_bucket[BUCKET_HAS_ASTERISK].push(id);
                }
                if meta.buckets.contains(BucketMask::HAS_AT) {
                    index.by_bucket[BUCKET_HAS_AT].push(id);
                }
                if meta.buckets.contains(BucketMask::HAS_COLON) {
                    index.by_bucket[BUCKET_HAS_COLON].push(id);
                }
                if meta.buckets.contains(BucketMask::URLISH) {
                    index.by_bucket[BUCKET_URLISH].push(id);
                }
                if meta.buckets.contains(BucketMask::HAS_BRACKET) {
                    index.by_bucket[BUCKET_HAS_BRACKET].push(id);
                }
            }
        }

        CompiledRules { rules: rule_refs, metas, index }
    }
}
