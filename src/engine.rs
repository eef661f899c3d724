//! Parsing and resolution engine.
//!
//! This module is the *public entry point* for the token parser. The engine
//! lives in focused submodules under `src/engine/` while keeping stable paths
//! (for example `crate::engine::Parser` and `crate::engine::BucketMask`).
//!
//! ## How the parts work together
//!
//! At a high level, parsing an input string is a pipeline:
//!
//! ```text
//! rules (ordered) ──┐
//!                  │  CompiledRules::new           (compiled_rules.rs)
//!                  └───────────────┬──────────────
//!                                  │
//! input ── TriggerInfo::scan ──────┼─ select active rules (buckets)
//!         (trigger.rs)             │
//!                                  v
//!                        Parser::scan (parser.rs)
//!                          - run each active rule's pattern over the input
//!                          - apply productions, collect candidate nodes
//!                                  │
//!                                  v
//!                        resolve_collisions (resolve.rs)
//!                          - sort by (start, rule order)
//!                          - left-to-right sweep, drop overlaps
//!                                  │
//!                                  v
//!                        assemble_segments (resolve.rs)
//!                          - literal gaps + replacement spans
//!                                  │
//!                                  v
//!                          Vec<ResolvedSegment>
//! ```
//!
//! A single scan pass is enough: rules match the raw input only, never each
//! other's output, so there is no fixpoint iteration. Output is deterministic
//! given the same input and the same ordered rule list.
//!
//! ## Responsibilities by module
//!
//! - `compiled_rules.rs`: derives `CompiledRules` from `Rule`s and builds cheap
//!   indexes (bucket lists, per-rule metadata).
//! - `trigger.rs`: scans the raw input for marker characters to compute coarse
//!   buckets for rule activation.
//! - `parser.rs`: runs the scan pass and orchestrates resolution, producing the
//!   final segment sequence.
//! - `resolve.rs`: global collision resolution and segment assembly. This is
//!   where the ordering/coverage invariants are enforced.
//! - `metrics.rs`: optional timing/debug data for runs and passes.
//!
//! ## Public surface
//!
//! Most code interacts with the engine via:
//!
//! - [`Parser`]
//! - [`CompiledRules`] (optional; for reusing compiled rule sets)
//! - [`BucketMask`] (used by rules to declare coarse requirements)
//!
//! ## Adding new rules
//!
//! - Built-in rules live under `src/rules/**` and are passed into
//!   `Parser::new(..)` / `CompiledRules::new(..)`; callers can pass their own
//!   ordered rule lists the same way.
//! - If a new rule needs a new coarse trigger, add a new `BucketMask` bit and
//!   teach `TriggerInfo::scan` + `CompiledRules::new` + `Parser::new_compiled`
//!   to wire it through. A bucket must be a necessary condition for the rule's
//!   pattern; gating may never change output.
//!
//! ## Debugging
//!
//! Set `MARKSPAN_DEBUG_RULES=1` to print activation and resolution traces.

#[path = "engine/compiled_rules.rs"]
mod compiled_rules;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/parser.rs"]
mod parser;
#[path = "engine/resolve.rs"]
mod resolve;
#[path = "engine/trigger.rs"]
mod trigger;

#[allow(unused_imports)]
pub use compiled_rules::{BucketMask, CompiledRules, RuleIndex, RuleMeta};
#[allow(unused_imports)]
pub use metrics::{RuleScanMetrics, RunMetrics, RunResult, ScanMetrics};
#[allow(unused_imports)]
pub use parser::Parser;
#[allow(unused_imports)]
pub use trigger::TriggerInfo;
