//! Built-in rule sets.
//!
//! Each submodule covers one family of replacement rules. Rules are plain
//! values built with the [`rule!`] macro, so callers can mix built-in rules
//! with their own in any order; list order is priority order.

pub mod markup;
