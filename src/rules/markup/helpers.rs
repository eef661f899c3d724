/// Capture group `idx` of a match, if it participated and is non-empty.
///
/// Group 0 is the whole match. Non-participating groups are represented as
/// empty strings so indices stay positionally stable.
pub fn group(groups: &[String], idx: usize) -> Option<&str> {
    groups.get(idx).map(String::as_str).filter(|s| !s.is_empty())
}

/// The whole matched text (group 0).
pub fn whole_match(groups: &[String]) -> Option<&str> {
    group(groups, 0)
}
