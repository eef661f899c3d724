use crate::engine::BucketMask;
use crate::rules::markup::helpers::{group, whole_match};
use crate::{Markup, Rule};

// Rules (one per markup syntax)

/// "**bold text**"
pub fn rule_bold() -> Rule {
    rule! {
        name: "bold (double asterisk)",
        pattern: r"\*\*(.+?)\*\*",
        buckets: BucketMask::HAS_ASTERISK.bits(),
        prod: |groups: &[String]| -> Option<Markup> {
            Some(Markup::Bold(group(groups, 1)?.to_string()))
        }
    }
}

/// "*emphasized text*"
///
/// Inside a bold span this also fires on the inner asterisk pair; collision
/// resolution drops it because bold sits earlier in every preset.
pub fn rule_italic() -> Rule {
    rule! {
        name: "italic (single asterisk)",
        pattern: r"\*([^*]+)\*",
        buckets: BucketMask::HAS_ASTERISK.bits(),
        prod: |groups: &[String]| -> Option<Markup> {
            Some(Markup::Italic(group(groups, 1)?.to_string()))
        }
    }
}

/// "[label](https://example.com)"
///
/// Listed before the bare-URL rule so the whole construct wins over the URL
/// inside the parentheses.
pub fn rule_named_link() -> Rule {
    rule! {
        name: "link (labelled)",
        pattern: r"\[([^\]]+)\]\((https?://[^\s)]+)\)",
        buckets: (BucketMask::HAS_BRACKET | BucketMask::URLISH).bits(),
        prod: |groups: &[String]| -> Option<Markup> {
            Some(Markup::Link { href: group(groups, 2)?.to_string(), label: group(groups, 1)?.to_string() })
        }
    }
}

/// Bare "http(s)://..." URL, consuming up to the next whitespace.
pub fn rule_link() -> Rule {
    rule! {
        name: "link (bare url)",
        pattern: r"(?i)https?://[^\s]+",
        buckets: BucketMask::URLISH.bits(),
        prod: |groups: &[String]| -> Option<Markup> {
            let url = whole_match(groups)?.to_string();
            Some(Markup::Link { href: url.clone(), label: url })
        }
    }
}

/// ":shortcode:" emoji, e.g. ":tada:" or ":thumbs_up:"
pub fn rule_emoji() -> Rule {
    rule! {
        name: "emoji (shortcode)",
        pattern: r":([a-zA-Z0-9_+\-]+):",
        buckets: BucketMask::HAS_COLON.bits(),
        prod: |groups: &[String]| -> Option<Markup> {
            Some(Markup::Emoji(group(groups, 1)?.to_string()))
        }
    }
}

/// "@username"
pub fn rule_mention() -> Rule {
    rule! {
        name: "mention (at-user)",
        pattern: r"@([A-Za-z0-9_]+)",
        buckets: BucketMask::HAS_AT.bits(),
        prod: |groups: &[String]| -> Option<Markup> {
            Some(Markup::Mention(group(groups, 1)?.to_string()))
        }
    }
}

// Presets. List order is priority order: bold must precede italic so the
// inner pair of a "**...**" span can't win, and the labelled link must
// precede the bare one.

/// The full built-in rule set.
pub fn get() -> Vec<Rule> {
    vec![rule_bold(), rule_italic(), rule_named_link(), rule_link(), rule_emoji(), rule_mention()]
}

/// Rules used for chat messages: bold and emoji shortcodes.
pub fn chat() -> Vec<Rule> {
    vec![rule_bold(), rule_emoji()]
}

/// Rules used for notification text: bold and links.
pub fn notifications() -> Vec<Rule> {
    vec![rule_bold(), rule_named_link(), rule_link()]
}
