use crate::rules::markup;
use crate::{Markup, Options};

fn link(url: &str) -> Markup {
    Markup::Link { href: url.to_string(), label: url.to_string() }
}

#[test]
fn markup_examples_matching() {
    // Array of (input_string, expected_markup)
    let cases: Vec<(&str, Markup)> = vec![
        ("**hi**", Markup::Bold("hi".into())),
        ("say **hello world** now", Markup::Bold("hello world".into())),
        ("**MiXeD Case**", Markup::Bold("MiXeD Case".into())),
        ("*emphasis*", Markup::Italic("emphasis".into())),
        ("mid *word* here", Markup::Italic("word".into())),
        ("go to http://example.com", link("http://example.com")),
        ("secure https://example.com/path?q=1", link("https://example.com/path?q=1")),
        ("HTTPS://CAPS.example", link("HTTPS://CAPS.example")),
        (
            "[docs](https://docs.example.com)",
            Markup::Link { href: "https://docs.example.com".into(), label: "docs".into() },
        ),
        (":tada:", Markup::Emoji("tada".into())),
        ("great :thumbs_up: work", Markup::Emoji("thumbs_up".into())),
        ("plus :+1: that", Markup::Emoji("+1".into())),
        ("ping @admin", Markup::Mention("admin".into())),
        ("@Zed_99 joined the game", Markup::Mention("Zed_99".into())),
    ];

    let rules = markup::rules::get();

    for (input, expected) in cases {
        let parser = crate::engine::Parser::new(input, &rules);
        let segments = parser.run(&Options::default());

        let matched = segments.iter().any(|s| s.markup.as_ref() == Some(&expected));
        assert!(matched, "no rule produced {:?} for input '{}' (segments: {:#?})", expected, input, segments);
    }
}

#[test]
fn unterminated_markers_stay_literal() {
    let cases = ["**unclosed", ":no_closing_colon", "@ detached", "http:/broken-scheme", "]([not-a-link)"];

    let rules = markup::rules::get();

    for input in cases {
        let parser = crate::engine::Parser::new(input, &rules);
        let segments = parser.run(&Options::default());
        assert_eq!(segments.len(), 1, "expected single literal for '{}' (segments: {:#?})", input, segments);
        assert!(segments[0].markup.is_none());
    }
}

#[test]
fn labelled_link_wins_over_its_inner_url() {
    let input = "read [the docs](https://docs.example.com) first";
    let rules = markup::rules::get();
    let segments = crate::engine::Parser::new(input, &rules).run(&Options::default());

    let links: Vec<&Markup> = segments.iter().filter_map(|s| s.markup.as_ref()).collect();
    assert_eq!(
        links,
        vec![&Markup::Link { href: "https://docs.example.com".into(), label: "the docs".into() }]
    );
}

#[test]
fn chat_preset_leaves_links_literal() {
    let input = "see http://example.com **ok** :tada:";
    let rules = markup::rules::chat();
    let segments = crate::engine::Parser::new(input, &rules).run(&Options::default());

    assert!(segments.iter().all(|s| !matches!(s.markup, Some(Markup::Link { .. }))));
    assert!(segments.iter().any(|s| matches!(s.markup, Some(Markup::Bold(_)))));
    assert!(segments.iter().any(|s| matches!(s.markup, Some(Markup::Emoji(_)))));
}

#[test]
fn notifications_preset_leaves_emoji_literal() {
    let input = "**Sale!** :tada: see https://example.com/sale";
    let rules = markup::rules::notifications();
    let segments = crate::engine::Parser::new(input, &rules).run(&Options::default());

    assert!(segments.iter().all(|s| !matches!(s.markup, Some(Markup::Emoji(_)))));
    assert!(segments.iter().any(|s| matches!(s.markup, Some(Markup::Bold(_)))));
    assert!(segments.iter().any(|s| matches!(s.markup, Some(Markup::Link { .. }))));
}
