use markspan::{ParseDetails, Segment, SegmentKind, SegmentSummary};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

pub fn print_run(input: &str, segments: &[Segment], details: &ParseDetails, color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Parsing: \"{}\"", input), ansi::CYAN)));

    // Scan summary
    println!("\n{}", palette.paint("━━━ Scan ━━━", ansi::GRAY));
    print_scan(details, &palette);

    // Candidates before collision resolution
    if !details.all_candidates.is_empty() {
        println!("\n{}", palette.paint("━━━ Candidates ━━━", ansi::GRAY));
        for node in details.all_candidates.iter().take(16) {
            println!("    {}", fmt_candidate_compact(node, &palette));
        }
        if details.all_candidates.len() > 16 {
            println!("    {}", palette.dim(format!("... +{} more", details.all_candidates.len() - 16)));
        }
    }

    // Segments
    println!("\n{}", palette.paint("━━━ Segments ━━━", ansi::GRAY));
    if segments.is_empty() {
        println!("{}", palette.dim("  No segments produced (empty input)"));
    } else {
        print_segments(segments, &palette);
    }

    // Timing
    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    println!(
        "  Total: {}  │  Scan: {}  │  Resolve: {}",
        palette.paint(format!("{:?}", details.total), ansi::GREEN),
        palette.paint(format!("{:?}", details.scan_total), ansi::CYAN),
        palette.dim(format!("{:?}", details.resolve)),
    );
    println!();
}

fn print_scan(details: &ParseDetails, palette: &ansi::Palette) {
    if details.active_rules.is_empty() {
        println!("{}", palette.dim("  No rules active (no trigger markers in input)"));
        return;
    }

    for rule in &details.scan {
        println!(
            "  {} {}  {} {}  {} {}",
            palette.paint(&rule.rule, ansi::BLUE),
            palette.dim(format!("{:?}", rule.duration)),
            palette.dim("matches:"),
            palette.paint(rule.matches.to_string(), ansi::YELLOW),
            palette.dim("candidates:"),
            if rule.candidates > 0 {
                palette.paint(rule.candidates.to_string(), ansi::GREEN)
            } else {
                palette.dim(rule.candidates.to_string())
            }
        );
    }
}

fn print_segments(segments: &[Segment], palette: &ansi::Palette) {
    for (idx, seg) in segments.iter().enumerate() {
        match &seg.kind {
            SegmentKind::Literal => {
                println!(
                    "  {} {} {} {}",
                    palette.paint(format!("[{}]", idx), ansi::GRAY),
                    palette.dim(format!("{:?}", seg.body)),
                    palette.dim("│"),
                    palette.paint(format!("span {}..{}", seg.start, seg.end), ansi::YELLOW),
                );
            }
            SegmentKind::Replacement { rule, markup } => {
                println!(
                    "  {} {} {} {}",
                    palette.paint(format!("[{}]", idx), ansi::GRAY),
                    palette.bold(palette.paint(format!("{:?}", markup), ansi::GREEN)),
                    palette.dim("│"),
                    palette.paint(format!("span {}..{}", seg.start, seg.end), ansi::YELLOW),
                );
                println!("      {} {}", palette.dim("rule:"), palette.paint(*rule, ansi::CYAN));
            }
        }
    }
}

fn fmt_candidate_compact(node: &SegmentSummary, palette: &ansi::Palette) -> String {
    format!(
        "{} {} {}",
        palette.paint(format!("{}..{}", node.start, node.end), ansi::YELLOW),
        palette.paint(&node.rule, ansi::BLUE),
        palette.dim(node.preview.clone())
    )
}
