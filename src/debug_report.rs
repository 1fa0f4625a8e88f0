use hotfix::lint::{LintIssue, LintReport};
use hotfix::{Match, MatchStats, RuleKind};
use std::path::Path;

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const RED: &str = "\x1b[31m";
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

pub fn print_check(token: &str, end: Option<char>, matched: &Match<'_>, stats: &MatchStats, color: bool) {
    let palette = ansi::Palette::new(color);
    let end_label = match end {
        Some(c) => format!("end char {c:?}"),
        None => "no end char".to_string(),
    };
    println!(
        "\n{} {}",
        palette.bold(palette.paint(format!("⚙  Checking: \"{token}\""), ansi::CYAN)),
        palette.dim(format!("({end_label})"))
    );

    match matched.rule {
        Some(rule) => {
            let verdict = if rule.is_whitelisted() {
                palette.paint("✓ whitelisted", ansi::BLUE)
            } else if matched.output == token {
                palette.dim("✓ unchanged")
            } else {
                palette.paint("✓ corrected", ansi::GREEN)
            };
            println!(
                "  {} {} {} {}",
                verdict,
                palette.dim("│"),
                palette.bold(palette.paint(&matched.output, ansi::GREEN)),
                palette.dim(end.map(String::from).unwrap_or_default()),
            );
            let kind = match rule.kind() {
                RuleKind::Exact => "exact",
                RuleKind::Prefix => "prefix",
                RuleKind::Suffix => "suffix",
            };
            println!(
                "      {} {}  {} {}  {} {}",
                palette.dim("rule:"),
                palette.paint(rule.line(), ansi::CYAN),
                palette.dim("│ kind:"),
                palette.paint(kind, ansi::BLUE),
                palette.dim("│ line:"),
                palette.paint(rule.line_number().to_string(), ansi::YELLOW),
            );
        }
        None => println!("  {}", palette.dim("✗ no rule applies")),
    }

    println!(
        "  {} {}  │  {} {}",
        palette.dim("scanned:"),
        palette.paint(stats.rules_scanned.to_string(), ansi::YELLOW),
        palette.dim("elapsed:"),
        palette.paint(format!("{:?}", stats.elapsed), ansi::GREEN),
    );
}

pub fn print_lint(path: &Path, rule_count: usize, report: &LintReport, color: bool) {
    let palette = ansi::Palette::new(color);
    println!(
        "\n{} {}",
        palette.bold(palette.paint(format!("⚙  Linting: {}", path.display()), ansi::CYAN)),
        palette.dim(format!("({rule_count} rules)"))
    );

    if report.is_clean() {
        println!("  {}", palette.paint("✓ no findings", ansi::GREEN));
        return;
    }

    if !report.errors.is_empty() {
        println!("\n{}", palette.paint("━━━ Errors ━━━", ansi::GRAY));
        for issue in &report.errors {
            print_issue(issue, ansi::RED, &palette);
        }
    }

    if !report.warnings.is_empty() {
        println!("\n{}", palette.paint("━━━ Warnings ━━━", ansi::GRAY));
        for issue in &report.warnings {
            print_issue(issue, ansi::YELLOW, &palette);
        }
    }

    println!(
        "\n  {} error(s)  │  {} warning(s)",
        palette.paint(report.errors.len().to_string(), ansi::RED),
        palette.paint(report.warnings.len().to_string(), ansi::YELLOW),
    );
}

fn print_issue(issue: &LintIssue, color: &str, palette: &ansi::Palette) {
    let location = match issue.line {
        Some(line) => format!("{line:>5}"),
        None => "    -".to_string(),
    };
    println!(
        "  {} {} {}",
        palette.paint(location, ansi::GRAY),
        palette.paint(format!("[{}]", issue.check), color),
        issue.message,
    );
}
