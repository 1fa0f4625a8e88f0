//! Rule-file consistency checks.
//!
//! The matcher trusts file order completely, so a rule file can be valid for
//! the parser and still contain rules that never fire or that shadow each
//! other. These checks catch that class of authoring mistake.
//!
//! Findings are split into errors (the file is wrong) and warnings (the file
//! is probably wrong). [`lint`] looks at parsed rules only; [`lint_source`]
//! also inspects the raw text for directive and comment problems.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::{EndChars, Rule, RuleKind, RuleSet, fold_case};

/// Shortest prefix trigger that is not flagged as too eager.
pub const MIN_PREFIX_LEN: usize = 5;
/// Suffix triggers of this many characters or fewer are flagged.
pub const MAX_SHORT_SUFFIX_LEN: usize = 3;
/// An `ex:` comment on a suffix rule must list at least this many words.
pub const MIN_SUFFIX_EXAMPLES: usize = 6;

/// The individual checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LintCheck {
    DuplicateTrigger,
    ShortPrefix,
    RedundantPrefix,
    ShortSuffix,
    RedundantSuffix,
    CoveredBySuffix,
    NonPrintable,
    MissingPrefixMarker,
    SuffixExamples,
    MissingWhitelist,
    EndCharsDirective,
}

impl LintCheck {
    pub fn name(self) -> &'static str {
        match self {
            Self::DuplicateTrigger => "duplicate-trigger",
            Self::ShortPrefix => "short-prefix",
            Self::RedundantPrefix => "redundant-prefix",
            Self::ShortSuffix => "short-suffix",
            Self::RedundantSuffix => "redundant-suffix",
            Self::CoveredBySuffix => "covered-by-suffix",
            Self::NonPrintable => "non-printable",
            Self::MissingPrefixMarker => "missing-prefix-marker",
            Self::SuffixExamples => "suffix-examples",
            Self::MissingWhitelist => "missing-whitelist",
            Self::EndCharsDirective => "end-chars-directive",
        }
    }
}

impl fmt::Display for LintCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Knobs for the checks that need outside knowledge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LintOptions {
    /// Suffix triggers that are real misspellings on their own too (`owrk`),
    /// so typing just the trigger should be corrected and no whitelist entry
    /// is expected.
    pub whitelist_exceptions: HashSet<String>,
}

impl LintOptions {
    pub fn with_exceptions<I, S>(exceptions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        LintOptions { whitelist_exceptions: exceptions.into_iter().map(Into::into).collect() }
    }
}

/// One finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintIssue {
    /// 1-based line in the rule file; `None` for file-level findings.
    pub line: Option<usize>,
    pub check: LintCheck,
    pub message: String,
}

impl fmt::Display for LintIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "line {line}: [{}] {}", self.check, self.message),
            None => write!(f, "[{}] {}", self.check, self.message),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LintReport {
    pub errors: Vec<LintIssue>,
    pub warnings: Vec<LintIssue>,
}

impl LintReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn error(&mut self, line: Option<usize>, check: LintCheck, message: impl Into<String>) {
        self.errors.push(LintIssue { line, check, message: message.into() });
    }

    fn warn(&mut self, line: Option<usize>, check: LintCheck, message: impl Into<String>) {
        self.warnings.push(LintIssue { line, check, message: message.into() });
    }

    fn sort(&mut self) {
        self.errors.sort_by_key(|issue| issue.line);
        self.warnings.sort_by_key(|issue| issue.line);
    }
}

/// Check parsed rules for shadowing, redundancy and suspicious triggers.
pub fn lint(rules: &RuleSet) -> LintReport {
    lint_with(rules, &LintOptions::default())
}

pub fn lint_with(rules: &RuleSet, options: &LintOptions) -> LintReport {
    let mut report = LintReport::default();

    check_duplicates(rules.rules(), &mut report);
    check_prefixes(rules.rules(), &mut report);
    check_suffixes(rules.rules(), &mut report);
    check_suffix_whitelist(rules.rules(), &options.whitelist_exceptions, &mut report);
    check_printable(rules.rules(), &mut report);

    report.sort();
    report
}

/// [`lint`] plus checks that need the raw file text.
pub fn lint_source(source: &str, rules: &RuleSet) -> LintReport {
    lint_source_with(source, rules, &LintOptions::default())
}

pub fn lint_source_with(source: &str, rules: &RuleSet, options: &LintOptions) -> LintReport {
    let mut report = lint_with(rules, options);
    let lines: Vec<&str> = source.lines().collect();

    let directives = EndChars::scan(lines.iter().copied(), rules.options().escape);
    match directives.as_slice() {
        [_] => {}
        [] => report.error(None, LintCheck::EndCharsDirective, "no `#Hotstring EndChars` directive"),
        [_, rest @ ..] => {
            for (line, _) in rest {
                report.error(Some(*line), LintCheck::EndCharsDirective, "repeated `#Hotstring EndChars` directive");
            }
        }
    }

    // `::condutc::conduct  ; conduct/s/ed/ing` lists inflections, so it was
    // meant to be a `*` prefix rule.
    for (idx, line) in lines.iter().enumerate() {
        if regex!(r"^::[^:].*::.*\s;\s*\w+/").is_match(line.trim()) {
            report.warn(
                Some(idx + 1),
                LintCheck::MissingPrefixMarker,
                "comment lists inflections but the rule has no `*` prefix option",
            );
        }
    }

    check_suffix_examples(&lines, rules.rules(), &mut report);

    report.sort();
    report
}

/// `:C?:zign::zing  ; ex: amazing, blazing, ...` must list enough distinct
/// words, all ending in the replacement.
fn check_suffix_examples(lines: &[&str], rules: &[Rule], report: &mut LintReport) {
    for rule in rules.iter().filter(|r| r.is_suffix_match() && !r.is_whitelisted()) {
        let Some(raw) = lines.get(rule.line_number() - 1) else {
            continue;
        };
        let Some(caps) = regex!(r"\s;.*\bex:\s*(.*)$").captures(raw) else {
            continue;
        };
        let examples: Vec<&str> =
            caps[1].split(',').map(str::trim).filter(|example| !example.is_empty()).collect();

        let line = Some(rule.line_number());
        if examples.len() < MIN_SUFFIX_EXAMPLES {
            report.error(
                line,
                LintCheck::SuffixExamples,
                format!("suffix {:?} lists {} examples, need {MIN_SUFFIX_EXAMPLES}", rule.trigger(), examples.len()),
            );
        }

        let mut seen = HashSet::new();
        let repeated: Vec<&str> = examples.iter().copied().filter(|example| !seen.insert(*example)).collect();
        if !repeated.is_empty() {
            report.error(line, LintCheck::SuffixExamples, format!("repeated examples: {}", repeated.join(", ")));
        }

        let wrong: Vec<&str> = examples
            .iter()
            .copied()
            .filter(|example| {
                if rule.is_case_sensitive() {
                    !example.ends_with(rule.replacement())
                } else {
                    !fold_case(example).ends_with(&fold_case(rule.replacement()))
                }
            })
            .collect();
        if !wrong.is_empty() {
            report.error(
                line,
                LintCheck::SuffixExamples,
                format!("examples not ending in {:?}: {}", rule.replacement(), wrong.join(", ")),
            );
        }
    }
}

fn check_duplicates(rules: &[Rule], report: &mut LintReport) {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    for rule in rules.iter().filter(|r| !r.is_whitelisted() && r.kind() != RuleKind::Suffix) {
        if let Some(first) = seen.get(rule.trigger()) {
            report.error(
                Some(rule.line_number()),
                LintCheck::DuplicateTrigger,
                format!("trigger {:?} already defined on line {first}", rule.trigger()),
            );
        } else {
            seen.insert(rule.trigger(), rule.line_number());
        }
    }
}

fn check_prefixes(rules: &[Rule], report: &mut LintReport) {
    let mut prefixes: Vec<&Rule> = rules.iter().filter(|r| r.is_prefix_match()).collect();

    for rule in &prefixes {
        if rule.trigger().chars().count() < MIN_PREFIX_LEN {
            report.warn(
                Some(rule.line_number()),
                LintCheck::ShortPrefix,
                format!("prefix {:?} is shorter than {MIN_PREFIX_LEN} characters", rule.trigger()),
            );
        }
    }

    // Sorted, every prefix that extends another follows its root directly
    // or after other extensions of the same root.
    prefixes.sort_by(|a, b| a.comparison_trigger().cmp(b.comparison_trigger()));
    let mut root: Option<&Rule> = None;
    for rule in prefixes {
        match root {
            Some(shorter) if rule.comparison_trigger().starts_with(shorter.comparison_trigger()) => {
                report.error(
                    Some(rule.line_number()),
                    LintCheck::RedundantPrefix,
                    format!(
                        "prefix {:?} starts with prefix {:?} (line {})",
                        rule.trigger(),
                        shorter.trigger(),
                        shorter.line_number()
                    ),
                );
            }
            _ => root = Some(rule),
        }
    }
}

fn check_suffixes(rules: &[Rule], report: &mut LintReport) {
    let suffixes: Vec<&Rule> = rules.iter().filter(|r| r.is_suffix_match() && !r.is_whitelisted()).collect();

    for rule in &suffixes {
        if rule.trigger().chars().count() <= MAX_SHORT_SUFFIX_LEN {
            report.warn(
                Some(rule.line_number()),
                LintCheck::ShortSuffix,
                format!("suffix {:?} has {MAX_SHORT_SUFFIX_LEN} characters or fewer", rule.trigger()),
            );
        }
    }

    for (i, long) in suffixes.iter().enumerate() {
        for (j, short) in suffixes.iter().enumerate() {
            if i != j && long.trigger().ends_with(short.trigger()) {
                report.error(
                    Some(long.line_number()),
                    LintCheck::RedundantSuffix,
                    format!(
                        "suffix {:?} ends with suffix {:?} (line {})",
                        long.trigger(),
                        short.trigger(),
                        short.line_number()
                    ),
                );
            }
        }
    }

    let exact = rules
        .iter()
        .filter(|r| r.kind() == RuleKind::Exact && !r.is_whitelisted() && !r.is_case_sensitive());
    for rule in exact {
        let cover = suffixes
            .iter()
            .find(|s| rule.trigger().ends_with(s.trigger()) && rule.replacement().ends_with(s.replacement()));
        if let Some(cover) = cover {
            report.warn(
                Some(rule.line_number()),
                LintCheck::CoveredBySuffix,
                format!("already handled by suffix rule {:?} (line {})", cover.trigger(), cover.line_number()),
            );
        }
    }
}

/// Every suffix needs a decision: either typing the bare trigger is left
/// alone (a whitelist rule for it exists) or it is a listed exception.
fn check_suffix_whitelist(rules: &[Rule], exceptions: &HashSet<String>, report: &mut LintReport) {
    let whitelisted: HashSet<&str> = rules.iter().filter(|r| r.is_whitelisted()).map(Rule::trigger).collect();

    for rule in rules.iter().filter(|r| r.is_suffix_match() && !r.is_whitelisted()) {
        if whitelisted.contains(rule.trigger()) || exceptions.contains(rule.trigger()) {
            continue;
        }
        report.warn(
            Some(rule.line_number()),
            LintCheck::MissingWhitelist,
            format!("suffix {:?} has no whitelist rule and is not a listed exception", rule.trigger()),
        );
    }
}

fn check_printable(rules: &[Rule], report: &mut LintReport) {
    for rule in rules {
        if let Some(c) = rule.line().chars().find(|&c| !(c.is_ascii_graphic() || c == ' ' || c == '\t')) {
            report.warn(Some(rule.line_number()), LintCheck::NonPrintable, format!("contains {c:?}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lint_str(source: &str) -> LintReport {
        lint_source(source, &RuleSet::parse(source).unwrap())
    }

    fn checks(issues: &[LintIssue]) -> Vec<LintCheck> {
        issues.iter().map(|i| i.check).collect()
    }

    const HEADER: &str = "#Hotstring EndChars .,<>\n";

    #[test]
    fn clean_file() {
        let report = lint_str(&format!("{HEADER}::teh::the\n:*:wriet::write\n:?:aegs::ages\n:b0:align::\n:b0:aegs::\n"));
        assert!(report.is_clean(), "{report:?}");
    }

    #[test]
    fn duplicate_trigger() {
        let report = lint_str(&format!("{HEADER}::teh::the\n:*:teh::then\n:b0:teh::\n"));
        assert_eq!(checks(&report.errors), [LintCheck::DuplicateTrigger]);
        assert_eq!(report.errors[0].line, Some(3));
    }

    #[test]
    fn short_and_redundant_prefix() {
        let report = lint_str(&format!("{HEADER}:*:uniqe::unique\n:*:uniqeu::uniqueu\n:*:ab::ba\n"));
        assert_eq!(checks(&report.errors), [LintCheck::RedundantPrefix]);
        assert_eq!(report.errors[0].line, Some(3));
        assert_eq!(checks(&report.warnings), [LintCheck::ShortPrefix]);
    }

    #[test]
    fn short_and_redundant_suffix() {
        let report = lint_str(&format!("{HEADER}:?:aegs::ages\n:?:paegs::pages\n:?:ign::ing\n:b0:aegs::\n:b0:paegs::\n:b0:ign::\n"));
        assert_eq!(checks(&report.errors), [LintCheck::RedundantSuffix]);
        assert_eq!(report.errors[0].line, Some(3));
        assert_eq!(checks(&report.warnings), [LintCheck::ShortSuffix]);
    }

    #[test]
    fn exact_rule_covered_by_suffix() {
        let report = lint_str(&format!("{HEADER}:?:tues::utes\n::exectues::executes\n:b0:tues::\n"));
        assert_eq!(checks(&report.warnings), [LintCheck::CoveredBySuffix]);
        assert_eq!(report.warnings[0].line, Some(3));
    }

    #[test]
    fn non_printable_characters() {
        let report = lint_str(&format!("{HEADER}::cafe::café\n"));
        assert_eq!(checks(&report.warnings), [LintCheck::NonPrintable]);
    }

    #[test]
    fn missing_prefix_marker() {
        let report = lint_str(&format!("{HEADER}::condutc::conduct  ; conduct/s/ed/ing\n"));
        assert_eq!(checks(&report.warnings), [LintCheck::MissingPrefixMarker]);
        assert_eq!(report.warnings[0].line, Some(2));
    }

    #[test]
    fn suffix_examples_must_be_many_distinct_and_matching() {
        let good = "; ex: ability, capability, mobility, stability, visibility, liability";
        let report = lint_str(&format!("{HEADER}:C?:bilty::bility  {good}\n:b0:bilty::\n"));
        assert!(report.is_clean(), "{report:?}");

        let few = "; ex: ability, mobility";
        let report = lint_str(&format!("{HEADER}:C?:bilty::bility  {few}\n:b0:bilty::\n"));
        assert_eq!(checks(&report.errors), [LintCheck::SuffixExamples]);
        assert_eq!(report.errors[0].line, Some(2));

        let repeated = "; ex: ability, mobility, ability, stability, visibility, liability";
        let report = lint_str(&format!("{HEADER}:C?:bilty::bility  {repeated}\n:b0:bilty::\n"));
        assert_eq!(checks(&report.errors), [LintCheck::SuffixExamples]);
        assert!(report.errors[0].message.contains("ability"));

        let wrong = "; ex: ability, agility, mobility, stability, visibility, liability";
        let report = lint_str(&format!("{HEADER}:C?:bilty::bility  {wrong}\n:b0:bilty::\n"));
        assert_eq!(checks(&report.errors), [LintCheck::SuffixExamples]);
        assert!(report.errors[0].message.contains("agility"));
    }

    #[test]
    fn suffix_without_whitelist_decision() {
        let source = format!("{HEADER}:?:owrk::work\n:?:kcet::cket\n:b0:kcet::\n");
        let rules = RuleSet::parse(&source).unwrap();

        let report = lint_source(&source, &rules);
        assert_eq!(checks(&report.warnings), [LintCheck::MissingWhitelist]);
        assert_eq!(report.warnings[0].line, Some(2));

        let options = LintOptions::with_exceptions(["owrk"]);
        assert!(lint_source_with(&source, &rules, &options).is_clean());
    }

    #[test]
    fn end_chars_directive_count() {
        let report = lint_str("::teh::the\n");
        assert_eq!(checks(&report.errors), [LintCheck::EndCharsDirective]);
        assert_eq!(report.errors[0].line, None);

        let report = lint_str(&format!("{HEADER}{HEADER}::teh::the\n"));
        assert_eq!(checks(&report.errors), [LintCheck::EndCharsDirective]);
        assert_eq!(report.errors[0].line, Some(2));
    }

    #[test]
    fn issue_display() {
        let issue = LintIssue { line: Some(4), check: LintCheck::ShortPrefix, message: "too short".into() };
        assert_eq!(issue.to_string(), "line 4: [short-prefix] too short");
    }
}
