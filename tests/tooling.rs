use hotfix::lint::{LintCheck, LintOptions, lint, lint_source, lint_source_with};
use hotfix::{RuleSet, espanso};
use std::process::Command;

const SAMPLE: &str = include_str!("fixtures/sample.ahk");

#[test]
fn sample_lints_without_errors() {
    let rules = RuleSet::parse(SAMPLE).unwrap();
    let report = lint_source(SAMPLE, &rules);
    assert!(!report.has_errors(), "{:?}", report.errors);

    let checks: Vec<LintCheck> = report.warnings.iter().map(|w| w.check).collect();
    assert_eq!(checks, [LintCheck::MissingWhitelist, LintCheck::ShortSuffix]);
    assert_eq!(report.warnings[0].line, Some(30));
    assert_eq!(report.warnings[1].line, Some(32));

    let options = LintOptions::with_exceptions(["aegs"]);
    let report = lint_source_with(SAMPLE, &rules, &options);
    let checks: Vec<LintCheck> = report.warnings.iter().map(|w| w.check).collect();
    assert_eq!(checks, [LintCheck::ShortSuffix]);
}

#[test]
fn appended_rules_are_flagged() {
    let source = format!("{SAMPLE}:*:wrietable::writable\n::teh::thee\n");
    let rules = RuleSet::parse(&source).unwrap();
    let report = lint(&rules);

    let mut checks: Vec<LintCheck> = report.errors.iter().map(|e| e.check).collect();
    checks.sort_by_key(|c| c.name());
    assert_eq!(checks, [LintCheck::DuplicateTrigger, LintCheck::RedundantPrefix]);
    assert!(report.errors.iter().all(|e| e.line.unwrap() > 34));
}

#[test]
fn espanso_export_of_sample() {
    let rules = RuleSet::parse(SAMPLE).unwrap();
    let yaml = espanso::to_yaml(&rules);

    assert!(yaml.starts_with(espanso::PREAMBLE));
    assert_eq!(yaml.matches("  - trigger: ").count(), rules.len());
    assert!(yaml.contains("  - trigger: \"wriet\"\n    replace: \"write\"\n    left_word: true\n    propagate_case: true\n\n"));
    assert!(yaml.contains("  - trigger: \"design\"\n    replace: \"design\"\n    word: true\n\n"));
    assert!(yaml.contains("  - trigger: \"ign\"\n    replace: \"ing\"\n    right_word: true\n\n"));
}

fn hotfix() -> Command {
    Command::new(env!("CARGO_BIN_EXE_hotfix"))
}

fn fixture_path() -> String {
    format!("{}/tests/fixtures/sample.ahk", env!("CARGO_MANIFEST_DIR"))
}

#[test]
fn cli_check_reports_corrections() {
    let out = hotfix().args(["check", fixture_path().as_str(), "teh.", "Wriet", "--no-color"]).output().unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("the"), "{stdout}");
    assert!(stdout.contains("Write"), "{stdout}");
    assert!(!stdout.contains("\x1b["));
}

#[test]
fn cli_lint_exit_codes() {
    let out = hotfix().args(["lint", fixture_path().as_str(), "--no-color"]).output().unwrap();
    assert_eq!(out.status.code(), Some(0));

    let dir = tempfile::tempdir().unwrap();
    let bad = dir.path().join("dup.ahk");
    std::fs::write(&bad, "#Hotstring EndChars .\n::teh::the\n::teh::then\n").unwrap();
    let out = hotfix().arg("lint").arg(&bad).output().unwrap();
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn cli_lint_accepts_whitelist_exceptions() {
    let out = hotfix()
        .args(["lint", fixture_path().as_str(), "--no-color", "--whitelist-exception", "aegs"])
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(!stdout.contains("missing-whitelist"), "{stdout}");
    assert!(stdout.contains("short-suffix"), "{stdout}");
}

#[test]
fn cli_export_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("out.yml");
    let status = hotfix().arg("export").arg(fixture_path()).arg("-o").arg(&target).status().unwrap();
    assert!(status.success());
    assert!(std::fs::read_to_string(&target).unwrap().starts_with(espanso::PREAMBLE));
}

#[test]
fn cli_rejects_unknown_subcommand() {
    let out = hotfix().arg("frobnicate").output().unwrap();
    assert_eq!(out.status.code(), Some(2));
}
