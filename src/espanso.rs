//! Espanso match-file export.
//!
//! Espanso has no notion of rule order, so the export is a flat list; rules
//! are written in file order anyway to keep diffs readable.

use std::fmt::Write as _;

use crate::{Rule, RuleKind, RuleSet};

pub const PREAMBLE: &str = "---\n# Auto-generated Espanso YAML file\nmatches:\n";

const INDENT: &str = "    ";

/// Render every exportable rule as one Espanso YAML document.
pub fn to_yaml(rules: &RuleSet) -> String {
    let escape = rules.options().escape;
    let mut yaml = String::from(PREAMBLE);
    for rule in rules {
        yaml.push_str(&rule_to_yaml(rule, escape));
    }
    yaml
}

/// One `matches:` entry, or an empty string for rules Espanso cannot express
/// (triggers or replacements containing an escaped newline).
pub fn rule_to_yaml(rule: &Rule, escape: char) -> String {
    let newline = format!("{escape}n");
    if rule.trigger().contains(&newline) || rule.replacement().contains(&newline) {
        return String::new();
    }

    let replace = if rule.is_whitelisted() { rule.trigger() } else { rule.replacement() };
    let boundary = match rule.kind() {
        _ if rule.is_whitelisted() => "word",
        RuleKind::Exact => "word",
        RuleKind::Prefix => "left_word",
        RuleKind::Suffix => "right_word",
    };

    let mut entry = String::new();
    let _ = writeln!(entry, "  - trigger: \"{}\"", quote(rule.trigger()));
    let _ = writeln!(entry, "{INDENT}replace: \"{}\"", quote(replace));
    let _ = writeln!(entry, "{INDENT}{boundary}: true");
    if !rule.is_whitelisted() && !rule.is_case_sensitive() && rule.kind() != RuleKind::Suffix {
        let _ = writeln!(entry, "{INDENT}propagate_case: true");
    }
    entry.push('\n');
    entry
}

/// Escape `text` for a YAML double-quoted scalar.
fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() && (c as u32) < 0x100 => {
                let _ = write!(out, "\\x{:02X}", c as u32);
            }
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04X}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}
