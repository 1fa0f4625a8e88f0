//! First-match-wins scan over an ordered rule list.
//!
//! Rules are tried strictly in file order; the first rule that claims the
//! input decides the outcome. There is no scoring and no backtracking, so the
//! order of the rule file is the priority order.
//!
//! Per rule:
//!
//! ```text
//! comparison form == trigger ?
//!   ├─ whitelisted         -> input unchanged
//!   └─ has end char        -> replacement
//! Prefix: comparison form starts with trigger
//!   ├─ whitelisted         -> input unchanged
//!   └─ otherwise           -> preserve_case(input, trigger, replacement)
//! Suffix: has end char && raw input ends with trigger
//!   ├─ whitelisted         -> input unchanged
//!   └─ otherwise           -> input with the suffix replaced
//! ```
//!
//! The comparison form is the raw input for case-sensitive rules and the
//! case-folded input (folded once per call) for everything else. Suffix rules
//! always look at the raw input.

use tracing::trace;

use super::case::preserve_case;
use crate::{Cursor, Match, Rule, RuleKind, fold_case};

/// Scan `rules` from `from` onwards. Also returns how many rules were tried.
pub(crate) fn scan<'r>(rules: &'r [Rule], input: &str, has_end_char: bool, from: Cursor) -> (Match<'r>, usize) {
    let folded = fold_case(input);
    let start = from.0.min(rules.len());

    for (offset, rule) in rules[start..].iter().enumerate() {
        if let Some(output) = apply(rule, input, &folded, has_end_char) {
            trace!(line = rule.line_number(), rule = rule.line(), input, output = output.as_str(), "rule matched");
            let matched = Match { output, rule: Some(rule), cursor: Cursor(start + offset) };
            return (matched, offset + 1);
        }
    }

    (Match { output: input.to_string(), rule: None, cursor: from }, rules.len() - start)
}

/// What `rule` emits for `input`, or `None` if it does not apply.
fn apply(rule: &Rule, input: &str, folded: &str, has_end_char: bool) -> Option<String> {
    let subject = if rule.is_case_sensitive() { input } else { folded };
    let trigger = rule.comparison_trigger();

    if subject == trigger {
        if rule.is_whitelisted() {
            return Some(input.to_string());
        }
        if has_end_char {
            return Some(rule.replacement().to_string());
        }
    }

    match rule.kind() {
        RuleKind::Exact => None,
        RuleKind::Prefix => {
            if !subject.starts_with(trigger) {
                return None;
            }
            if rule.is_whitelisted() {
                return Some(input.to_string());
            }
            // Folding can change lengths for a handful of characters.
            if input.chars().count() < rule.trigger().chars().count() {
                return None;
            }
            Some(preserve_case(input, rule.trigger(), rule.replacement()))
        }
        RuleKind::Suffix => {
            if !has_end_char || !input.ends_with(rule.trigger()) {
                return None;
            }
            if rule.is_whitelisted() {
                return Some(input.to_string());
            }
            let stem = &input[..input.len() - rule.trigger().len()];
            Some(format!("{stem}{}", rule.replacement()))
        }
    }
}
