//! Hotstring rule-file parser.
//!
//! A rule file is line oriented. Each surviving line has the shape
//!
//! ```text
//! :<options>:<trigger>::<replacement>
//! ```
//!
//! Loading runs in two phases:
//!
//! ```text
//! raw lines ──▶ clean_lines ──▶ parse_line (per line) ──▶ Vec<Rule>
//!               - trim surrounding whitespace (rules may be indented)
//!               - drop blanks, `{` / `}` scope lines
//!               - drop `#` directives and `;` comments
//!               - cut ` ;` trailing comments
//!               - every survivor must start with ':'
//! ```
//!
//! The whole load fails on the first malformed line. A partially loaded rule
//! set would silently skip corrections, so there is no "best effort" mode.
//!
//! ## Escaping
//!
//! The trigger ends at the first `::` whose first colon is not preceded by the
//! escape marker. Trigger and replacement are then unescaped separately:
//!
//! | source       | result                                     |
//! |--------------|--------------------------------------------|
//! | `` `; ``     | `;`                                        |
//! | `` `: ``     | `:`                                        |
//! | trailing `` ` `` | removed (keeps the whitespace before it) |
//! | leading `` ` `` + space | removed (keeps the space)       |
//! | `{X}`        | `X` for any single character               |
//!
//! Other escape sequences (`` `n ``, `` `t ``) are left for the host runtime.

use tracing::debug;

use crate::error::{ParseError, Result};
use crate::{Modifiers, ParseOptions, Rule, RuleKind};

const DELIMITER: &str = "::";

/// A rule line that survived cleaning, tagged with its 1-based source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SourceLine<'a> {
    pub number: usize,
    pub text: &'a str,
}

/// Parse every rule line in `lines`, in order.
pub(crate) fn parse_lines<I, S>(lines: I, options: &ParseOptions) -> Result<Vec<Rule>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let raw: Vec<S> = lines.into_iter().collect();
    let cleaned = clean_lines(raw.iter().map(|line| line.as_ref()))?;
    let rules = cleaned.iter().map(|line| parse_line(line, options)).collect::<Result<Vec<_>>>()?;

    debug!(lines = raw.len(), rules = rules.len(), skipped = raw.len() - rules.len(), "parsed rule file");
    Ok(rules)
}

/// Strip everything that is not a rule and check the rest looks like one.
pub(crate) fn clean_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Result<Vec<SourceLine<'a>>> {
    let mut cleaned = Vec::new();

    for (idx, raw) in lines.into_iter().enumerate() {
        let text = raw.trim();
        if text.is_empty() || text == "{" || text == "}" {
            continue;
        }
        if text.starts_with('#') || text.starts_with(';') {
            continue;
        }

        let text = strip_trailing_comment(text).trim_end();
        if text.is_empty() {
            continue;
        }
        if !text.starts_with(':') {
            return Err(ParseError::MissingLeadingColon { line: idx + 1, text: text.to_string() });
        }

        cleaned.push(SourceLine { number: idx + 1, text });
    }

    if cleaned.is_empty() {
        return Err(ParseError::Empty);
    }
    Ok(cleaned)
}

fn strip_trailing_comment(text: &str) -> &str {
    match text.find(" ;") {
        Some(idx) => &text[..idx],
        None => text,
    }
}

/// Turn one cleaned line into a [`Rule`].
pub(crate) fn parse_line(line: &SourceLine<'_>, options: &ParseOptions) -> Result<Rule> {
    let SourceLine { number, text } = *line;

    let body = text
        .strip_prefix(':')
        .ok_or_else(|| ParseError::MissingLeadingColon { line: number, text: text.to_string() })?;
    let options_end = body
        .find(':')
        .ok_or_else(|| ParseError::MissingOptionsTerminator { line: number, text: text.to_string() })?;
    let flags = &body[..options_end];
    let rest = &body[options_end + 1..];

    let split = find_delimiter(rest, options.escape)
        .ok_or_else(|| ParseError::MissingDelimiter { line: number, text: text.to_string() })?;
    let trigger = unescape(&rest[..split], options.escape);
    if trigger.is_empty() {
        return Err(ParseError::EmptyTrigger { line: number, text: text.to_string() });
    }
    let replacement = unescape(&rest[split + DELIMITER.len()..], options.escape);

    let (kind, modifiers) =
        parse_flags(flags).ok_or_else(|| ParseError::ConflictingMatchKinds { line: number, text: text.to_string() })?;

    if !modifiers.contains(Modifiers::WHITELISTED) && trigger == replacement {
        return Err(ParseError::NoOpRule { line: number, trigger });
    }

    Ok(Rule::new(trigger, replacement, kind, modifiers, text.to_string(), number))
}

/// Map the option run between the first two colons onto kind + modifiers.
///
/// Unknown option characters are ignored. Returns `None` when both `*` and
/// `?` are present.
fn parse_flags(flags: &str) -> Option<(RuleKind, Modifiers)> {
    let mut modifiers = Modifiers::empty();
    if flags.contains("b0") {
        modifiers |= Modifiers::WHITELISTED;
    }
    if flags.contains('C') {
        modifiers |= Modifiers::CASE_SENSITIVE;
    }

    let kind = match (flags.contains('*'), flags.contains('?')) {
        (true, true) => return None,
        (true, false) => RuleKind::Prefix,
        (false, true) => RuleKind::Suffix,
        (false, false) => RuleKind::Exact,
    };
    Some((kind, modifiers))
}

/// Byte offset of the first `::` in `rest` whose leading colon is not escaped.
///
/// Candidates overlap: in ``a`:::b`` the escaped colon is skipped and the
/// delimiter is the pair that follows it.
fn find_delimiter(rest: &str, escape: char) -> Option<usize> {
    rest.char_indices()
        .filter(|&(_, c)| c == ':')
        .map(|(idx, _)| idx)
        .find(|&idx| rest[idx..].starts_with(DELIMITER) && !rest[..idx].ends_with(escape))
}

fn unescape(text: &str, escape: char) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut at_start = true;

    while let Some(c) = chars.next() {
        if c == escape {
            match chars.peek().copied() {
                Some(next @ (';' | ':')) => {
                    out.push(next);
                    chars.next();
                    at_start = false;
                    continue;
                }
                // trailing marker
                None => continue,
                Some(next) if at_start && next.is_whitespace() => {
                    at_start = false;
                    continue;
                }
                Some(_) => {}
            }
        }
        out.push(c);
        at_start = false;
    }

    unwrap_braces(&out)
}

/// `{X}` → `X` for any single character `X`.
fn unwrap_braces(text: &str) -> String {
    if !text.contains('{') {
        return text.to_string();
    }
    regex!(r"\{(.)\}").replace_all(text, "$1").into_owned()
}
