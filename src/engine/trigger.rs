//! End-char handling.
//!
//! Exact and suffix rules only fire once the user has finished a word, which
//! the host runtime detects by seeing one of the rule file's *end chars*. The
//! set is declared once per file:
//!
//! ```text
//! #Hotstring EndChars -()[]{}:;'"/\,.?!`n `t<>
//! ```
//!
//! The rule parser skips directives entirely; this module reads the
//! directive on its own and offers the caller-side helper that turns a typed
//! chunk of text into the `(token, has_end_char)` pair the matcher expects.
//!
//! ## Design notes
//!
//! - Escapes in the directive use the rule file's escape marker: `` `n ``,
//!   `` `t ``, `` `r ``, `` `s `` (space); any other escaped character stands
//!   for itself.
//! - A file without the directive gets the AutoHotkey default set.

use std::collections::BTreeSet;

/// AutoHotkey's built-in end chars.
pub const DEFAULT_END_CHARS: &str = "-()[]{}':;\"/\\,.?!\n \t";

/// The set of characters that terminate a typed word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndChars {
    chars: BTreeSet<char>,
}

impl Default for EndChars {
    fn default() -> Self {
        DEFAULT_END_CHARS.chars().collect()
    }
}

impl FromIterator<char> for EndChars {
    fn from_iter<T: IntoIterator<Item = char>>(iter: T) -> Self {
        EndChars { chars: iter.into_iter().collect() }
    }
}

impl EndChars {
    /// Parse a `#Hotstring EndChars <chars>` directive. Any other line gives
    /// `None`.
    pub fn from_directive(line: &str, escape: char) -> Option<Self> {
        let line = match line.find(" ;") {
            Some(idx) => &line[..idx],
            None => line,
        };
        let caps = regex!(r"(?i)^#Hotstring[ \t]+EndChars[ \t](.*)$").captures(line.trim())?;
        let declared = caps.get(1)?.as_str();
        Some(decode(declared, escape).collect())
    }

    /// Every `EndChars` directive in `lines`, with its 1-based line number.
    pub fn scan<I, S>(lines: I, escape: char) -> Vec<(usize, EndChars)>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        lines
            .into_iter()
            .enumerate()
            .filter_map(|(idx, line)| Self::from_directive(line.as_ref(), escape).map(|set| (idx + 1, set)))
            .collect()
    }

    pub fn contains(&self, c: char) -> bool {
        self.chars.contains(&c)
    }

    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.chars.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Split a typed chunk into the word and its terminating end char, if the
    /// last character is one.
    ///
    /// ```
    /// use hotfix::EndChars;
    ///
    /// let end = EndChars::default();
    /// assert_eq!(end.split_token("teh."), ("teh", Some('.')));
    /// assert_eq!(end.split_token("teh"), ("teh", None));
    /// ```
    pub fn split_token<'a>(&self, text: &'a str) -> (&'a str, Option<char>) {
        match text.char_indices().next_back() {
            Some((idx, c)) if self.contains(c) => (&text[..idx], Some(c)),
            _ => (text, None),
        }
    }
}

fn decode(declared: &str, escape: char) -> impl Iterator<Item = char> + '_ {
    let mut chars = declared.chars();
    std::iter::from_fn(move || {
        let c = chars.next()?;
        if c != escape {
            return Some(c);
        }
        Some(match chars.next() {
            Some('n') => '\n',
            Some('t') => '\t',
            Some('r') => '\r',
            Some('s') => ' ',
            Some(other) => other,
            None => escape,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_directive_with_escapes() {
        let set = EndChars::from_directive("#Hotstring EndChars -()[]{}:;'\"/\\,.?!`n `t<>", '`').unwrap();
        for c in ['-', '(', ')', '[', ']', '{', '}', ':', ';', '\'', '"', '/', '\\', ',', '.', '?', '!', '<', '>'] {
            assert!(set.contains(c), "missing {c:?}");
        }
        assert!(set.contains('\n'));
        assert!(set.contains('\t'));
        assert!(set.contains(' '));
        assert!(!set.contains('`'));
        assert!(!set.contains('n'));
    }

    #[test]
    fn directive_keyword_is_case_insensitive() {
        assert!(EndChars::from_directive("#hotstring endchars .,", '`').is_some());
    }

    #[test]
    fn indented_directive() {
        let set = EndChars::from_directive("    #Hotstring EndChars .,", '`').unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn other_lines_are_not_directives() {
        assert!(EndChars::from_directive("#NoEnv", '`').is_none());
        assert!(EndChars::from_directive("::teh::the", '`').is_none());
        assert!(EndChars::from_directive("#Hotstring R", '`').is_none());
    }

    #[test]
    fn scan_reports_line_numbers() {
        let lines = ["#NoEnv", "", "#Hotstring EndChars .,", "::teh::the"];
        let found = EndChars::scan(lines, '`');
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].0, 3);
        assert_eq!(found[0].1.len(), 2);
    }

    #[test]
    fn default_set() {
        let set = EndChars::default();
        assert!(set.contains(' '));
        assert!(set.contains('.'));
        assert!(set.contains('\n'));
        assert!(!set.contains('<'));
        assert!(!set.contains('a'));
    }

    #[test]
    fn split_token_handles_multibyte_and_empty() {
        let set = EndChars::default();
        assert_eq!(set.split_token("naïve!"), ("naïve", Some('!')));
        assert_eq!(set.split_token(""), ("", None));
        assert_eq!(set.split_token("."), ("", Some('.')));
    }
}
