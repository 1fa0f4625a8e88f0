use crate::engine::{self, EndChars, MatchStats};
use crate::error::Result;
use crate::{Cursor, Match, ParseOptions, Rule, RuleSet};
use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing::debug;

/// Parse rule-file lines with the default [`ParseOptions`].
///
/// Fails on the first malformed line; no partial rule list is returned.
pub fn parse_rules<I, S>(lines: I) -> Result<Vec<Rule>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parse_rules_with(lines, &ParseOptions::default())
}

/// Parse rule-file lines with explicit `options`.
pub fn parse_rules_with<I, S>(lines: I, options: &ParseOptions) -> Result<Vec<Rule>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    engine::parse_lines(lines, options)
}

/// Match `input` against `rules`, starting the scan at `from`.
///
/// Pass [`Cursor::START`] unless inputs arrive in rule-file order; in that
/// case the returned cursor may be fed into the next call.
///
/// ```
/// use hotfix::{Cursor, find_match, parse_rules};
///
/// let rules = parse_rules(["::abc::def"]).unwrap();
/// let hit = find_match(&rules, "abc", true, Cursor::START);
/// assert_eq!(hit.output, "def");
///
/// let miss = find_match(&rules, "abc", false, Cursor::START);
/// assert_eq!(miss.output, "abc");
/// assert!(miss.rule.is_none());
/// ```
pub fn find_match<'r>(rules: &'r [Rule], input: &str, has_end_char: bool, from: Cursor) -> Match<'r> {
    engine::scan(rules, input, has_end_char, from).0
}

impl RuleSet {
    /// Parse a whole rule file held in memory.
    pub fn parse(source: &str) -> Result<Self> {
        Self::parse_with(source, ParseOptions::default())
    }

    pub fn parse_with(source: &str, options: ParseOptions) -> Result<Self> {
        let lines: Vec<&str> = source.lines().collect();
        let rules = engine::parse_lines(lines.iter().copied(), &options)?;

        let end_chars = EndChars::scan(lines.iter().copied(), options.escape)
            .into_iter()
            .next()
            .map(|(_, set)| set)
            .unwrap_or_default();

        Ok(RuleSet { rules, end_chars, options })
    }

    /// Read and parse a rule file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_with(path, ParseOptions::default())
    }

    pub fn load_with(path: impl AsRef<Path>, options: ParseOptions) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading rule file");
        let source = fs::read_to_string(path)?;
        Self::parse_with(&source, options)
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// End chars declared by the file (or the default set).
    pub fn end_chars(&self) -> &EndChars {
        &self.end_chars
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Match one token from the start of the rule list.
    pub fn find(&self, input: &str, has_end_char: bool) -> Match<'_> {
        self.find_from(input, has_end_char, Cursor::START)
    }

    /// Match one token, resuming at `from`. See [`find_match`].
    pub fn find_from(&self, input: &str, has_end_char: bool, from: Cursor) -> Match<'_> {
        find_match(&self.rules, input, has_end_char, from)
    }

    /// Like [`find`](Self::find), but also reports scan depth and timing.
    pub fn find_verbose(&self, input: &str, has_end_char: bool) -> (Match<'_>, MatchStats) {
        let start = Instant::now();
        let (matched, rules_scanned) = engine::scan(&self.rules, input, has_end_char, Cursor::START);
        (matched, MatchStats { rules_scanned, elapsed: start.elapsed() })
    }

    /// Correct a typed chunk such as `"teh "`: the trailing end char (if any)
    /// decides `has_end_char` and is re-appended to the output.
    ///
    /// ```
    /// use hotfix::RuleSet;
    ///
    /// let rules = RuleSet::parse("::teh::the").unwrap();
    /// assert_eq!(rules.correct("teh."), "the.");
    /// assert_eq!(rules.correct("teh"), "teh");
    /// ```
    pub fn correct(&self, text: &str) -> String {
        let (token, end) = self.end_chars.split_token(text);
        let mut output = self.find(token, end.is_some()).output;
        if let Some(c) = end {
            output.push(c);
        }
        output
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
