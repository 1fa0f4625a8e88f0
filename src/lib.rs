//! Rule-based autocorrect engine for AutoHotkey-style hotstring files.
//!
//! A rule file is a list of `:<options>:<trigger>::<replacement>` lines. The
//! parser turns it into an ordered [`RuleSet`]; the matcher scans that list in
//! file order and the first applicable rule wins.
//!
//! ```
//! use hotfix::RuleSet;
//!
//! let rules = RuleSet::parse(":*:wriet::write\n::teh::the\n").unwrap();
//!
//! // Exact rules only fire once an end char has been typed.
//! assert_eq!(rules.find("teh", true).output, "the");
//! assert!(rules.find("teh", false).rule.is_none());
//!
//! // Prefix rules fire mid-word and keep the typed capitalization.
//! assert_eq!(rules.find("Wriet-Output", false).output, "Write-Output");
//! ```

#[macro_use]
mod macros;
mod api;
mod engine;
mod error;
pub mod espanso;
pub mod lint;

pub use api::{find_match, parse_rules, parse_rules_with};
pub use engine::{EndChars, MatchStats, preserve_case};
pub use error::{ParseError, Result};

// --- Rule model -------------------------------------------------------------

bitflags::bitflags! {
    /// Modifiers that combine freely with every [`RuleKind`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// `b0`: the trigger is exempted from correction.
        const WHITELISTED    = 1 << 0;
        /// `C`: compare the trigger verbatim instead of case-folded.
        const CASE_SENSITIVE = 1 << 1;
    }
}

/// Where in the typed token a trigger has to appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    /// The whole token must equal the trigger.
    Exact,
    /// `*`: the token starts with the trigger; no end char needed.
    Prefix,
    /// `?`: the token ends with the trigger; needs an end char.
    Suffix,
}

/// One parsed hotstring line.
///
/// Rules are immutable once parsed. The case-folded trigger is computed at
/// construction so the matcher never folds a trigger twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    trigger: String,
    replacement: String,
    kind: RuleKind,
    modifiers: Modifiers,
    folded_trigger: String,
    line: String,
    line_number: usize,
}

impl Rule {
    pub(crate) fn new(
        trigger: String,
        replacement: String,
        kind: RuleKind,
        modifiers: Modifiers,
        line: String,
        line_number: usize,
    ) -> Self {
        let folded_trigger = fold_case(&trigger);
        Rule { trigger, replacement, kind, modifiers, folded_trigger, line, line_number }
    }

    /// Unescaped trigger text.
    pub fn trigger(&self) -> &str {
        &self.trigger
    }

    /// Unescaped replacement text. Whitelist rules usually leave this empty;
    /// the matcher never substitutes it for them.
    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn is_whitelisted(&self) -> bool {
        self.modifiers.contains(Modifiers::WHITELISTED)
    }

    pub fn is_case_sensitive(&self) -> bool {
        self.modifiers.contains(Modifiers::CASE_SENSITIVE)
    }

    pub fn is_prefix_match(&self) -> bool {
        self.kind == RuleKind::Prefix
    }

    pub fn is_suffix_match(&self) -> bool {
        self.kind == RuleKind::Suffix
    }

    /// Source line with any trailing comment removed.
    pub fn line(&self) -> &str {
        &self.line
    }

    /// 1-based line number in the rule file.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Trigger in the form the matcher compares against: verbatim for
    /// case-sensitive rules, case-folded otherwise.
    pub(crate) fn comparison_trigger(&self) -> &str {
        if self.is_case_sensitive() { &self.trigger } else { &self.folded_trigger }
    }
}

pub(crate) fn fold_case(text: &str) -> String {
    text.to_lowercase()
}

// --- Configuration ----------------------------------------------------------

/// Knobs for the rule-file parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Escape marker. A marker before `;` or `:` makes it literal; a bare
    /// marker at either end of a trigger/replacement keeps whitespace there.
    pub escape: char,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { escape: '`' }
    }
}

/// Resume position into a rule list.
///
/// Only meaningful when successive inputs are presented in the same order as
/// their rules appear in the file; everyone else should start from
/// [`Cursor::START`] (the default) and ignore the returned cursor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cursor(pub(crate) usize);

impl Cursor {
    pub const START: Cursor = Cursor(0);

    pub fn index(self) -> usize {
        self.0
    }
}

// --- Results ----------------------------------------------------------------

/// Outcome of matching one input token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match<'r> {
    /// Text to emit: the replacement, or the unchanged input.
    pub output: String,
    /// Rule that decided the outcome. `None` means "no correction".
    pub rule: Option<&'r Rule>,
    /// Where an in-order caller may resume the next scan.
    pub cursor: Cursor,
}

impl Match<'_> {
    /// True when some rule (possibly a whitelist rule) claimed the input.
    pub fn is_match(&self) -> bool {
        self.rule.is_some()
    }
}

/// An ordered, immutable rule list together with the end chars its file
/// declares.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSet {
    rules: Vec<Rule>,
    end_chars: EndChars,
    options: ParseOptions,
}
