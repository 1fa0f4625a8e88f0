//! Errors raised while loading a rule file.
//!
//! Every variant is fatal for the whole file: a rule set is either loaded
//! completely or not at all.

/// A malformed rule file (or one that could not be read).
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("failed to read rule file: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: rule must start with ':' (found {text:?})")]
    MissingLeadingColon { line: usize, text: String },

    #[error("line {line}: options are not closed by a second ':' in {text:?}")]
    MissingOptionsTerminator { line: usize, text: String },

    #[error("line {line}: no unescaped '::' between trigger and replacement in {text:?}")]
    MissingDelimiter { line: usize, text: String },

    #[error("line {line}: empty trigger in {text:?}")]
    EmptyTrigger { line: usize, text: String },

    #[error("line {line}: rule replaces {trigger:?} with itself")]
    NoOpRule { line: usize, trigger: String },

    #[error("line {line}: a rule cannot be both a prefix ('*') and a suffix ('?') match: {text:?}")]
    ConflictingMatchKinds { line: usize, text: String },

    #[error("rule file contains no rules")]
    Empty,
}

impl ParseError {
    /// 1-based source line the error refers to, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::MissingLeadingColon { line, .. }
            | Self::MissingOptionsTerminator { line, .. }
            | Self::MissingDelimiter { line, .. }
            | Self::EmptyTrigger { line, .. }
            | Self::NoOpRule { line, .. }
            | Self::ConflictingMatchKinds { line, .. } => Some(*line),
            Self::Io(_) | Self::Empty => None,
        }
    }
}

/// Result alias for rule-file operations.
pub type Result<T> = std::result::Result<T, ParseError>;
