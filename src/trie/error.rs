//! Error definitions for pattern registration and trie construction.

use thiserror::Error;

/// Errors raised while registering pattern types or path patterns.
///
/// Lookups never fail with an error; a path that matches nothing is reported
/// as `None` / `false` by the trie.
#[derive(Debug, Error)]
pub enum TrieError {
    /// A pattern type name was registered twice in the same store.
    #[error("pattern type `{0}` is already registered")]
    DuplicateName(String),

    /// The full pattern string is already registered in the trie.
    #[error("pattern `{0}` is already registered")]
    DuplicatePattern(String),

    /// Placeholder syntax inside a segment (or the pattern itself) is invalid.
    #[error("malformed pattern `{pattern}`: {reason}")]
    MalformedPattern { pattern: String, reason: String },

    /// The regular expression generated for a segment failed to compile.
    #[error("invalid regular expression for `{pattern}`: {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The segment delimiter must contain at least one character.
    #[error("segment delimiter must not be empty")]
    EmptyDelimiter,
}

impl TrieError {
    pub(crate) fn malformed(pattern: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedPattern {
            pattern: pattern.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for trie operations.
pub type TrieResult<T> = Result<T, TrieError>;
