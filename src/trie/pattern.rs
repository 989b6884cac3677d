//! Segment compiler.
//!
//! # Responsibilities
//! - Parse `<name>` / `<name:type>` placeholders inside one path segment
//! - Substitute each placeholder with its store fragment
//! - Match a request segment and extract parameter values
//!
//! # Design Decisions
//! - Segments without placeholders are compared by string equality; regex
//!   metacharacters in literal segments are never interpreted
//! - Compiled segments are anchored to the whole segment
//! - Each placeholder is wrapped in a private named group so capture groups
//!   inside custom fragments do not shift the parameter zip

use std::fmt;
use std::fmt::Write as _;
use std::sync::LazyLock;

use regex::Regex;

use crate::trie::error::{TrieError, TrieResult};
use crate::trie::store::{default_store, PatternStore, WILDCARD};

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<(\w+)(?::([\w*]+))?>").expect("placeholder grammar is a valid regex")
});

const GROUP_PREFIX: &str = "__seg";

/// Precedence class of a segment. Siblings are tried in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SegmentKind {
    /// No placeholders; exact string comparison.
    Literal,
    /// One or more typed placeholders.
    Typed,
    /// A single `*` placeholder capturing the rest of the path.
    Wildcard,
}

#[derive(Debug, Clone)]
enum Matcher {
    Literal,
    Compiled {
        regex: Regex,
        /// Capture group index for each entry of `params`.
        slots: Vec<usize>,
    },
}

/// Compiled form of one raw path segment.
#[derive(Debug, Clone)]
pub struct Pattern {
    raw: String,
    source: String,
    params: Vec<String>,
    matcher: Matcher,
    match_everything: bool,
}

impl Pattern {
    /// Compile `segment` against the process-wide default store.
    pub fn new(segment: &str) -> TrieResult<Self> {
        Self::with_store(segment, &default_store())
    }

    /// Compile `segment` resolving placeholder types through `store`.
    pub fn with_store(segment: &str, store: &PatternStore) -> TrieResult<Self> {
        let mut params = Vec::new();
        let mut source = String::with_capacity(segment.len());
        let mut anchored = String::from("^(?:");
        let mut wildcard_seen = false;
        let mut last = 0;

        for caps in PLACEHOLDER.captures_iter(segment) {
            let whole = caps.get(0).expect("group 0 always participates");
            let gap = &segment[last..whole.start()];
            check_literal_text(segment, gap)?;

            let kind = caps.get(2).map_or("", |m| m.as_str());
            let fragment = store.get_pattern(kind);
            wildcard_seen |= kind == WILDCARD;

            source.push_str(gap);
            source.push_str(&fragment);
            anchored.push_str(gap);
            let _ = write!(anchored, "(?P<{GROUP_PREFIX}{}>{fragment})", params.len());

            params.push(caps[1].to_string());
            last = whole.end();
        }

        let tail = &segment[last..];
        check_literal_text(segment, tail)?;

        if params.is_empty() {
            return Ok(Self {
                raw: segment.to_string(),
                source: segment.to_string(),
                params,
                matcher: Matcher::Literal,
                match_everything: false,
            });
        }

        source.push_str(tail);
        anchored.push_str(tail);
        anchored.push_str(")$");

        let regex = Regex::new(&anchored).map_err(|source| TrieError::InvalidRegex {
            pattern: segment.to_string(),
            source,
        })?;
        let slots = (0..params.len())
            .map(|i| {
                let group = format!("{GROUP_PREFIX}{i}");
                regex
                    .capture_names()
                    .position(|name| name == Some(group.as_str()))
                    .ok_or_else(|| {
                        TrieError::malformed(segment, "fragment shadows a placeholder group")
                    })
            })
            .collect::<TrieResult<Vec<_>>>()?;

        Ok(Self {
            raw: segment.to_string(),
            source,
            match_everything: params.len() == 1 && wildcard_seen,
            params,
            matcher: Matcher::Compiled { regex, slots },
        })
    }

    /// Match one request segment.
    ///
    /// Returns the `(name, value)` pairs in placeholder order, or `None` when
    /// the segment does not match. Literal segments yield an empty list.
    pub fn matches(&self, segment: &str) -> Option<Vec<(String, String)>> {
        match &self.matcher {
            Matcher::Literal => (self.raw == segment).then(Vec::new),
            Matcher::Compiled { regex, slots } => {
                let caps = regex.captures(segment)?;
                let values = self
                    .params
                    .iter()
                    .zip(slots)
                    .map(|(name, &slot)| {
                        let value = caps.get(slot).map_or("", |m| m.as_str());
                        (name.clone(), value.to_string())
                    })
                    .collect();
                Some(values)
            }
        }
    }

    /// True if the uncompiled segment text equals `segment` verbatim.
    pub fn equal_to_literal(&self, segment: &str) -> bool {
        self.raw == segment
    }

    /// True when the segment is a single `*` placeholder.
    pub fn match_everything(&self) -> bool {
        self.match_everything
    }

    /// True when the segment contained at least one placeholder.
    pub fn is_compiled(&self) -> bool {
        matches!(self.matcher, Matcher::Compiled { .. })
    }

    pub fn kind(&self) -> SegmentKind {
        if self.match_everything {
            SegmentKind::Wildcard
        } else if self.is_compiled() {
            SegmentKind::Typed
        } else {
            SegmentKind::Literal
        }
    }

    /// The raw segment text this pattern was compiled from.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The segment text with placeholders replaced by their fragments.
    pub fn regex_source(&self) -> &str {
        &self.source
    }

    /// Parameter names in order of appearance.
    pub fn params(&self) -> &[String] {
        &self.params
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Text outside placeholders must not contain stray angle brackets.
fn check_literal_text(segment: &str, text: &str) -> TrieResult<()> {
    if text.contains(['<', '>']) {
        return Err(TrieError::malformed(
            segment,
            "`<` or `>` outside a well-formed placeholder",
        ));
    }
    Ok(())
}
