//! Exclusion pattern matching.
//!
//! Patterns use standard glob syntax (`*`, `?`, `[...]`). A relative pattern
//! is matched against the trailing components of a path, so `venv` excludes
//! `venv`, `app/venv` and `app/lib/venv` alike, while `tests/*.py` only
//! excludes `.py` files directly inside some `tests` directory. A pattern
//! starting with `/` is anchored and must match the whole path. As a last
//! resort every pattern is also tried as a glob over the full path, which
//! lets `src/**/generated` style patterns work.
//!
//! Wildcards never cross a `/`: `*`, `?` and `[...]` match within a single
//! component, and only an explicit `**` spans directories.

use std::borrow::Cow;
use std::path::{Component, Path};

use glob::{MatchOptions, Pattern};

use super::{WalkError, WalkResult};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// A single compiled exclusion pattern.
#[derive(Debug, Clone)]
pub struct ExclusionPattern {
    whole: Pattern,
    components: Vec<Pattern>,
    anchored: bool,
}

impl ExclusionPattern {
    /// Compile a glob-style exclusion pattern.
    pub fn new(raw: &str) -> WalkResult<Self> {
        let invalid = |source| WalkError::InvalidPattern {
            pattern: raw.to_string(),
            source,
        };

        let trimmed = raw.trim_end_matches('/');
        let anchored = trimmed.starts_with('/');
        let components = trimmed
            .split('/')
            .filter(|part| !part.is_empty() && *part != ".")
            .map(Pattern::new)
            .collect::<Result<Vec<_>, _>>()
            .map_err(invalid)?;
        let whole = Pattern::new(trimmed.trim_start_matches('/')).map_err(invalid)?;

        Ok(Self {
            whole,
            components,
            anchored,
        })
    }

    /// Returns true if `path` matches this pattern.
    pub fn matches(&self, path: &Path) -> bool {
        if self.components.is_empty() {
            return false;
        }

        let parts: Vec<Cow<'_, str>> = path
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy()),
                _ => None,
            })
            .collect();

        if parts.len() < self.components.len() {
            return false;
        }

        let tail_matches = |offset: usize| {
            self.components
                .iter()
                .zip(&parts[offset..])
                .all(|(pattern, part)| pattern.matches_with(part, MATCH_OPTIONS))
        };

        if self.anchored {
            return parts.len() == self.components.len() && tail_matches(0);
        }

        tail_matches(parts.len() - self.components.len())
            || self.whole.matches_with(&parts.join("/"), MATCH_OPTIONS)
    }
}

/// The fixed set of exclusion patterns used for one traversal.
#[derive(Debug, Clone, Default)]
pub struct ExclusionSet {
    patterns: Vec<ExclusionPattern>,
}

impl ExclusionSet {
    /// Compile every pattern, failing on the first invalid one.
    pub fn new<I, S>(patterns: I) -> WalkResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| ExclusionPattern::new(p.as_ref()))
            .collect::<WalkResult<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// Returns true if any pattern matches `path`.
    pub fn matches(&self, path: &Path) -> bool {
        matches(path, &self.patterns)
    }

}

/// Returns true if `path` matches ANY of `patterns`. Stops at the first match.
pub fn matches(path: &Path, patterns: &[ExclusionPattern]) -> bool {
    patterns.iter().any(|pattern| pattern.matches(path))
}
