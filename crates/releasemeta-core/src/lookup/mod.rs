//! Read-only lookup tables consulted by the title parser.
//!
//! Each table is a trait so callers can plug in their own data; the crate
//! ships in-memory defaults built from [`ParserConfig`](crate::parser::ParserConfig).
//! A lookup never fails: anything unknown is simply "no match".

pub mod customization;
pub mod platforms;
pub mod release_groups;

use regex::Regex;

use crate::error::{ReleaseMetaError, Result};

pub use customization::Customization;
pub use platforms::{BuiltinPlatforms, PlatformEntry};
pub use release_groups::ReleaseGroups;

/// Streaming platforms that can appear in a release name (AMZN, NF, ...).
pub trait StreamingPlatformRegistry: Send + Sync {
    /// Returns `true` if `token` names a known platform.
    fn is_platform(&self, token: &str) -> bool;

    /// The display name of the platform `token` refers to.
    fn platform_name(&self, token: &str) -> Option<String>;
}

/// Finds release / subtitle groups in the original title.
pub trait ReleaseGroupMatcher: Send + Sync {
    /// All distinct groups found, joined with `@`.
    fn find(&self, title: &str) -> Option<String>;
}

/// Finds user-defined customization words in the original title.
pub trait CustomizationMatcher: Send + Sync {
    /// All distinct words found, joined with `@`.
    fn find(&self, title: &str) -> Option<String>;
}

/// Matches any of a set of alternatives when framed by release-name delimiters.
#[derive(Debug, Clone)]
pub(crate) struct DelimitedMatcher {
    re: Regex,
}

impl DelimitedMatcher {
    /// Compiles `alternatives` framed by `before` and the shared trailing delimiter set.
    pub(crate) fn new(before: &str, alternatives: &[String]) -> Result<Option<Self>> {
        let alternatives: Vec<&str> = alternatives
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect();
        if alternatives.is_empty() {
            return Ok(None);
        }
        let joined = alternatives.join("|");
        let pattern = format!(r"(?i)[{before}]({joined})[@.\s\]【】&]");
        let re = Regex::new(&pattern).map_err(|source| ReleaseMetaError::InvalidPattern {
            pattern: joined,
            source,
        })?;
        Ok(Some(Self { re }))
    }

    /// Every distinct match in order of appearance, joined with `@`.
    pub(crate) fn find_all(&self, title: &str) -> Option<String> {
        let haystack = format!("{title} ");
        let mut found: Vec<&str> = Vec::new();
        let mut pos = 0;
        while let Some(caps) = self.re.captures_at(&haystack, pos) {
            let Some(m) = caps.get(1) else {
                break;
            };
            if !m.is_empty() && !found.contains(&m.as_str()) {
                found.push(m.as_str());
            }
            pos = m.end().max(pos + 1);
        }
        (!found.is_empty()).then(|| found.join("@"))
    }
}
