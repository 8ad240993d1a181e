use super::{CustomizationMatcher, DelimitedMatcher};
use crate::error::Result;

/// Matches user-configured customization words (regex fragments).
#[derive(Debug, Clone, Default)]
pub struct Customization {
    matcher: Option<DelimitedMatcher>,
}

impl Customization {
    /// # Errors
    ///
    /// Returns `ReleaseMetaError::InvalidPattern` if a word is not a valid regex fragment.
    pub fn new(words: &[String]) -> Result<Self> {
        let matcher = DelimitedMatcher::new(r"\-@\[￡【&.\s", words)?;
        Ok(Self { matcher })
    }
}

impl CustomizationMatcher for Customization {
    fn find(&self, title: &str) -> Option<String> {
        self.matcher.as_ref()?.find_all(title)
    }
}
