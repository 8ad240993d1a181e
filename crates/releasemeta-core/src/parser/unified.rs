//! # Parser Interface
//!
//! [`TitleParser`] ties the pipeline together: pre-clean, tokenize,
//! classify, assemble. Lookup tables are built once from [`ParserConfig`]
//! and shared by every call.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::lookup::{
    BuiltinPlatforms, Customization, CustomizationMatcher, PlatformEntry, ReleaseGroupMatcher,
    ReleaseGroups, StreamingPlatformRegistry,
};
use crate::parser::postprocess::assemble;
use crate::parser::preclean::{PreClean, preclean};
use crate::parser::stages::Classifier;
use crate::parser::state::ParseState;
use crate::types::{MediaType, MetaInfo};

const DEFAULT_MEDIA_EXTENSIONS: [&str; 18] = [
    "mp4", "mkv", "ts", "iso", "rmvb", "avi", "mov", "mpeg", "mpg", "wmv", "3gp", "asf", "m4v",
    "flv", "m2ts", "strm", "tp", "f4v",
];

/// Configuration for the parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Extra release group names (regex fragments) tried before the built-in list
    pub custom_release_groups: Vec<String>,
    /// Customization words (regex fragments) reported in `MetaInfo::customization`
    pub customization_words: Vec<String>,
    /// Streaming platforms added to the built-in table
    pub extra_platforms: Vec<PlatformEntry>,
    /// File extensions, without the dot, dropped from titles
    pub media_extensions: Vec<String>,
    /// Media type reported when the name itself decides nothing
    pub media_type_hint: Option<MediaType>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            custom_release_groups: Vec::new(),
            customization_words: Vec::new(),
            extra_platforms: Vec::new(),
            media_extensions: DEFAULT_MEDIA_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            media_type_hint: None,
        }
    }
}

impl ParserConfig {
    /// Create a new parser configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a configuration from JSON. Missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ReleaseMetaError::InvalidConfig` if the JSON does not describe a config.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Add release group names.
    pub fn with_release_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.custom_release_groups
            .extend(groups.into_iter().map(Into::into));
        self
    }

    /// Add customization words.
    pub fn with_customization_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.customization_words
            .extend(words.into_iter().map(Into::into));
        self
    }

    /// Add a streaming platform.
    pub fn with_platform(mut self, short: impl Into<String>, name: impl Into<String>) -> Self {
        self.extra_platforms.push(PlatformEntry::new(short, name));
        self
    }

    /// Replace the media extension list.
    pub fn with_media_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.media_extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Set the media type reported for otherwise undecided names.
    pub fn with_media_type_hint(mut self, hint: MediaType) -> Self {
        self.media_type_hint = Some(hint);
        self
    }
}

/// Parses release and file names into [`MetaInfo`] records.
///
/// Cheap to share: `parse` takes `&self` and keeps all per-call state local.
pub struct TitleParser {
    config: ParserConfig,
    platforms: Box<dyn StreamingPlatformRegistry>,
    groups: Box<dyn ReleaseGroupMatcher>,
    customization: Box<dyn CustomizationMatcher>,
}

impl TitleParser {
    /// Create a parser with the built-in lookup tables extended by `config`.
    ///
    /// # Errors
    ///
    /// Returns `ReleaseMetaError::InvalidPattern` if a configured release group
    /// or customization word is not a valid regex fragment.
    pub fn new(config: ParserConfig) -> Result<Self> {
        let platforms = BuiltinPlatforms::new(&config.extra_platforms);
        let groups = ReleaseGroups::new(&config.custom_release_groups)?;
        let customization = Customization::new(&config.customization_words)?;
        Ok(Self::with_collaborators(
            config,
            platforms,
            groups,
            customization,
        ))
    }

    /// Create a parser around caller-supplied lookup tables.
    pub fn with_collaborators(
        config: ParserConfig,
        platforms: impl StreamingPlatformRegistry + 'static,
        groups: impl ReleaseGroupMatcher + 'static,
        customization: impl CustomizationMatcher + 'static,
    ) -> Self {
        Self {
            config,
            platforms: Box::new(platforms),
            groups: Box::new(groups),
            customization: Box::new(customization),
        }
    }

    /// Parse a release name.
    ///
    /// # Arguments
    /// * `title` - The release or file name (file names without extension)
    /// * `subtitle` - Optional description carried next to the title
    /// * `isfile` - Whether `title` names a single file
    ///
    /// # Examples
    /// ```
    /// use releasemeta_core::TitleParser;
    ///
    /// let parser = TitleParser::default();
    /// let meta = parser.parse("Friends.S01E02.1080p.BluRay.x264-GROUP", None, false);
    ///
    /// assert_eq!(meta.roman_title.as_deref(), Some("Friends"));
    /// assert_eq!(meta.season_episode_label().as_deref(), Some("S01 E02"));
    /// ```
    pub fn parse(&self, title: &str, subtitle: Option<&str>, isfile: bool) -> MetaInfo {
        let mut meta = MetaInfo::new(title, subtitle, isfile);
        let trimmed = title.trim();
        if trimmed.is_empty() {
            debug!("empty title");
            return meta;
        }

        match preclean(trimmed, isfile) {
            PreClean::Episode(episode) => {
                debug!(episode, "numeric file name");
                meta.episode.set_begin(episode);
                meta.media_type = MediaType::Series;
                meta
            }
            PreClean::Season(season) => {
                debug!(season, "season folder name");
                meta.season.set_begin(season);
                meta.media_type = MediaType::Series;
                meta
            }
            PreClean::Text(text) => {
                let state = Classifier::new(
                    ParseState::new(meta),
                    &text,
                    self.platforms.as_ref(),
                    &self.config.media_extensions,
                )
                .run();
                let mut meta = assemble(state, self.groups.as_ref(), self.customization.as_ref());
                if meta.media_type == MediaType::Unknown {
                    if let Some(hint) = self.config.media_type_hint {
                        meta.media_type = hint;
                    }
                }
                debug!(title, %meta, "parsed");
                meta
            }
        }
    }

    /// Parse a file name, dropping a known media extension first.
    pub fn parse_file(&self, name: &str, subtitle: Option<&str>) -> MetaInfo {
        self.parse(self.strip_extension(name), subtitle, true)
    }

    /// `name` without its extension when the extension is a known media type.
    pub fn strip_extension<'a>(&self, name: &'a str) -> &'a str {
        match name.rsplit_once('.') {
            Some((stem, ext))
                if self
                    .config
                    .media_extensions
                    .iter()
                    .any(|known| known.trim_start_matches('.').eq_ignore_ascii_case(ext)) =>
            {
                stem
            }
            _ => name,
        }
    }

    /// Get the parser configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }
}

impl Default for TitleParser {
    fn default() -> Self {
        Self::with_collaborators(
            ParserConfig::default(),
            BuiltinPlatforms::default(),
            ReleaseGroups::default(),
            Customization::default(),
        )
    }
}

static DEFAULT_PARSER: LazyLock<TitleParser> = LazyLock::new(TitleParser::default);

/// Convenience function to parse a release name with default settings.
pub fn parse(title: &str) -> MetaInfo {
    DEFAULT_PARSER.parse(title, None, false)
}

/// Convenience function to parse a file name with default settings.
pub fn parse_file(name: &str) -> MetaInfo {
    DEFAULT_PARSER.parse_file(name, None)
}
