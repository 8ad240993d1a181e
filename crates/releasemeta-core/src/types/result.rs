use serde::{Deserialize, Serialize};

use super::media::MediaType;
use super::range::UnitRange;
use crate::text;

/// The primary output of the title parser.
///
/// Holds every field recognized in a release or file name together with
/// the input it was derived from.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MetaInfo {
    /// Original, unmodified title.
    pub org_string: String,

    /// Subtitle / description supplied alongside the title.
    pub subtitle: Option<String>,

    /// Whether the title is a file name (extension already removed).
    pub isfile: bool,

    /// Movie, series or unknown.
    pub media_type: MediaType,

    /// Title written in native (CJK) script.
    pub native_title: Option<String>,

    /// Title written in Latin script.
    pub roman_title: Option<String>,

    /// Release year, strictly between 1900 and 2050.
    pub year: Option<u16>,

    /// Season span.
    pub season: UnitRange,

    /// Episode span.
    pub episode: UnitRange,

    /// Part / disc marker (e.g. "CD1", "Part2").
    pub part: Option<String>,

    /// Resolution tag (e.g. "1080p", "4k").
    pub resolution: Option<String>,

    /// Distribution source (e.g. "WEB-DL", "UHD BluRay REMUX").
    pub source: Option<String>,

    /// Effect tags (HDR, DV, ...) in display order.
    pub effects: Vec<String>,

    /// Video codec (e.g. "x265", "H264 10bit").
    pub video_codec: Option<String>,

    /// Audio codec with channel layout (e.g. "TrueHD 7.1").
    pub audio_codec: Option<String>,

    /// Streaming platform the release was ripped from.
    pub web_source: Option<String>,

    /// Release / subtitle groups, joined with `@`.
    pub resource_team: Option<String>,

    /// User-configured customization words found in the title, joined with `@`.
    pub customization: Option<String>,
}

impl MetaInfo {
    /// Creates an empty record for the given input.
    #[must_use]
    pub fn new(org_string: impl Into<String>, subtitle: Option<&str>, isfile: bool) -> Self {
        Self {
            org_string: org_string.into(),
            subtitle: subtitle.map(str::to_string),
            isfile,
            ..Self::default()
        }
    }

    /// The preferred display name.
    ///
    /// A purely native title wins, then the romanized title, then any native title.
    #[must_use]
    pub fn name(&self) -> &str {
        match (&self.native_title, &self.roman_title) {
            (Some(native), _) if text::is_all_native(native) => native,
            (_, Some(roman)) => roman,
            (Some(native), None) => native,
            (None, None) => "",
        }
    }

    /// Returns `true` if either title was recognized.
    #[must_use]
    pub fn has_title(&self) -> bool {
        self.native_title.is_some() || self.roman_title.is_some()
    }

    /// `S01` or `S01-S03`.
    #[must_use]
    pub fn season_label(&self) -> Option<String> {
        self.season.label('S')
    }

    /// `E05` or `E01-E03`.
    #[must_use]
    pub fn episode_label(&self) -> Option<String> {
        self.episode.label('E')
    }

    /// `S01 E01-E03`, whichever parts are known.
    #[must_use]
    pub fn season_episode_label(&self) -> Option<String> {
        match (self.season_label(), self.episode_label()) {
            (Some(season), Some(episode)) => Some(format!("{season} {episode}")),
            (season, episode) => season.or(episode),
        }
    }

    /// Source followed by effect tags, e.g. `UHD BluRay REMUX HDR10 DV`.
    #[must_use]
    pub fn edition(&self) -> Option<String> {
        let parts: Vec<&str> = self
            .source
            .iter()
            .map(String::as_str)
            .chain(self.effects.iter().map(String::as_str))
            .collect();
        (!parts.is_empty()).then(|| parts.join(" "))
    }

    /// Edition followed by resolution, e.g. `BluRay 1080p`.
    #[must_use]
    pub fn resource_term(&self) -> Option<String> {
        match (self.edition(), &self.resolution) {
            (Some(edition), Some(res)) => Some(format!("{edition} {res}")),
            (edition, res) => edition.or_else(|| res.clone()),
        }
    }

    /// Every season number covered.
    #[must_use]
    pub fn season_list(&self) -> Vec<u32> {
        self.season.list()
    }

    /// Every episode number covered.
    #[must_use]
    pub fn episode_list(&self) -> Vec<u32> {
        self.episode.list()
    }

    /// Returns `true` if season `n` is covered.
    #[must_use]
    pub fn is_in_season(&self, n: u32) -> bool {
        self.season.contains(n)
    }

    /// Returns `true` if episode `n` is covered.
    #[must_use]
    pub fn is_in_episode(&self, n: u32) -> bool {
        self.episode.contains(n)
    }
}

impl std::fmt::Display for MetaInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MetaInfo(type={}", self.media_type)?;
        let name = self.name();
        if !name.is_empty() {
            write!(f, ", name={name:?}")?;
        }
        if let Some(year) = self.year {
            write!(f, ", year={year}")?;
        }
        if let Some(se) = self.season_episode_label() {
            write!(f, ", {se}")?;
        }
        if let Some(term) = self.resource_term() {
            write!(f, ", {term}")?;
        }
        write!(f, ")")
    }
}
