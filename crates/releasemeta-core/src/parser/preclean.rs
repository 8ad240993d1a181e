//! Normalization applied to the raw title before tokenizing.

use std::borrow::Cow;

use regex::Captures;

use super::patterns::{PATTERNS, first_capture};
use crate::text::is_ascii_number;

/// What the pre-clean pass decided about the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreClean {
    /// A file named only by a short number: that is the episode.
    Episode(u32),
    /// The whole input is a season folder name (`Season 2`, `S02`).
    Season(u32),
    /// Text to tokenize.
    Text(String),
}

/// Runs the ordered pre-clean steps.
pub fn preclean(title: &str, isfile: bool) -> PreClean {
    if isfile && title.len() < 5 && is_ascii_number(title) {
        if let Ok(episode) = title.parse() {
            return PreClean::Episode(episode);
        }
    }

    let p = &*PATTERNS;
    if let Some(season) = first_capture(&p.season_only, title).and_then(|s| s.parse().ok()) {
        return PreClean::Season(season);
    }

    let text = p.leading_bracket.replacen(title, 1, "");
    let text = p.year_span.replace_all(&text, "${1}${2}");
    let text = strip_file_size(&text);
    let text = p.date_stamp.replace_all(&text, "");
    PreClean::Text(text.into_owned())
}

/// Removes `1.2 GB` style annotations that are not glued to a following word.
fn strip_file_size(text: &str) -> Cow<'_, str> {
    PATTERNS.file_size.replace_all(text, |caps: &Captures<'_>| {
        if caps.get(1).is_some_and(|m| !m.is_empty()) {
            caps[0].to_string()
        } else {
            String::new()
        }
    })
}
