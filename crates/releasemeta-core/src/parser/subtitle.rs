//! Season/episode scan over free text.
//!
//! Runs on the original title and, when that yields nothing, on the
//! subtitle. It never touches the title fields.

use regex::Regex;

use super::patterns::{PATTERNS, first_capture};
use crate::text::parse_cjk_number;
use crate::types::{MediaType, MetaInfo, UnitRange};

/// Characters that turn a number into a pack size ("全24集", "共3季").
const PACK_MARKERS: [char; 2] = ['全', '共'];

/// Scans `text` for season/episode markers. Returns `true` on any hit.
pub(crate) fn rescan(meta: &mut MetaInfo, text: &str) -> bool {
    let hit = if PATTERNS.sub_marker.is_match(text) {
        scan_markers(meta, text)
    } else {
        scan_episode_word(meta, text)
    };
    if hit {
        meta.media_type = MediaType::Series;
    }
    hit
}

fn scan_markers(meta: &mut MetaInfo, text: &str) -> bool {
    let p = &*PATTERNS;
    let isfile = meta.isfile;
    let mut hit = false;

    if let Some((begin, end)) = single_marker(&p.sub_season, text) {
        hit = true;
        if !meta.season.is_set() {
            meta.season.set_begin(begin);
        }
        if let Some(end) = end {
            meta.season.extend_to(end, isfile, 1);
        }
    }

    if let Some((begin, end)) = single_marker(&p.sub_episode, text) {
        hit = true;
        if !meta.episode.is_set() {
            meta.episode.set_begin(begin);
        }
        if let Some(end) = end {
            meta.episode.extend_to(end, isfile, 2);
        }
    }

    if let Some(total) = first_capture(&p.sub_episode_all, text).and_then(parse_cjk_number) {
        hit = true;
        // A single file cannot carry a whole pack.
        if !meta.episode.is_set() && !isfile {
            meta.episode = UnitRange {
                begin: None,
                end: None,
                total: Some(total),
            };
        }
    }

    if let Some(total) = first_capture(&p.sub_season_all, text).and_then(parse_cjk_number) {
        hit = true;
        if !meta.season.is_set() && !meta.episode.is_set() && total > 0 {
            meta.season.set_begin(1);
            meta.season.extend_to(total, isfile, 1);
        }
    }

    hit
}

fn scan_episode_word(meta: &mut MetaInfo, text: &str) -> bool {
    let Some(episode) =
        first_capture(&PATTERNS.sub_episode_word, text).and_then(|s| s.parse::<u32>().ok())
    else {
        return false;
    };
    if !meta.episode.is_set() {
        meta.episode.set_begin(episode);
    }
    true
}

/// First match of `re` that is not part of a pack-size phrase, as `(begin, end)`.
fn single_marker(re: &Regex, text: &str) -> Option<(u32, Option<u32>)> {
    re.captures_iter(text)
        .filter(|caps| {
            caps.get(0)
                .is_some_and(|m| !touches_pack_marker(text, m.start(), m.end()))
        })
        .find_map(|caps| parse_span(caps.get(1)?.as_str()))
}

fn touches_pack_marker(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].trim_end().chars().next_back();
    let after = text[end..].trim_start().chars().next();
    [before, after]
        .into_iter()
        .flatten()
        .any(|c| PACK_MARKERS.contains(&c))
}

/// `"2"`, `"1-3"`, `"S1-S3"`, `"E01-E05"` or CJK numerals.
fn parse_span(raw: &str) -> Option<(u32, Option<u32>)> {
    let mut parts = raw
        .split('-')
        .map(|part| part.trim_start_matches(['S', 's', 'E', 'e', 'P', 'p']))
        .filter(|part| !part.is_empty());
    let begin = parse_cjk_number(parts.next()?)?;
    let end = parts
        .next()
        .and_then(parse_cjk_number)
        .filter(|&end| end != begin);
    Some((begin, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(text: &str, isfile: bool) -> (bool, MetaInfo) {
        let mut meta = MetaInfo::new("", None, isfile);
        let hit = rescan(&mut meta, text);
        (hit, meta)
    }

    #[test]
    fn single_season_and_episode() {
        let (hit, meta) = scan("犯罪现场 第2季 第5集", false);
        assert!(hit);
        assert_eq!(meta.season.begin, Some(2));
        assert_eq!(meta.episode.begin, Some(5));
        assert_eq!(meta.media_type, MediaType::Series);
    }

    #[test]
    fn cjk_numerals_and_ranges() {
        let (_, meta) = scan("第二季 第1-12集", false);
        assert_eq!(meta.season.begin, Some(2));
        assert_eq!(meta.episode.begin, Some(1));
        assert_eq!(meta.episode.end, Some(12));
        assert_eq!(meta.episode.total, Some(12));

        let (_, meta) = scan("第一至三季", false);
        assert_eq!(meta.season.begin, None);
    }

    #[test]
    fn ranges_collapse_for_files() {
        let (_, meta) = scan("第1-12集", true);
        assert_eq!(meta.episode.begin, Some(1));
        assert_eq!(meta.episode.end, None);
        assert_eq!(meta.episode.total, Some(1));
    }

    #[test]
    fn episode_pack_total() {
        let (hit, meta) = scan("全24集", false);
        assert!(hit);
        assert_eq!(meta.episode.begin, None);
        assert_eq!(meta.episode.total, Some(24));

        let (_, meta) = scan("全24集", true);
        assert_eq!(meta.episode.total, None);
    }

    #[test]
    fn season_pack_total() {
        let (_, meta) = scan("全3季", false);
        assert_eq!(meta.season.begin, Some(1));
        assert_eq!(meta.season.end, Some(3));
        assert_eq!(meta.season.total, Some(3));
    }

    #[test]
    fn pack_phrase_is_not_a_single_marker() {
        let (_, meta) = scan("全 3 季", false);
        assert_eq!(meta.season.begin, Some(1));
        assert_eq!(meta.season.total, Some(3));
    }

    #[test]
    fn english_episode_word() {
        let (hit, meta) = scan("Some Show Episode 7", false);
        assert!(hit);
        assert_eq!(meta.episode.begin, Some(7));

        let (hit, _) = scan("Episode 12345", false);
        assert!(!hit);
    }

    #[test]
    fn existing_values_are_kept() {
        let mut meta = MetaInfo::default();
        meta.season.set_begin(1);
        meta.episode.set_begin(3);
        rescan(&mut meta, "第2季 第9集");
        assert_eq!(meta.season.begin, Some(1));
        assert_eq!(meta.episode.begin, Some(3));
    }

    #[test]
    fn plain_text_is_no_hit() {
        let (hit, meta) = scan("Friends.S01E02.1080p", false);
        assert!(!hit);
        assert_eq!(meta.media_type, MediaType::Unknown);
    }
}
