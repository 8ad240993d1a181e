//! Turns the final classifier state into a [`MetaInfo`].

use super::patterns::PATTERNS;
use super::state::ParseState;
use super::subtitle::rescan;
use crate::lookup::{CustomizationMatcher, ReleaseGroupMatcher};
use crate::text::{is_ascii_number, is_native, is_pinyin, squash_whitespace, title_case};
use crate::types::{MediaType, MetaInfo};

/// Assembles the record: effects, source, subtitle scan, title cleanup and lookups.
pub(crate) fn assemble(
    state: ParseState,
    groups: &dyn ReleaseGroupMatcher,
    customization: &dyn CustomizationMatcher,
) -> MetaInfo {
    let ParseState {
        mut meta,
        mut effects,
        source,
        ..
    } = state;

    effects.reverse();
    meta.effects = effects;

    let source = source.trim();
    if !source.is_empty() {
        let mut source = source.to_string();
        if source.contains("BluRay") && has_diy_marker(&meta) {
            source.push_str(" DIY");
        }
        meta.source = Some(source);
    }

    let original = meta.org_string.clone();
    if !rescan(&mut meta, &original) {
        if let Some(subtitle) = meta.subtitle.clone() {
            rescan(&mut meta, &subtitle);
        }
    }

    meta.native_title = clean_title(meta.native_title.take());
    meta.roman_title = clean_title(meta.roman_title.take()).map(|t| title_case(&t));
    reinterpret_short_number(&mut meta);

    if meta
        .part
        .as_deref()
        .is_some_and(|part| part.eq_ignore_ascii_case("PART"))
    {
        meta.part = None;
    }

    recover_native_title(&mut meta);

    meta.resource_team = groups.find(&meta.org_string);
    meta.customization = customization.find(&meta.org_string);
    meta
}

fn has_diy_marker(meta: &MetaInfo) -> bool {
    let p = &*PATTERNS;
    meta.subtitle
        .as_deref()
        .is_some_and(|sub| p.diy_subtitle.is_match(sub))
        || p.diy_original.is_match(&meta.org_string)
}

/// Strips noise phrases and collapses whitespace; empty becomes `None`.
fn clean_title(title: Option<String>) -> Option<String> {
    let title = title?;
    let cleaned = squash_whitespace(&PATTERNS.title_noise.replace_all(&title, ""));
    (!cleaned.is_empty()).then_some(cleaned)
}

/// A title that is only a small number is really an episode.
fn reinterpret_short_number(meta: &mut MetaInfo) {
    let Some(number) = meta
        .roman_title
        .as_deref()
        .filter(|title| is_ascii_number(title))
        .and_then(|title| title.parse::<u32>().ok())
    else {
        return;
    };
    let structural = meta.year.is_some()
        || meta.season.is_set()
        || meta.resolution.is_some()
        || meta.source.is_some()
        || meta.audio_codec.is_some()
        || meta.video_codec.is_some();
    if number >= 1900 || structural {
        return;
    }

    if !meta.episode.is_set() {
        meta.episode.set_begin(number);
        meta.media_type = MediaType::Series;
        meta.roman_title = None;
    } else if meta.episode.contains(number) {
        meta.roman_title = None;
    }
}

/// Pulls a native title out of the subtitle when the romanized title is pinyin.
fn recover_native_title(meta: &mut MetaInfo) {
    if meta.native_title.is_some() {
        return;
    }
    let (Some(roman), Some(subtitle)) = (meta.roman_title.as_deref(), meta.subtitle.as_deref())
    else {
        return;
    };
    if !is_pinyin(roman) {
        return;
    }
    let Some(first) = PATTERNS.description_split.split(subtitle).next() else {
        return;
    };
    if is_native(first) && first.chars().count() == roman.split_whitespace().count() {
        meta.native_title = Some(first.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoLookup;

    impl ReleaseGroupMatcher for NoLookup {
        fn find(&self, _title: &str) -> Option<String> {
            None
        }
    }

    impl CustomizationMatcher for NoLookup {
        fn find(&self, _title: &str) -> Option<String> {
            None
        }
    }

    struct FixedGroup;

    impl ReleaseGroupMatcher for FixedGroup {
        fn find(&self, title: &str) -> Option<String> {
            title.ends_with("-GRP").then(|| "GRP".to_string())
        }
    }

    fn state(org: &str, subtitle: Option<&str>) -> ParseState {
        ParseState::new(MetaInfo::new(org, subtitle, false))
    }

    #[test]
    fn effects_are_reversed_and_source_trimmed() {
        let mut st = state("x", None);
        st.effects = vec!["HDR10".into(), "DV".into()];
        st.source = " WEB-DL ".into();
        let meta = assemble(st, &NoLookup, &NoLookup);
        assert_eq!(meta.effects, ["DV", "HDR10"]);
        assert_eq!(meta.source.as_deref(), Some("WEB-DL"));
    }

    #[test]
    fn diy_marker() {
        let mut st = state("Movie.2020.BluRay-DIY@Team", None);
        st.source = "BluRay".into();
        let meta = assemble(st, &NoLookup, &NoLookup);
        assert_eq!(meta.source.as_deref(), Some("BluRay DIY"));

        let mut st = state("Movie.2020.BluRay", Some("国配 DIY简繁字幕"));
        st.source = "BluRay".into();
        let meta = assemble(st, &NoLookup, &NoLookup);
        assert_eq!(meta.source.as_deref(), Some("BluRay DIY"));

        let mut st = state("Movie.2020.WEB", Some("DIY"));
        st.source = "WEB".into();
        let meta = assemble(st, &NoLookup, &NoLookup);
        assert_eq!(meta.source.as_deref(), Some("WEB"));
    }

    #[test]
    fn titles_are_cleaned_and_title_cased() {
        let mut st = state("x", None);
        st.meta.roman_title = Some("the  crime scene  Complete".into());
        st.meta.native_title = Some("犯罪现场 第二季".into());
        let meta = assemble(st, &NoLookup, &NoLookup);
        assert_eq!(meta.roman_title.as_deref(), Some("The Crime Scene"));
        assert_eq!(meta.native_title.as_deref(), Some("犯罪现场"));
    }

    #[test]
    fn noise_only_title_becomes_none() {
        let mut st = state("x", None);
        st.meta.roman_title = Some("Complete".into());
        let meta = assemble(st, &NoLookup, &NoLookup);
        assert_eq!(meta.roman_title, None);
    }

    #[test]
    fn short_number_title_becomes_episode() {
        let mut st = state("x", None);
        st.meta.roman_title = Some("12".into());
        let meta = assemble(st, &NoLookup, &NoLookup);
        assert_eq!(meta.roman_title, None);
        assert_eq!(meta.episode.begin, Some(12));

        let mut st = state("x", None);
        st.meta.roman_title = Some("12".into());
        st.meta.year = Some(2020);
        let meta = assemble(st, &NoLookup, &NoLookup);
        assert_eq!(meta.roman_title.as_deref(), Some("12"));
        assert_eq!(meta.episode.begin, None);
    }

    #[test]
    fn bare_part_is_dropped() {
        let mut st = state("x", None);
        st.meta.part = Some("Part".into());
        let meta = assemble(st, &NoLookup, &NoLookup);
        assert_eq!(meta.part, None);
    }

    #[test]
    fn native_title_from_subtitle() {
        let mut st = state("Fan.Zui.Xian.Chang.S01", Some("犯罪现场 / Crime Scene"));
        st.meta.roman_title = Some("Fan Zui Xian Chang".into());
        let meta = assemble(st, &NoLookup, &NoLookup);
        assert_eq!(meta.native_title.as_deref(), Some("犯罪现场"));

        let mut st = state("x", Some("犯罪现场 / Crime Scene"));
        st.meta.roman_title = Some("Fan Zui".into());
        let meta = assemble(st, &NoLookup, &NoLookup);
        assert_eq!(meta.native_title, None);
    }

    #[test]
    fn subtitle_scan_runs_when_title_has_nothing() {
        let st = state("Show.2020.1080p", Some("第3季 第7集"));
        let meta = assemble(st, &NoLookup, &NoLookup);
        assert_eq!(meta.season.begin, Some(3));
        assert_eq!(meta.episode.begin, Some(7));
        assert_eq!(meta.media_type, MediaType::Series);
    }

    #[test]
    fn lookups_use_the_original_string() {
        let st = state("Movie.2020.1080p-GRP", None);
        let meta = assemble(st, &FixedGroup, &NoLookup);
        assert_eq!(meta.resource_team.as_deref(), Some("GRP"));
        assert_eq!(meta.customization, None);
    }
}
