//! # Classification stages
//!
//! Every token runs through the stages below in a fixed order until one of
//! them returns [`Outcome::Stop`]. Stages only talk to each other through
//! [`ParseState`].

use tracing::trace;

use super::patterns::{PATTERNS, first_capture, numeric_captures};
use super::state::{Outcome, ParseState, TokenKind};
use super::tokenizer::{Token, TokenStream};
use crate::lookup::StreamingPlatformRegistry;
use crate::text::{is_ascii_number, is_native};

type Stage = fn(&mut Classifier<'_>, &Token) -> Outcome;

const STAGES: [(&str, Stage); 10] = [
    ("part", part),
    ("title", title),
    ("year", year),
    ("resolution", resolution),
    ("season", season),
    ("episode", episode),
    ("source", source_type),
    ("platform", streaming_platform),
    ("video", video_codec),
    ("audio", audio_codec),
];

/// Season/episode unit words that never belong to a title.
const UNIT_WORDS: [&str; 7] = ["共", "第", "季", "集", "话", "話", "期"];

/// Words that let a second native run join the title.
const MOVIE_WORDS: [&str; 4] = ["剧场版", "劇場版", "电影版", "電影版"];

const PART_SUFFIXES: [&str; 6] = ["A", "B", "C", "I", "II", "III"];

/// Tokens that confirm a streaming platform match.
const WEB_TOKENS: [&str; 4] = ["WEB", "DL", "WEBDL", "WEBRIP"];

/// Drives one token stream through the ordered stages.
pub(crate) struct Classifier<'a> {
    state: ParseState,
    tokens: TokenStream,
    platforms: &'a dyn StreamingPlatformRegistry,
    media_extensions: &'a [String],
}

impl<'a> Classifier<'a> {
    pub(crate) fn new(
        state: ParseState,
        text: &str,
        platforms: &'a dyn StreamingPlatformRegistry,
        media_extensions: &'a [String],
    ) -> Self {
        Self {
            state,
            tokens: TokenStream::new(text),
            platforms,
            media_extensions,
        }
    }

    /// Classifies every token and hands back the final state.
    pub(crate) fn run(mut self) -> ParseState {
        while let Some(token) = self.tokens.next_token().cloned() {
            for (name, stage) in STAGES {
                let outcome = stage(&mut self, &token);
                if outcome != Outcome::NoMatch {
                    trace!(stage = name, token = %token.text, ?outcome, "stage hit");
                }
                if outcome == Outcome::Stop {
                    break;
                }
            }
        }
        self.state
    }

    fn platform(&self, key: &str) -> Option<String> {
        if self.platforms.is_platform(key) {
            self.platforms.platform_name(key)
        } else {
            None
        }
    }

    fn platform_pair(&self, first: &str, second: &str) -> Option<String> {
        [" ", "-"]
            .iter()
            .find_map(|sep| self.platform(&format!("{first}{sep}{second}")))
    }

    fn is_media_extension(&self, text: &str) -> bool {
        self.media_extensions
            .iter()
            .any(|ext| ext.trim_start_matches('.').eq_ignore_ascii_case(text))
    }
}

fn is_part_suffix(text: &str) -> bool {
    let short_number = is_ascii_number(text)
        && (text.len() == 1 || (text.len() == 2 && text.starts_with('0')));
    short_number || PART_SUFFIXES.contains(&text.to_uppercase().as_str())
}

/// Only the first part marker and the suffix right after it are kept.
fn part(c: &mut Classifier<'_>, token: &Token) -> Outcome {
    if !c.state.has_title() || !c.state.has_part_context() {
        return Outcome::NoMatch;
    }
    let Some(marker) = PATTERNS
        .part
        .captures(&token.text)
        .and_then(|caps| caps.get(1))
    else {
        return Outcome::NoMatch;
    };

    let fresh = c.state.meta.part.is_none();
    if fresh {
        c.state.meta.part = Some(marker.as_str().to_string());
    }
    let suffix = c
        .tokens
        .peek()
        .map(|next| next.text.clone())
        .filter(|next| is_part_suffix(next));
    if let Some(suffix) = suffix {
        if fresh {
            if let Some(part) = c.state.meta.part.as_mut() {
                part.push_str(&suffix);
            }
        }
        c.tokens.skip();
    }
    c.state.last_kind = TokenKind::Part;
    Outcome::Stop
}

fn title(c: &mut Classifier<'_>, token: &Token) -> Outcome {
    let state = &mut c.state;
    recycle_pending(state);
    if state.halt_title {
        return Outcome::NoMatch;
    }

    let text = token.text.as_str();
    if text.eq_ignore_ascii_case("AKA") {
        state.halt_title = true;
        return Outcome::Stop;
    }
    if UNIT_WORDS.contains(&text) {
        state.last_kind = TokenKind::UnitWord;
        return Outcome::Continue;
    }
    if is_native(text) {
        state.last_kind = TokenKind::NativeTitle;
        if state.meta.native_title.is_none() {
            state.meta.native_title = Some(text.to_string());
        } else if !state.halt_native {
            if joins_native_title(text) {
                state.push_native(text);
            }
            state.halt_native = true;
        }
        return Outcome::Continue;
    }

    let p = &*PATTERNS;
    let numeric = is_ascii_number(text);
    if numeric || p.is_roman(text) {
        return title_number(state, text, !numeric);
    }
    if p.season.is_match(text) {
        // "Show Season 2019": the word belongs to the title.
        if let Some(roman) = state.meta.roman_title.as_mut() {
            if p.ends_with_season.is_match(roman) {
                roman.push(' ');
            }
        }
        state.halt_title = true;
        return Outcome::NoMatch;
    }
    if p.episode.is_match(text)
        || p.source.is_match(text)
        || p.effect.is_match(text)
        || p.resolution.is_match(text)
    {
        state.halt_title = true;
        return Outcome::NoMatch;
    }
    if c.is_media_extension(text) {
        return Outcome::NoMatch;
    }

    let state = &mut c.state;
    state.push_roman(text);
    state.last_kind = TokenKind::RomanTitle;
    Outcome::Continue
}

/// Flushes a buffered numeral into the romanized title once the next token arrives.
fn recycle_pending(state: &mut ParseState) {
    let Some(pending) = state.pending.take() else {
        return;
    };
    if state.meta.native_title.is_some() {
        return;
    }
    if state.meta.roman_title.is_none() {
        state.meta.roman_title = Some(pending);
    } else if state.meta.year.map(|y| y.to_string()).as_deref() != Some(pending.as_str()) {
        state.push_roman(&pending);
    }
    state.last_kind = TokenKind::RomanTitle;
}

fn joins_native_title(text: &str) -> bool {
    if MOVIE_WORDS.iter().any(|word| text.contains(word)) {
        return true;
    }
    !PATTERNS.native_noise.is_match(text)
        && !text.chars().any(|c| UNIT_WORDS.iter().any(|w| w.starts_with(c)))
}

fn title_number(state: &mut ParseState, text: &str, roman: bool) -> Outcome {
    if matches!(
        state.last_kind,
        TokenKind::UnitWord | TokenKind::SeasonKeyword | TokenKind::EpisodeKeyword
    ) {
        return Outcome::NoMatch;
    }
    if !state.has_title() {
        if state.pending.is_none() {
            state.pending = Some(text.to_string());
        }
        return Outcome::Continue;
    }
    // A zero-padded number after a title is almost always an episode.
    if text.starts_with('0') {
        return Outcome::NoMatch;
    }
    if !roman
        && state.last_kind == TokenKind::NativeTitle
        && text.parse::<u32>().is_ok_and(|n| n < 1900)
    {
        return Outcome::NoMatch;
    }
    if roman || text.len() < 4 {
        match state.last_kind {
            TokenKind::NativeTitle => state.push_native(text),
            TokenKind::RomanTitle => state.push_roman(text),
            _ => {}
        }
        return Outcome::Stop;
    }
    if text.len() == 4 && state.pending.is_none() {
        state.pending = Some(text.to_string());
        return Outcome::Continue;
    }
    Outcome::NoMatch
}

fn year(c: &mut Classifier<'_>, token: &Token) -> Outcome {
    let state = &mut c.state;
    let text = token.text.as_str();
    if !state.has_title() || text.len() != 4 || !is_ascii_number(text) {
        return Outcome::NoMatch;
    }
    let Ok(value) = text.parse::<u16>() else {
        return Outcome::NoMatch;
    };
    if value <= 1900 || value >= 2050 {
        return Outcome::NoMatch;
    }

    if state.meta.year.is_some() {
        // A second year-like number is title text.
        if let Some(roman) = state.meta.roman_title.as_mut() {
            roman.truncate(roman.trim_end().len());
            roman.push(' ');
            roman.push_str(text);
        } else {
            state.push_native(text);
        }
    } else {
        if let Some(roman) = state.meta.roman_title.as_mut() {
            if PATTERNS.ends_with_season.is_match(roman) {
                roman.push(' ');
            }
        }
        state.meta.year = Some(value);
    }
    state.classify(TokenKind::Year);
    Outcome::Stop
}

fn resolution(c: &mut Classifier<'_>, token: &Token) -> Outcome {
    let state = &mut c.state;
    if !state.has_title() {
        return Outcome::NoMatch;
    }
    let p = &*PATTERNS;
    let text = token.text.as_str();

    if p.resolution.is_match(text) {
        if state.meta.resolution.is_none() {
            if let Some(found) = first_capture(&p.resolution, text) {
                let mut value = found.to_lowercase();
                if is_ascii_number(&value) {
                    value.push('p');
                }
                state.meta.resolution = Some(value);
            }
        }
        state.classify(TokenKind::Resolution);
        return Outcome::Stop;
    }
    if let Some(found) = first_capture(&p.resolution_k, text) {
        if state.meta.resolution.is_none() {
            state.meta.resolution = Some(found.to_lowercase());
        }
        state.classify(TokenKind::Resolution);
        return Outcome::Stop;
    }
    Outcome::NoMatch
}

fn season(c: &mut Classifier<'_>, token: &Token) -> Outcome {
    let state = &mut c.state;
    let isfile = state.meta.isfile;
    let text = token.text.as_str();

    if PATTERNS.season.is_match(text) {
        for value in numeric_captures(&PATTERNS.season, text) {
            if state.meta.season.is_set() {
                state.meta.season.extend_to(value, isfile, 1);
            } else {
                state.meta.season.set_begin(value);
            }
        }
        state.last_kind = TokenKind::Season;
        state.halt_title = true;
        state.mark_series();
        return Outcome::Continue;
    }

    if is_ascii_number(text) {
        if state.last_kind == TokenKind::SeasonKeyword
            && !state.meta.season.is_set()
            && text.len() < 3
        {
            if let Ok(value) = text.parse() {
                state.meta.season.set_begin(value);
                state.classify(TokenKind::Season);
                state.mark_series();
                return Outcome::Stop;
            }
        }
        return Outcome::NoMatch;
    }

    if !state.meta.season.is_set() {
        if text.eq_ignore_ascii_case("SEASON") {
            state.last_kind = TokenKind::SeasonKeyword;
            return Outcome::Continue;
        }
        if state.meta.media_type.is_series() {
            state.meta.season.set_begin(1);
        }
    }
    Outcome::NoMatch
}

fn episode(c: &mut Classifier<'_>, token: &Token) -> Outcome {
    let state = &mut c.state;
    let isfile = state.meta.isfile;
    let text = token.text.as_str();

    if PATTERNS.episode.is_match(text) {
        for value in numeric_captures(&PATTERNS.episode, text) {
            if state.meta.episode.is_set() {
                state.meta.episode.extend_to(value, isfile, 2);
            } else {
                state.meta.episode.set_begin(value);
            }
        }
        state.classify(TokenKind::Episode);
        state.mark_series();
        return Outcome::Stop;
    }

    if is_ascii_number(text) {
        let Ok(value) = text.parse::<u32>() else {
            return Outcome::NoMatch;
        };
        let episode = &mut state.meta.episode;

        // "E01 03": range continuation.
        if episode.begin.is_some_and(|begin| value > begin)
            && episode.end.is_none()
            && text.len() < 5
            && state.last_kind == TokenKind::Episode
        {
            episode.extend_to(value, isfile, 2);
            state.mark_series();
            return Outcome::Stop;
        }

        // "Title - 05": a lone short number.
        if episode.begin.is_none()
            && (2..=3).contains(&text.len())
            && !matches!(state.last_kind, TokenKind::Year | TokenKind::VideoCodec)
            && state.pending.as_deref() != Some(text)
        {
            episode.set_begin(value);
            state.classify(TokenKind::Episode);
            state.mark_series();
            return Outcome::Stop;
        }

        if state.last_kind == TokenKind::EpisodeKeyword && episode.begin.is_none() && text.len() < 5
        {
            episode.set_begin(value);
            state.classify(TokenKind::Episode);
            state.mark_series();
            return Outcome::Stop;
        }
        return Outcome::NoMatch;
    }

    if text.eq_ignore_ascii_case("EPISODE") {
        state.last_kind = TokenKind::EpisodeKeyword;
        return Outcome::Continue;
    }
    Outcome::NoMatch
}

fn source_type(c: &mut Classifier<'_>, token: &Token) -> Outcome {
    let state = &mut c.state;
    if !state.has_title() {
        return Outcome::NoMatch;
    }
    let text = token.text.as_str();
    let upper = text.to_uppercase();
    let after_source = state.last_kind == TokenKind::Source;

    // Two-token combinations.
    let combined = match upper.as_str() {
        "DL" if after_source && state.last_text == "WEB" => Some("WEB-DL".to_string()),
        "RAY" if after_source && state.last_text == "BLU" => Some(if state.source == "UHD" {
            "UHD BluRay".to_string()
        } else {
            "BluRay".to_string()
        }),
        "WEBDL" => Some("WEB-DL".to_string()),
        "REMUX" if state.source.ends_with("BluRay") => Some(format!("{} REMUX", state.source)),
        "BLURAY" if state.source == "UHD" => Some("UHD BluRay".to_string()),
        _ => None,
    };
    if let Some(combined) = combined {
        state.source = combined;
        return Outcome::Stop;
    }

    let p = &*PATTERNS;
    if p.source.is_match(text) {
        if state.source.is_empty() {
            state.source = text.to_string();
        }
        state.last_text = upper;
        state.classify(TokenKind::Source);
        return Outcome::Stop;
    }
    if p.effect.is_match(text) {
        if !state.effects.iter().any(|e| e == text) {
            state.effects.push(text.to_string());
        }
        state.last_text = upper;
        state.classify(TokenKind::Effect);
        return Outcome::Stop;
    }
    Outcome::NoMatch
}

fn streaming_platform(c: &mut Classifier<'_>, token: &Token) -> Outcome {
    if !c.state.has_title() {
        return Outcome::NoMatch;
    }
    let text = token.text.as_str();
    let index = token.index;

    let mut found = c.platform(text).map(|name| (name, index, index));
    if found.is_none() && index > 0 {
        if let Some(prev) = c.tokens.get(index - 1) {
            found = c
                .platform_pair(&prev.text, text)
                .map(|name| (name, index - 1, index));
        }
    }
    if found.is_none() {
        let next = c
            .tokens
            .peek()
            .and_then(|next| c.platform_pair(text, &next.text));
        if let Some(name) = next {
            c.tokens.skip();
            found = Some((name, index, index + 1));
        }
    }
    let Some((name, first, last)) = found else {
        return Outcome::NoMatch;
    };

    let confirmed = c
        .tokens
        .window(first.saturating_sub(1), last + 2)
        .iter()
        .any(|t| WEB_TOKENS.contains(&t.text.to_uppercase().as_str()));
    if !confirmed {
        trace!(platform = %name, "unconfirmed platform");
        return Outcome::NoMatch;
    }
    c.state.meta.web_source = Some(name);
    Outcome::Stop
}

fn video_codec(c: &mut Classifier<'_>, token: &Token) -> Outcome {
    let state = &mut c.state;
    if !state.has_title() || !state.has_codec_context() {
        return Outcome::NoMatch;
    }
    let text = token.text.as_str();
    let upper = text.to_uppercase();

    if let Some(caps) = PATTERNS.video_codec.captures(text) {
        let value = if let Some(m) = caps.get(2) {
            m.as_str().to_uppercase()
        } else if let Some(m) = caps.get(3) {
            m.as_str().to_lowercase()
        } else {
            upper
        };
        match state.meta.video_codec.as_deref() {
            None => {
                state.last_text = value.clone();
                state.meta.video_codec = Some(value);
            }
            Some("10bit") => {
                state.meta.video_codec = Some(format!("{value} 10bit"));
                state.last_text = value;
            }
            Some(_) => {}
        }
        state.classify(TokenKind::VideoCodec);
        return Outcome::Stop;
    }

    let after_video = state.last_kind == TokenKind::VideoCodec;
    match upper.as_str() {
        "H" | "X" => {
            state.last_text = if upper == "H" { "H" } else { "x" }.to_string();
            state.classify(TokenKind::VideoCodec);
            Outcome::Stop
        }
        "264" | "265" if after_video && matches!(state.last_text.as_str(), "H" | "x") => {
            state.meta.video_codec = Some(format!("{}{text}", state.last_text));
            Outcome::Stop
        }
        _ if is_ascii_number(text)
            && after_video
            && matches!(state.last_text.as_str(), "VC" | "MPEG") =>
        {
            state.meta.video_codec = Some(format!("{}{text}", state.last_text));
            Outcome::Stop
        }
        "10BIT" => {
            state.last_kind = TokenKind::VideoCodec;
            match state.meta.video_codec.as_mut() {
                Some(codec) => codec.push_str(" 10bit"),
                None => state.meta.video_codec = Some("10bit".to_string()),
            }
            Outcome::Stop
        }
        _ => Outcome::NoMatch,
    }
}

fn audio_codec(c: &mut Classifier<'_>, token: &Token) -> Outcome {
    let state = &mut c.state;
    if !state.has_title() || !state.has_codec_context() {
        return Outcome::NoMatch;
    }
    let text = token.text.as_str();

    if let Some(keyword) = PATTERNS
        .audio_codec
        .captures(text)
        .and_then(|caps| caps.get(1))
    {
        let keyword = keyword.as_str();
        state.last_text = keyword.to_uppercase();
        match state.meta.audio_codec.as_mut() {
            None => state.meta.audio_codec = Some(keyword.to_string()),
            Some(codec) => {
                let sep = if codec.eq_ignore_ascii_case("DTS") { '-' } else { ' ' };
                codec.push(sep);
                codec.push_str(keyword);
            }
        }
        state.classify(TokenKind::AudioCodec);
        return Outcome::Stop;
    }

    // Channel layout: "TrueHD 7 1" -> "TrueHD 7.1", "DDP5 1" -> "DDP 5.1".
    if is_ascii_number(text) && state.last_kind == TokenKind::AudioCodec {
        if let Some(codec) = state.meta.audio_codec.as_mut() {
            if is_ascii_number(&state.last_text) {
                codec.push('.');
            } else if codec.ends_with(|ch: char| ch.is_ascii_digit()) {
                let digit = codec.split_off(codec.len() - 1);
                codec.push(' ');
                codec.push_str(&digit);
                codec.push('.');
            } else {
                codec.push(' ');
            }
            codec.push_str(text);
        }
        state.last_text = text.to_string();
        return Outcome::Stop;
    }
    Outcome::NoMatch
}
