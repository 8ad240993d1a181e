//! Compiled pattern library shared by every parse.
//!
//! All matchers are built once on first use and are read-only afterwards.

use std::sync::LazyLock;

use regex::Regex;

/// Pre-compiled matchers for the classification stages, pre-clean and subtitle scan.
pub struct Patterns {
    // Classification stages
    pub season: Regex,
    pub episode: Regex,
    pub part: Regex,
    pub roman: Regex,
    pub source: Regex,
    pub effect: Regex,
    pub resolution: Regex,
    pub resolution_k: Regex,
    pub video_codec: Regex,
    pub audio_codec: Regex,
    pub ends_with_season: Regex,
    pub native_noise: Regex,

    // Post-processing
    pub title_noise: Regex,
    pub diy_subtitle: Regex,
    pub diy_original: Regex,
    pub description_split: Regex,

    // Pre-clean
    pub season_only: Regex,
    pub leading_bracket: Regex,
    pub year_span: Regex,
    pub file_size: Regex,
    pub date_stamp: Regex,

    // Subtitle scan
    pub sub_marker: Regex,
    pub sub_season: Regex,
    pub sub_episode: Regex,
    pub sub_episode_all: Regex,
    pub sub_season_all: Regex,
    pub sub_episode_word: Regex,
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|err| panic!("invalid built-in pattern {pattern:?}: {err}"))
}

impl Patterns {
    fn new() -> Self {
        Self {
            season: compile(r"(?i)S(\d{3})|^S(\d{1,3})$|S(\d{1,3})E"),
            episode: compile(
                r"(?i)EP?(\d{2,4})$|^EP?(\d{1,4})$|^S\d{1,2}EP?(\d{1,4})$|S\d{2}EP?(\d{2,4})",
            ),
            part: compile(
                r"(?i)^(PART[0-9ABI]{0,2}|CD[0-9]{0,2}|DVD[0-9]{0,2}|DISK[0-9]{0,2}|DISC[0-9]{0,2})$",
            ),
            roman: compile(r"^M*(C[MD]|D?C{0,3})(X[CL]|L?X{0,3})(I[XV]|V?I{0,3})$"),
            source: compile(
                r"(?i)^(BLURAY|HDTV|UHDTV|HDDVD|WEBRIP|DVDRIP|BDRIP|BLU|WEB|BD|HDRip|REMUX|UHD)$",
            ),
            effect: compile(
                r"(?i)^(SDR|HDR\d*|DOLBY|DOVI|DV|3D|REPACK|HLG|HDR10(?:\+|Plus)|EDR|HQ)$",
            ),
            resolution: compile(r"(?i)^[SBUHD]*(\d{3,4}[PI]+)|\d{3,4}X(\d{3,4})"),
            resolution_k: compile(r"(?i)^([248]+K)"),
            video_codec: compile(
                r"(?i)^((H26[45])|(x26[45])|AVC|HEVC|VC\d?|MPEG\d?|Xvid|DivX|AV1|HDR\d*|AVS(?:\+|[23]))$",
            ),
            audio_codec: compile(
                r"(?i)^(DTS\d?|DTSHD|DTSHDMA|Atmos|TrueHD\d?|AC3|\dAudios?|DDP\d?|DD\+\d?|DD\d?|LPCM\d?|AAC\d?|FLAC\d?|HD\d?|MA\d?|HR\d?|Opus\d?|Vorbis\d?|AV[3S]A)$",
            ),
            ends_with_season: compile(r"(?i)SEASON$"),
            native_noise: compile(r"版|字幕"),

            title_noise: compile(concat!(
                r"(?i)^PTS|^JADE|^AOD|^CHC|^[A-Z]{1,4}TV[\-0-9UVHDK]*",
                r"|HBO$|\s+HBO|\d{1,2}th|\d{1,2}bit|NETFLIX|AMAZON|IMAX|^3D|\s+3D|^BBC\s+|\s+BBC|BBC$|DISNEY\+?|XXX|\s+DC$",
                r"|[第\s共]+[0-9一二三四五六七八九十\-\s]+季",
                r"|[第\s共]+[0-9一二三四五六七八九十百零\-\s]+[集话話]",
                r"|连载|日剧|美剧|电视剧|动画片|动漫|欧美|西德|日韩|超高清|高清|无水印|下载|蓝光|翡翠台|梦幻天堂·龙网|★?\d*月?新番",
                r"|最终季|合集|[多中国英葡法俄日韩德意西印泰台港粤双文语简繁体特效内封官译外挂]+字幕|版本|出品|台版|港版|\w+字幕组|\w+字幕社",
                r"|未删减版|UNCUT$|UNRATE$|WITH EXTRAS$|RERIP$|SUBBED$|PROPER$|REPACK$|SEASON$|EPISODE$|Complete$|Extended$|Extended Version$",
                r"|S\d{2}\s*-\s*S\d{2}|S\d{2}|\s+S\d{1,2}|EP?\d{2,4}\s*-\s*EP?\d{2,4}|EP?\d{2,4}|\s+EP?\d{1,4}",
                r"|CD[\s.]*[1-9]|DVD[\s.]*[1-9]|DISK[\s.]*[1-9]|DISC[\s.]*[1-9]",
                r"|[248]K|\d{3,4}[PIX]+|\s+GB",
            )),
            diy_subtitle: compile(r"(?i)DIY"),
            diy_original: compile(r"(?i)-DIY@"),
            description_split: compile(r"[\s/|]+"),

            season_only: compile(r"^Season\s+(\d{1,3})$|^S(\d{1,3})$"),
            leading_bracket: compile(r"^[\[【].+?[\]】]"),
            year_span: compile(r"([\s.]+)(\d{4})-(\d{4})"),
            file_size: compile(r"(?i)[0-9.]+\s*[MGT]i?B([A-Z]?)"),
            date_stamp: compile(r"\d{4}[\s._-]\d{1,2}[\s._-]\d{1,2}"),

            sub_marker: compile(r"[全第季集话話期幕]"),
            sub_season: compile(r"(?i)[第\s]+([0-9一二三四五六七八九十S\-]+)\s*季"),
            sub_episode: compile(r"(?i)[第\s]+([0-9一二三四五六七八九十百零EP\-]+)\s*[集话話期幕]"),
            sub_episode_all: compile(
                r"([0-9一二三四五六七八九十百零]+)\s*集\s*全|[全共]\s*([0-9一二三四五六七八九十百零]+)\s*[集话話期幕]",
            ),
            sub_season_all: compile(
                r"[全共]\s*([0-9一二三四五六七八九十]+)\s*季|([0-9一二三四五六七八九十]+)\s*季\s*全",
            ),
            sub_episode_word: compile(r"(?i)Episode\s+(\d{1,4})(?:\D|$)"),
        }
    }

    /// Returns `true` for an upper-case roman numeral such as `II` or `XIV`.
    #[must_use]
    pub fn is_roman(&self, token: &str) -> bool {
        token.starts_with(['M', 'D', 'C', 'L', 'X', 'V', 'I']) && self.roman.is_match(token)
    }
}

/// The process-wide pattern library.
pub static PATTERNS: LazyLock<Patterns> = LazyLock::new(Patterns::new);

/// Returns the first non-empty capture group of the first match that has one.
pub(crate) fn first_capture<'t>(re: &Regex, text: &'t str) -> Option<&'t str> {
    re.captures_iter(text).find_map(|caps| {
        caps.iter()
            .skip(1)
            .flatten()
            .map(|m| m.as_str())
            .find(|s| !s.is_empty())
    })
}

/// Every first non-empty capture per match, parsed as a number.
pub(crate) fn numeric_captures(re: &Regex, text: &str) -> Vec<u32> {
    re.captures_iter(text)
        .map_while(|caps| {
            caps.iter()
                .skip(1)
                .flatten()
                .map(|m| m.as_str())
                .find(|s| !s.is_empty())
                .and_then(|s| s.parse().ok())
        })
        .collect()
}
