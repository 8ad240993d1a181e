//! Script detection and small string helpers shared by the parser stages.

pub mod numerals;
pub mod pinyin;

pub use numerals::parse_cjk_number;
pub use pinyin::is_pinyin;

/// Returns `true` for CJK ideographs.
#[must_use]
pub fn is_native_char(c: char) -> bool {
    matches!(c, '\u{4e00}'..='\u{9fff}' | '\u{3400}'..='\u{4dbf}' | '\u{f900}'..='\u{faff}')
}

/// Returns `true` if the text contains any native-script character.
#[must_use]
pub fn is_native(s: &str) -> bool {
    s.chars().any(is_native_char)
}

/// Returns `true` if every non-space character is native script.
#[must_use]
pub fn is_all_native(s: &str) -> bool {
    let mut seen = false;
    for c in s.chars().filter(|c| !c.is_whitespace()) {
        if !is_native_char(c) {
            return false;
        }
        seen = true;
    }
    seen
}

/// Returns `true` for a non-empty run of ASCII digits.
#[must_use]
pub fn is_ascii_number(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Upper-cases the first letter of every alphabetic run and lower-cases the rest.
#[must_use]
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

/// Collapses whitespace runs into single spaces and trims the ends.
#[must_use]
pub fn squash_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_detection() {
        assert!(is_native("犯罪现场"));
        assert!(is_native("第2季"));
        assert!(!is_native("Crime Scene"));
        assert!(is_all_native("犯罪 现场"));
        assert!(!is_all_native("犯罪现场2"));
        assert!(!is_all_native("   "));
    }

    #[test]
    fn ascii_numbers() {
        assert!(is_ascii_number("0123"));
        assert!(!is_ascii_number(""));
        assert!(!is_ascii_number("12a"));
        assert!(!is_ascii_number("١٢"));
    }

    #[test]
    fn title_case_follows_word_boundaries() {
        assert_eq!(title_case("the matrix"), "The Matrix");
        assert_eq!(title_case("CRIME SCENE"), "Crime Scene");
        assert_eq!(title_case("x264 rip"), "X264 Rip");
        assert_eq!(title_case("犯罪 abc"), "犯罪 Abc");
    }

    #[test]
    fn squash() {
        assert_eq!(squash_whitespace("  a   b \t c "), "a b c");
    }
}
