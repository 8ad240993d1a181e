/// Parses an ASCII or CJK numeral such as `12`, `十二`, `二十` or `一百零五`.
///
/// Returns `None` for anything else.
#[must_use]
pub fn parse_cjk_number(s: &str) -> Option<u32> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if s.bytes().all(|b| b.is_ascii_digit()) {
        return s.parse().ok();
    }

    let mut total: u32 = 0;
    let mut section: u32 = 0;
    let mut digit: Option<u32> = None;
    for c in s.chars() {
        match c {
            '零' | '〇' => digit = Some(0),
            '一' => digit = Some(1),
            '二' | '两' => digit = Some(2),
            '三' => digit = Some(3),
            '四' => digit = Some(4),
            '五' => digit = Some(5),
            '六' => digit = Some(6),
            '七' => digit = Some(7),
            '八' => digit = Some(8),
            '九' => digit = Some(9),
            '0'..='9' => {
                let d = c.to_digit(10)?;
                digit = Some(digit.unwrap_or(0).checked_mul(10)?.checked_add(d)?);
            }
            '十' | '百' | '千' => {
                let unit = match c {
                    '十' => 10,
                    '百' => 100,
                    _ => 1000,
                };
                section = section.checked_add(digit.take().unwrap_or(1).checked_mul(unit)?)?;
            }
            '万' => {
                section = section.checked_add(digit.take().unwrap_or(0))?;
                total = total.checked_add(section.checked_mul(10_000)?)?;
                section = 0;
            }
            _ => return None,
        }
    }
    total
        .checked_add(section)?
        .checked_add(digit.unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_digits() {
        assert_eq!(parse_cjk_number("12"), Some(12));
        assert_eq!(parse_cjk_number(" 03 "), Some(3));
    }

    #[test]
    fn simple_cjk() {
        assert_eq!(parse_cjk_number("三"), Some(3));
        assert_eq!(parse_cjk_number("十"), Some(10));
        assert_eq!(parse_cjk_number("十二"), Some(12));
        assert_eq!(parse_cjk_number("二十"), Some(20));
        assert_eq!(parse_cjk_number("二十四"), Some(24));
        assert_eq!(parse_cjk_number("两"), Some(2));
    }

    #[test]
    fn hundreds() {
        assert_eq!(parse_cjk_number("一百"), Some(100));
        assert_eq!(parse_cjk_number("一百零五"), Some(105));
        assert_eq!(parse_cjk_number("三百二十"), Some(320));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_cjk_number(""), None);
        assert_eq!(parse_cjk_number("S"), None);
        assert_eq!(parse_cjk_number("第三"), None);
    }
}
