use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::StreamingPlatformRegistry;

/// One streaming platform: the tag used in release names and its display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformEntry {
    /// Tag as it appears in release names, e.g. `AMZN`.
    pub short: String,
    /// Display name, e.g. `Amazon`.
    pub name: String,
}

impl PlatformEntry {
    pub fn new(short: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            short: short.into(),
            name: name.into(),
        }
    }
}

const BUILTIN: &[(&str, &str)] = &[
    ("AMZN", "Amazon"),
    ("NF", "Netflix"),
    ("DSNP", "Disney+"),
    ("ATVP", "Apple TV+"),
    ("HMAX", "HBO Max"),
    ("HULU", "Hulu"),
    ("PCOK", "Peacock"),
    ("PMTP", "Paramount+"),
    ("iT", "iTunes"),
    ("CR", "Crunchyroll"),
    ("FUNI", "Funimation"),
    ("STAN", "Stan"),
    ("CRAV", "Crave"),
    ("iP", "BBC iPlayer"),
    ("SHO", "Showtime"),
    ("ROKU", "Roku"),
    ("TUBI", "Tubi"),
    ("KNPY", "Kanopy"),
    ("MUBI", "MUBI"),
    ("VIU", "Viu"),
    ("KKTV", "KKTV"),
    ("FriDay", "Friday Video"),
    ("MyVideo", "MyVideo"),
    ("LINETV", "LINE TV"),
    ("Baha", "Bahamut"),
    ("B-Global", "Bilibili Global"),
    ("BILI", "Bilibili"),
    ("IQ", "iQIYI"),
    ("iQIYI", "iQIYI"),
    ("WeTV", "WeTV"),
    ("TX", "Tencent Video"),
    ("Youku", "Youku"),
    ("MGTV", "Mango TV"),
    ("Hami", "Hami Video"),
    ("CatchPlay", "CATCHPLAY+"),
];

/// The built-in platform table, optionally extended by configuration.
///
/// Both the short tag and the display name are accepted, case-insensitively.
#[derive(Debug, Clone)]
pub struct BuiltinPlatforms {
    by_key: HashMap<String, String>,
}

impl BuiltinPlatforms {
    /// Builds the table from the built-in list plus `extra` entries.
    pub fn new(extra: &[PlatformEntry]) -> Self {
        let mut by_key = HashMap::new();
        let builtin = BUILTIN.iter().map(|&(short, name)| PlatformEntry::new(short, name));
        for entry in builtin.chain(extra.iter().cloned()) {
            by_key.insert(entry.short.to_uppercase(), entry.name.clone());
            by_key.insert(entry.name.to_uppercase(), entry.name);
        }
        Self { by_key }
    }

    /// Number of distinct lookup keys.
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

impl Default for BuiltinPlatforms {
    fn default() -> Self {
        Self::new(&[])
    }
}

impl StreamingPlatformRegistry for BuiltinPlatforms {
    fn is_platform(&self, token: &str) -> bool {
        self.by_key.contains_key(&token.to_uppercase())
    }

    fn platform_name(&self, token: &str) -> Option<String> {
        self.by_key.get(&token.to_uppercase()).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_and_full_names() {
        let platforms = BuiltinPlatforms::default();
        assert!(platforms.is_platform("AMZN"));
        assert!(platforms.is_platform("amzn"));
        assert_eq!(platforms.platform_name("NF").as_deref(), Some("Netflix"));
        assert_eq!(platforms.platform_name("hbo max").as_deref(), Some("HBO Max"));
        assert_eq!(platforms.platform_name("B-Global").as_deref(), Some("Bilibili Global"));
    }

    #[test]
    fn unknown_tokens_do_not_match() {
        let platforms = BuiltinPlatforms::default();
        assert!(!platforms.is_platform("GROUP"));
        assert!(!platforms.is_platform(""));
        assert_eq!(platforms.platform_name("1080p"), None);
    }

    #[test]
    fn extra_entries_extend_the_table() {
        let platforms = BuiltinPlatforms::new(&[PlatformEntry::new("ABC", "ABC iView")]);
        assert_eq!(platforms.platform_name("abc").as_deref(), Some("ABC iView"));
        assert!(!platforms.is_empty());
    }
}
