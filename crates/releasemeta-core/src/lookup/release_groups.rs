use super::{DelimitedMatcher, ReleaseGroupMatcher};
use crate::error::Result;

/// Well-known release and subtitle groups. Entries are regex fragments;
/// longer names come before their prefixes.
const BUILTIN_GROUPS: &[&str] = &[
    // Chinese private trackers
    "CHDBits", "CHDWEB", "CHDTV", "CHDPAD", "CHD",
    "HDChina", "HDCTV", "HDC",
    "FRDS", "CMCT(?:V)?", "MTeam", "MWeb", "MPAD",
    "OurBits", "OurTV", "PbK", "Ao", "iLoveHD", "iLoveTV",
    "HDSky", "HDSWEB", "HDSTV", "HDS",
    "PTerWEB", "PTer", "WiKi", "TLF", "beAst(?:TV)?", "HHWEB", "HDHome", "HDH",
    "ADE", "ADWeb", "AGSV", "UBits", "QHstudIo", "CatEDU", "Ying",
    // Scene and international P2P
    "SPARKS", "FLUX", "NTb", "NTG", "FGT", "EVO", "TEPES", "CMRG", "RARBG",
    "DON", "EbP", "CtrlHD", "DEMAND", "ROVERS", "GECKOS", "playWEB", "TOMMY",
    // Fansub groups
    "Lilith-Raws", "NC-Raws", "ANi", "SweetSub", "Nekomoe kissaten", "LoliHouse",
];

/// The built-in release group list extended by configured groups.
#[derive(Debug, Clone)]
pub struct ReleaseGroups {
    matcher: Option<DelimitedMatcher>,
}

impl ReleaseGroups {
    /// Builds the matcher from the built-in list plus `custom` regex fragments.
    ///
    /// # Errors
    ///
    /// Returns `ReleaseMetaError::InvalidPattern` if a custom fragment is not a valid regex.
    pub fn new(custom: &[String]) -> Result<Self> {
        let groups: Vec<String> = custom
            .iter()
            .cloned()
            .chain(BUILTIN_GROUPS.iter().map(|g| g.to_string()))
            .collect();
        let matcher = DelimitedMatcher::new(r"\-@\[￡【&", &groups)?;
        Ok(Self { matcher })
    }
}

impl Default for ReleaseGroups {
    /// The built-in list alone.
    fn default() -> Self {
        Self::new(&[]).unwrap_or_else(|err| panic!("invalid built-in release group: {err}"))
    }
}

impl ReleaseGroupMatcher for ReleaseGroups {
    fn find(&self, title: &str) -> Option<String> {
        self.matcher.as_ref()?.find_all(title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_builtin_groups() {
        let groups = ReleaseGroups::default();
        assert_eq!(
            groups.find("The.Matrix.1999.1080p.BluRay.x264-CHD").as_deref(),
            Some("CHD")
        );
        assert_eq!(
            groups.find("Movie.2021.2160p.WEB-DL.H265-HHWEB@FRDS").as_deref(),
            Some("HHWEB@FRDS")
        );
        assert_eq!(
            groups.find("[Lilith-Raws] Title - 01 [1080p]").as_deref(),
            Some("Lilith-Raws")
        );
    }

    #[test]
    fn group_before_cjk_bracket() {
        let groups = ReleaseGroups::default();
        assert_eq!(
            groups.find("Movie.2020.1080p-CHD【中字】").as_deref(),
            Some("CHD")
        );
        assert_eq!(groups.find("Movie.2020.1080p-CHD]").as_deref(), Some("CHD"));
    }

    #[test]
    fn group_must_be_delimited() {
        let groups = ReleaseGroups::new(&[]).unwrap();
        assert_eq!(groups.find("CHD Movie 2020"), None);
        assert_eq!(groups.find("Movie-CHDX"), None);
    }

    #[test]
    fn custom_groups_take_part() {
        let groups = ReleaseGroups::new(&["MyGroup".into()]).unwrap();
        assert_eq!(groups.find("Show.S01-MyGroup").as_deref(), Some("MyGroup"));
        assert!(ReleaseGroups::new(&["(bad".into()]).is_err());
    }
}
