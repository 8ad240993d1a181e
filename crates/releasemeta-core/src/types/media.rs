use std::fmt;

use serde::{Deserialize, Serialize};

/// Coarse classification of a parsed release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MediaType {
    /// Nothing in the name decided the type.
    #[default]
    Unknown,
    /// A feature film.
    Movie,
    /// A TV series, season pack or episode.
    Series,
}

impl MediaType {
    /// Returns `true` for [`MediaType::Series`].
    #[must_use]
    pub fn is_series(self) -> bool {
        matches!(self, Self::Series)
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => write!(f, "Unknown"),
            Self::Movie => write!(f, "Movie"),
            Self::Series => write!(f, "Series"),
        }
    }
}
