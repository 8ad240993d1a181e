//! # releasemeta core
//!
//! Extracts structured media metadata from release and file names: titles
//! in native and romanized script, year, season and episode spans,
//! resolution, source, codecs, streaming platform and release group.
//!
//! Parsing is deterministic, synchronous and never fails. Anything the
//! classifier cannot place ends up as title text.
//!
//! ## Quick Start
//!
//! ```rust
//! use releasemeta_core::{MediaType, parse};
//!
//! let meta = parse("The.Matrix.1999.2160p.UHD.BluRay.REMUX.HDR10.TrueHD.7.1");
//!
//! assert_eq!(meta.roman_title.as_deref(), Some("The Matrix"));
//! assert_eq!(meta.year, Some(1999));
//! assert_eq!(meta.source.as_deref(), Some("UHD BluRay REMUX"));
//! assert_eq!(meta.audio_codec.as_deref(), Some("TrueHD 7.1"));
//! assert_eq!(meta.media_type, MediaType::Unknown);
//! ```
pub mod error;
pub mod lookup;
pub mod parser;
pub mod text;
pub mod types;

// Re-export primary API
pub use error::{ReleaseMetaError, Result};
pub use lookup::{
    BuiltinPlatforms, Customization, CustomizationMatcher, PlatformEntry, ReleaseGroupMatcher,
    ReleaseGroups, StreamingPlatformRegistry,
};
pub use parser::{ParserConfig, TitleParser, parse, parse_file};
pub use types::{MediaType, MetaInfo, UnitRange};
