pub mod media;
pub mod range;
pub mod result;

pub use media::MediaType;
pub use range::UnitRange;
pub use result::MetaInfo;
