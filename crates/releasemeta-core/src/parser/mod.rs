pub mod patterns;
pub mod preclean;
pub mod state;
pub mod tokenizer;
pub mod unified;

mod postprocess;
mod stages;
mod subtitle;

pub use patterns::{PATTERNS, Patterns};
pub use preclean::{PreClean, preclean};
pub use state::{Outcome, ParseState, TokenKind};
pub use tokenizer::{Token, TokenStream, Tokenizer};
pub use unified::{ParserConfig, TitleParser, parse, parse_file};
