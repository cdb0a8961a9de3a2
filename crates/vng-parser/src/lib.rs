//! vng-parser
//!
//! Line-oriented grammar and tolerant parser for VNG report text. Pure
//! functions over in-memory strings; reading files is the caller's job.

pub mod error;
pub mod grammar;
pub mod parser;

pub use error::{ParseFailure, ParsingError};
pub use parser::{parse, parse_many};
