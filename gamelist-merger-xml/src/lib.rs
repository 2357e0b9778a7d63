//! Reading, validating and writing EmulationStation `gamelist.xml` files.

pub mod error;
pub mod parse;
mod schema;
pub mod validate;
pub mod write;

pub use error::XmlError;
pub use parse::{parse_gamelist, parse_gamelist_file};
pub use validate::{ValidationIssue, ValidationSummary, validate_document, validate_file};
pub use write::{write_gamelist, write_gamelist_file};
