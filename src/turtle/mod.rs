//! Turtle reading and writing for the site graph file.
//!
//! The reader covers the subset of Turtle a hand-edited graph file needs:
//! `@prefix`/`PREFIX`, `@base`/`BASE`, relative IRIs, blank nodes, string
//! literals with escapes, language tags, datatypes and bare numbers and
//! booleans. RDF collections are rejected.

mod chars;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod token;
pub mod writer;

pub use error::{Result, TurtleError};
pub use lexer::tokenize;
pub use parser::{parse, parse_into};
pub use writer::{escape_turtle_string, write_turtle};
