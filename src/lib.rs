//! Quote-aware whitespace word splitting.
//!
//! A line is split on whitespace, except inside `"..."` or `"""..."""` spans,
//! which become single words. One trailing comma is dropped from unquoted words.

pub mod lines;
pub mod quoted;
pub mod tokenizer;

pub use lines::{split_file, split_lines};
pub use quoted::{QuoteStyle, QuotedSpan};
pub use tokenizer::{split_optional, split_to_words};
