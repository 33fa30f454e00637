pub mod lexer;
mod source;

pub use source::{Source, SourcePos};
