// Lightweight line lexer for Swift-like source
//
// Not a Swift tokenizer: it only finds declaration keywords, access keywords,
// attributes and braces, and skips everything it does not recognise.

mod comments;
mod scanner;
mod strings;
pub mod token;


pub use scanner::{analyse, analyse_lines, LexerState};
pub use token::{Keyword, SingleCharacter, Token};
